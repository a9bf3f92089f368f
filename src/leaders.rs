use serde::Serialize;

use crate::standings::{Standings, StandingsRecord};
use crate::team::TeamId;

/// A team leading the league in one statistic.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Leader {
    pub team: TeamId,
    pub value: u32,
}

/// Regular-season highlights.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SeasonLeaders {
    /// First place overall
    pub presidents_trophy: TeamId,
    pub most_wins: Leader,
    pub most_points: Leader,
    pub fewest_losses: Leader,
}

impl SeasonLeaders {
    /// Leaders of a finished season, `None` for an empty league.
    ///
    /// Ties on a single statistic go to the team listed first.
    pub fn from_standings(standings: &Standings) -> Option<Self> {
        let top = standings.ranked().first().map(|r| r.team.clone())?;
        let records = standings.records();

        Some(SeasonLeaders {
            presidents_trophy: top,
            most_wins: best_by(records, |r| r.wins, |a, b| a > b)?,
            most_points: best_by(records, |r| r.points, |a, b| a > b)?,
            fewest_losses: best_by(records, |r| r.losses, |a, b| a < b)?,
        })
    }
}

fn best_by<F, B>(records: &[StandingsRecord], stat: F, better: B) -> Option<Leader>
where
    F: Fn(&StandingsRecord) -> u32,
    B: Fn(u32, u32) -> bool,
{
    let mut best: Option<&StandingsRecord> = None;
    for record in records {
        match best {
            Some(current) if !better(stat(record), stat(current)) => {}
            _ => best = Some(record),
        }
    }
    best.map(|r| Leader {
        team: r.team.clone(),
        value: stat(r),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameResult;
    use crate::schedule::Matchup;
    use crate::team::Team;

    fn id(name: &str) -> TeamId {
        TeamId::franchise(name)
    }

    fn game(a: &str, b: &str, winner: &str, overtime: bool) -> GameResult {
        GameResult {
            matchup: Matchup::new(id(a), id(b)),
            winner: id(winner),
            overtime,
        }
    }

    #[test]
    fn test_leaders() {
        let teams: Vec<Team> = ["A", "B", "C"]
            .iter()
            .map(|n| Team::new(id(n), 80.0, "Atlantic"))
            .collect();
        let results = vec![
            game("A", "B", "A", false),
            game("A", "C", "A", false),
            game("B", "C", "B", true),
            game("B", "C", "C", false),
        ];
        let standings = Standings::from_results(&teams, &results);
        let leaders = SeasonLeaders::from_standings(&standings).unwrap();

        assert_eq!(leaders.presidents_trophy, id("A"));
        assert_eq!(leaders.most_wins, Leader { team: id("A"), value: 2 });
        assert_eq!(leaders.most_points, Leader { team: id("A"), value: 4 });
        // A has 0 regulation losses; C's OT loss does not count
        assert_eq!(leaders.fewest_losses, Leader { team: id("A"), value: 0 });
    }

    #[test]
    fn test_ties_go_to_first_team() {
        let teams: Vec<Team> = ["A", "B"]
            .iter()
            .map(|n| Team::new(id(n), 80.0, "Pacific"))
            .collect();
        let standings = Standings::new(&teams);
        let leaders = SeasonLeaders::from_standings(&standings).unwrap();

        assert_eq!(leaders.most_wins.team, id("A"));
        assert_eq!(leaders.fewest_losses.team, id("A"));
    }

    #[test]
    fn test_empty_league() {
        let standings = Standings::new(&[]);
        assert!(SeasonLeaders::from_standings(&standings).is_none());
    }
}
