use log::{info, warn};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::constants::{POINTS_PER_OT_LOSS, POINTS_PER_WIN};
use crate::game::GameResult;
use crate::team::{Conference, Team, TeamId};

/// One row of the standings table.
///
/// `games_played == wins + losses + ot_losses` and
/// `points == 2 * wins + ot_losses` hold after every update.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StandingsRecord {
    #[serde(rename = "Team")]
    pub team: TeamId,

    #[serde(rename = "Division")]
    pub division: String,

    #[serde(rename = "Conference")]
    pub conference: Conference,

    #[serde(rename = "GP")]
    pub games_played: u32,

    #[serde(rename = "W")]
    pub wins: u32,

    #[serde(rename = "L")]
    pub losses: u32,

    #[serde(rename = "OTL")]
    pub ot_losses: u32,

    #[serde(rename = "PTS")]
    pub points: u32,

    #[serde(rename = "Win%")]
    pub win_pct: f64,

    #[serde(rename = "Rating")]
    pub rating: f64,
}

impl StandingsRecord {
    pub fn new(team: &Team) -> Self {
        StandingsRecord {
            team: team.id.clone(),
            division: team.division.clone(),
            conference: team.conference,
            games_played: 0,
            wins: 0,
            losses: 0,
            ot_losses: 0,
            points: 0,
            win_pct: 0.0,
            rating: team.rating,
        }
    }

    pub fn record_win(&mut self) {
        self.wins += 1;
        self.games_played += 1;
        self.refresh();
    }

    /// Book a loss; overtime losses earn a point.
    pub fn record_loss(&mut self, overtime: bool) {
        if overtime {
            self.ot_losses += 1;
        } else {
            self.losses += 1;
        }
        self.games_played += 1;
        self.refresh();
    }

    fn refresh(&mut self) {
        self.points = POINTS_PER_WIN * self.wins + POINTS_PER_OT_LOSS * self.ot_losses;
        self.win_pct = if self.games_played > 0 {
            self.wins as f64 / self.games_played as f64
        } else {
            0.0
        };
    }
}

/// Ranking order: points, then win fraction, both descending.
///
/// Anything still tied keeps its input order (the sort is stable).
pub fn compare_records(a: &StandingsRecord, b: &StandingsRecord) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.win_pct.partial_cmp(&a.win_pct).unwrap_or(Ordering::Equal))
}

/// Standings for one season, rows kept in the league's team order.
#[derive(Clone, Debug, Serialize)]
pub struct Standings {
    records: Vec<StandingsRecord>,

    /// True when some teams had no known conference and were balanced into one
    pub auto_assigned: bool,

    #[serde(skip)]
    index: HashMap<TeamId, usize>,
}

impl Standings {
    /// Zeroed standings for `teams`, with every conference resolved.
    pub fn new(teams: &[Team]) -> Self {
        let records: Vec<StandingsRecord> = teams.iter().map(StandingsRecord::new).collect();
        let index = records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.team.clone(), i))
            .collect();

        let mut standings = Standings {
            records,
            auto_assigned: false,
            index,
        };
        standings.balance_conferences();
        standings
    }

    /// Fold a season's results into fresh standings.
    pub fn from_results<'a, I>(teams: &[Team], results: I) -> Self
    where
        I: IntoIterator<Item = &'a GameResult>,
    {
        let mut standings = Standings::new(teams);
        for result in results {
            standings.record(result);
        }
        standings
    }

    pub fn record(&mut self, result: &GameResult) {
        let (Some(&winner), Some(&loser)) = (
            self.index.get(&result.winner),
            self.index.get(result.loser()),
        ) else {
            warn!(
                "Ignoring result between unknown teams {} and {}",
                result.matchup.team_a, result.matchup.team_b
            );
            return;
        };

        self.records[winner].record_win();
        self.records[loser].record_loss(result.overtime);
    }

    /// Give each team with an unknown conference to whichever of East/West
    /// is currently smaller, East on a tie.
    fn balance_conferences(&mut self) {
        let mut east = self.count_in(Conference::East);
        let mut west = self.count_in(Conference::West);

        for record in self
            .records
            .iter_mut()
            .filter(|r| r.conference == Conference::Unknown)
        {
            if east <= west {
                record.conference = Conference::East;
                east += 1;
            } else {
                record.conference = Conference::West;
                west += 1;
            }
            self.auto_assigned = true;
        }

        if self.auto_assigned {
            info!(
                "Auto-assigned conferences to balance the league ({} East, {} West)",
                east, west
            );
        }
    }

    fn count_in(&self, conference: Conference) -> usize {
        self.records
            .iter()
            .filter(|r| r.conference == conference)
            .count()
    }

    pub fn get(&self, team: &TeamId) -> Option<&StandingsRecord> {
        self.index.get(team).map(|&i| &self.records[i])
    }

    /// Rows in team input order.
    pub fn records(&self) -> &[StandingsRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whole league, best first.
    pub fn ranked(&self) -> Vec<&StandingsRecord> {
        let mut rows: Vec<&StandingsRecord> = self.records.iter().collect();
        rows.sort_by(|a, b| compare_records(a, b));
        rows
    }

    /// One conference, best first.
    pub fn conference_ranked(&self, conference: Conference) -> Vec<&StandingsRecord> {
        let mut rows: Vec<&StandingsRecord> = self
            .records
            .iter()
            .filter(|r| r.conference == conference)
            .collect();
        rows.sort_by(|a, b| compare_records(a, b));
        rows
    }
}
