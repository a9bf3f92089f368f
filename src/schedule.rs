use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_MEETINGS_PER_PAIR, PAIR_CAP_SPREAD};
use crate::team::TeamId;

/// One scheduled game. Argument order carries no home/away meaning.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matchup {
    pub team_a: TeamId,
    pub team_b: TeamId,
}

impl Matchup {
    pub fn new(team_a: TeamId, team_b: TeamId) -> Self {
        Matchup { team_a, team_b }
    }

    pub fn involves(&self, team: &TeamId) -> bool {
        self.team_a == *team || self.team_b == *team
    }
}

/// A regular-season schedule.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Schedule {
    pub matchups: Vec<Matchup>,

    /// Most meetings any pair was allowed while filling the target
    pub pair_cap: u32,

    /// True when the target could not be met and a single round-robin was used
    pub fallback: bool,
}

impl Schedule {
    pub fn len(&self) -> usize {
        self.matchups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchups.is_empty()
    }

    /// Number of scheduled games involving `team`.
    pub fn games_for(&self, team: &TeamId) -> usize {
        self.matchups.iter().filter(|m| m.involves(team)).count()
    }
}

/// Most times the same two teams may meet while filling a `target_games` schedule.
///
/// Spreads games across opponents: roughly 2.2x the average number of
/// meetings per pair, clamped to [1, 10].
pub fn pair_cap(num_teams: usize, target_games: u32) -> u32 {
    if num_teams < 2 {
        return 1;
    }
    let n = num_teams as f64;
    let games_needed = (target_games as f64 * n) / 2.0;
    let total_pairs = n * (n - 1.0) / 2.0;
    let cap = ((games_needed / total_pairs) * PAIR_CAP_SPREAD).ceil();
    (cap as u32).clamp(1, MAX_MEETINGS_PER_PAIR)
}

/// Build a schedule giving every team `target_games` games where possible.
///
/// Scans all pairs repeatedly, adding one meeting per pair per scan while
/// both teams are short of the target and the pair is under its cap. If a
/// full scan adds nothing before every team is done, the constrained attempt
/// is dropped and each pair meets exactly once instead.
///
/// Fewer than two teams produce an empty schedule.
pub fn generate_schedule(teams: &[TeamId], target_games: u32) -> Schedule {
    let n = teams.len();
    if n < 2 {
        return Schedule::default();
    }

    let cap = pair_cap(n, target_games);
    let pairs: Vec<(usize, usize)> = (0..n)
        .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
        .collect();

    let mut games_per_team = vec![0u32; n];
    let mut meetings = vec![0u32; pairs.len()];
    let mut scheduled: Vec<(usize, usize)> = Vec::new();
    let mut saturated = false;

    while games_per_team.iter().any(|&g| g < target_games) {
        let mut added = false;
        for (slot, &(i, j)) in pairs.iter().enumerate() {
            if games_per_team[i] < target_games
                && games_per_team[j] < target_games
                && meetings[slot] < cap
            {
                scheduled.push((i, j));
                games_per_team[i] += 1;
                games_per_team[j] += 1;
                meetings[slot] += 1;
                added = true;
            }
        }
        if !added {
            saturated = true;
            break;
        }
    }

    if saturated {
        info!(
            "Cannot give {} teams {} games each with at most {} meetings per pair; using a single round-robin",
            n, target_games, cap
        );
        return Schedule {
            matchups: to_matchups(teams, &pairs),
            pair_cap: cap,
            fallback: true,
        };
    }

    debug!("Scheduled {} games for {} teams (pair cap {})", scheduled.len(), n, cap);
    Schedule {
        matchups: to_matchups(teams, &scheduled),
        pair_cap: cap,
        fallback: false,
    }
}

/// Every pair of teams meeting exactly once.
pub fn round_robin(teams: &[TeamId]) -> Vec<Matchup> {
    let n = teams.len();
    let pairs: Vec<(usize, usize)> = (0..n)
        .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
        .collect();
    to_matchups(teams, &pairs)
}

fn to_matchups(teams: &[TeamId], pairs: &[(usize, usize)]) -> Vec<Matchup> {
    pairs
        .iter()
        .map(|&(i, j)| Matchup::new(teams[i].clone(), teams[j].clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_teams(n: usize) -> Vec<TeamId> {
        (0..n).map(|i| TeamId::franchise(format!("Team{}", i))).collect()
    }

    #[test]
    fn test_pair_cap() {
        // 32 teams: 82/31 * 2.2 = 5.82 -> 6
        assert_eq!(pair_cap(32, 82), 6);
        // small leagues hit the ceiling
        assert_eq!(pair_cap(2, 82), 10);
        assert_eq!(pair_cap(10, 82), 10);
        // 2 teams, 4 games: 4 * 2.2 = 8.8 -> 9
        assert_eq!(pair_cap(2, 4), 9);
        // never below 1
        assert_eq!(pair_cap(100, 1), 1);
    }

    #[test]
    fn test_full_league_gets_82_games() {
        let teams = make_teams(32);
        let schedule = generate_schedule(&teams, 82);

        assert!(!schedule.fallback);
        assert_eq!(schedule.len(), 32 * 82 / 2);
        for team in &teams {
            assert_eq!(schedule.games_for(team), 82);
        }
    }

    #[test]
    fn test_ten_teams_reach_target() {
        let teams = make_teams(10);
        let schedule = generate_schedule(&teams, 82);

        assert!(!schedule.fallback);
        for team in &teams {
            assert_eq!(schedule.games_for(team), 82);
        }
    }

    #[test]
    fn test_nine_teams_fall_back() {
        // 8 opponents * 10 meetings = 80 < 82
        let teams = make_teams(9);
        let schedule = generate_schedule(&teams, 82);

        assert!(schedule.fallback);
        assert_eq!(schedule.len(), 9 * 8 / 2);
        for team in &teams {
            assert_eq!(schedule.games_for(team), 8);
        }
    }

    #[test]
    fn test_two_teams_short_season() {
        let teams = make_teams(2);
        let schedule = generate_schedule(&teams, 4);

        assert!(!schedule.fallback);
        assert_eq!(schedule.len(), 4);
        assert_eq!(schedule.pair_cap, 9);
    }

    #[test]
    fn test_two_teams_full_season_falls_back() {
        let teams = make_teams(2);
        let schedule = generate_schedule(&teams, 82);

        assert!(schedule.fallback);
        assert_eq!(schedule.matchups, vec![Matchup::new(teams[0].clone(), teams[1].clone())]);
    }

    #[test]
    fn test_odd_total_falls_back() {
        // 3 teams * 3 games is odd, so not every team can reach 3
        let teams = make_teams(3);
        let schedule = generate_schedule(&teams, 3);

        assert!(schedule.fallback);
        assert_eq!(schedule.len(), 3);
    }

    #[test]
    fn test_fewer_than_two_teams() {
        assert!(generate_schedule(&[], 82).is_empty());
        assert!(generate_schedule(&make_teams(1), 82).is_empty());
    }

    #[test]
    fn test_pair_cap_respected() {
        let teams = make_teams(12);
        let schedule = generate_schedule(&teams, 82);
        let cap = schedule.pair_cap as usize;

        for i in 0..teams.len() {
            for j in i + 1..teams.len() {
                let meetings = schedule
                    .matchups
                    .iter()
                    .filter(|m| m.involves(&teams[i]) && m.involves(&teams[j]))
                    .count();
                assert!(meetings <= cap);
            }
        }
    }

    #[test]
    fn test_round_robin() {
        let teams = make_teams(5);
        let matchups = round_robin(&teams);
        assert_eq!(matchups.len(), 10);
        assert_eq!(matchups[0], Matchup::new(teams[0].clone(), teams[1].clone()));
    }
}
