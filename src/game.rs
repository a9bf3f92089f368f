use rand::Rng;
use serde::{Deserialize, Serialize};
use statrs::function::factorial::binomial;

use crate::config::SimConfig;
use crate::constants::{
    BASE_WIN_CHANCE, MAX_WIN_CHANCE, MIN_WIN_CHANCE, RATING_DIFF_WEIGHT, SERIES_WINS_NEEDED,
};
use crate::ratings::RatingProvider;
use crate::schedule::Matchup;
use crate::team::TeamId;

/// Outcome of a single game. Immutable once produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub matchup: Matchup,
    pub winner: TeamId,
    pub overtime: bool,
}

impl GameResult {
    pub fn loser(&self) -> &TeamId {
        if self.winner == self.matchup.team_a {
            &self.matchup.team_b
        } else {
            &self.matchup.team_a
        }
    }
}

/// Percent chance that a team rated `rating_a` beats one rated `rating_b`.
///
/// Linear in the rating difference, clamped to [10, 90] so no game is
/// ever a foregone conclusion.
pub fn win_chance(rating_a: f64, rating_b: f64) -> f64 {
    let diff = rating_a - rating_b;
    (BASE_WIN_CHANCE + diff * RATING_DIFF_WEIGHT).clamp(MIN_WIN_CHANCE, MAX_WIN_CHANCE)
}

/// Probability that a side winning each game with probability `p` takes a best-of-7.
pub fn series_win_probability(p: f64) -> f64 {
    let wins = SERIES_WINS_NEEDED as u64;
    (0..wins)
        .map(|losses| {
            binomial(wins - 1 + losses, losses) * p.powi(wins as i32) * (1.0 - p).powi(losses as i32)
        })
        .sum()
}

/// Simulate one game.
///
/// Ratings are resolved through `ratings`, defaulting for unknown teams.
/// Overtime is drawn independently of the winner; it only changes how the
/// loss is booked.
pub fn simulate_game<P, R>(
    matchup: &Matchup,
    ratings: &P,
    config: &SimConfig,
    rng: &mut R,
) -> GameResult
where
    P: RatingProvider + ?Sized,
    R: Rng,
{
    let rating_a = ratings.resolve(&matchup.team_a, config.default_rating);
    let rating_b = ratings.resolve(&matchup.team_b, config.default_rating);
    let chance = win_chance(rating_a, rating_b);

    let winner = if rng.gen::<f64>() * 100.0 < chance {
        matchup.team_a.clone()
    } else {
        matchup.team_b.clone()
    };
    let overtime = rng.gen::<f64>() < config.overtime_probability;

    GameResult {
        matchup: matchup.clone(),
        winner,
        overtime,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ratings::RatingBook;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn make_book() -> RatingBook {
        let mut book = RatingBook::default();
        book.insert(TeamId::franchise("Strong"), 95.0);
        book.insert(TeamId::franchise("Weak"), 55.0);
        book.insert(TeamId::franchise("Even1"), 80.0);
        book.insert(TeamId::franchise("Even2"), 80.0);
        book
    }

    #[test]
    fn test_equal_teams_50_50() {
        assert!((win_chance(80.0, 80.0) - 50.0).abs() < 1e-10);
    }

    #[test]
    fn test_linear_in_diff() {
        assert!((win_chance(90.0, 80.0) - 57.0).abs() < 1e-10);
        assert!((win_chance(80.0, 90.0) - 43.0).abs() < 1e-10);
    }

    #[test]
    fn test_clamped() {
        assert_eq!(win_chance(100.0, 0.0), 90.0);
        assert_eq!(win_chance(0.0, 100.0), 10.0);
        assert_eq!(win_chance(1e9, -1e9), 90.0);
    }

    #[test]
    fn test_symmetric() {
        let p1 = win_chance(91.5, 77.25);
        let p2 = win_chance(77.25, 91.5);
        assert!((p1 + p2 - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_series_win_probability() {
        assert!((series_win_probability(0.5) - 0.5).abs() < 1e-10);
        assert!((series_win_probability(1.0) - 1.0).abs() < 1e-10);
        assert!(series_win_probability(0.0).abs() < 1e-10);
        // a better team is more likely to take a series than a single game
        assert!(series_win_probability(0.6) > 0.6);
    }

    #[test]
    fn test_simulate_game_winner_is_participant() {
        let book = make_book();
        let config = SimConfig::default();
        let matchup = Matchup::new(TeamId::franchise("Even1"), TeamId::franchise("Even2"));
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        for _ in 0..100 {
            let result = simulate_game(&matchup, &book, &config, &mut rng);
            assert!(matchup.involves(&result.winner));
            assert!(matchup.involves(result.loser()));
            assert_ne!(&result.winner, result.loser());
        }
    }

    #[test]
    fn test_simulate_game_deterministic() {
        let book = make_book();
        let config = SimConfig::default();
        let matchup = Matchup::new(TeamId::franchise("Strong"), TeamId::franchise("Weak"));

        let mut rng1 = ChaCha8Rng::seed_from_u64(42);
        let mut rng2 = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..20 {
            assert_eq!(
                simulate_game(&matchup, &book, &config, &mut rng1),
                simulate_game(&matchup, &book, &config, &mut rng2)
            );
        }
    }

    #[test]
    fn test_better_team_favored() {
        let book = make_book();
        let config = SimConfig::default();
        let matchup = Matchup::new(TeamId::franchise("Strong"), TeamId::franchise("Weak"));
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let n = 5000;
        let mut strong_wins = 0;
        let mut overtimes = 0;
        for _ in 0..n {
            let result = simulate_game(&matchup, &book, &config, &mut rng);
            if result.winner == matchup.team_a {
                strong_wins += 1;
            }
            if result.overtime {
                overtimes += 1;
            }
        }

        // 95 vs 55 clamps to 90%
        let rate = strong_wins as f64 / n as f64;
        assert!((rate - 0.9).abs() < 0.03, "strong team won {}", rate);

        let ot_rate = overtimes as f64 / n as f64;
        assert!((ot_rate - 0.25).abs() < 0.03, "overtime rate {}", ot_rate);
    }

    #[test]
    fn test_unknown_teams_default_to_even() {
        let book = RatingBook::default();
        let mut config = SimConfig::default();
        config.overtime_probability = 0.0;
        let matchup = Matchup::new(TeamId::new("Ghost", "1920"), TeamId::new("Phantom", "1930"));
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let n = 4000;
        let wins = (0..n)
            .filter(|_| simulate_game(&matchup, &book, &config, &mut rng).winner == matchup.team_a)
            .count();
        let rate = wins as f64 / n as f64;
        assert!((rate - 0.5).abs() < 0.04);
    }
}
