use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_RATING, DEFAULT_TARGET_GAMES, OVERTIME_PROBABILITY};
use crate::error::{LeagueError, Result};

/// Tunable parameters of a simulation run.
///
/// Every field has a default, so `{}` is a valid JSON configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Games each team should play in the regular season
    pub target_games: u32,

    /// Rating used for teams missing from the rating source
    pub default_rating: f64,

    /// Chance that a game is decided in overtime
    pub overtime_probability: f64,

    /// Seed for the run's RNG; `None` draws from entropy
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            target_games: DEFAULT_TARGET_GAMES,
            default_rating: DEFAULT_RATING,
            overtime_probability: OVERTIME_PROBABILITY,
            seed: None,
        }
    }
}

impl SimConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_target_games(mut self, target_games: u32) -> Self {
        self.target_games = target_games;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.target_games == 0 {
            return Err(LeagueError::InvalidConfig(
                "target_games must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.overtime_probability) {
            return Err(LeagueError::InvalidConfig(format!(
                "overtime_probability must be within [0, 1], got {}",
                self.overtime_probability
            )));
        }
        if !self.default_rating.is_finite() {
            return Err(LeagueError::InvalidConfig(
                "default_rating must be a finite number".to_string(),
            ));
        }
        Ok(())
    }
}
