//! League Sim - season and playoff simulation for a hockey-style league.
//!
//! Given team strength ratings, builds a regular-season schedule, plays
//! every game, ranks the standings and runs a best-of-7 playoff bracket
//! to a champion. Python bindings are available behind the `python` feature.

pub mod alignment;
pub mod config;
pub mod constants;
pub mod error;
pub mod game;
pub mod leaders;
pub mod odds;
pub mod playoff;
pub mod ratings;
pub mod schedule;
pub mod season;
pub mod standings;
pub mod team;

#[cfg(feature = "python")]
mod python;

pub use alignment::align_league;
pub use config::SimConfig;
pub use error::{LeagueError, Result};
pub use game::{series_win_probability, simulate_game, win_chance, GameResult};
pub use leaders::{Leader, SeasonLeaders};
pub use odds::{championship_odds, LeagueOdds, TeamOdds};
pub use playoff::{
    simulate_playoffs, simulate_series, Bracket, ConferenceBracket, PlayoffSimulator,
    PlayoffStage, SeriesResult,
};
pub use ratings::{RatingBook, RatingProvider};
pub use schedule::{generate_schedule, pair_cap, round_robin, Matchup, Schedule};
pub use season::{League, LeagueSpec, SeasonResult, SimulationResult};
pub use standings::{compare_records, Standings, StandingsRecord};
pub use team::{infer_conference, Conference, Team, TeamId};
