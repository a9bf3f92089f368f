use thiserror::Error;

use crate::team::{Conference, TeamId};

/// Errors surfaced to callers of the simulation engine.
///
/// Missing ratings and unresolved conferences are not errors; they fall
/// back to defaults. Only runs that cannot be simulated at all end up here.
#[derive(Error, Debug)]
pub enum LeagueError {
    #[error("Too few teams for a season: need at least {required}, found {found}")]
    TooFewTeams { required: usize, found: usize },

    #[error("Not enough {conference} teams to seed the playoffs: need {required}, found {found}")]
    ConferenceTooSmall {
        conference: Conference,
        required: usize,
        found: usize,
    },

    #[error("Team entered more than once: {0}")]
    DuplicateTeam(TeamId),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LeagueError>;

#[cfg(feature = "python")]
impl From<LeagueError> for pyo3::PyErr {
    fn from(err: LeagueError) -> Self {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}
