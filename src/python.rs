//! Python bindings, enabled with the `python` feature.
//!
//! Leagues cross the boundary as JSON (see [`LeagueSpec`](crate::season::LeagueSpec)),
//! results come back as JSON strings or plain dicts.

use pyo3::prelude::*;
use std::collections::HashMap;

use crate::constants::{DEFAULT_RATING, DEFAULT_TARGET_GAMES, OVERTIME_PROBABILITY};
use crate::game;
use crate::odds;
use crate::season::{make_rng, League};

/// Percent chance that a team rated `rating_a` beats one rated `rating_b`.
#[pyfunction]
fn win_chance(rating_a: f64, rating_b: f64) -> f64 {
    game::win_chance(rating_a, rating_b)
}

/// Probability of taking a best-of-7 given a single-game win probability.
#[pyfunction]
fn series_win_probability(p: f64) -> f64 {
    game::series_win_probability(p)
}

/// Simulate a season and playoffs; returns standings and bracket as JSON.
#[pyfunction]
#[pyo3(signature = (league_json, seed = None))]
fn simulate_league(league_json: &str, seed: Option<u64>) -> PyResult<String> {
    let league = League::from_json(league_json)?;
    let mut rng = make_rng(seed.or(league.config().seed));
    let result = league.simulate(&mut rng)?;
    Ok(result.to_json()?)
}

/// Championship probability per team over `n_simulations` runs.
#[pyfunction]
#[pyo3(signature = (league_json, n_simulations, seed = None))]
fn championship_odds(
    league_json: &str,
    n_simulations: usize,
    seed: Option<u64>,
) -> PyResult<HashMap<String, f64>> {
    let league = League::from_json(league_json)?;
    let odds = odds::championship_odds(&league, n_simulations, seed)?;
    Ok(odds.championship_map())
}

/// Python module definition
#[pymodule]
fn league_sim(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(win_chance, m)?)?;
    m.add_function(wrap_pyfunction!(series_win_probability, m)?)?;
    m.add_function(wrap_pyfunction!(simulate_league, m)?)?;
    m.add_function(wrap_pyfunction!(championship_odds, m)?)?;

    m.add("DEFAULT_RATING", DEFAULT_RATING)?;
    m.add("DEFAULT_TARGET_GAMES", DEFAULT_TARGET_GAMES)?;
    m.add("OVERTIME_PROBABILITY", OVERTIME_PROBABILITY)?;

    Ok(())
}
