use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};
use std::collections::{HashMap, HashSet};

use crate::error::{LeagueError, Result};
use crate::season::{make_rng, League};
use crate::team::TeamId;

/// Two-sided confidence level for the championship interval
const CONFIDENCE_LEVEL: f64 = 0.95;

/// How one team fared across many simulated seasons.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TeamOdds {
    pub team: TeamId,
    pub playoff_appearances: usize,
    pub conference_titles: usize,
    pub championships: usize,
    pub mean_points: f64,
    pub championship_probability: f64,

    /// Normal-approximation interval around `championship_probability`
    pub interval: (f64, f64),
}

/// Outcome distribution over a batch of simulations, teams in league order.
#[derive(Clone, Debug, Serialize)]
pub struct LeagueOdds {
    pub simulations: usize,
    pub teams: Vec<TeamOdds>,
}

impl LeagueOdds {
    pub fn get(&self, team: &TeamId) -> Option<&TeamOdds> {
        self.teams.iter().find(|t| t.team == *team)
    }

    /// Teams by championship probability, most likely first.
    pub fn favourites(&self) -> Vec<&TeamOdds> {
        let mut teams: Vec<&TeamOdds> = self.teams.iter().collect();
        teams.sort_by(|a, b| b.championships.cmp(&a.championships));
        teams
    }

    /// Championship probability per team label.
    pub fn championship_map(&self) -> HashMap<String, f64> {
        self.teams
            .iter()
            .map(|t| (t.team.to_string(), t.championship_probability))
            .collect()
    }
}

/// What a single simulation contributes to the tally.
struct RunTally {
    champion: TeamId,
    conference_champions: Vec<TeamId>,
    playoff_teams: HashSet<TeamId>,
    points: Vec<u32>,
}

/// Simulate `n_simulations` full seasons in parallel and tally the outcomes.
///
/// Per-run seeds are drawn up front from one master stream, so the result
/// depends only on `seed`, not on how rayon schedules the work.
pub fn championship_odds(
    league: &League,
    n_simulations: usize,
    seed: Option<u64>,
) -> Result<LeagueOdds> {
    if n_simulations == 0 {
        return Err(LeagueError::InvalidConfig(
            "n_simulations must be at least 1".to_string(),
        ));
    }

    let mut master = make_rng(seed);
    let seeds: Vec<u64> = (0..n_simulations).map(|_| master.gen::<u64>()).collect();

    let tallies: Vec<RunTally> = seeds
        .par_iter()
        .map(|&sim_seed| -> Result<RunTally> {
            let mut rng = ChaCha8Rng::seed_from_u64(sim_seed);
            let sim = league.simulate(&mut rng)?;
            let bracket = &sim.bracket;

            Ok(RunTally {
                champion: bracket.champion.clone(),
                conference_champions: [&bracket.east, &bracket.west]
                    .iter()
                    .filter_map(|c| c.champion().cloned())
                    .collect(),
                playoff_teams: bracket
                    .east
                    .seeds
                    .iter()
                    .chain(&bracket.west.seeds)
                    .cloned()
                    .collect(),
                points: sim
                    .season
                    .standings
                    .records()
                    .iter()
                    .map(|r| r.points)
                    .collect(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let z = Normal::new(0.0, 1.0)
        .map_err(|e| LeagueError::InvalidConfig(e.to_string()))?
        .inverse_cdf(1.0 - (1.0 - CONFIDENCE_LEVEL) / 2.0);
    let n = n_simulations as f64;

    let teams = league
        .teams()
        .iter()
        .enumerate()
        .map(|(idx, team)| {
            let id = &team.id;
            let championships = tallies.iter().filter(|t| t.champion == *id).count();
            let conference_titles = tallies
                .iter()
                .filter(|t| t.conference_champions.contains(id))
                .count();
            let playoff_appearances = tallies
                .iter()
                .filter(|t| t.playoff_teams.contains(id))
                .count();
            let total_points: u64 = tallies.iter().map(|t| t.points[idx] as u64).sum();

            let p = championships as f64 / n;
            let margin = z * (p * (1.0 - p) / n).sqrt();

            TeamOdds {
                team: id.clone(),
                playoff_appearances,
                conference_titles,
                championships,
                mean_points: total_points as f64 / n,
                championship_probability: p,
                interval: ((p - margin).max(0.0), (p + margin).min(1.0)),
            }
        })
        .collect();

    info!("Tallied championship odds over {} simulations", n_simulations);
    Ok(LeagueOdds {
        simulations: n_simulations,
        teams,
    })
}
