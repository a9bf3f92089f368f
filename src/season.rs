use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::alignment::align_league;
use crate::config::SimConfig;
use crate::error::{LeagueError, Result};
use crate::game::{simulate_game, GameResult};
use crate::leaders::SeasonLeaders;
use crate::playoff::{simulate_playoffs, Bracket};
use crate::ratings::RatingBook;
use crate::schedule::{generate_schedule, Schedule};
use crate::standings::Standings;
use crate::team::{Team, TeamId};

/// Seeded generator, or one drawn from entropy.
pub(crate) fn make_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// League description as accepted from JSON.
#[derive(Clone, Debug, Deserialize)]
pub struct LeagueSpec {
    pub teams: Vec<Team>,

    #[serde(default)]
    pub config: SimConfig,

    /// Re-align teams into the four modern divisions before simulating
    #[serde(default)]
    pub align: bool,
}

/// A regular season that has been played out.
#[derive(Clone, Debug, Serialize)]
pub struct SeasonResult {
    pub schedule: Schedule,
    pub results: Vec<GameResult>,
    pub standings: Standings,
}

/// Season plus playoffs.
#[derive(Clone, Debug, Serialize)]
pub struct SimulationResult {
    pub season: SeasonResult,
    pub bracket: Bracket,
    pub leaders: Option<SeasonLeaders>,
}

impl SimulationResult {
    pub fn champion(&self) -> &TeamId {
        &self.bracket.champion
    }

    /// Standings table (best first) and bracket, as handed to display or storage.
    pub fn to_json(&self) -> Result<String> {
        let summary = serde_json::json!({
            "standings": self.season.standings.ranked(),
            "auto_assigned": self.season.standings.auto_assigned,
            "fallback_schedule": self.season.schedule.fallback,
            "bracket": &self.bracket,
            "leaders": &self.leaders,
        });
        Ok(serde_json::to_string(&summary)?)
    }
}

/// Teams, their ratings and run configuration.
///
/// Ratings are fixed for the lifetime of the league; every simulation
/// builds its own schedule, results, standings and bracket.
#[derive(Clone, Debug)]
pub struct League {
    teams: Vec<Team>,
    ratings: RatingBook,
    config: SimConfig,
}

impl League {
    pub fn new(teams: Vec<Team>, config: SimConfig) -> Result<Self> {
        config.validate()?;

        let mut seen = HashSet::new();
        for team in &teams {
            if !seen.insert(&team.id) {
                return Err(LeagueError::DuplicateTeam(team.id.clone()));
            }
        }

        let ratings = RatingBook::from_teams(&teams, config.default_rating);
        Ok(League {
            teams,
            ratings,
            config,
        })
    }

    pub fn from_spec(spec: LeagueSpec) -> Result<Self> {
        let teams = if spec.align {
            align_league(spec.teams)
        } else {
            spec.teams
        };
        League::new(teams, spec.config)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let spec: LeagueSpec = serde_json::from_str(json)?;
        League::from_spec(spec)
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn team_ids(&self) -> Vec<TeamId> {
        self.teams.iter().map(|t| t.id.clone()).collect()
    }

    pub fn ratings(&self) -> &RatingBook {
        &self.ratings
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Override a franchise-wide rating shared by seasons without their own entry.
    pub fn set_franchise_rating(&mut self, name: &str, rating: f64) {
        self.ratings.insert(TeamId::franchise(name), rating);
    }

    /// Build a schedule, play every game and tally the standings.
    pub fn simulate_season<R: Rng>(&self, rng: &mut R) -> Result<SeasonResult> {
        if self.teams.len() < 2 {
            return Err(LeagueError::TooFewTeams {
                required: 2,
                found: self.teams.len(),
            });
        }

        let schedule = generate_schedule(&self.team_ids(), self.config.target_games);
        let results: Vec<GameResult> = schedule
            .matchups
            .iter()
            .map(|m| simulate_game(m, &self.ratings, &self.config, rng))
            .collect();
        debug!("Played {} regular-season games", results.len());

        let standings = Standings::from_results(&self.teams, &results);
        Ok(SeasonResult {
            schedule,
            results,
            standings,
        })
    }

    /// Regular season followed by the playoffs.
    pub fn simulate<R: Rng>(&self, rng: &mut R) -> Result<SimulationResult> {
        let season = self.simulate_season(rng)?;
        let bracket = simulate_playoffs(&season.standings, &self.ratings, &self.config, rng)?;
        let leaders = SeasonLeaders::from_standings(&season.standings);

        Ok(SimulationResult {
            season,
            bracket,
            leaders,
        })
    }

    /// One full simulation using the configured seed (or entropy).
    pub fn simulate_seeded(&self) -> Result<SimulationResult> {
        let mut rng = make_rng(self.config.seed);
        self.simulate(&mut rng)
    }

    /// Run `n_simulations` independent simulations in sequence.
    ///
    /// Each run gets its own seed drawn from a master stream, so a given
    /// `seed` always reproduces the same list.
    pub fn run_simulations(
        &self,
        n_simulations: usize,
        seed: Option<u64>,
    ) -> Result<Vec<SimulationResult>> {
        let mut rng = make_rng(seed);
        let mut results = Vec::with_capacity(n_simulations);

        for _ in 0..n_simulations {
            let sim_seed = rng.gen::<u64>();
            results.push(self.simulate(&mut ChaCha8Rng::seed_from_u64(sim_seed))?);
        }

        info!("Completed {} simulations", n_simulations);
        Ok(results)
    }
}
