use log::{debug, info};
use rand::Rng;
use serde::Serialize;

use crate::config::SimConfig;
use crate::constants::{CONFERENCE_ROUNDS, PLAYOFF_TEAMS_PER_CONFERENCE, SERIES_WINS_NEEDED};
use crate::error::{LeagueError, Result};
use crate::game::simulate_game;
use crate::ratings::RatingProvider;
use crate::schedule::Matchup;
use crate::standings::Standings;
use crate::team::{Conference, TeamId};

/// A completed best-of-7 series.
///
/// The winner has exactly four wins, the other side at most three.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SeriesResult {
    pub home: TeamId,
    pub away: TeamId,
    pub home_wins: u32,
    pub away_wins: u32,
    pub winner: TeamId,

    /// Winner of each game, in order
    pub log: Vec<TeamId>,
}

impl SeriesResult {
    pub fn loser(&self) -> &TeamId {
        if self.winner == self.home {
            &self.away
        } else {
            &self.home
        }
    }

    pub fn games(&self) -> usize {
        self.log.len()
    }

    pub fn wins_for(&self, team: &TeamId) -> u32 {
        if *team == self.home {
            self.home_wins
        } else if *team == self.away {
            self.away_wins
        } else {
            0
        }
    }
}

/// Play games between `home` and `away` until one side has four wins.
pub fn simulate_series<P, R>(
    home: &TeamId,
    away: &TeamId,
    ratings: &P,
    config: &SimConfig,
    rng: &mut R,
) -> SeriesResult
where
    P: RatingProvider + ?Sized,
    R: Rng,
{
    let matchup = Matchup::new(home.clone(), away.clone());
    let mut home_wins = 0;
    let mut away_wins = 0;
    let mut log = Vec::new();

    while home_wins < SERIES_WINS_NEEDED && away_wins < SERIES_WINS_NEEDED {
        let game = simulate_game(&matchup, ratings, config, rng);
        if game.winner == *home {
            home_wins += 1;
        } else {
            away_wins += 1;
        }
        log.push(game.winner);
    }

    let winner = if home_wins == SERIES_WINS_NEEDED {
        home.clone()
    } else {
        away.clone()
    };

    SeriesResult {
        home: home.clone(),
        away: away.clone(),
        home_wins,
        away_wins,
        winner,
        log,
    }
}

/// Where a playoff run stands. Each transition completes one full round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum PlayoffStage {
    Seeded,
    Round1Complete,
    Round2Complete,
    Round3Complete,
    ChampionDetermined,
}

impl PlayoffStage {
    pub fn next(self) -> PlayoffStage {
        match self {
            PlayoffStage::Seeded => PlayoffStage::Round1Complete,
            PlayoffStage::Round1Complete => PlayoffStage::Round2Complete,
            PlayoffStage::Round2Complete => PlayoffStage::Round3Complete,
            PlayoffStage::Round3Complete | PlayoffStage::ChampionDetermined => {
                PlayoffStage::ChampionDetermined
            }
        }
    }

    /// Conference rounds already played.
    fn rounds_played(self) -> usize {
        match self {
            PlayoffStage::Seeded => 0,
            PlayoffStage::Round1Complete => 1,
            PlayoffStage::Round2Complete => 2,
            PlayoffStage::Round3Complete | PlayoffStage::ChampionDetermined => 3,
        }
    }
}

/// One conference's half of the bracket.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConferenceBracket {
    pub conference: Conference,

    /// Top eight by standings, best first
    pub seeds: Vec<TeamId>,

    /// Round 1 (4 series), round 2 (2), conference final (1)
    pub rounds: Vec<Vec<SeriesResult>>,
}

impl ConferenceBracket {
    fn seed(standings: &Standings, conference: Conference) -> Result<Self> {
        let ranked = standings.conference_ranked(conference);
        if ranked.len() < PLAYOFF_TEAMS_PER_CONFERENCE {
            return Err(LeagueError::ConferenceTooSmall {
                conference,
                required: PLAYOFF_TEAMS_PER_CONFERENCE,
                found: ranked.len(),
            });
        }

        let seeds = ranked
            .iter()
            .take(PLAYOFF_TEAMS_PER_CONFERENCE)
            .map(|r| r.team.clone())
            .collect();

        Ok(ConferenceBracket {
            conference,
            seeds,
            rounds: Vec::with_capacity(CONFERENCE_ROUNDS),
        })
    }

    /// Teams alive going into the next round, in bracket order.
    fn entrants(&self) -> Vec<TeamId> {
        match self.rounds.last() {
            Some(round) => round.iter().map(|s| s.winner.clone()).collect(),
            None => self.seeds.clone(),
        }
    }

    fn play_round<P, R>(&mut self, ratings: &P, config: &SimConfig, rng: &mut R)
    where
        P: RatingProvider + ?Sized,
        R: Rng,
    {
        let round = play_round(&self.entrants(), ratings, config, rng);
        self.rounds.push(round);
    }

    /// Conference final winner, once round 3 is done.
    pub fn champion(&self) -> Option<&TeamId> {
        if self.rounds.len() < CONFERENCE_ROUNDS {
            return None;
        }
        self.rounds.last()?.first().map(|s| &s.winner)
    }

    pub fn series_count(&self) -> usize {
        self.rounds.iter().map(Vec::len).sum()
    }
}

/// Pair neighbours (1 v 2, 3 v 4, ...) and play each series.
fn play_round<P, R>(
    entrants: &[TeamId],
    ratings: &P,
    config: &SimConfig,
    rng: &mut R,
) -> Vec<SeriesResult>
where
    P: RatingProvider + ?Sized,
    R: Rng,
{
    entrants
        .chunks_exact(2)
        .map(|pair| simulate_series(&pair[0], &pair[1], ratings, config, rng))
        .collect()
}

/// A finished playoff bracket.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Bracket {
    pub east: ConferenceBracket,
    pub west: ConferenceBracket,

    #[serde(rename = "final")]
    pub final_round: Vec<SeriesResult>,

    pub champion: TeamId,
}

impl Bracket {
    pub fn series_count(&self) -> usize {
        self.east.series_count() + self.west.series_count() + self.final_round.len()
    }

    /// Every series in play order: East and West round by round, then the final.
    pub fn all_series(&self) -> impl Iterator<Item = &SeriesResult> {
        self.east
            .rounds
            .iter()
            .flatten()
            .chain(self.west.rounds.iter().flatten())
            .chain(self.final_round.iter())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Steps a seeded bracket through its rounds.
///
/// Bracket positions are fixed at seeding; later rounds pair the winners
/// of neighbouring series without reseeding.
pub struct PlayoffSimulator<'a, P: RatingProvider + ?Sized> {
    ratings: &'a P,
    config: &'a SimConfig,
    stage: PlayoffStage,
    east: ConferenceBracket,
    west: ConferenceBracket,
    final_round: Vec<SeriesResult>,
}

impl<'a, P: RatingProvider + ?Sized> PlayoffSimulator<'a, P> {
    /// Seed both conferences from the standings.
    ///
    /// Fails if either conference has fewer than eight teams.
    pub fn seed(standings: &Standings, ratings: &'a P, config: &'a SimConfig) -> Result<Self> {
        let east = ConferenceBracket::seed(standings, Conference::East)?;
        let west = ConferenceBracket::seed(standings, Conference::West)?;
        debug!("Seeded playoffs: East {:?}, West {:?}", east.seeds, west.seeds);

        Ok(PlayoffSimulator {
            ratings,
            config,
            stage: PlayoffStage::Seeded,
            east,
            west,
            final_round: Vec::new(),
        })
    }

    pub fn stage(&self) -> PlayoffStage {
        self.stage
    }

    /// Play every series of the next round. No-op once a champion exists.
    pub fn advance<R: Rng>(&mut self, rng: &mut R) -> PlayoffStage {
        match self.stage {
            PlayoffStage::ChampionDetermined => {}
            PlayoffStage::Round3Complete => {
                let entrants = self.conference_champions();
                self.final_round = play_round(&entrants, self.ratings, self.config, rng);
            }
            _ => {
                self.east.play_round(self.ratings, self.config, rng);
                self.west.play_round(self.ratings, self.config, rng);
            }
        }

        self.stage = self.stage.next();
        debug!(
            "Playoffs at {:?} ({} conference rounds played)",
            self.stage,
            self.stage.rounds_played()
        );
        self.stage
    }

    fn conference_champions(&self) -> Vec<TeamId> {
        self.east
            .champion()
            .into_iter()
            .chain(self.west.champion())
            .cloned()
            .collect()
    }

    /// Play out the remaining rounds and return the bracket.
    pub fn run<R: Rng>(mut self, rng: &mut R) -> Bracket {
        while self.stage != PlayoffStage::ChampionDetermined {
            self.advance(rng);
        }

        // the final is always played on the way to ChampionDetermined
        let champion = self.final_round[0].winner.clone();
        info!("{} win the championship", champion);

        Bracket {
            east: self.east,
            west: self.west,
            final_round: self.final_round,
            champion,
        }
    }
}

/// Seed and play a full bracket from final standings.
pub fn simulate_playoffs<P, R>(
    standings: &Standings,
    ratings: &P,
    config: &SimConfig,
    rng: &mut R,
) -> Result<Bracket>
where
    P: RatingProvider + ?Sized,
    R: Rng,
{
    Ok(PlayoffSimulator::seed(standings, ratings, config)?.run(rng))
}
