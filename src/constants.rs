/// Regular-season games each team plays when the schedule can be filled
pub const DEFAULT_TARGET_GAMES: u32 = 82;

/// Rating assumed for a team missing from the rating source
pub const DEFAULT_RATING: f64 = 75.0;

/// Probability that any single game goes to overtime
pub const OVERTIME_PROBABILITY: f64 = 0.25;

/// Win chance (percent) for two evenly rated teams
pub const BASE_WIN_CHANCE: f64 = 50.0;

/// Percentage points of win chance per rating point of difference
pub const RATING_DIFF_WEIGHT: f64 = 0.7;

/// Lower clamp on a single-game win chance (percent)
pub const MIN_WIN_CHANCE: f64 = 10.0;

/// Upper clamp on a single-game win chance (percent)
pub const MAX_WIN_CHANCE: f64 = 90.0;

/// Multiplier applied to the average meetings per pair when deriving the pair cap
pub const PAIR_CAP_SPREAD: f64 = 2.2;

/// Hard ceiling on how often the same two teams may meet in a season
pub const MAX_MEETINGS_PER_PAIR: u32 = 10;

/// Standings points for a win
pub const POINTS_PER_WIN: u32 = 2;

/// Standings points for an overtime loss
pub const POINTS_PER_OT_LOSS: u32 = 1;

/// Game wins needed to take a best-of-7 series
pub const SERIES_WINS_NEEDED: u32 = 4;

/// Playoff teams seeded from each conference
pub const PLAYOFF_TEAMS_PER_CONFERENCE: usize = 8;

/// Conference rounds before the final (4, 2, 1 series)
pub const CONFERENCE_ROUNDS: usize = 3;

/// Modern divisions, in the order used to break size ties
pub const MODERN_DIVISIONS: [&str; 4] = ["Atlantic", "Metropolitan", "Central", "Pacific"];
