use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Keywords marking a division name as part of the Eastern conference.
const EAST_KEYWORDS: [&str; 9] = [
    "Atlantic",
    "Metropolitan",
    "East",
    "Wales",
    "Adams",
    "Canadian",
    "Patrick",
    "Southeast",
    "Northeast",
];

/// Keywords marking a division name as part of the Western conference.
const WEST_KEYWORDS: [&str; 7] = [
    "Central",
    "Pacific",
    "West",
    "Campbell",
    "Norris",
    "Smythe",
    "Northwest",
];

/// Identity of a simulation participant: franchise name plus season label.
///
/// The same franchise may take part several times under different seasons;
/// each entry is a separate participant with its own standings row.
/// Serialized as its display label, e.g. `"Boston Bruins (2011)"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TeamId {
    pub name: String,
    pub season: Option<String>,
}

impl TeamId {
    pub fn new(name: impl Into<String>, season: impl Into<String>) -> Self {
        TeamId {
            name: name.into(),
            season: Some(season.into()),
        }
    }

    /// A franchise without a season label.
    ///
    /// A name that itself ends in `" (...)"` does not survive a trip through
    /// its label: [`TeamId::parse_label`] reads the suffix back as a season.
    pub fn franchise(name: impl Into<String>) -> Self {
        TeamId {
            name: name.into(),
            season: None,
        }
    }

    /// Parse a display label of the form `"Name (Season)"`.
    ///
    /// Labels without a trailing parenthesised suffix become season-less ids.
    /// A trailing `" (...)"` is always taken as the season, so franchise
    /// names of that shape come back split.
    pub fn parse_label(label: &str) -> Self {
        let label = label.trim();
        if let Some(body) = label.strip_suffix(')') {
            if let Some(idx) = body.rfind(" (") {
                let season = body[idx + 2..].trim();
                let name = body[..idx].trim();
                if !season.is_empty() && !name.is_empty() {
                    return TeamId::new(name, season);
                }
            }
        }
        TeamId::franchise(label)
    }

    /// The same franchise with the season label dropped.
    pub fn base(&self) -> TeamId {
        TeamId::franchise(self.name.clone())
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.season {
            Some(season) => write!(f, "{} ({})", self.name, season),
            None => write!(f, "{}", self.name),
        }
    }
}

impl Serialize for TeamId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TeamId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(TeamId::parse_label(&label))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Conference {
    East,
    West,
    #[default]
    Unknown,
}

impl fmt::Display for Conference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Conference::East => "East",
            Conference::West => "West",
            Conference::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

/// Infer the conference a division belongs to from its name.
///
/// Covers the modern divisions as well as the historical ones
/// (Wales/Campbell era, Adams/Patrick/Norris/Smythe, and so on).
/// Matching ignores case.
pub fn infer_conference(division: &str) -> Conference {
    let division = division.to_lowercase();
    let matches = |k: &&str| division.contains(&k.to_lowercase());

    if EAST_KEYWORDS.iter().any(matches) {
        Conference::East
    } else if WEST_KEYWORDS.iter().any(matches) {
        Conference::West
    } else {
        Conference::Unknown
    }
}

/// A league participant with its strength rating and alignment.
///
/// When deserialized, a missing or `Unknown` conference is inferred from
/// the division, same as [`Team::new`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "TeamRecord")]
pub struct Team {
    pub id: TeamId,

    /// Strength on a roughly 50-100 scale
    pub rating: f64,

    #[serde(default)]
    pub division: String,

    #[serde(default)]
    pub conference: Conference,
}

impl Team {
    /// Create a team, inferring the conference from the division name.
    pub fn new(id: TeamId, rating: f64, division: impl Into<String>) -> Self {
        let division = division.into();
        let conference = infer_conference(&division);
        Team {
            id,
            rating,
            division,
            conference,
        }
    }

    pub fn with_conference(mut self, conference: Conference) -> Self {
        self.conference = conference;
        self
    }
}

/// Wire form of [`Team`]; the conference is optional on input.
#[derive(Deserialize)]
struct TeamRecord {
    id: TeamId,
    rating: f64,
    #[serde(default)]
    division: String,
    #[serde(default)]
    conference: Option<Conference>,
}

impl From<TeamRecord> for Team {
    fn from(record: TeamRecord) -> Self {
        let team = Team::new(record.id, record.rating, record.division);
        match record.conference {
            Some(conference) if conference != Conference::Unknown => {
                team.with_conference(conference)
            }
            _ => team,
        }
    }
}
