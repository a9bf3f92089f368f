use std::collections::HashMap;

use crate::constants::DEFAULT_RATING;
use crate::team::{Team, TeamId};

/// Source of team strength ratings for a simulation run.
pub trait RatingProvider {
    /// Rating recorded for exactly this id, if any.
    fn rating(&self, id: &TeamId) -> Option<f64>;

    /// Resolve a rating, never failing.
    ///
    /// Tries the exact season entry, then the franchise's season-less entry,
    /// then falls back to `default`.
    fn resolve(&self, id: &TeamId, default: f64) -> f64 {
        if let Some(rating) = self.rating(id) {
            return rating;
        }
        if id.season.is_some() {
            if let Some(rating) = self.rating(&id.base()) {
                return rating;
            }
        }
        default
    }
}

impl RatingProvider for HashMap<TeamId, f64> {
    fn rating(&self, id: &TeamId) -> Option<f64> {
        self.get(id).copied()
    }
}

/// Read-only rating lookup for one run.
///
/// Built once from the league's teams; franchise-level ratings can be added
/// so season entries without their own rating share a base value.
#[derive(Clone, Debug)]
pub struct RatingBook {
    ratings: HashMap<TeamId, f64>,
    default_rating: f64,
}

impl Default for RatingBook {
    fn default() -> Self {
        RatingBook::new(DEFAULT_RATING)
    }
}

impl RatingBook {
    pub fn new(default_rating: f64) -> Self {
        RatingBook {
            ratings: HashMap::new(),
            default_rating,
        }
    }

    pub fn from_teams(teams: &[Team], default_rating: f64) -> Self {
        let mut book = RatingBook::new(default_rating);
        for team in teams {
            book.insert(team.id.clone(), team.rating);
        }
        book
    }

    /// Add or replace a rating.
    pub fn insert(&mut self, id: TeamId, rating: f64) {
        self.ratings.insert(id, rating);
    }

    /// Rating for `id`, falling back to the franchise entry and then the default.
    pub fn get(&self, id: &TeamId) -> f64 {
        self.resolve(id, self.default_rating)
    }

    pub fn default_rating(&self) -> f64 {
        self.default_rating
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }
}

impl RatingProvider for RatingBook {
    fn rating(&self, id: &TeamId) -> Option<f64> {
        self.ratings.get(id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_entry_wins() {
        let mut book = RatingBook::default();
        book.insert(TeamId::franchise("Boston Bruins"), 80.0);
        book.insert(TeamId::new("Boston Bruins", "2011"), 92.0);

        assert_eq!(book.get(&TeamId::new("Boston Bruins", "2011")), 92.0);
        assert_eq!(book.get(&TeamId::franchise("Boston Bruins")), 80.0);
    }

    #[test]
    fn test_season_falls_back_to_franchise() {
        let mut book = RatingBook::default();
        book.insert(TeamId::franchise("Boston Bruins"), 80.0);

        assert_eq!(book.get(&TeamId::new("Boston Bruins", "1971")), 80.0);
        assert_eq!(book.get(&TeamId::new("Boston Bruins", "1972")), 80.0);
    }

    #[test]
    fn test_unknown_team_uses_default() {
        let book = RatingBook::default();
        assert_eq!(book.get(&TeamId::franchise("Hartford Whalers")), DEFAULT_RATING);

        let book = RatingBook::new(60.0);
        assert_eq!(book.get(&TeamId::new("Hartford Whalers", "1987")), 60.0);
    }

    #[test]
    fn test_hashmap_provider() {
        let mut map = HashMap::new();
        map.insert(TeamId::franchise("A"), 90.0);

        assert_eq!(map.resolve(&TeamId::new("A", "2000"), 75.0), 90.0);
        assert_eq!(map.resolve(&TeamId::franchise("B"), 75.0), 75.0);
    }

    #[test]
    fn test_from_teams() {
        let teams = vec![
            Team::new(TeamId::new("A", "2000"), 90.0, "Atlantic"),
            Team::new(TeamId::new("A", "2001"), 70.0, "Atlantic"),
        ];
        let book = RatingBook::from_teams(&teams, DEFAULT_RATING);
        assert_eq!(book.len(), 2);
        assert_eq!(book.get(&TeamId::new("A", "2000")), 90.0);
        assert_eq!(book.get(&TeamId::new("A", "2001")), 70.0);
        assert_eq!(book.get(&TeamId::franchise("A")), DEFAULT_RATING);
    }
}
