use log::debug;

use crate::constants::MODERN_DIVISIONS;
use crate::team::{infer_conference, Conference, Team};

/// Place every team in one of the four modern divisions.
///
/// Teams whose historical division is a modern one stay there; the rest
/// are slotted into the currently smallest division, ties going to the
/// earliest in Atlantic, Metropolitan, Central, Pacific order. When every
/// entry is the same franchise (one team across several seasons) the
/// entries are dealt round-robin across the divisions instead.
///
/// Conferences are re-inferred from the new division names. Team order
/// is preserved.
pub fn align_league(teams: Vec<Team>) -> Vec<Team> {
    if teams.is_empty() {
        return teams;
    }
    let single_franchise = teams.iter().all(|t| t.id.name == teams[0].id.name);

    let mut sizes = [0usize; MODERN_DIVISIONS.len()];
    let slots: Vec<usize> = if single_franchise && teams.len() > 1 {
        let dealt: Vec<usize> = (0..teams.len()).map(|idx| idx % MODERN_DIVISIONS.len()).collect();
        for &div in &dealt {
            sizes[div] += 1;
        }
        dealt
    } else {
        let kept: Vec<Option<usize>> = teams.iter().map(|t| modern_index(&t.division)).collect();
        for &div in kept.iter().flatten() {
            sizes[div] += 1;
        }
        kept.into_iter()
            .map(|slot| {
                slot.unwrap_or_else(|| {
                    let div = smallest_division(&sizes);
                    sizes[div] += 1;
                    div
                })
            })
            .collect()
    };

    debug!(
        "Aligned {} teams into divisions {:?}",
        teams.len(),
        MODERN_DIVISIONS.iter().zip(sizes.iter()).collect::<Vec<_>>()
    );

    teams
        .into_iter()
        .zip(slots)
        .map(|(team, div)| reassign(team, MODERN_DIVISIONS[div]))
        .collect()
}

fn modern_index(division: &str) -> Option<usize> {
    MODERN_DIVISIONS.iter().position(|d| *d == division)
}

fn smallest_division(sizes: &[usize]) -> usize {
    let mut best = 0;
    for (idx, &size) in sizes.iter().enumerate() {
        if size < sizes[best] {
            best = idx;
        }
    }
    best
}

fn reassign(mut team: Team, division: &str) -> Team {
    team.division = division.to_string();
    let conference = infer_conference(division);
    if conference != Conference::Unknown {
        team.conference = conference;
    }
    team
}
