//! Per-party composition counts.

use crate::catalog::CharacterCatalog;
use crate::types::{Attribute, Team};

/// Label used for a party that has no display label
pub const UNLABELED_PARTY: &str = "Team";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyStats {
    pub party: usize,
    pub label: String,
    /// Attribute counts, most common first
    pub attributes: Vec<(Attribute, usize)>,
    /// Specialty counts, most common first
    pub specialties: Vec<(String, usize)>,
}

/// Stats for every party that has at least one known character.
///
/// Ties keep first-seen order. Ids missing from the catalog are skipped.
pub fn team_stats(team: &Team, catalog: &CharacterCatalog) -> Vec<PartyStats> {
    let layout = team.layout();

    team.parties()
        .enumerate()
        .filter_map(|(party, slots)| {
            let members: Vec<_> = slots
                .iter()
                .flatten()
                .filter_map(|id| catalog.get(id))
                .collect();
            if members.is_empty() {
                return None;
            }

            let mut attributes = Vec::new();
            let mut specialties = Vec::new();
            for member in &members {
                bump(&mut attributes, member.attribute);
                for specialty in &member.specialties {
                    bump(&mut specialties, specialty.clone());
                }
            }
            // Stable sort keeps first-seen order among equal counts
            attributes.sort_by(|a, b| b.1.cmp(&a.1));
            specialties.sort_by(|a, b| b.1.cmp(&a.1));

            Some(PartyStats {
                party,
                label: layout
                    .party_label(party)
                    .unwrap_or(UNLABELED_PARTY)
                    .to_string(),
                attributes,
                specialties,
            })
        })
        .collect()
}

fn bump<K: PartialEq>(counts: &mut Vec<(K, usize)>, key: K) {
    match counts.iter_mut().find(|(k, _)| *k == key) {
        Some((_, count)) => *count += 1,
        None => counts.push((key, 1)),
    }
}
