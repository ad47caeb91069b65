//! Team layouts
//!
//! A [`Mode`] fixes how many parties a team has. Every party has exactly
//! [`SLOTS_PER_PARTY`] slots, and slots are addressed through one flat index:
//! slot `i` lives in party `i / 4` at position `i % 4`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

/// Number of slots in every party, regardless of mode
pub const SLOTS_PER_PARTY: usize = 4;

/// Party layout selector.
///
/// The serialized form is the short tag used in share tokens and saved
/// records (`mode1`, `limbo`, `4parties`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mode {
    /// A single party of four
    #[default]
    #[serde(rename = "mode1")]
    Standard,
    /// Two parties (A and B)
    #[serde(rename = "limbo")]
    Limbo,
    /// Four numbered parties
    #[serde(rename = "4parties")]
    FourParties,
}

impl Mode {
    /// Every mode, in selector order
    pub const ALL: [Mode; 3] = [Mode::Standard, Mode::Limbo, Mode::FourParties];

    /// Wire tag for this mode
    pub fn tag(self) -> &'static str {
        match self {
            Mode::Standard => "mode1",
            Mode::Limbo => "limbo",
            Mode::FourParties => "4parties",
        }
    }

    /// Resolve a wire tag. Tags are matched exactly.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Mode::ALL.into_iter().find(|mode| mode.tag() == tag)
    }

    /// Layout for this mode
    pub fn layout(self) -> Layout {
        layout_for(self)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Mode {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::from_tag(s).ok_or_else(|| DecodeError::UnknownMode(s.to_string()))
    }
}

/// Shape of a team grid for one mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub party_count: usize,
    pub slots_per_party: usize,
    pub total_slots: usize,
    /// Display labels, one per party. The single-party mode has one empty label.
    pub party_labels: Vec<&'static str>,
}

impl Layout {
    /// Display label for a party, `None` when the party is unlabeled or out of range
    pub fn party_label(&self, party: usize) -> Option<&'static str> {
        self.party_labels
            .get(party)
            .copied()
            .filter(|label| !label.is_empty())
    }

    /// Flat slot index for a party/position pair, `None` outside the grid
    pub fn slot_index(&self, party: usize, position: usize) -> Option<usize> {
        if party < self.party_count && position < self.slots_per_party {
            Some(party * self.slots_per_party + position)
        } else {
            None
        }
    }
}

/// Layout for a mode. Total: every mode has one.
pub fn layout_for(mode: Mode) -> Layout {
    let (party_count, party_labels) = match mode {
        Mode::Standard => (1, vec![""]),
        Mode::Limbo => (2, vec!["Party A", "Party B"]),
        Mode::FourParties => (4, vec!["Party 1", "Party 2", "Party 3", "Party 4"]),
    };

    Layout {
        party_count,
        slots_per_party: SLOTS_PER_PARTY,
        total_slots: party_count * SLOTS_PER_PARTY,
        party_labels,
    }
}

/// Party that owns a flat slot index
pub fn party_of(index: usize) -> usize {
    index / SLOTS_PER_PARTY
}

/// Position of a flat slot index within its party
pub fn position_in_party(index: usize) -> usize {
    index % SLOTS_PER_PARTY
}

/// Group a flat slot sequence into parties of four, preserving order.
///
/// A trailing partial party is kept as-is (shorter than four).
pub fn chunk_parties<T: Clone>(slots: &[T]) -> Vec<Vec<T>> {
    slots
        .chunks(SLOTS_PER_PARTY)
        .map(|party| party.to_vec())
        .collect()
}

/// Flatten parties back into one slot sequence, party-then-slot order.
pub fn flatten_parties<T>(parties: impl IntoIterator<Item = impl IntoIterator<Item = T>>) -> Vec<T> {
    parties.into_iter().flatten().collect()
}
