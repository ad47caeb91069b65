//! Core types for Team Builder

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::layout::{layout_for, Layout, Mode, SLOTS_PER_PARTY};

/// Identifier of a character in the catalog
///
/// Ids are compared as exact strings. Catalogs that store numeric ids are
/// accepted and the number is kept in its decimal form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CharacterId(String);

impl CharacterId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty id never names a character; slots holding one are empty.
    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for CharacterId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => Self(s),
            RawId::Number(n) => Self(n.to_string()),
        })
    }
}

impl From<&str> for CharacterId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CharacterId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a saved team record
///
/// Derived from the creation time in milliseconds and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(String);

impl TeamId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn from_millis(millis: i64) -> Self {
        Self(millis.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of a timestamp-derived id, if it is one
    pub fn as_millis(&self) -> Option<i64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Character attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    Beast,
    Plant,
    Star,
    Mineral,
    Spirit,
    Intellect,
}

impl Attribute {
    pub const ALL: [Attribute; 6] = [
        Attribute::Beast,
        Attribute::Plant,
        Attribute::Star,
        Attribute::Mineral,
        Attribute::Spirit,
        Attribute::Intellect,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Attribute::Beast => "Beast",
            Attribute::Plant => "Plant",
            Attribute::Star => "Star",
            Attribute::Mineral => "Mineral",
            Attribute::Spirit => "Spirit",
            Attribute::Intellect => "Intellect",
        }
    }

    /// Case-insensitive lookup by name
    pub fn from_name(name: &str) -> Option<Self> {
        Attribute::ALL
            .into_iter()
            .find(|attr| attr.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Damage type dealt by a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageType {
    Reality,
    Mental,
}

impl DamageType {
    pub const ALL: [DamageType; 2] = [DamageType::Reality, DamageType::Mental];

    pub fn name(self) -> &'static str {
        match self {
            DamageType::Reality => "Reality",
            DamageType::Mental => "Mental",
        }
    }

    /// Case-insensitive lookup by name
    pub fn from_name(name: &str) -> Option<Self> {
        DamageType::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for DamageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A character record from the catalog. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    #[serde(default)]
    pub rarity: u8,
    pub attribute: Attribute,
    pub damage_type: DamageType,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Character {
    /// Rarity as a row of stars, for display
    pub fn stars(&self) -> String {
        "★".repeat(self.rarity as usize)
    }
}

/// A team: a mode plus one slot per grid position.
///
/// `slots().len()` always equals the layout's `total_slots`. Constructors fit
/// whatever they are given to the layout, padding with empty slots or
/// dropping the excess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    mode: Mode,
    slots: Vec<Option<CharacterId>>,
    pub name: String,
    pub description: String,
}

impl Team {
    /// An empty team for the given mode
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            slots: vec![None; layout_for(mode).total_slots],
            name: String::new(),
            description: String::new(),
        }
    }

    /// Build a team from a flat slot sequence, fitted to the mode's layout.
    pub fn from_slots(mode: Mode, slots: impl IntoIterator<Item = Option<CharacterId>>) -> Self {
        let total = layout_for(mode).total_slots;
        let mut fitted: Vec<Option<CharacterId>> = slots
            .into_iter()
            .take(total)
            .map(|slot| slot.filter(|id| !id.is_blank()))
            .collect();
        fitted.resize(total, None);

        Self {
            mode,
            slots: fitted,
            name: String::new(),
            description: String::new(),
        }
    }

    /// Build a team from nested parties, flattened in party-then-slot order.
    pub fn from_parties<P>(mode: Mode, parties: impl IntoIterator<Item = P>) -> Self
    where
        P: IntoIterator<Item = Option<CharacterId>>,
    {
        Self::from_slots(mode, parties.into_iter().flatten())
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn layout(&self) -> Layout {
        layout_for(self.mode)
    }

    pub fn slots(&self) -> &[Option<CharacterId>] {
        &self.slots
    }

    /// Character id at a slot, `None` when empty or out of range
    pub fn slot(&self, index: usize) -> Option<&CharacterId> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Set or clear a slot. Returns `false` when the index is outside the grid.
    pub fn set_slot(&mut self, index: usize, id: Option<CharacterId>) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) => {
                *slot = id.filter(|id| !id.is_blank());
                true
            }
            None => false,
        }
    }

    /// Exchange two slots. Returns `false` when either index is outside the grid.
    pub fn swap_slots(&mut self, a: usize, b: usize) -> bool {
        if a >= self.slots.len() || b >= self.slots.len() {
            return false;
        }
        self.slots.swap(a, b);
        true
    }

    /// Slots grouped by party
    pub fn parties(&self) -> impl Iterator<Item = &[Option<CharacterId>]> {
        self.slots.chunks(SLOTS_PER_PARTY)
    }

    /// Number of occupied slots
    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.filled_count() == 0
    }
}
