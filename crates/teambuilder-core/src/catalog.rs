//! Character catalog
//!
//! The static roster, loaded once from a JSON array and never mutated.
//! Lookups are by exact id; when the source lists an id twice the first
//! record wins.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use crate::error::{TeamError, TeamResult};
use crate::filter::CharacterFilter;
use crate::types::{Character, CharacterId};

/// Read-only character table with an id index
#[derive(Debug, Clone, Default)]
pub struct CharacterCatalog {
    characters: Vec<Character>,
    index: HashMap<CharacterId, usize>,
}

impl CharacterCatalog {
    pub fn new(characters: Vec<Character>) -> Self {
        let mut index = HashMap::with_capacity(characters.len());
        for (position, character) in characters.iter().enumerate() {
            index.entry(character.id.clone()).or_insert(position);
        }
        Self { characters, index }
    }

    /// Parse a catalog from a JSON array of character records.
    pub fn from_json(json: &str) -> TeamResult<Self> {
        let characters: Vec<Character> = serde_json::from_str(json)
            .map_err(|e| TeamError::Catalog(format!("Invalid character list: {}", e)))?;
        Ok(Self::new(characters))
    }

    /// Load a catalog file (e.g. `characters.json`).
    pub fn load(path: impl AsRef<Path>) -> TeamResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        tracing::debug!(path = %path.display(), characters = catalog.len(), "Loaded catalog");
        Ok(catalog)
    }

    pub fn get(&self, id: &CharacterId) -> Option<&Character> {
        self.index.get(id).map(|&position| &self.characters[position])
    }

    pub fn contains(&self, id: &CharacterId) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Characters in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.characters.iter()
    }

    /// Characters matching a filter, in catalog order
    pub fn filter(&self, filter: &CharacterFilter) -> Vec<&Character> {
        self.characters
            .iter()
            .filter(|character| filter.matches(character))
            .collect()
    }

    /// Every specialty in the catalog, sorted and de-duplicated
    pub fn specialties(&self) -> Vec<&str> {
        self.characters
            .iter()
            .flat_map(|c| c.specialties.iter().map(String::as_str))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Every tag in the catalog, sorted and de-duplicated
    pub fn tags(&self) -> Vec<&str> {
        self.characters
            .iter()
            .flat_map(|c| c.tags.iter().map(String::as_str))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl FromIterator<Character> for CharacterCatalog {
    fn from_iter<I: IntoIterator<Item = Character>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
