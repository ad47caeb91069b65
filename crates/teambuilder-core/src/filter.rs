//! Catalog filtering
//!
//! All criteria must hold at once: name search, one optional attribute, one
//! optional damage type, and every selected specialty and tag.

use crate::types::{Attribute, Character, DamageType};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterFilter {
    /// Case-insensitive substring of the character name
    pub search: String,
    pub attribute: Option<Attribute>,
    pub damage_type: Option<DamageType>,
    /// Required specialties (all of them)
    pub specialties: Vec<String>,
    /// Required tags (all of them)
    pub tags: Vec<String>,
}

impl CharacterFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attribute = Some(attribute);
        self
    }

    pub fn with_damage_type(mut self, damage_type: DamageType) -> Self {
        self.damage_type = Some(damage_type);
        self
    }

    pub fn with_specialty(mut self, specialty: impl Into<String>) -> Self {
        self.specialties.push(specialty.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Select an attribute, or clear it when it is already selected.
    pub fn toggle_attribute(&mut self, attribute: Attribute) {
        self.attribute = if self.attribute == Some(attribute) {
            None
        } else {
            Some(attribute)
        };
    }

    /// Select a damage type, or clear it when it is already selected.
    pub fn toggle_damage_type(&mut self, damage_type: DamageType) {
        self.damage_type = if self.damage_type == Some(damage_type) {
            None
        } else {
            Some(damage_type)
        };
    }

    /// Check or uncheck a specialty box.
    pub fn toggle_specialty(&mut self, specialty: &str) {
        toggle_entry(&mut self.specialties, specialty);
    }

    /// Check or uncheck a tag box.
    pub fn toggle_tag(&mut self, tag: &str) {
        toggle_entry(&mut self.tags, tag);
    }

    pub fn matches(&self, character: &Character) -> bool {
        let search = self.search.to_lowercase();

        character.name.to_lowercase().contains(&search)
            && self.attribute.map_or(true, |a| character.attribute == a)
            && self.damage_type.map_or(true, |d| character.damage_type == d)
            && self
                .specialties
                .iter()
                .all(|spec| character.specialties.contains(spec))
            && self.tags.iter().all(|tag| character.tags.contains(tag))
    }
}

fn toggle_entry(entries: &mut Vec<String>, value: &str) {
    if let Some(position) = entries.iter().position(|e| e == value) {
        entries.remove(position);
    } else {
        entries.push(value.to_string());
    }
}
