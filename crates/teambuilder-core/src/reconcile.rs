//! Slot reconciliation
//!
//! Turns a decoded or loaded [`Team`] into one instruction per slot for
//! whatever surface displays the grid. Ids the catalog does not know are
//! cleared, so a stale share link can never leave a dangling reference in
//! slot state.

use crate::catalog::CharacterCatalog;
use crate::types::{Character, Team};

/// What to do with one slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotInstruction<'a> {
    /// Show this character in the slot
    Fill(usize, &'a Character),
    /// Show the slot as empty
    Clear(usize),
}

impl SlotInstruction<'_> {
    pub fn index(&self) -> usize {
        match self {
            SlotInstruction::Fill(index, _) | SlotInstruction::Clear(index) => *index,
        }
    }
}

/// One instruction per slot, in index order.
pub fn reconcile<'a>(team: &Team, catalog: &'a CharacterCatalog) -> Vec<SlotInstruction<'a>> {
    team.slots()
        .iter()
        .enumerate()
        .map(|(index, slot)| match slot {
            None => SlotInstruction::Clear(index),
            Some(id) => match catalog.get(id) {
                Some(character) => SlotInstruction::Fill(index, character),
                None => {
                    tracing::debug!(index, id = %id, "Unknown character in slot, clearing");
                    SlotInstruction::Clear(index)
                }
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Mode;
    use crate::types::{Attribute, CharacterId, DamageType};

    fn catalog() -> CharacterCatalog {
        ["3003", "3004"]
            .into_iter()
            .map(|id| Character {
                id: CharacterId::from(id),
                name: format!("Character {}", id),
                rarity: 6,
                attribute: Attribute::Spirit,
                damage_type: DamageType::Reality,
                specialties: Vec::new(),
                tags: Vec::new(),
            })
            .collect()
    }

    #[test]
    fn test_one_instruction_per_slot() {
        let catalog = catalog();
        for mode in Mode::ALL {
            let team = Team::new(mode);
            let instructions = reconcile(&team, &catalog);
            assert_eq!(instructions.len(), mode.layout().total_slots);
            assert!(instructions
                .iter()
                .enumerate()
                .all(|(i, ins)| *ins == SlotInstruction::Clear(i)));
        }
    }

    #[test]
    fn test_known_fills_unknown_clears() {
        let catalog = catalog();
        let team = Team::from_slots(
            Mode::Standard,
            vec![
                None,
                Some(CharacterId::from("3004")),
                Some(CharacterId::from("gone")),
                Some(CharacterId::from("3003")),
            ],
        );

        let instructions = reconcile(&team, &catalog);
        assert_eq!(instructions[0], SlotInstruction::Clear(0));
        assert!(matches!(instructions[1], SlotInstruction::Fill(1, c) if c.id.as_str() == "3004"));
        assert_eq!(instructions[2], SlotInstruction::Clear(2));
        assert!(matches!(instructions[3], SlotInstruction::Fill(3, c) if c.id.as_str() == "3003"));
        assert_eq!(
            instructions.iter().map(SlotInstruction::index).collect::<Vec<_>>(),
            vec![0, 1, 2, 3]
        );
    }

    #[test]
    fn test_id_match_is_exact() {
        let catalog = catalog();
        let team = Team::from_slots(Mode::Standard, vec![Some(CharacterId::from(" 3003"))]);
        assert_eq!(reconcile(&team, &catalog)[0], SlotInstruction::Clear(0));
    }
}
