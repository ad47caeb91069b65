//! Application state
//!
//! Everything the builder mutates lives in one owned [`AppState`]: the
//! selected mode, the slot contents, the description box and which saved
//! team (if any) is loaded. The codec, reconciler and store stay stateless;
//! operations here call into them and fold the results back in.

use crate::catalog::CharacterCatalog;
use crate::error::{TeamError, TeamResult};
use crate::layout::{Layout, Mode};
use crate::reconcile::{reconcile, SlotInstruction};
use crate::storage::KeyValueStore;
use crate::store::{SavedTeamRecord, TeamStore};
use crate::types::{CharacterId, Team, TeamId};

/// Name given to a shared team that was never saved under a name
pub const DEFAULT_SHARE_NAME: &str = "Shared Team";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    /// Mode and slot grid; name and description live outside it
    grid: Team,
    /// Contents of the description box
    pub description: String,
    loaded_team_id: Option<TeamId>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Mode::default())
    }
}

impl AppState {
    pub fn new(mode: Mode) -> Self {
        Self {
            grid: Team::new(mode),
            description: String::new(),
            loaded_team_id: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.grid.mode()
    }

    pub fn layout(&self) -> Layout {
        self.grid.layout()
    }

    pub fn slots(&self) -> &[Option<CharacterId>] {
        self.grid.slots()
    }

    pub fn slot(&self, index: usize) -> Option<&CharacterId> {
        self.grid.slot(index)
    }

    /// Saved team currently loaded, if the slots came from one
    pub fn loaded_team_id(&self) -> Option<&TeamId> {
        self.loaded_team_id.as_ref()
    }

    /// Switch layout. The grid is rebuilt empty.
    pub fn set_mode(&mut self, mode: Mode) {
        self.grid = Team::new(mode);
    }

    /// Drop a character from the list onto a slot.
    ///
    /// Returns `false` (and changes nothing) for a blank or unknown
    /// character or a slot outside the grid.
    pub fn place(&mut self, index: usize, id: &CharacterId, catalog: &CharacterCatalog) -> bool {
        if id.is_blank() || !catalog.contains(id) {
            return false;
        }
        self.grid.set_slot(index, Some(id.clone()))
    }

    /// Drag a filled slot onto another slot. The two contents swap, so an
    /// empty target leaves the source empty.
    ///
    /// Returns `false` for an empty source, the same slot, or an index
    /// outside the grid.
    pub fn move_slot(&mut self, from: usize, to: usize) -> bool {
        if from == to || self.grid.slot(from).is_none() {
            return false;
        }
        self.grid.swap_slots(from, to)
    }

    /// Empty a slot (clicking a filled slot). Returns whether it held anything.
    pub fn clear_slot(&mut self, index: usize) -> bool {
        self.grid.slot(index).is_some() && self.grid.set_slot(index, None)
    }

    /// Apply reconciler output to the grid.
    pub fn apply(&mut self, instructions: &[SlotInstruction<'_>]) {
        for instruction in instructions {
            match *instruction {
                SlotInstruction::Fill(index, character) => {
                    self.grid.set_slot(index, Some(character.id.clone()));
                }
                SlotInstruction::Clear(index) => {
                    self.grid.set_slot(index, None);
                }
            }
        }
    }

    /// Show a team that arrived by link or pasted code.
    ///
    /// It is not a saved team, so description autosave is switched off. The
    /// description box only takes the shared text when the team is named;
    /// an unnamed code leaves the box as it was.
    pub fn load_shared(&mut self, team: &Team, catalog: &CharacterCatalog) {
        self.show(team, catalog);
        if !team.name.is_empty() {
            self.description = team.description.clone();
        }
        self.loaded_team_id = None;
    }

    /// Show a saved team and remember its id for description autosave.
    ///
    /// # Errors
    ///
    /// Returns `TeamError::NotFound` when no team has this id.
    pub fn load_saved<S: KeyValueStore>(
        &mut self,
        store: &TeamStore<S>,
        id: &TeamId,
        catalog: &CharacterCatalog,
    ) -> TeamResult<()> {
        let record = store
            .get(id)?
            .ok_or_else(|| TeamError::NotFound(id.to_string()))?;
        self.show(&record.team, catalog);
        self.description = record.team.description.clone();
        self.loaded_team_id = Some(record.id);
        Ok(())
    }

    fn show(&mut self, team: &Team, catalog: &CharacterCatalog) {
        self.set_mode(team.mode());
        self.apply(&reconcile(team, catalog));
    }

    /// Current grid and description as a team with the given name
    pub fn to_team(&self, name: impl Into<String>) -> Team {
        self.grid
            .clone()
            .with_name(name)
            .with_description(self.description.clone())
    }

    /// The current grid ready for sharing, or `None` when every slot is empty.
    pub fn shareable_team(&self) -> Option<Team> {
        if self.grid.is_empty() {
            return None;
        }
        Some(self.to_team(DEFAULT_SHARE_NAME))
    }

    /// Save the current grid as a new team.
    pub fn save_as<S: KeyValueStore>(
        &self,
        store: &TeamStore<S>,
        name: &str,
        description: &str,
    ) -> TeamResult<SavedTeamRecord> {
        store.create(name, description, &self.to_team(name))
    }

    /// Store new description text for the loaded team, if one is loaded.
    ///
    /// Returns `true` when the store was written (worth a "Saved" notice).
    pub fn autosave_description<S: KeyValueStore>(
        &mut self,
        store: &TeamStore<S>,
        text: &str,
    ) -> TeamResult<bool> {
        self.description = text.to_string();
        match &self.loaded_team_id {
            Some(id) => store.update_description(id, text),
            None => Ok(false),
        }
    }
}
