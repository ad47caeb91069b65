//! Saved teams
//!
//! CRUD over named team records. The full list lives under one key of a
//! [`KeyValueStore`]; every mutation reads the list, changes it, and writes
//! the whole list back.
//!
//! Record ids come from the creation time in milliseconds. A high-water mark
//! is kept next to the list so that two saves in the same millisecond, or a
//! save right after deleting the newest team, still get a fresh id.

use serde::{Deserialize, Serialize};

use crate::error::{TeamError, TeamResult, ValidationError};
use crate::layout::{chunk_parties, Mode};
use crate::storage::KeyValueStore;
use crate::types::{CharacterId, Team, TeamId};

/// Key holding the saved team list
pub const TEAMS_KEY: &str = "reverse1999_saved_teams";

/// Key holding the highest id handed out so far
pub const TEAM_ID_SEQ_KEY: &str = "reverse1999_saved_teams_seq";

/// A saved team: an immutable id plus the team itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredRecord", into = "StoredRecord")]
pub struct SavedTeamRecord {
    pub id: TeamId,
    pub team: Team,
}

impl SavedTeamRecord {
    pub fn name(&self) -> &str {
        &self.team.name
    }

    pub fn description(&self) -> &str {
        &self.team.description
    }

    pub fn mode(&self) -> Mode {
        self.team.mode()
    }
}

/// Persisted shape: parties are nested, as in the browser's local storage
#[derive(Clone, Serialize, Deserialize)]
struct StoredRecord {
    id: TeamId,
    name: String,
    #[serde(default)]
    description: String,
    mode: Mode,
    #[serde(default)]
    teams: Vec<Vec<Option<CharacterId>>>,
}

impl From<StoredRecord> for SavedTeamRecord {
    fn from(stored: StoredRecord) -> Self {
        Self {
            id: stored.id,
            team: Team::from_parties(stored.mode, stored.teams)
                .with_name(stored.name)
                .with_description(stored.description),
        }
    }
}

impl From<SavedTeamRecord> for StoredRecord {
    fn from(record: SavedTeamRecord) -> Self {
        let teams = chunk_parties(record.team.slots());
        Self {
            id: record.id,
            mode: record.team.mode(),
            name: record.team.name,
            description: record.team.description,
            teams,
        }
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Named team records over a key-value store
pub struct TeamStore<S> {
    kv: S,
    clock: fn() -> i64,
}

impl<S: KeyValueStore> TeamStore<S> {
    pub fn new(kv: S) -> Self {
        Self {
            kv,
            clock: now_millis,
        }
    }

    /// Replace the millisecond clock used for new ids.
    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    /// The underlying key-value store
    pub fn backend(&self) -> &S {
        &self.kv
    }

    /// All saved teams in insertion order. An absent list is empty.
    pub fn list(&self) -> TeamResult<Vec<SavedTeamRecord>> {
        match self.kv.get(TEAMS_KEY)? {
            Some(json) => serde_json::from_str(&json)
                .map_err(|e| TeamError::Serialization(format!("Invalid saved teams: {}", e))),
            None => Ok(Vec::new()),
        }
    }

    /// Look up one saved team.
    pub fn get(&self, id: &TeamId) -> TeamResult<Option<SavedTeamRecord>> {
        Ok(self.list()?.into_iter().find(|record| &record.id == id))
    }

    /// Save a team under a new id.
    ///
    /// Name and description are trimmed and replace whatever the team
    /// carried.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyName` (nothing is written) when the
    /// trimmed name is empty.
    pub fn create(&self, name: &str, description: &str, team: &Team) -> TeamResult<SavedTeamRecord> {
        let name = require_name(name)?;

        let mut records = self.list()?;
        let id = self.next_id(&records)?;

        let record = SavedTeamRecord {
            id,
            team: team
                .clone()
                .with_name(name)
                .with_description(description.trim()),
        };
        records.push(record.clone());
        self.write_all(&records)?;

        tracing::info!(id = %record.id, name = %record.name(), mode = %record.mode(), "Saved team");
        Ok(record)
    }

    /// Rename a saved team and replace its description.
    ///
    /// # Errors
    ///
    /// - `ValidationError::EmptyName` when the trimmed name is empty
    /// - `TeamError::NotFound` when no team has this id
    pub fn update(&self, id: &TeamId, name: &str, description: &str) -> TeamResult<SavedTeamRecord> {
        let name = require_name(name)?;

        let mut records = self.list()?;
        let record = records
            .iter_mut()
            .find(|record| &record.id == id)
            .ok_or_else(|| TeamError::NotFound(id.to_string()))?;

        record.team.name = name.to_string();
        record.team.description = description.trim().to_string();
        let updated = record.clone();
        self.write_all(&records)?;

        tracing::info!(id = %id, name = %updated.name(), "Updated team");
        Ok(updated)
    }

    /// Replace only the description, as the description box does when it
    /// loses focus.
    ///
    /// Returns `true` when something was written. An unknown id or an
    /// unchanged description writes nothing and returns `false`.
    pub fn update_description(&self, id: &TeamId, description: &str) -> TeamResult<bool> {
        let mut records = self.list()?;
        let Some(record) = records.iter_mut().find(|record| &record.id == id) else {
            tracing::debug!(id = %id, "Description autosave for unknown team skipped");
            return Ok(false);
        };

        if record.team.description == description {
            return Ok(false);
        }

        record.team.description = description.to_string();
        self.write_all(&records)?;

        tracing::info!(id = %id, "Saved team description");
        Ok(true)
    }

    /// Delete a saved team. Returns `true` when a record was removed; an
    /// unknown id writes nothing.
    pub fn delete(&self, id: &TeamId) -> TeamResult<bool> {
        let mut records = self.list()?;
        let before = records.len();
        records.retain(|record| &record.id != id);

        if records.len() == before {
            return Ok(false);
        }

        self.write_all(&records)?;
        tracing::info!(id = %id, "Deleted team");
        Ok(true)
    }

    fn write_all(&self, records: &[SavedTeamRecord]) -> TeamResult<()> {
        let json = serde_json::to_string(records)
            .map_err(|e| TeamError::Serialization(format!("Failed to encode saved teams: {}", e)))?;
        self.kv.set(TEAMS_KEY, &json)
    }

    /// Creation time in ms, bumped past every id already handed out.
    fn next_id(&self, records: &[SavedTeamRecord]) -> TeamResult<TeamId> {
        let high_water = self
            .kv
            .get(TEAM_ID_SEQ_KEY)?
            .and_then(|value| value.trim().parse::<i64>().ok())
            .unwrap_or(0);
        let newest = records
            .iter()
            .filter_map(|record| record.id.as_millis())
            .max()
            .unwrap_or(0);

        let next = high_water
            .max(newest)
            .checked_add(1)
            .ok_or_else(|| TeamError::Storage("Team id space exhausted".to_string()))?;
        let millis = (self.clock)().max(next);
        self.kv.set(TEAM_ID_SEQ_KEY, &millis.to_string())?;
        Ok(TeamId::from_millis(millis))
    }
}

fn require_name(name: &str) -> Result<&str, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        Err(ValidationError::EmptyName)
    } else {
        Ok(name)
    }
}
