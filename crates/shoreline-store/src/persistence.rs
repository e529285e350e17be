//! Serialization of [`AppState`] to a single key.
//!
//! The stored record is `{ crew, events, lastUpdated }` as JSON. Loading an
//! absent key yields the empty state; loading a malformed value is an error
//! the caller is expected to recover from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shoreline_core::StorageError;
use thiserror::Error;

use crate::model::{AppState, CleanupEvent, CrewMember};
use crate::storage::KeyValueStore;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Persisted state is corrupt: {0}")]
    CorruptPersistedState(#[source] serde_json::Error),

    #[error("Failed to read persisted state: {0}")]
    StorageRead(#[source] StorageError),

    #[error("Failed to write persisted state: {0}")]
    StorageWrite(#[source] StorageError),

    #[error("Failed to serialize state: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl PersistenceError {
    /// The storage-level cause, if the failure came from the backend.
    pub fn storage_error(&self) -> Option<&StorageError> {
        match self {
            Self::StorageRead(e) | Self::StorageWrite(e) => Some(e),
            _ => None,
        }
    }
}

/// On-disk shape of the state blob.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedState {
    #[serde(default)]
    crew: Vec<CrewMember>,
    #[serde(default)]
    events: Vec<CleanupEvent>,
    #[serde(default)]
    last_updated: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PersistedStateRef<'a> {
    crew: &'a [CrewMember],
    events: &'a [CleanupEvent],
    last_updated: DateTime<Utc>,
}

/// Write `state` under `key`, replacing whatever was there.
///
/// Returns the `lastUpdated` stamp that was written.
///
/// # Errors
/// `PersistenceError::StorageWrite` if the backend rejects the write.
pub fn save(
    storage: &dyn KeyValueStore,
    key: &str,
    state: &AppState,
) -> Result<DateTime<Utc>, PersistenceError> {
    let last_updated = Utc::now();
    let blob = serde_json::to_string(&PersistedStateRef {
        crew: &state.crew,
        events: &state.events,
        last_updated,
    })
    .map_err(PersistenceError::Serialize)?;

    storage
        .set(key, &blob)
        .map_err(PersistenceError::StorageWrite)?;

    tracing::debug!(
        key,
        bytes = blob.len(),
        crew = state.crew.len(),
        events = state.events.len(),
        "Persisted state"
    );
    Ok(last_updated)
}

/// Read the state stored under `key`.
///
/// # Errors
/// `PersistenceError::CorruptPersistedState` if the value is not a valid
/// state record, `PersistenceError::StorageRead` if the backend fails.
pub fn load(storage: &dyn KeyValueStore, key: &str) -> Result<AppState, PersistenceError> {
    let Some(blob) = storage.get(key).map_err(PersistenceError::StorageRead)? else {
        return Ok(AppState::default());
    };

    let persisted: PersistedState =
        serde_json::from_str(&blob).map_err(PersistenceError::CorruptPersistedState)?;

    Ok(AppState {
        crew: persisted.crew,
        events: persisted.events,
        selected_beach: None,
    })
}
