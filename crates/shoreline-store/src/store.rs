//! The in-memory roster and event list, kept in step with storage.
//!
//! Every mutation writes the whole state back before returning. A failed
//! write is logged and reported through [`Rerender::persisted`]; the in-memory
//! state stays authoritative for the rest of the session.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::model::{AppState, CleanupEvent, CrewMember, EventDraft};
use crate::persistence::{self, PersistenceError};
use crate::storage::KeyValueStore;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Input rejected before any mutation happened.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Which part of the model changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Crew,
    Events,
    All,
}

/// Outcome of a successful mutation: what to re-render, and whether the
/// change reached storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rerender {
    pub scope: Scope,
    pub persisted: bool,
}

pub struct DomainStore {
    state: AppState,
    storage: Arc<dyn KeyValueStore>,
    key: String,
    last_error: Option<PersistenceError>,
}

impl DomainStore {
    /// Seed the model from `storage`.
    ///
    /// Never fails: unreadable or corrupt saved data is logged and replaced by
    /// the empty state.
    pub fn open(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let mut last_error = None;
        let state = match persistence::load(storage.as_ref(), &key) {
            Ok(state) => dedupe(state),
            Err(e) => {
                if matches!(e, PersistenceError::CorruptPersistedState(_)) {
                    tracing::warn!(key = %key, "Discarding saved state: {}", e);
                } else {
                    tracing::warn!(key = %key, "Starting with empty state: {}", e);
                }
                last_error = Some(e);
                AppState::default()
            }
        };

        tracing::info!(
            crew = state.crew.len(),
            events = state.events.len(),
            "Domain store opened"
        );

        Self {
            state,
            storage,
            key,
            last_error,
        }
    }

    /// Take the most recent load or save failure, if any.
    pub fn take_error(&mut self) -> Option<PersistenceError> {
        self.last_error.take()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Crew in insertion order.
    pub fn crew(&self) -> &[CrewMember] {
        &self.state.crew
    }

    /// Events in insertion order.
    pub fn events(&self) -> &[CleanupEvent] {
        &self.state.events
    }

    pub fn crew_member(&self, id: &str) -> Option<&CrewMember> {
        self.state.crew.iter().find(|m| m.id == id)
    }

    pub fn event(&self, id: &str) -> Option<&CleanupEvent> {
        self.state.events.iter().find(|e| e.id == id)
    }

    /// Add a crew member.
    ///
    /// # Errors
    /// `StoreError::InvalidInput` if `name` is blank; nothing is mutated or written.
    pub fn add_crew_member(&mut self, name: &str, role: &str) -> Result<Rerender, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::InvalidInput("crew member name is required".into()));
        }

        let member = CrewMember {
            id: self.fresh_id(),
            name: name.to_string(),
            role: role.trim().to_string(),
            joined_at: Utc::now(),
        };
        tracing::info!(id = %member.id, "Crew member added");
        self.state.crew.push(member);

        Ok(self.commit(Scope::Crew))
    }

    /// Remove a crew member by id. An unknown id changes nothing but still
    /// writes and asks for a re-render.
    pub fn remove_crew_member(&mut self, id: &str) -> Rerender {
        let before = self.state.crew.len();
        self.state.crew.retain(|m| m.id != id);
        if self.state.crew.len() < before {
            tracing::info!(id, "Crew member removed");
        } else {
            tracing::debug!(id, "Remove requested for unknown crew member");
        }
        self.commit(Scope::Crew)
    }

    /// Append a new event, defaulting any missing fields.
    pub fn create_event(&mut self, draft: EventDraft) -> Rerender {
        let event = draft.into_event(self.fresh_id(), Utc::now());
        tracing::info!(id = %event.id, title = %event.title, "Cleanup event created");
        self.state.events.push(event);
        self.commit(Scope::Events)
    }

    fn commit(&mut self, scope: Scope) -> Rerender {
        let persisted = match persistence::save(self.storage.as_ref(), &self.key, &self.state) {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!("State kept in memory only: {}", e);
                self.last_error = Some(e);
                false
            }
        };
        Rerender { scope, persisted }
    }

    /// A v4 UUID not already used by any crew member or event.
    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.crew_member(&id).is_none() && self.event(&id).is_none() {
                return id;
            }
        }
    }
}

impl std::fmt::Debug for DomainStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomainStore")
            .field("key", &self.key)
            .field("crew", &self.state.crew.len())
            .field("events", &self.state.events.len())
            .finish()
    }
}

/// Keep the first occurrence of every id; saved data edited by hand can repeat them.
fn dedupe(mut state: AppState) -> AppState {
    let mut seen = HashSet::new();
    let crew_before = state.crew.len();
    state.crew.retain(|m| seen.insert(m.id.clone()));

    seen.clear();
    let events_before = state.events.len();
    state.events.retain(|e| seen.insert(e.id.clone()));

    let dropped = crew_before - state.crew.len() + events_before - state.events.len();
    if dropped > 0 {
        tracing::warn!(dropped, "Dropped saved entries with duplicate ids");
    }
    state
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use crate::storage::MemoryStorage;

    const KEY: &str = "beachCleanupState";

    fn open_memory() -> (Arc<MemoryStorage>, DomainStore) {
        let storage = Arc::new(MemoryStorage::new());
        let store = DomainStore::open(storage.clone(), KEY);
        (storage, store)
    }

    #[test]
    fn test_add_crew_member_trims_and_persists() {
        let (storage, mut store) = open_memory();

        let rerender = store.add_crew_member("  Ana  ", " Captain ").unwrap();
        assert_eq!(
            rerender,
            Rerender {
                scope: Scope::Crew,
                persisted: true
            }
        );
        assert_eq!(store.crew()[0].name, "Ana");
        assert_eq!(store.crew()[0].role, "Captain");
        assert_eq!(storage.write_count(), 1);
    }

    #[test]
    fn test_blank_names_rejected_without_write() {
        let (storage, mut store) = open_memory();

        for name in ["", "   ", "\t\n"] {
            let err = store.add_crew_member(name, "Diver").unwrap_err();
            assert!(matches!(err, StoreError::InvalidInput(_)));
        }
        assert!(store.crew().is_empty());
        assert_eq!(storage.write_count(), 0);
        assert_eq!(storage.get(KEY).unwrap(), None);
    }

    #[test]
    fn test_ids_unique_in_tight_loop() {
        let (_, mut store) = open_memory();
        for i in 0..200 {
            store.add_crew_member(&format!("m{i}"), "").unwrap();
            store.create_event(EventDraft::default());
        }
        let ids: HashSet<&str> = store
            .crew()
            .iter()
            .map(|m| m.id.as_str())
            .chain(store.events().iter().map(|e| e.id.as_str()))
            .collect();
        assert_eq!(ids.len(), 400);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let (_, mut store) = open_memory();
        for name in ["Zoe", "Ana", "Mo"] {
            store.add_crew_member(name, "").unwrap();
        }
        let names: Vec<&str> = store.crew().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Zoe", "Ana", "Mo"]);
    }

    #[test]
    fn test_remove_crew_member() {
        let (_, mut store) = open_memory();
        store.add_crew_member("Ana", "").unwrap();
        store.add_crew_member("Ben", "").unwrap();
        let ana = store.crew()[0].id.clone();

        let rerender = store.remove_crew_member(&ana);
        assert_eq!(rerender.scope, Scope::Crew);
        assert_eq!(store.crew().len(), 1);
        assert_eq!(store.crew()[0].name, "Ben");
        assert!(store.crew_member(&ana).is_none());
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let (storage, mut store) = open_memory();
        store.add_crew_member("Ana", "").unwrap();

        let rerender = store.remove_crew_member("missing");
        assert!(rerender.persisted);
        assert_eq!(store.crew().len(), 1);
        assert_eq!(storage.write_count(), 2);
    }

    #[test]
    fn test_create_event_defaults() {
        let (_, mut store) = open_memory();
        let rerender = store.create_event(EventDraft::default());
        assert_eq!(rerender.scope, Scope::Events);

        let event = &store.events()[0];
        assert_eq!(event.title, "Beach Cleanup");
        assert_eq!(event.location, "Local Beach");
        assert_eq!(event.attendees, 0);
        assert!(store.event(&event.id).is_some());
    }

    #[test]
    fn test_reload_reproduces_state() {
        let (storage, mut store) = open_memory();
        store.add_crew_member("Ana", "Captain").unwrap();
        store.add_crew_member("Ben", "").unwrap();
        let ben = store.crew()[1].id.clone();
        store.remove_crew_member(&ben);
        store.create_event(EventDraft {
            title: Some("Dawn Patrol".into()),
            ..Default::default()
        });

        let reopened = DomainStore::open(storage, KEY);
        assert_eq!(reopened.state(), store.state());
    }

    #[test]
    fn test_corrupt_storage_falls_back_to_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(KEY, "<<garbage>>").unwrap();

        let mut store = DomainStore::open(storage.clone(), KEY);
        assert!(store.state().is_empty());
        assert!(matches!(
            store.take_error(),
            Some(PersistenceError::CorruptPersistedState(_))
        ));
        assert!(store.take_error().is_none());

        // The next mutation overwrites the corrupt blob.
        store.add_crew_member("Ana", "").unwrap();
        let reopened = DomainStore::open(storage, KEY);
        assert_eq!(reopened.crew().len(), 1);
    }

    #[test]
    fn test_quota_failure_keeps_memory_state() {
        let storage = Arc::new(MemoryStorage::with_quota(16));
        let mut store = DomainStore::open(storage.clone(), KEY);

        let rerender = store.add_crew_member("Ana", "Captain").unwrap();
        assert!(!rerender.persisted);
        assert!(matches!(
            store.take_error(),
            Some(PersistenceError::StorageWrite(_))
        ));
        assert_eq!(store.crew().len(), 1);
        assert_eq!(storage.get(KEY).unwrap(), None);
    }

    #[test]
    fn test_duplicate_saved_ids_are_dropped() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set(
                KEY,
                r#"{"crew":[
                    {"id":"x","name":"Ana","role":"","joinedAt":"2026-10-16T08:00:00Z"},
                    {"id":"x","name":"Ana again","role":"","joinedAt":"2026-10-16T08:00:01Z"}
                ],"events":[]}"#,
            )
            .unwrap();

        let store = DomainStore::open(storage, KEY);
        assert_eq!(store.crew().len(), 1);
        assert_eq!(store.crew()[0].name, "Ana");
    }

    #[test]
    fn test_events_are_append_only() {
        let (storage, mut store) = open_memory();
        let first = store.add_crew_member("Ana", "").unwrap();
        assert_eq!(first.scope, Scope::Crew);
        store.create_event(EventDraft::default());
        store.create_event(EventDraft {
            title: Some("Dawn sweep".into()),
            ..EventDraft::default()
        });

        let id = store.crew()[0].id.clone();
        store.remove_crew_member(&id);

        assert!(store.crew().is_empty());
        let titles: Vec<_> = store.events().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["Beach Cleanup", "Dawn sweep"]);

        let reopened = DomainStore::open(storage, KEY);
        assert_eq!(reopened.events().len(), 2);
    }
}
