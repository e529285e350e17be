//! Crew roster and cleanup events for Shoreline.
//!
//! Holds the in-memory model, the key-value storage backends it is saved to,
//! and the persistence adapter between them.

pub mod model;
pub mod persistence;
pub mod storage;
pub mod store;

pub use model::{AppState, CleanupEvent, CrewMember, EventDraft};
pub use persistence::PersistenceError;
pub use storage::{KeyValueStore, MemoryStorage, SqliteStorage, StorageResult};
pub use store::{DomainStore, Rerender, Scope, StoreError};
