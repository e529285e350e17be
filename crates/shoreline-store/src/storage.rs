//! Key-value storage backends.
//!
//! `KeyValueStore` is the durability boundary: string keys to string values,
//! whole-value overwrites only. `MemoryStorage` is the session-scoped store
//! (with an optional per-value quota); `SqliteStorage` persists to a local
//! database file.

use std::collections::HashMap;
use std::path::Path;

use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use shoreline_core::{RusqliteErrorExt, StorageError};

pub type StorageResult<T> = Result<T, StorageError>;

/// A string-keyed blob store.
///
/// Implementations must make `set` atomic: a reader sees either the old value
/// or the new one, never a partial write.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Overwrite the value at `key`.
    ///
    /// # Errors
    /// Returns `StorageError::QuotaExceeded` when the backend refuses the size,
    /// or `StorageError::WriteFailed` for any other rejected write.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
    quota_bytes: Option<usize>,
    writes: Mutex<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject any single value larger than `limit` bytes.
    pub fn with_quota(limit: usize) -> Self {
        Self {
            quota_bytes: Some(limit),
            ..Self::default()
        }
    }

    /// Number of accepted `set` calls.
    pub fn write_count(&self) -> usize {
        *self.writes.lock()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        if let Some(limit) = self.quota_bytes {
            if value.len() > limit {
                return Err(StorageError::QuotaExceeded {
                    size: value.len(),
                    limit,
                });
            }
        }
        self.entries.lock().insert(key.to_string(), value.to_string());
        *self.writes.lock() += 1;
        Ok(())
    }
}

/// SQLite-backed store: a single `kv` table.
pub struct SqliteStorage {
    conn: Mutex<Connection>,
    quota_bytes: Option<usize>,
}

impl SqliteStorage {
    /// Open the database at `path`, creating file and schema as needed.
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Create an in-memory database (for testing).
    pub fn in_memory() -> anyhow::Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    /// Reject any single value larger than `limit` bytes.
    pub fn with_quota(mut self, limit: Option<usize>) -> Self {
        self.quota_bytes = limit;
        self
    }

    fn from_connection(conn: Connection) -> anyhow::Result<Self> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
            quota_bytes: None,
        })
    }
}

impl std::fmt::Debug for SqliteStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStorage")
            .field("quota_bytes", &self.quota_bytes)
            .finish_non_exhaustive()
    }
}

impl KeyValueStore for SqliteStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.conn
            .lock()
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(|e| match e.into_storage_error() {
                StorageError::WriteFailed(msg) => StorageError::Unavailable(msg),
                other => other,
            })
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        if let Some(limit) = self.quota_bytes {
            if value.len() > limit {
                return Err(StorageError::QuotaExceeded {
                    size: value.len(),
                    limit,
                });
            }
        }
        self.conn
            .lock()
            .execute(
                "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, chrono::Utc::now().to_rfc3339()],
            )
            .map_err(RusqliteErrorExt::into_storage_error)?;
        Ok(())
    }
}
