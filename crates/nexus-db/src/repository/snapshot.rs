//! # Snapshot Store
//!
//! Key/value storage for versioned JSON snapshots, plus the typed slot the
//! cart, session and favorites repositories are built on.
//!
//! ## Envelope Format
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  snapshots table                                                        │
//! │                                                                         │
//! │  key                │ state                                  │ updated  │
//! │  ───────────────────┼────────────────────────────────────────┼───────── │
//! │  cart-storage       │ {"version":1,"state":{"items":[..]}}   │ 2026-... │
//! │  auth-storage       │ {"version":0,"state":{"user":{..}}}    │ 2026-... │
//! │  favorites-storage  │ {"version":1,"state":{"ids":[..]}}     │ 2026-... │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Tolerant Load
//! ```text
//! get(key) ──► None ─────────────────────────────► default (debug log)
//!     │
//!     └──► Some(text) ──► parse envelope ──✗──────► default (warn log)
//!                             │
//!                             ├─ version != expected ► default (warn log)
//!                             │
//!                             └─ decode state ──✗──► default (warn log)
//!                                     │
//!                                     └──────────────► state
//! ```
//!
//! Saving is strict: a failed write is returned to the caller.

use async_trait::async_trait;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};

// =============================================================================
// Store Trait
// =============================================================================

/// Raw snapshot storage: opaque text under a string key.
#[async_trait]
pub trait SnapshotStore: Send + Sync + fmt::Debug {
    /// Returns the stored text, or `None` if the key was never written.
    async fn get(&self, key: &str) -> DbResult<Option<String>>;

    /// Inserts or replaces the text under `key`.
    async fn put(&self, key: &str, state: &str) -> DbResult<()>;

    /// Removes `key`. Returns whether anything was removed.
    async fn delete(&self, key: &str) -> DbResult<bool>;
}

/// A store shared by several repositories.
pub type SharedSnapshotStore = Arc<dyn SnapshotStore>;

// =============================================================================
// SQLite Store
// =============================================================================

/// Snapshot store backed by the `snapshots` table.
#[derive(Debug, Clone)]
pub struct SqliteSnapshotStore {
    pool: SqlitePool,
}

impl SqliteSnapshotStore {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteSnapshotStore { pool }
    }
}

#[async_trait]
impl SnapshotStore for SqliteSnapshotStore {
    async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let state: Option<String> =
            sqlx::query_scalar("SELECT state FROM snapshots WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(state)
    }

    async fn put(&self, key: &str, state: &str) -> DbResult<()> {
        debug!(key = %key, bytes = state.len(), "Writing snapshot");

        sqlx::query(
            r#"
            INSERT INTO snapshots (key, state, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                state = excluded.state,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(state)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM snapshots WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// =============================================================================
// In-Memory Store
// =============================================================================

/// Snapshot store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        MemorySnapshotStore::default()
    }

    fn with_entries<R>(&self, f: impl FnOnce(&mut HashMap<String, String>) -> R) -> R {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut entries)
    }
}

#[async_trait]
impl SnapshotStore for MemorySnapshotStore {
    async fn get(&self, key: &str) -> DbResult<Option<String>> {
        Ok(self.with_entries(|e| e.get(key).cloned()))
    }

    async fn put(&self, key: &str, state: &str) -> DbResult<()> {
        self.with_entries(|e| e.insert(key.to_string(), state.to_string()));
        Ok(())
    }

    async fn delete(&self, key: &str) -> DbResult<bool> {
        Ok(self.with_entries(|e| e.remove(key).is_some()))
    }
}

// =============================================================================
// Versioned Envelope
// =============================================================================

/// `{"version": N, "state": ...}`
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub version: u32,
    pub state: T,
}

/// One typed, versioned snapshot under a fixed key.
pub struct SnapshotSlot<T> {
    store: SharedSnapshotStore,
    key: &'static str,
    version: u32,
    _state: PhantomData<fn() -> T>,
}

impl<T> fmt::Debug for SnapshotSlot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotSlot")
            .field("key", &self.key)
            .field("version", &self.version)
            .finish()
    }
}

impl<T> Clone for SnapshotSlot<T> {
    fn clone(&self) -> Self {
        SnapshotSlot {
            store: Arc::clone(&self.store),
            key: self.key,
            version: self.version,
            _state: PhantomData,
        }
    }
}

impl<T> SnapshotSlot<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    pub fn new(store: SharedSnapshotStore, key: &'static str, version: u32) -> Self {
        SnapshotSlot {
            store,
            key,
            version,
            _state: PhantomData,
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Reads and decodes the snapshot.
    ///
    /// ## Returns
    /// * `Ok(None)` - nothing stored under the key
    /// * `Ok(Some(state))` - decoded state
    /// * `Err(Serialization | VersionMismatch)` - stored text is unusable
    pub async fn read(&self) -> DbResult<Option<T>> {
        let Some(text) = self.store.get(self.key).await? else {
            return Ok(None);
        };

        let envelope: Envelope<serde_json::Value> = serde_json::from_str(&text)?;
        if envelope.version != self.version {
            return Err(DbError::VersionMismatch {
                key: self.key.to_string(),
                found: envelope.version,
                expected: self.version,
            });
        }

        Ok(Some(serde_json::from_value(envelope.state)?))
    }

    /// Reads the snapshot, falling back to `T::default()` on any failure.
    pub async fn load_or_default(&self) -> T {
        match self.read().await {
            Ok(Some(state)) => state,
            Ok(None) => {
                debug!(key = %self.key, "No snapshot stored, using default");
                T::default()
            }
            Err(err) => {
                warn!(key = %self.key, error = %err, "Discarding unusable snapshot");
                T::default()
            }
        }
    }

    /// Encodes and writes `state` under the slot's key.
    pub async fn save(&self, state: &T) -> DbResult<()> {
        let envelope = Envelope {
            version: self.version,
            state,
        };
        let text = serde_json::to_string(&envelope)?;
        self.store.put(self.key, &text).await
    }

    /// Deletes the snapshot. Returns whether one existed.
    pub async fn clear(&self) -> DbResult<bool> {
        self.store.delete(self.key).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
