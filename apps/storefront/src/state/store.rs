//! # Store State
//!
//! The snapshot repositories the storefront saves to after each mutation.
//!
//! ## Backends
//! ```text
//! StoreState::from_database(&db)  ──► SqliteSnapshotStore (nexus.db)
//! StoreState::in_memory()         ──► MemorySnapshotStore (tests, --ephemeral)
//! ```
//!
//! ## Write Ordering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  command A ──► lock_cart() ──► copy ─► mutate ─► save ─► commit ──┐     │
//! │                                                                   │     │
//! │  command B ──► lock_cart() ····· waits ··························►│──►  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! Each snapshot key has one async write lock, held from the mutation
//! through the save. Saves for a key therefore land in mutation order, and
//! the live state only changes once its snapshot is stored. Locks for
//! several keys are always taken in the order cart, favorites, session.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use nexus_db::{
    CartRepository, Database, FavoritesRepository, MemorySnapshotStore, SessionRepository,
    SharedSnapshotStore,
};

/// Typed repositories over one snapshot store.
#[derive(Debug, Clone)]
pub struct StoreState {
    carts: CartRepository,
    sessions: SessionRepository,
    favorites: FavoritesRepository,
    locks: Arc<WriteLocks>,
}

/// One write lock per snapshot key.
#[derive(Debug, Default)]
struct WriteLocks {
    cart: Mutex<()>,
    favorites: Mutex<()>,
    session: Mutex<()>,
}

impl StoreState {
    /// Repositories over any snapshot store.
    pub fn new(store: SharedSnapshotStore) -> Self {
        StoreState {
            carts: CartRepository::new(Arc::clone(&store)),
            sessions: SessionRepository::new(Arc::clone(&store)),
            favorites: FavoritesRepository::new(store),
            locks: Arc::default(),
        }
    }

    /// Repositories backed by the SQLite snapshot table.
    pub fn from_database(db: &Database) -> Self {
        StoreState {
            carts: db.carts(),
            sessions: db.sessions(),
            favorites: db.favorites(),
            locks: Arc::default(),
        }
    }

    /// Repositories that forget everything when the process exits.
    pub fn in_memory() -> Self {
        StoreState::new(Arc::new(MemorySnapshotStore::new()))
    }

    pub fn carts(&self) -> &CartRepository {
        &self.carts
    }

    pub fn sessions(&self) -> &SessionRepository {
        &self.sessions
    }

    pub fn favorites(&self) -> &FavoritesRepository {
        &self.favorites
    }

    /// Serializes cart writes. Hold the guard until the save has finished.
    pub async fn lock_cart(&self) -> MutexGuard<'_, ()> {
        self.locks.cart.lock().await
    }

    /// Serializes favorites writes.
    pub async fn lock_favorites(&self) -> MutexGuard<'_, ()> {
        self.locks.favorites.lock().await
    }

    /// Serializes session writes.
    pub async fn lock_session(&self) -> MutexGuard<'_, ()> {
        self.locks.session.lock().await
    }
}

/// Snapshot stores with scripted misbehavior, for command tests.
#[cfg(test)]
pub(crate) mod test_stores {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Mutex, PoisonError};

    use async_trait::async_trait;
    use nexus_db::{DbError, DbResult, SnapshotStore};

    use super::*;

    /// Wraps a [`MemorySnapshotStore`]. Puts to a failing key return
    /// `ConnectionFailed`; with `yield_first_put` the first put parks once
    /// before writing.
    #[derive(Debug, Default)]
    pub(crate) struct FlakyStore {
        inner: MemorySnapshotStore,
        failing_keys: Mutex<HashSet<String>>,
        yield_first_put: AtomicBool,
    }

    impl FlakyStore {
        pub(crate) fn new() -> Arc<Self> {
            Arc::new(FlakyStore::default())
        }

        pub(crate) fn yielding() -> Arc<Self> {
            let store = FlakyStore::default();
            store.yield_first_put.store(true, Ordering::SeqCst);
            Arc::new(store)
        }

        pub(crate) fn fail_puts_for(&self, key: &str) {
            self.keys().insert(key.to_string());
        }

        pub(crate) fn heal(&self) {
            self.keys().clear();
        }

        fn keys(&self) -> std::sync::MutexGuard<'_, HashSet<String>> {
            self.failing_keys.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }

    #[async_trait]
    impl SnapshotStore for FlakyStore {
        async fn get(&self, key: &str) -> DbResult<Option<String>> {
            self.inner.get(key).await
        }

        async fn put(&self, key: &str, state: &str) -> DbResult<()> {
            if self.yield_first_put.swap(false, Ordering::SeqCst) {
                tokio::task::yield_now().await;
            }
            if self.keys().contains(key) {
                return Err(DbError::ConnectionFailed(format!("{key} is unavailable")));
            }
            self.inner.put(key, state).await
        }

        async fn delete(&self, key: &str) -> DbResult<bool> {
            self.inner.delete(key).await
        }
    }

    pub(crate) fn store_over(store: &Arc<FlakyStore>) -> StoreState {
        let shared: SharedSnapshotStore = Arc::clone(store) as SharedSnapshotStore;
        StoreState::new(shared)
    }
}
