//! # Favorites Repository
//!
//! Persists favorited audiobook ids under `favorites-storage`.

use nexus_core::Favorites;
use serde::{Deserialize, Serialize};

use crate::error::DbResult;
use crate::repository::snapshot::{SharedSnapshotStore, SnapshotSlot};

/// Snapshot key for favorites.
pub const FAVORITES_KEY: &str = "favorites-storage";

/// Current favorites snapshot version.
pub const FAVORITES_VERSION: u32 = 1;

/// Stored shape: `{"ids": [...]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct FavoritesSnapshot {
    ids: Favorites,
}

/// Repository for persisted favorites.
#[derive(Debug, Clone)]
pub struct FavoritesRepository {
    slot: SnapshotSlot<FavoritesSnapshot>,
}

impl FavoritesRepository {
    pub fn new(store: SharedSnapshotStore) -> Self {
        FavoritesRepository {
            slot: SnapshotSlot::new(store, FAVORITES_KEY, FAVORITES_VERSION),
        }
    }

    /// Restores favorites, or an empty set if nothing usable is stored.
    pub async fn load(&self) -> Favorites {
        self.slot.load_or_default().await.ids
    }

    pub async fn save(&self, favorites: &Favorites) -> DbResult<()> {
        self.slot
            .save(&FavoritesSnapshot {
                ids: favorites.clone(),
            })
            .await
    }

    pub async fn clear(&self) -> DbResult<bool> {
        self.slot.clear().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::snapshot::{MemorySnapshotStore, SnapshotStore};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_favorites_round_trip() {
        let store: SharedSnapshotStore = Arc::new(MemorySnapshotStore::new());
        let repo = FavoritesRepository::new(Arc::clone(&store));

        let mut favorites = Favorites::new();
        favorites.toggle(&true, "8").unwrap();
        favorites.toggle(&true, "2").unwrap();
        repo.save(&favorites).await.unwrap();

        let raw = store.get(FAVORITES_KEY).await.unwrap().unwrap();
        assert_eq!(raw, r#"{"version":1,"state":{"ids":["8","2"]}}"#);

        assert_eq!(repo.load().await, favorites);
    }

    #[tokio::test]
    async fn test_unusable_favorites_are_empty() {
        let store: SharedSnapshotStore = Arc::new(MemorySnapshotStore::new());
        let repo = FavoritesRepository::new(Arc::clone(&store));
        assert!(repo.load().await.is_empty());

        store
            .put(FAVORITES_KEY, r#"{"version":0,"state":{"ids":["1"]}}"#)
            .await
            .unwrap();
        assert!(repo.load().await.is_empty());
    }
}
