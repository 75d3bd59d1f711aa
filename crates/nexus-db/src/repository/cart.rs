//! # Cart Repository
//!
//! Persists the cart ledger under `cart-storage`.
//!
//! The stored state carries each line's frozen audiobook snapshot, so a
//! restored cart renders even when the catalog has moved on. The total in the
//! snapshot is ignored on load and recomputed from the items.

use nexus_core::Cart;
use tracing::debug;

use crate::error::DbResult;
use crate::repository::snapshot::{SharedSnapshotStore, SnapshotSlot};

/// Snapshot key for the cart.
pub const CART_KEY: &str = "cart-storage";

/// Current cart snapshot version.
pub const CART_VERSION: u32 = 1;

/// Repository for the persisted cart.
#[derive(Debug, Clone)]
pub struct CartRepository {
    slot: SnapshotSlot<Cart>,
}

impl CartRepository {
    pub fn new(store: SharedSnapshotStore) -> Self {
        CartRepository {
            slot: SnapshotSlot::new(store, CART_KEY, CART_VERSION),
        }
    }

    /// Restores the cart, or an empty one if nothing usable is stored.
    pub async fn load(&self) -> Cart {
        let cart = self.slot.load_or_default().await;
        debug!(lines = cart.line_count(), total = %cart.total(), "Cart restored");
        cart
    }

    pub async fn save(&self, cart: &Cart) -> DbResult<()> {
        self.slot.save(cart).await
    }

    pub async fn clear(&self) -> DbResult<bool> {
        self.slot.clear().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::snapshot::SnapshotStore;
    use nexus_core::Catalog;

    #[tokio::test]
    async fn test_cart_round_trip_through_sqlite() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.carts();
        let catalog = Catalog::builtin();

        let mut cart = Cart::new();
        cart.add_item(&true, &catalog.get_by_id("1").unwrap()).unwrap();
        cart.add_item(&true, &catalog.get_by_id("4").unwrap()).unwrap();
        cart.set_quantity("4", 3);
        repo.save(&cart).await.unwrap();

        let restored = db.carts().load().await;
        assert_eq!(restored, cart);
        assert_eq!(restored.item_count(), 4);
        assert_eq!(restored.total().cents(), 1999 + 3 * 2999);
    }

    #[tokio::test]
    async fn test_missing_cart_is_empty() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.carts().load().await.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_cart_is_empty() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.snapshots()
            .put(CART_KEY, r#"{"version":1,"state":{"items":"oops"}}"#)
            .await
            .unwrap();

        assert!(db.carts().load().await.is_empty());
    }

    #[tokio::test]
    async fn test_clear_removes_snapshot() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.carts();
        repo.save(&Cart::new()).await.unwrap();

        assert!(repo.clear().await.unwrap());
        assert_eq!(db.snapshots().get(CART_KEY).await.unwrap(), None);
    }
}
