//! # Repository Module
//!
//! Typed snapshot repositories for AudioBook Nexus.
//!
//! ## Layering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Storefront command                                                     │
//! │       │                                                                 │
//! │       │  db.carts().save(&cart)                                         │
//! │       ▼                                                                 │
//! │  CartRepository / SessionRepository / FavoritesRepository               │
//! │  ├── load()   tolerant, never fails                                     │
//! │  ├── save()   strict, returns DbError                                   │
//! │  └── clear()                                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SnapshotSlot<T>  (fixed key + version, JSON envelope)                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  dyn SnapshotStore                                                      │
//! │  ├── SqliteSnapshotStore   (snapshots table)                            │
//! │  └── MemorySnapshotStore   (tests, throwaway runs)                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;
pub mod favorites;
pub mod session;
pub mod snapshot;

pub use cart::{CartRepository, CART_KEY, CART_VERSION};
pub use favorites::{FavoritesRepository, FAVORITES_KEY, FAVORITES_VERSION};
pub use session::{SessionRepository, SESSION_KEY, SESSION_VERSION};
pub use snapshot::{
    Envelope, MemorySnapshotStore, SharedSnapshotStore, SnapshotSlot, SnapshotStore,
    SqliteSnapshotStore,
};
