//! # nexus-db: Snapshot Storage for AudioBook Nexus
//!
//! Persists the storefront's mutable state (cart, session, favorites) as
//! versioned JSON snapshots in a local SQLite database, using sqlx for async
//! access.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     AudioBook Nexus Data Flow                           │
//! │                                                                         │
//! │  Storefront command (cart add, login, favorite)                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     nexus-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐   │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │   │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │   │   │
//! │  │   │               │    │ CartRepo      │    │              │   │   │
//! │  │   │ SqlitePool    │◄───│ SessionRepo   │    │ 001_         │   │   │
//! │  │   │               │    │ FavoritesRepo │    │  snapshots   │   │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   <data dir>/audiobook-nexus/nexus.db                           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Snapshot store trait and typed repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use nexus_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/nexus.db")).await?;
//!
//! let mut cart = db.carts().load().await;
//! cart.add_item(&session, &book)?;
//! db.carts().save(&cart).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::{
    CartRepository, FavoritesRepository, MemorySnapshotStore, SessionRepository,
    SharedSnapshotStore, SnapshotSlot, SnapshotStore, SqliteSnapshotStore,
};
