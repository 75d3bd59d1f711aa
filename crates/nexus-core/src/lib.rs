//! # nexus-core: Pure Storefront Logic for AudioBook Nexus
//!
//! Everything the storefront decides, with none of the I/O. The catalog,
//! the browse query, the cart ledger and the session state machine all live
//! here as plain data plus functions over it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     AudioBook Nexus Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 View layer (web UI / nexus CLI)                 │   │
//! │  │     Browse ──► Book detail ──► Cart ──► Login / Register        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands, JSON DTOs                    │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    nexus-storefront (app)                       │   │
//! │  │     state holders, authenticator, config, logging               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ nexus-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────┐       │   │
//! │  │   │ catalog  │  │  query   │  │   cart   │  │ session  │       │   │
//! │  │   │ lookups  │  │ paginate │  │  ledger  │  │ AuthGate │       │   │
//! │  │   └──────────┘  └──────────┘  └──────────┘  └──────────┘       │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • NO TIMERS                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  nexus-db (snapshot storage)                    │   │
//! │  │        SQLite key/value snapshots, migrations, repositories     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Audiobook, Genre, ListeningTime, User
//! - [`money`] - Integer-cent prices
//! - [`catalog`] - The built-in catalog and its lookups
//! - [`query`] - Search, genre filter, sort, cumulative pagination
//! - [`browse`] - Browse page filter state
//! - [`cart`] - Cart ledger
//! - [`favorites`] - Favorited audiobook ids
//! - [`session`] - Sign-in state machine and the [`AuthGate`] capability
//! - [`validation`] - Credential and input checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use nexus_core::{query, paginate, Cart, Catalog};
//!
//! let catalog = Catalog::builtin();
//!
//! let scifi = query(catalog.books(), "", "Science Fiction", "price").unwrap();
//! let page = paginate(&scifi, 1, 8).unwrap();
//! assert_eq!(page.total_count, 2);
//!
//! let mut cart = Cart::new();
//! cart.add_item(&true, &page.items[0]).unwrap();
//! assert_eq!(cart.total(), page.items[0].price);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod browse;
pub mod cart;
pub mod catalog;
pub mod error;
pub mod favorites;
pub mod money;
pub mod query;
pub mod session;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use browse::BrowseState;
pub use cart::{Cart, CartLineItem};
pub use catalog::{Catalog, POPULAR_BOOKS_LIMIT, RELATED_BOOKS_LIMIT};
pub use error::{CoreError, CoreResult, ValidationError};
pub use favorites::Favorites;
pub use money::Money;
pub use query::{paginate, query, AudiobookQuery, Page, SortKey, DEFAULT_PAGE_SIZE};
pub use session::{AuthGate, Session, SessionPhase};
pub use types::*;
