//! # State Module
//!
//! Application state for the storefront.
//!
//! Each concern gets its own state type instead of one big `AppState`, so a
//! command's signature says exactly which state it touches.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Storefront State Types                               │
//! │                                                                         │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌──────────────┐   │
//! │  │ CatalogState │ │  CartState   │ │ SessionState │ │FavoritesState│   │
//! │  │              │ │              │ │              │ │              │   │
//! │  │ Arc<Catalog> │ │ Arc<Mutex<   │ │ Arc<Mutex<   │ │ Arc<Mutex<   │   │
//! │  │ (read-only)  │ │   Cart>>     │ │   Session>>  │ │   Favorites>>│   │
//! │  └──────────────┘ └──────────────┘ └──────────────┘ └──────────────┘   │
//! │                                                                         │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────────────────────┐    │
//! │  │ BrowseHolder │ │  StoreState  │ │ StorefrontConfig             │    │
//! │  │ filter bar   │ │ repositories │ │ page size, currency, db path │    │
//! │  └──────────────┘ └──────────────┘ └──────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod browse;
mod cart;
mod catalog;
mod config;
mod favorites;
mod session;
mod store;

pub use browse::BrowseHolder;
pub use cart::CartState;
pub use catalog::CatalogState;
pub use config::{StorefrontConfig, DATABASE_FILE};
pub use favorites::FavoritesState;
pub use session::SessionState;
pub use store::StoreState;

#[cfg(test)]
pub(crate) use store::test_stores;
