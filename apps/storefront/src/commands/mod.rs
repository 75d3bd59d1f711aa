//! # Storefront Commands
//!
//! Every operation the view layer (or the `nexus` CLI) can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (exports)
//! ├── catalog.rs    ◄─── Browse, search, detail, home page lists
//! ├── cart.rs       ◄─── Cart manipulation
//! ├── favorites.rs  ◄─── Favorite toggling
//! ├── session.rs    ◄─── Login, register, logout
//! └── config.rs     ◄─── Configuration retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Caller (CLI subcommand, view binding, test)                            │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  async fn add_to_cart(                                                  │
//! │      store: &StoreState,       ◄── snapshot repositories                │
//! │      catalog: &CatalogState,   ◄── read-only books                      │
//! │      session: &SessionState,   ◄── auth gate                            │
//! │      cart: &CartState,         ◄── mutated under its lock               │
//! │      config: &StorefrontConfig,                                         │
//! │      audiobook_id: &str,                                                │
//! │  ) -> Result<CartResponse, ApiError>                                    │
//! │         │                                                               │
//! │         │ (JSON serialization, camelCase)                               │
//! │         ▼                                                               │
//! │  Caller receives: { items, itemCount, lineCount, total, ... }           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the catalog
//! fn featured_books(catalog: &CatalogState)
//!
//! // Only needs the cart
//! fn get_cart(cart: &CartState, config: &StorefrontConfig)
//!
//! // Mutates and persists
//! async fn toggle_favorite(store: &StoreState, catalog: &CatalogState, ...)
//! ```

pub mod cart;
pub mod catalog;
pub mod config;
pub mod favorites;
pub mod session;
