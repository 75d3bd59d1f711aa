//! # AudioBook Nexus Storefront
//!
//! Application layer of the storefront: state holders, command functions and
//! startup. The `nexus` binary is a thin CLI over this library.
//!
//! ## Module Organization
//! ```text
//! nexus_storefront/
//! ├── lib.rs          ◄─── You are here (startup, Storefront bundle)
//! ├── auth.rs         ◄─── Authenticator trait + LocalAuthenticator
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── Cart state
//! │   ├── session.rs  ◄─── Session state (the auth gate)
//! │   ├── favorites.rs◄─── Favorites state
//! │   ├── browse.rs   ◄─── Filter bar state
//! │   ├── catalog.rs  ◄─── Read-only catalog
//! │   ├── store.rs    ◄─── Snapshot repositories
//! │   └── config.rs   ◄─── Configuration
//! ├── commands/       ◄─── catalog, cart, favorites, session, config
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## State Management (Multiple State Types)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Storefront                                           │
//! │                                                                         │
//! │  ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────────┐    │
//! │  │    StoreState    │ │    CartState     │ │  StorefrontConfig    │    │
//! │  │                  │ │                  │ │                      │    │
//! │  │  • carts()       │ │  • Current cart  │ │  • Page size         │    │
//! │  │  • sessions()    │ │  • Line items    │ │  • Currency symbol   │    │
//! │  │  • favorites()   │ │  • Total         │ │  • Database path     │    │
//! │  └──────────────────┘ └──────────────────┘ └──────────────────────┘    │
//! │                                                                         │
//! │  SessionState · FavoritesState · BrowseHolder · CatalogState            │
//! │  Authenticator (Arc<dyn ..>)                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod commands;
pub mod error;
pub mod state;

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use auth::{Authenticator, LocalAuthenticator};
use nexus_db::{Database, DbConfig, DbError, DbResult};
use state::{
    BrowseHolder, CartState, CatalogState, FavoritesState, SessionState, StoreState,
    StorefrontConfig,
};

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,nexus=debug,sqlx=warn";

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=nexus_core=trace` - Trace for one crate only
/// - Default: [`DEFAULT_LOG_FILTER`]
///
/// Logs go to stderr so command output on stdout stays machine-readable.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Everything a running storefront holds.
///
/// Clones share state.
#[derive(Clone)]
pub struct Storefront {
    pub config: StorefrontConfig,
    pub catalog: CatalogState,
    pub browse: BrowseHolder,
    pub cart: CartState,
    pub session: SessionState,
    pub favorites: FavoritesState,
    pub store: StoreState,
    pub authenticator: Arc<dyn Authenticator>,
}

impl std::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("config", &self.config)
            .field("cart", &self.cart)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl Storefront {
    /// Opens the snapshot database and rehydrates the storefront.
    ///
    /// ## Startup Sequence
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────────┐
    /// │  1. Resolve database path ── --db / NEXUS_DB_PATH / data directory      │
    /// │  2. Connect (WAL) and run pending migrations                            │
    /// │  3. Rehydrate cart, session, favorites ── unusable snapshot ► default   │
    /// │  4. Fresh browse state with the configured page size                    │
    /// └─────────────────────────────────────────────────────────────────────────┘
    /// ```
    pub async fn open(config: StorefrontConfig) -> DbResult<Self> {
        let path = config.resolve_database_path().ok_or_else(|| {
            DbError::ConnectionFailed("could not determine the data directory".to_string())
        })?;
        info!(db_path = %path.display(), "Database path determined");

        let db = Database::new(DbConfig::new(path)).await?;
        Ok(Self::rehydrate(config, StoreState::from_database(&db)).await)
    }

    /// A storefront whose snapshots live only in memory.
    pub async fn in_memory(config: StorefrontConfig) -> Self {
        Self::rehydrate(config, StoreState::in_memory()).await
    }

    async fn rehydrate(config: StorefrontConfig, store: StoreState) -> Self {
        let cart = store.carts().load().await;
        let session = store.sessions().load().await;
        let favorites = store.favorites().load().await;

        info!(
            store = %config.store_name,
            cart_lines = cart.line_count(),
            signed_in = session.user().is_some(),
            favorites = favorites.len(),
            "Storefront ready"
        );

        Storefront {
            browse: BrowseHolder::new(config.page_size),
            catalog: CatalogState::default(),
            cart: CartState::from_cart(cart),
            session: SessionState::from_session(session),
            favorites: FavoritesState::from_favorites(favorites),
            store,
            authenticator: Arc::new(LocalAuthenticator::new()),
            config,
        }
    }

    /// Replaces the identity provider.
    pub fn with_authenticator(mut self, authenticator: Arc<dyn Authenticator>) -> Self {
        self.authenticator = authenticator;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{cart, favorites, session};
    use std::path::PathBuf;

    fn temp_db(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("nexus-storefront-{}-{}", name, std::process::id()))
            .join("nexus.db")
    }

    #[tokio::test]
    async fn test_in_memory_starts_empty() {
        let app = Storefront::in_memory(StorefrontConfig::default()).await;
        assert!(app.cart.snapshot().is_empty());
        assert!(app.session.snapshot().user().is_none());
        assert!(app.favorites.snapshot().is_empty());
        assert_eq!(app.browse.with_browse(|b| b.page_size()), 8);
    }

    #[tokio::test]
    async fn test_state_survives_restart() {
        let path = temp_db("restart");
        let config = StorefrontConfig::default().with_database_path(Some(path.clone()));

        let app = Storefront::open(config.clone()).await.unwrap();
        session::login(
            &app.store,
            app.authenticator.as_ref(),
            &app.session,
            "reader@example.com",
            "secret",
        )
        .await
        .unwrap();
        let id = app.catalog.inner().books()[0].id.clone();
        cart::add_to_cart(&app.store, &app.catalog, &app.session, &app.cart, &app.config, &id)
            .await
            .unwrap();
        cart::update_cart_item(&app.store, &app.cart, &app.config, &id, 3)
            .await
            .unwrap();
        favorites::toggle_favorite(&app.store, &app.catalog, &app.session, &app.favorites, &id)
            .await
            .unwrap();
        drop(app);

        let reopened = Storefront::open(config).await.unwrap();
        let restored = reopened.cart.snapshot();
        assert_eq!(restored.get_item(&id).map(|i| i.quantity), Some(3));
        assert_eq!(restored.total(), reopened.catalog.inner().books()[0].price.multiply_quantity(3));
        assert!(reopened.favorites.contains(&id));
        assert_eq!(
            reopened.session.snapshot().user().map(|u| u.name.clone()),
            Some("reader".to_string())
        );

        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }
}
