//! # Cart Commands
//!
//! Cart manipulation. Every mutation is saved to the `cart-storage`
//! snapshot before the updated cart is returned.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐  add_to_cart   ┌──────────┐                               │
//! │  │  Empty   │───────────────►│ In Cart  │◄──┐ add_to_cart (qty + 1)     │
//! │  │  Cart    │                │          │───┘ update_cart_item          │
//! │  └──────────┘                └──────────┘     remove_from_cart          │
//! │       ▲                           │                                     │
//! │       │      clear_cart           │                                     │
//! │       └───────────────────────────┘  (also on logout, if configured)    │
//! │                                                                         │
//! │  Signed out? add_to_cart ──► AUTH_REQUIRED, cart untouched              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Saving
//! ```text
//! lock_cart() ──► copy live cart ──► mutate copy ──► save ──► Ok ──► swap in
//!                                                      └──► Err ──► live cart untouched
//! ```
//! The write lock is held until the save finishes, so concurrent commands
//! save in the order they mutate.

use nexus_core::{Cart, CartLineItem};
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{CartState, CatalogState, SessionState, StoreState, StorefrontConfig};

/// Cart response including items and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLineItem>,
    /// Copies across all lines.
    pub item_count: u64,
    /// Distinct titles.
    pub line_count: usize,
    /// Total in cents.
    pub total: i64,
    pub total_formatted: String,
}

impl CartResponse {
    pub fn new(cart: &Cart, config: &StorefrontConfig) -> Self {
        CartResponse {
            items: cart.items().to_vec(),
            item_count: cart.item_count(),
            line_count: cart.line_count(),
            total: cart.total().cents(),
            total_formatted: config.format_currency(cart.total()),
        }
    }
}

/// Applies `mutate` to a copy of the cart, saves it, then makes it live.
async fn update_cart<F>(store: &StoreState, cart: &CartState, mutate: F) -> Result<Cart, ApiError>
where
    F: FnOnce(&mut Cart) -> Result<(), ApiError>,
{
    let _write = store.lock_cart().await;

    let mut candidate = cart.snapshot();
    mutate(&mut candidate)?;

    store.carts().save(&candidate).await?;
    cart.replace(candidate.clone());
    Ok(candidate)
}

/// Gets the current cart contents.
pub fn get_cart(cart: &CartState, config: &StorefrontConfig) -> CartResponse {
    debug!("get_cart command");
    cart.with_cart(|c| CartResponse::new(c, config))
}

/// Adds one copy of a book to the cart.
///
/// ## Behavior
/// - Signed out: `AUTH_REQUIRED`, nothing changes
/// - Unknown id: `NOT_FOUND`
/// - Already in cart: quantity increases by one
/// - Price is frozen at the time of adding
pub async fn add_to_cart(
    store: &StoreState,
    catalog: &CatalogState,
    session: &SessionState,
    cart: &CartState,
    config: &StorefrontConfig,
    audiobook_id: &str,
) -> Result<CartResponse, ApiError> {
    debug!(audiobook_id = %audiobook_id, "add_to_cart command");

    let audiobook = catalog.inner().get_by_id(audiobook_id)?;

    let snapshot = update_cart(store, cart, |c| {
        c.add_item(session, &audiobook)?;
        Ok(())
    })
    .await?;

    Ok(CartResponse::new(&snapshot, config))
}

/// Sets the quantity of a line.
///
/// ## Behavior
/// - Quantity 0 or negative: removes the line
/// - Id not in cart: no-op
pub async fn update_cart_item(
    store: &StoreState,
    cart: &CartState,
    config: &StorefrontConfig,
    audiobook_id: &str,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(audiobook_id = %audiobook_id, quantity = %quantity, "update_cart_item command");

    let snapshot = update_cart(store, cart, |c| {
        c.set_quantity(audiobook_id, quantity);
        Ok(())
    })
    .await?;

    Ok(CartResponse::new(&snapshot, config))
}

/// Removes a line. Removing an absent id is a no-op.
pub async fn remove_from_cart(
    store: &StoreState,
    cart: &CartState,
    config: &StorefrontConfig,
    audiobook_id: &str,
) -> Result<CartResponse, ApiError> {
    debug!(audiobook_id = %audiobook_id, "remove_from_cart command");

    let snapshot = update_cart(store, cart, |c| {
        c.remove_item(audiobook_id);
        Ok(())
    })
    .await?;

    Ok(CartResponse::new(&snapshot, config))
}

/// Clears all items from the cart.
pub async fn clear_cart(
    store: &StoreState,
    cart: &CartState,
    config: &StorefrontConfig,
) -> Result<CartResponse, ApiError> {
    debug!("clear_cart command");

    let snapshot = update_cart(store, cart, |c| {
        c.clear();
        Ok(())
    })
    .await?;

    Ok(CartResponse::new(&snapshot, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::test_stores::{store_over, FlakyStore};
    use nexus_core::{AuthProvider, User};

    struct Fixture {
        store: StoreState,
        catalog: CatalogState,
        session: SessionState,
        cart: CartState,
        config: StorefrontConfig,
    }

    fn fixture(signed_in: bool) -> Fixture {
        let session = SessionState::new();
        if signed_in {
            session.with_session_mut(|s| {
                s.complete(Ok(User {
                    id: "email_test".to_string(),
                    email: "reader@example.com".to_string(),
                    name: "reader".to_string(),
                    avatar: None,
                    provider: AuthProvider::Email,
                }))
            });
        }

        Fixture {
            store: StoreState::in_memory(),
            catalog: CatalogState::default(),
            session,
            cart: CartState::new(),
            config: StorefrontConfig::default(),
        }
    }

    async fn add(f: &Fixture, id: &str) -> Result<CartResponse, ApiError> {
        add_to_cart(&f.store, &f.catalog, &f.session, &f.cart, &f.config, id).await
    }

    #[tokio::test]
    async fn test_add_update_remove_flow() {
        let f = fixture(true);
        let first = f.catalog.inner().books()[0].clone();
        let second = f.catalog.inner().books()[1].clone();

        add(&f, &first.id).await.unwrap();
        add(&f, &first.id).await.unwrap();
        let response = add(&f, &second.id).await.unwrap();

        assert_eq!(response.line_count, 2);
        assert_eq!(response.item_count, 3);
        assert_eq!(
            response.total,
            first.price.cents() * 2 + second.price.cents()
        );

        let response = update_cart_item(&f.store, &f.cart, &f.config, &first.id, 5)
            .await
            .unwrap();
        assert_eq!(response.item_count, 6);

        let response = update_cart_item(&f.store, &f.cart, &f.config, &second.id, 0)
            .await
            .unwrap();
        assert_eq!(response.line_count, 1);

        let response = remove_from_cart(&f.store, &f.cart, &f.config, &first.id)
            .await
            .unwrap();
        assert!(response.items.is_empty());
        assert_eq!(response.total_formatted, "$0.00");
    }

    #[tokio::test]
    async fn test_add_requires_login() {
        let f = fixture(false);
        let id = f.catalog.inner().books()[0].id.clone();

        let err = add(&f, &id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthRequired);
        assert!(get_cart(&f.cart, &f.config).items.is_empty());
        assert!(f.store.carts().load().await.is_empty());
    }

    #[tokio::test]
    async fn test_add_unknown_book() {
        let f = fixture(true);
        let err = add(&f, "no-such-book").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_mutations_are_persisted() {
        let f = fixture(true);
        let id = f.catalog.inner().books()[2].id.clone();

        add(&f, &id).await.unwrap();
        let saved = f.store.carts().load().await;
        assert_eq!(saved.get_item(&id).map(|i| i.quantity), Some(1));

        clear_cart(&f.store, &f.cart, &f.config).await.unwrap();
        assert!(f.store.carts().load().await.is_empty());
    }

    #[tokio::test]
    async fn test_response_uses_configured_currency() {
        let mut f = fixture(true);
        f.config.currency_symbol = "€".to_string();
        let book = f.catalog.inner().books()[0].clone();

        let response = add(&f, &book.id).await.unwrap();
        assert!(response.total_formatted.starts_with('€'));
    }

    #[tokio::test]
    async fn test_concurrent_adds_save_in_order() {
        let flaky = FlakyStore::yielding();
        let mut f = fixture(true);
        f.store = store_over(&flaky);
        let first = f.catalog.inner().books()[0].id.clone();
        let second = f.catalog.inner().books()[1].id.clone();

        let (a, b) = tokio::join!(add(&f, &first), add(&f, &second));
        a.unwrap();
        b.unwrap();

        let live = f.cart.snapshot();
        let saved = f.store.carts().load().await;
        assert_eq!(live.line_count(), 2);
        assert_eq!(saved, live);
    }

    #[tokio::test]
    async fn test_failed_save_leaves_cart_untouched() {
        let flaky = FlakyStore::new();
        let mut f = fixture(true);
        f.store = store_over(&flaky);
        let id = f.catalog.inner().books()[0].id.clone();
        add(&f, &id).await.unwrap();

        flaky.fail_puts_for("cart-storage");
        let err = add(&f, &id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(f.cart.snapshot().item_count(), 1);

        let err = clear_cart(&f.store, &f.cart, &f.config).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(get_cart(&f.cart, &f.config).line_count, 1);

        flaky.heal();
        let response = update_cart_item(&f.store, &f.cart, &f.config, &id, 4)
            .await
            .unwrap();
        assert_eq!(response.item_count, 4);
        assert_eq!(f.store.carts().load().await, f.cart.snapshot());
    }

    #[tokio::test]
    async fn test_failed_first_save_keeps_cart_empty() {
        let flaky = FlakyStore::new();
        flaky.fail_puts_for("cart-storage");
        let mut f = fixture(true);
        f.store = store_over(&flaky);
        let id = f.catalog.inner().books()[0].id.clone();

        assert!(add(&f, &id).await.is_err());
        assert_eq!(f.cart.snapshot().line_count(), 0);
    }
}
