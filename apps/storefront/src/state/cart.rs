//! # Cart State
//!
//! Holds the live cart ledger for the running storefront.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>` because:
//! 1. Multiple commands may read or modify the cart
//! 2. Only one command should modify the cart at a time
//! 3. Commands can run concurrently on the tokio runtime
//!
//! A mutation and the snapshot returned to the caller are produced under one
//! lock, so a caller never sees a half-applied change.

use std::sync::{Arc, Mutex, PoisonError};

use nexus_core::Cart;

/// Shared cart state.
///
/// Clones share the same cart.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    /// Creates an empty cart state.
    pub fn new() -> Self {
        CartState::default()
    }

    /// Wraps a rehydrated cart.
    pub fn from_cart(cart: Cart) -> Self {
        CartState {
            cart: Arc::new(Mutex::new(cart)),
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let total = cart_state.with_cart(|cart| cart.total());
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// cart_state.with_cart_mut(|cart| cart.add_item(&session, &book))?;
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut cart)
    }

    /// A copy of the current cart, e.g. for persisting.
    pub fn snapshot(&self) -> Cart {
        self.with_cart(Cart::clone)
    }

    /// Swaps in a cart that has already been saved.
    pub fn replace(&self, cart: Cart) {
        self.with_cart_mut(|c| *c = cart);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nexus_core::Catalog;

    #[test]
    fn test_clones_share_cart() {
        let state = CartState::new();
        let other = state.clone();
        let book = Catalog::builtin().get_by_id("2").unwrap();

        state.with_cart_mut(|c| c.add_item(&true, &book)).unwrap();

        assert_eq!(other.with_cart(|c| c.item_count()), 1);
        assert_eq!(other.snapshot().total().cents(), 2499);
    }

    #[test]
    fn test_from_cart() {
        let mut cart = Cart::new();
        cart.add_item(&true, &Catalog::builtin().get_by_id("1").unwrap())
            .unwrap();

        let state = CartState::from_cart(cart.clone());
        assert_eq!(state.snapshot(), cart);
    }
}
