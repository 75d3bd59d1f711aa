//! # Cart Ledger
//!
//! Line items keyed by audiobook id, with a total that is recomputed after
//! every mutation.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  View Action            Ledger Call                 State Change        │
//! │  ───────────            ───────────                 ────────────        │
//! │                                                                         │
//! │  "Add to cart" ───────► add_item(gate, book) ─────► push / qty + 1     │
//! │                          (AuthRequired if logged out, nothing changes)  │
//! │                                                                         │
//! │  Quantity stepper ────► set_quantity(id, n) ──────► qty = n, or remove │
//! │                                                      when n <= 0        │
//! │                                                                         │
//! │  Trash icon ──────────► remove_item(id) ──────────► retain != id       │
//! │                                                                         │
//! │  "Clear cart" ────────► clear() ──────────────────► items = []         │
//! │                                                                         │
//! │  After every call: total = Σ price × quantity                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::session::AuthGate;
use crate::types::Audiobook;

/// One audiobook and how many copies of it are in the cart.
///
/// The audiobook is a frozen snapshot taken when it was first added, so a
/// restored cart renders even if the catalog entry later disappears.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLineItem {
    pub audiobook: Audiobook,
    /// Always at least 1 while the item is in a cart.
    pub quantity: u32,
    pub added_at: DateTime<Utc>,
}

impl CartLineItem {
    fn new(audiobook: Audiobook) -> Self {
        CartLineItem {
            audiobook,
            quantity: 1,
            added_at: Utc::now(),
        }
    }

    /// Price × quantity, saturating.
    pub fn line_total(&self) -> Money {
        self.audiobook.price.multiply_quantity(self.quantity)
    }

    /// Price × quantity, or `None` if it does not fit in `Money`.
    pub fn checked_line_total(&self) -> Option<Money> {
        self.audiobook.price.checked_multiply_quantity(self.quantity)
    }
}

/// The shopping cart.
///
/// ## Invariants
/// - At most one line item per audiobook id (adding again bumps quantity)
/// - Quantity is always > 0 (setting it to 0 or below removes the line)
/// - `total()` equals Σ price × quantity after every mutation
///
/// Deserialization goes through [`CartRecord`] so a hand-edited or stale
/// snapshot can never smuggle in a total that disagrees with its items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "CartRecord", into = "CartRecord")]
pub struct Cart {
    items: Vec<CartLineItem>,
    total: Money,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Rebuilds a cart from stored line items.
    ///
    /// Dropped lines:
    /// - quantity 0
    /// - repeated audiobook ids (after the first)
    /// - lines whose price × quantity, or whose addition to the running
    ///   total, overflows
    ///
    /// The total is recomputed.
    pub fn from_items(items: Vec<CartLineItem>) -> Self {
        let mut cart = Cart::new();
        let mut total = Money::zero();
        for item in items {
            if item.quantity == 0 || cart.get_item(&item.audiobook.id).is_some() {
                continue;
            }
            let Some(next_total) = item
                .checked_line_total()
                .and_then(|line| total.checked_add(line))
            else {
                continue;
            };
            total = next_total;
            cart.items.push(item);
        }
        cart.recompute_total();
        cart
    }

    /// Adds one copy of `audiobook`.
    ///
    /// ## Behavior
    /// - Caller not signed in: `AuthRequired`, cart untouched
    /// - Already in cart: quantity + 1
    /// - Not in cart: appended with quantity 1
    pub fn add_item(&mut self, gate: &impl AuthGate, audiobook: &Audiobook) -> CoreResult<()> {
        if !gate.is_authenticated() {
            return Err(CoreError::auth_required("add items to your cart"));
        }

        match self.get_item(&audiobook.id).map(|i| i.quantity) {
            Some(quantity) => self.set_quantity(&audiobook.id, i64::from(quantity) + 1),
            None => {
                self.items.push(CartLineItem::new(audiobook.clone()));
                self.recompute_total();
            }
        }
        Ok(())
    }

    /// Sets the quantity of an existing line.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: removes the line (no-op if absent)
    /// - `quantity > 0` and line present: updated in place
    /// - `quantity > 0` and line absent: no-op
    pub fn set_quantity(&mut self, audiobook_id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(audiobook_id);
            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(item) = self.items.iter_mut().find(|i| i.audiobook.id == audiobook_id) {
            item.quantity = quantity;
            self.recompute_total();
        }
    }

    /// Removes a line. Returns whether anything was removed.
    pub fn remove_item(&mut self, audiobook_id: &str) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|i| i.audiobook.id != audiobook_id);

        let removed = self.items.len() != initial_len;
        if removed {
            self.recompute_total();
        }
        removed
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.total = Money::zero();
    }

    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn get_item(&self, audiobook_id: &str) -> Option<&CartLineItem> {
        self.items.iter().find(|i| i.audiobook.id == audiobook_id)
    }

    /// Σ price × quantity.
    pub fn total(&self) -> Money {
        self.total
    }

    /// Total number of copies (sum of quantities, not line count).
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Number of distinct audiobooks.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn recompute_total(&mut self) {
        self.total = self.items.iter().map(CartLineItem::line_total).sum();
    }
}

// =============================================================================
// Serialized Form
// =============================================================================

/// Wire shape of a cart: items plus the total as it was when saved.
///
/// The stored total is informational only; [`Cart`] recomputes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartRecord {
    pub items: Vec<CartLineItem>,
    #[serde(default)]
    pub total: Money,
}

impl From<CartRecord> for Cart {
    fn from(record: CartRecord) -> Self {
        Cart::from_items(record.items)
    }
}

impl From<Cart> for CartRecord {
    fn from(cart: Cart) -> Self {
        CartRecord {
            items: cart.items,
            total: cart.total,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
