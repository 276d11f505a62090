//! # Cart
//!
//! Line items and the ordered cart sequence.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Shopper Action           CartState call          Sequence Change       │
//! │  ──────────────           ──────────────          ───────────────       │
//! │                                                                         │
//! │  "Add to cart" ─────────► add() ────────────────► qty += 1 | push      │
//! │                                                                         │
//! │  Row ✕ button ──────────► remove_at(i) ─────────► items.remove(i)      │
//! │                                                                         │
//! │  Checkout ──────────────► clear() ──────────────► items.clear()        │
//! │                                                                         │
//! │  Badge / footer ────────► summary() ────────────► (read only)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `CartState` is plain data. Persistence and change reporting live in
//! [`CartStore`](crate::store::CartStore), which is the only public way to
//! mutate a cart.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product Identifier
// =============================================================================

/// A product identifier as the page hands it over.
///
/// Server-rendered pages pass numeric database ids, while hand-written
/// markup may pass strings. The stored JSON keeps whichever kind it was
/// given, so a restore writes back exactly what it read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Number(n) => write!(f, "{n}"),
            ProductId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        ProductId::Number(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        ProductId::Text(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        ProductId::Text(id)
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One cart entry: a product snapshot plus a quantity.
///
/// ## Storage Shape
/// ```json
/// { "id": 3, "name": "تارت الفراولة الفرنسي", "price": 55, "img": "https://...", "qty": 2 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLineItem {
    #[ts(type = "number | string")]
    pub id: ProductId,

    pub name: String,

    /// Price captured when the product was first added.
    #[serde(rename = "price")]
    #[ts(type = "number")]
    pub unit_price: Money,

    #[serde(rename = "img")]
    pub image_ref: String,

    /// Always at least 1 while the line is in a cart.
    #[serde(rename = "qty")]
    pub quantity: u32,
}

impl CartLineItem {
    /// Creates a line with quantity 1.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        unit_price: Money,
        image_ref: impl Into<String>,
    ) -> Self {
        CartLineItem {
            id,
            name: name.into(),
            unit_price,
            image_ref: image_ref.into(),
            quantity: 1,
        }
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart State
// =============================================================================

/// Ordered sequence of line items, unique by `id`.
///
/// ## Invariants
/// - Items are unique by `id` (adding an existing id increases quantity)
/// - Every quantity is ≥ 1
/// - Order is insertion order; the UI addresses rows by ordinal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartState {
    items: Vec<CartLineItem>,
}

impl CartState {
    /// Creates an empty cart.
    pub fn new() -> Self {
        CartState { items: Vec::new() }
    }

    /// Line items in display order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Number of distinct lines (rows), not units.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Ordinal position of the line holding `id`.
    pub fn position_of(&self, id: &ProductId) -> Option<usize> {
        self.items.iter().position(|item| &item.id == id)
    }

    /// Adds one unit of a product.
    ///
    /// ## Behavior
    /// - If the id is already in the cart: quantity + 1 (name, price and
    ///   image from the first add are kept)
    /// - Otherwise: a new line with quantity 1 is appended
    ///
    /// Returns the line's quantity after the add.
    pub(crate) fn add(
        &mut self,
        id: ProductId,
        name: &str,
        unit_price: Money,
        image_ref: &str,
    ) -> u32 {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.quantity = item.quantity.saturating_add(1);
            return item.quantity;
        }

        self.items
            .push(CartLineItem::new(id, name, unit_price, image_ref));
        1
    }

    /// Removes the line at `position`; `None` when out of bounds.
    pub(crate) fn remove_at(&mut self, position: usize) -> Option<CartLineItem> {
        if position < self.items.len() {
            Some(self.items.remove(position))
        } else {
            None
        }
    }

    /// Removes the line holding `id`.
    pub(crate) fn remove_by_id(&mut self, id: &ProductId) -> Option<CartLineItem> {
        let position = self.position_of(id)?;
        self.remove_at(position)
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Σ unit price × quantity.
    pub fn total_price(&self) -> Money {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Derived values, computed fresh on every call.
    pub fn summary(&self) -> CartSummary {
        CartSummary {
            item_count: self.item_count(),
            total_price: self.total_price(),
        }
    }

    /// Restores the cart invariants on data read from outside.
    ///
    /// Lines with quantity 0 are dropped; repeated ids are folded into the
    /// first occurrence by summing quantities.
    pub(crate) fn normalized(self) -> Self {
        let mut out = CartState::new();
        for item in self.items {
            if item.quantity == 0 {
                continue;
            }
            match out.items.iter_mut().find(|existing| existing.id == item.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(item.quantity)
                }
                None => out.items.push(item),
            }
        }
        out
    }
}

impl FromIterator<CartLineItem> for CartState {
    fn from_iter<I: IntoIterator<Item = CartLineItem>>(iter: I) -> Self {
        CartState {
            items: iter.into_iter().collect(),
        }
    }
}

// =============================================================================
// Summary
// =============================================================================

/// Cart totals for the badge and the panel footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartSummary {
    #[ts(type = "number")]
    pub item_count: u64,

    #[ts(type = "number")]
    pub total_price: Money,
}
