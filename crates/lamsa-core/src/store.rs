//! # Cart Store
//!
//! Owns the cart and its storage slot. Every mutation goes through here and
//! writes through to storage before returning.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  add_item / remove_item / remove_by_id / clear                         │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  mutate CartState ──► persist() ──► SessionStorage::set_item           │
//! │        │                                  │                             │
//! │        │                            (failure: warn!, keep going)       │
//! │        ▼                                                                │
//! │  return CartChange ──► caller re-renders, shows toast, etc.           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store knows nothing about rendering. It reports what changed through
//! [`CartChange`] and the caller decides how the page reacts.

use tracing::{debug, warn};

use crate::cart::{CartLineItem, CartState, CartSummary, ProductId};
use crate::error::CoreResult;
use crate::money::Money;
use crate::storage::{decode_cart, encode_cart, SessionStorage};
use crate::CART_STORAGE_KEY;

/// What a store operation did to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartChange {
    /// One unit was added; `quantity` is the line's new quantity.
    Added {
        id: ProductId,
        name: String,
        quantity: u32,
    },

    /// A line removal was requested; `item` is `None` when nothing matched.
    Removed { item: Option<CartLineItem> },

    /// The cart was emptied.
    Cleared,
}

/// The cart plus the storage slot it is mirrored to.
#[derive(Debug)]
pub struct CartStore<S: SessionStorage> {
    cart: CartState,
    storage: S,
    key: String,
}

impl<S: SessionStorage> CartStore<S> {
    /// Restores the cart from the default storage key.
    pub fn restore(storage: S) -> Self {
        Self::restore_with_key(storage, CART_STORAGE_KEY)
    }

    /// Restores the cart from `key`.
    ///
    /// ## Behavior
    /// - Key absent: empty cart
    /// - Value unparseable: empty cart (logged, the slot is left as-is
    ///   until the next write replaces it)
    /// - Value parseable: zero-quantity lines dropped, repeated ids merged
    pub fn restore_with_key(storage: S, key: &str) -> Self {
        let cart = match storage.get_item(key) {
            None => CartState::new(),
            Some(raw) => match decode_cart(&raw) {
                Ok(cart) => cart.normalized(),
                Err(e) => {
                    warn!(key, error = %e, "Stored cart unreadable, starting empty");
                    CartState::new()
                }
            },
        };

        debug!(key, lines = cart.len(), "Cart restored");
        CartStore {
            cart,
            storage,
            key: key.to_string(),
        }
    }

    /// Adds one unit of a product, appending a line if the id is new.
    ///
    /// Name and price are taken as given; validating them is the caller's
    /// business.
    pub fn add_item(
        &mut self,
        id: ProductId,
        name: &str,
        unit_price: Money,
        image_ref: &str,
    ) -> CartChange {
        let quantity = self.cart.add(id.clone(), name, unit_price, image_ref);
        debug!(id = %id, quantity, "Cart item added");
        self.write_through();

        CartChange::Added {
            id,
            name: name.to_string(),
            quantity,
        }
    }

    /// Removes the line at ordinal `position`.
    ///
    /// Out-of-range positions change nothing but still persist.
    pub fn remove_item(&mut self, position: usize) -> CartChange {
        let item = self.cart.remove_at(position);
        if item.is_none() {
            debug!(position, lines = self.cart.len(), "Remove ignored, no such row");
        }
        self.write_through();
        CartChange::Removed { item }
    }

    /// Removes the line holding `id`. Unknown ids change nothing.
    pub fn remove_by_id(&mut self, id: &ProductId) -> CartChange {
        let item = self.cart.remove_by_id(id);
        debug!(id = %id, removed = item.is_some(), "Remove by id");
        self.write_through();
        CartChange::Removed { item }
    }

    /// Empties the cart.
    pub fn clear(&mut self) -> CartChange {
        self.cart.clear();
        debug!("Cart cleared");
        self.write_through();
        CartChange::Cleared
    }

    /// Writes the full cart to the storage slot, replacing any prior value.
    pub fn persist(&mut self) -> CoreResult<()> {
        let raw = encode_cart(&self.cart)?;
        self.storage.set_item(&self.key, &raw)?;
        Ok(())
    }

    /// Item count and total price, computed fresh.
    pub fn summary(&self) -> CartSummary {
        self.cart.summary()
    }

    pub fn cart(&self) -> &CartState {
        &self.cart
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    fn write_through(&mut self) {
        if let Err(e) = self.persist() {
            warn!(key = %self.key, error = %e, "Cart not persisted");
        }
    }
}
