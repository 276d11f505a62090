//! # lamsa-core: Pure Cart Logic for the Lamsa Storefront
//!
//! This crate is the **heart** of the storefront cart. It owns the line items,
//! the money math and the tab-scoped storage format, with no knowledge of how
//! the page is rendered.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Lamsa Storefront Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    lamsa-ui (Presentation)                      │   │
//! │  │   Cart panel ──► Badge ──► Toasts ──► Reveal / Navbar / Hero   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ CartStore operations                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ lamsa-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │   cart    │  │  storage  │  │   store   │  │   │
//! │  │   │   Money   │  │ CartState │  │  codec    │  │ CartStore │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO RENDERING • NO TIMERS • NO NETWORK                        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            SessionStorage (tab-scoped key/value slot)           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Line items and the ordered cart sequence
//! - [`storage`] - `SessionStorage` trait, in-memory slot and JSON codec
//! - [`store`] - `CartStore`, the only way to mutate a cart
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use lamsa_core::{CartStore, MemoryStorage, Money, ProductId};
//!
//! let mut store = CartStore::restore(MemoryStorage::new());
//! store.add_item(ProductId::from("c1"), "Croissant", Money::from_cents(1250), "img.png");
//! store.add_item(ProductId::from("c1"), "Croissant", Money::from_cents(1250), "img.png");
//!
//! let summary = store.summary();
//! assert_eq!(summary.item_count, 2);
//! assert_eq!(summary.total_price.cents(), 2500);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod storage;
pub mod store;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartLineItem, CartState, CartSummary, ProductId};
pub use error::{CoreError, CoreResult, StorageError};
pub use money::Money;
pub use storage::{MemoryStorage, SessionStorage};
pub use store::{CartChange, CartStore};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key holding the serialized cart.
///
/// The page script and older sessions read the same slot, so changing this
/// value orphans any cart already saved in an open tab.
pub const CART_STORAGE_KEY: &str = "lamsa-cart";
