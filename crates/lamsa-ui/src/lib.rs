//! # lamsa-ui: Presentation Layer for the Lamsa Storefront
//!
//! Turns cart state into markup and runs every cosmetic behaviour of the
//! storefront page on a virtual clock, so the whole page can be driven and
//! checked without a browser.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          lamsa-ui                                       │
//! │                                                                         │
//! │   UiEvent ───────────►  ┌──────────────────────────┐  ──► Effect       │
//! │   advance(ms) ───────►  │   storefront::Storefront │  ──► PageView     │
//! │                         └────────────┬─────────────┘                    │
//! │            ┌──────────────┬──────────┼──────────┬──────────────┐        │
//! │            ▼              ▼          ▼          ▼              ▼        │
//! │      ┌──────────┐   ┌─────────┐ ┌────────┐ ┌─────────┐  ┌───────────┐  │
//! │      │cart_view │   │  panel  │ │ toast  │ │ reveal  │  │ navbar    │  │
//! │      │  (pure)  │   │         │ │        │ │         │  │ flash     │  │
//! │      └────┬─────┘   └─────────┘ └───┬────┘ └─────────┘  │ anchor    │  │
//! │           │                         │                   │ entry     │  │
//! │           ▼                         ▼                   └───────────┘  │
//! │      ┌──────────┐            ┌────────────┐                            │
//! │      │   node   │            │ scheduler  │ ◄── every timer lives here │
//! │      └──────────┘            └────────────┘                            │
//! │                                                                         │
//! │                  lamsa-core::CartStore (all cart changes)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`storefront`] - Page controller: events in, effects and snapshots out
//! - [`cart_view`] - Cart panel render and the actions markup carries
//! - [`node`] - Virtual element tree with escaped HTML output
//! - [`panel`] - Open/closed state of the cart panel
//! - [`toast`] - Single-slot toast notifications
//! - [`reveal`] - One-shot scroll reveal of cards
//! - [`navbar`] - Navbar scrolled state
//! - [`flash`] - Auto-dismissed server notices
//! - [`anchor`] - Smooth in-page anchor scrolling
//! - [`entry`] - Hero entrance animation
//! - [`motion`] - Opacity/transform/transition state
//! - [`scheduler`] - Virtual clock and timers
//! - [`layout`] - Which optional elements a page has
//! - [`config`] - Texts, currency and timings
//! - [`error`] - Config and script errors
//!
//! ## Example Usage
//!
//! ```rust
//! use lamsa_core::{MemoryStorage, Money, ProductId};
//! use lamsa_ui::{PageLayout, Storefront, UiConfig, UiEvent};
//!
//! let mut page = Storefront::new(UiConfig::default(), PageLayout::storefront(), MemoryStorage::new());
//! page.handle(UiEvent::Ready);
//! page.handle(UiEvent::AddToCart {
//!     id: ProductId::from("c1"),
//!     name: "Croissant".to_string(),
//!     price: Money::from_cents(1250),
//!     image: "img.png".to_string(),
//! });
//!
//! assert_eq!(page.badge(), Some(1));
//! page.advance(3400);
//! assert!(page.toast().is_none());
//! ```

pub mod anchor;
pub mod cart_view;
pub mod config;
pub mod entry;
pub mod error;
pub mod flash;
pub mod layout;
pub mod motion;
pub mod navbar;
pub mod node;
pub mod panel;
pub mod reveal;
pub mod scheduler;
pub mod storefront;
pub mod toast;

pub use anchor::{AnchorOutcome, ScrollBlock, ScrollIntent};
pub use cart_view::{render_cart, render_product_actions, CartView, PageAction};
pub use config::UiConfig;
pub use error::{UiError, UiResult};
pub use layout::PageLayout;
pub use node::{Element, Node};
pub use panel::PanelState;
pub use reveal::ElementBox;
pub use scheduler::Scheduler;
pub use storefront::{Effect, PageView, Storefront, UiEvent};
pub use toast::{ToastKind, ToastPhase};
