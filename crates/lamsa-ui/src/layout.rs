//! # Page Layout
//!
//! Which optional elements the current page actually has. Storefront,
//! product and dashboard pages share one script, and each page only carries
//! some of the elements, so every behaviour checks here before acting.
//!
//! The one element that gates more than itself is the cart item list:
//! without it the cart redraw is skipped. The count badges are not part of
//! that redraw and stay current either way.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Hero elements, in the order their entrance is staggered.
pub const HERO_SEQUENCE: [&str; 5] = [
    "hero-badge",
    "hero-title",
    "hero-subtitle",
    "hero-actions",
    "hero-stats",
];

/// The page's optional elements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLayout {
    /// Number of cart-count badges on the page.
    pub badges: usize,
    pub cart_panel: bool,
    pub backdrop: bool,
    pub item_list: bool,
    pub footer: bool,
    pub total: bool,
    pub navbar: bool,
    pub cart_button: bool,
    /// Keys of the server flash notices rendered into the page.
    pub flash_notices: Vec<String>,
    /// Hero classes present, any order; entrance order follows
    /// [`HERO_SEQUENCE`].
    pub hero: BTreeSet<String>,
    pub hero_visual: bool,
    /// Keys of reveal-eligible cards (product, feature, KPI) in document
    /// order.
    pub reveal: Vec<String>,
    /// Element ids that in-page anchors may target.
    pub anchor_targets: BTreeSet<String>,
}

impl PageLayout {
    /// The storefront home page: every element present.
    pub fn storefront() -> Self {
        PageLayout {
            badges: 2,
            cart_panel: true,
            backdrop: true,
            item_list: true,
            footer: true,
            total: true,
            navbar: true,
            cart_button: true,
            flash_notices: Vec::new(),
            hero: HERO_SEQUENCE.iter().map(|s| s.to_string()).collect(),
            hero_visual: true,
            reveal: (1..=8)
                .map(|i| format!("product-card-{i}"))
                .chain((1..=3).map(|i| format!("feature-card-{i}")))
                .collect(),
            anchor_targets: ["products", "features", "contact"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Hero classes present on this page, in entrance order.
    pub fn hero_sequence(&self) -> impl Iterator<Item = &'static str> + '_ {
        HERO_SEQUENCE
            .iter()
            .copied()
            .filter(|class| self.hero.contains(*class))
    }

    /// Panel toggling needs both halves on the page.
    pub fn can_toggle_panel(&self) -> bool {
        self.cart_panel && self.backdrop
    }
}
