//! # Cart View
//!
//! Pure projection of [`CartState`] onto the cart panel, plus the action
//! attributes that product cards and cart rows carry.
//!
//! ## Panel Layout
//! ```text
//! ┌──────────────────────────────────────┐
//! │  #cartItems                          │
//! │  ┌────────────────────────────────┐  │
//! │  │ [img]  تارت الفراولة الفرنسي    │  │
//! │  │        2 × 55 ريال          ✕  │  │   ← one .cart-item per line
//! │  └────────────────────────────────┘  │
//! │  ...                                 │
//! ├──────────────────────────────────────┤
//! │  #cartFooter   #cartTotal 110.00 ريال │   ← hidden when empty
//! └──────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use lamsa_core::{CartLineItem, CartState, Money, ProductId};

use crate::config::UiConfig;
use crate::node::{Element, Node};

/// Everything the page needs to redraw the cart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartView {
    /// The `#cartItems` container with its rows (or the empty state).
    pub items: Node,
    pub footer_visible: bool,
    /// Formatted total; `None` when the footer is hidden.
    pub total_text: Option<String>,
}

/// Renders the cart panel contents.
pub fn render_cart(cart: &CartState, config: &UiConfig) -> CartView {
    let container = Element::new("div").attr("id", "cartItems");

    if cart.is_empty() {
        return CartView {
            items: container.child(render_empty(config)).into(),
            footer_visible: false,
            total_text: None,
        };
    }

    let container = cart
        .items()
        .iter()
        .enumerate()
        .fold(container, |c, (i, item)| c.child(render_row(i, item, config)));

    CartView {
        items: container.into(),
        footer_visible: true,
        total_text: Some(config.format_total(cart.total_price())),
    }
}

fn render_empty(config: &UiConfig) -> Element {
    Element::new("div")
        .class("cart-empty")
        .child(Element::new("span").text(config.text.empty_icon.clone()))
        .child(Element::new("p").text(config.text.empty_title.clone()))
        .child(Element::new("small").text(config.text.empty_hint.clone()))
}

fn render_row(position: usize, item: &CartLineItem, config: &UiConfig) -> Element {
    let info = Element::new("div")
        .class("ci-info")
        .child(Element::new("div").class("ci-name").text(item.name.clone()))
        .child(
            Element::new("div")
                .class("ci-price")
                .text(config.format_line(item.quantity, item.unit_price)),
        );

    let remove = PageAction::RemoveFromCart { position }
        .button(&config.text.remove_label)
        .class("ci-remove");

    Element::new("div")
        .class("cart-item")
        .child(
            Element::new("img")
                .attr("src", item.image_ref.clone())
                .attr("alt", item.name.clone()),
        )
        .child(info)
        .child(remove)
}

// =============================================================================
// Actions
// =============================================================================

/// A clickable action carried by rendered markup as `data-*` attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum PageAction {
    /// Cart row ✕ button, addressed by ordinal.
    RemoveFromCart { position: usize },

    /// Product card "add to cart".
    AddToCart {
        id: ProductId,
        name: String,
        price: Money,
        image: String,
    },

    /// Product card "view details".
    ViewDetails { id: ProductId },
}

impl PageAction {
    const REMOVE: &'static str = "remove-from-cart";
    const ADD: &'static str = "add-to-cart";
    const DETAILS: &'static str = "view-details";
    const TEXT_ID: &'static str = "text";

    /// A button carrying this action.
    pub fn button(&self, label: &str) -> Element {
        let el = Element::new("button").attr("type", "button");
        let el = match self {
            PageAction::RemoveFromCart { position } => el
                .attr("data-action", Self::REMOVE)
                .attr("data-position", position.to_string()),
            PageAction::AddToCart {
                id,
                name,
                price,
                image,
            } => with_id(el.attr("data-action", Self::ADD), id)
                .attr("data-name", name.clone())
                .attr("data-price", price.compact())
                .attr("data-image", image.clone()),
            PageAction::ViewDetails { id } => with_id(el.attr("data-action", Self::DETAILS), id),
        };
        el.text(label)
    }

    /// Reads the action off a clicked element. Elements without a complete
    /// set of attributes carry no action.
    pub fn from_element(el: &Element) -> Option<Self> {
        match el.get_attr("data-action")? {
            Self::REMOVE => Some(PageAction::RemoveFromCart {
                position: el.get_attr("data-position")?.parse().ok()?,
            }),
            Self::ADD => Some(PageAction::AddToCart {
                id: read_product_id(el)?,
                name: el.get_attr("data-name")?.to_string(),
                price: Money::from_major_f64(el.get_attr("data-price")?.trim().parse().ok()?),
                image: el.get_attr("data-image").unwrap_or_default().to_string(),
            }),
            Self::DETAILS => Some(PageAction::ViewDetails {
                id: read_product_id(el)?,
            }),
            _ => None,
        }
    }
}

/// `data-id`, plus `data-id-kind="text"` for text ids so that a text id
/// made of digits does not come back as a number.
fn with_id(el: Element, id: &ProductId) -> Element {
    let el = el.attr("data-id", id.to_string());
    match id {
        ProductId::Text(_) => el.attr("data-id-kind", PageAction::TEXT_ID),
        ProductId::Number(_) => el,
    }
}

/// Attribute values are strings. Without a kind marker, all-digit ids are
/// the server's numeric ids.
fn read_product_id(el: &Element) -> Option<ProductId> {
    let raw = el.get_attr("data-id")?;
    if el.get_attr("data-id-kind") == Some(PageAction::TEXT_ID) {
        return Some(ProductId::Text(raw.to_string()));
    }
    Some(
        raw.parse::<i64>()
            .map(ProductId::Number)
            .unwrap_or_else(|_| ProductId::Text(raw.to_string())),
    )
}

/// A product card's action bar: details and add-to-cart buttons.
pub fn render_product_actions(
    id: ProductId,
    name: &str,
    price: Money,
    image: &str,
    config: &UiConfig,
) -> Element {
    let details = PageAction::ViewDetails { id: id.clone() }.button(&config.text.details_label);
    let add = PageAction::AddToCart {
        id,
        name: name.to_string(),
        price,
        image: image.to_string(),
    }
    .button(&format!("{} {}", price.compact(), config.currency.suffix))
    .class("add-to-cart");

    Element::new("div")
        .class("product-actions")
        .child(details)
        .child(add)
}
