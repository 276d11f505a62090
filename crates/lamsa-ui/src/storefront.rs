//! # Storefront Page Controller
//!
//! Owns everything the page script keeps alive for the lifetime of a tab and
//! routes page events to it.
//!
//! ## Event Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Storefront::handle                              │
//! │                                                                         │
//! │   UiEvent ──┬── AddToCart ──► CartStore ──► refresh ──► toast + pulse   │
//! │             ├── RemoveFromCart ──► row id ──► CartStore ──► refresh     │
//! │             ├── Checkout ──► toast ──► CartStore::clear ──► close panel │
//! │             ├── ToggleCart ──► CartPanel                                │
//! │             ├── Scroll ──► Navbar                                       │
//! │             ├── Intersections ──► RevealObserver                        │
//! │             ├── AnchorClick ──► Effect::ScrollTo / Effect::None         │
//! │             └── ViewDetails ──► Effect::Navigate                        │
//! │                                                                         │
//! │   advance(ms) ──► Scheduler ──► UiTask ──► toast / flash / hero / pulse │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart mutations always go through [`CartStore`], which writes the cart to
//! storage before the view is redrawn. The count badges are updated on every
//! redraw, even on pages that have no cart item list.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use lamsa_core::{CartState, CartStore, CartSummary, Money, ProductId, SessionStorage};

use crate::anchor::{self, AnchorOutcome, ScrollIntent};
use crate::cart_view::{render_cart, CartView, PageAction};
use crate::config::UiConfig;
use crate::entry::{EntryAnimation, HeroRelease};
use crate::flash::{FlashBoard, FlashNotice, FlashTask};
use crate::layout::PageLayout;
use crate::motion::Offset;
use crate::navbar::Navbar;
use crate::node::{Element, Node};
use crate::panel::{CartPanel, PanelState};
use crate::reveal::{ElementBox, RevealItem, RevealObserver};
use crate::scheduler::{Scheduler, TimerId};
use crate::toast::{Toast, ToastHost, ToastKind, ToastTask};

// =============================================================================
// Events, Tasks and Effects
// =============================================================================

/// Something that happened on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    /// Document finished loading.
    Ready,
    AddToCart {
        id: ProductId,
        name: String,
        price: Money,
        #[serde(default)]
        image: String,
    },
    RemoveFromCart {
        position: usize,
    },
    ToggleCart,
    Checkout,
    Scroll {
        y: f64,
    },
    /// Fresh element measurements from the intersection observer.
    Intersections {
        viewport_height: f64,
        boxes: Vec<ElementBox>,
    },
    AnchorClick {
        href: String,
    },
    ViewDetails {
        id: ProductId,
    },
}

impl From<PageAction> for UiEvent {
    fn from(action: PageAction) -> Self {
        match action {
            PageAction::RemoveFromCart { position } => UiEvent::RemoveFromCart { position },
            PageAction::AddToCart {
                id,
                name,
                price,
                image,
            } => UiEvent::AddToCart {
                id,
                name,
                price,
                image,
            },
            PageAction::ViewDetails { id } => UiEvent::ViewDetails { id },
        }
    }
}

/// Every timer callback the page can have pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiTask {
    Toast(ToastTask),
    Flash(FlashTask),
    Hero(HeroRelease),
    CartButtonRestore,
}

impl From<ToastTask> for UiTask {
    fn from(task: ToastTask) -> Self {
        UiTask::Toast(task)
    }
}

impl From<FlashTask> for UiTask {
    fn from(task: FlashTask) -> Self {
        UiTask::Flash(task)
    }
}

impl From<HeroRelease> for UiTask {
    fn from(task: HeroRelease) -> Self {
        UiTask::Hero(task)
    }
}

/// What the browser should do once the handler returns.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "effect", content = "value", rename_all = "snake_case")]
pub enum Effect {
    None,
    /// Cancel the default jump and scroll smoothly instead.
    ScrollTo(ScrollIntent),
    /// Leave the page for another path.
    Navigate(String),
}

// =============================================================================
// Page View
// =============================================================================

/// Serialisable snapshot of everything visible on the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    pub now_ms: u64,
    pub summary: CartSummary,
    /// Count shown in every cart badge; `None` on pages without badges.
    pub badge: Option<u64>,
    /// Last cart render; `None` until the first render, and forever on
    /// pages without an item list.
    pub cart: Option<CartView>,
    pub panel: PanelState,
    pub toast: Option<Toast>,
    pub toast_node: Option<Node>,
    pub navbar_scrolled: bool,
    /// The cart button, scaled up while pulsed.
    pub cart_button: Option<Node>,
    pub flash: Vec<FlashNotice>,
    pub hero: EntryAnimation,
    pub reveal: Vec<RevealItem>,
}

// =============================================================================
// Storefront
// =============================================================================

pub struct Storefront<S: SessionStorage> {
    config: UiConfig,
    layout: PageLayout,
    store: CartStore<S>,
    scheduler: Scheduler<UiTask>,
    badge: Option<u64>,
    view: Option<CartView>,
    panel: CartPanel,
    toast: ToastHost,
    reveal: RevealObserver,
    navbar: Navbar,
    flash: FlashBoard,
    entry: EntryAnimation,
    cart_pulse: Option<TimerId>,
    ready: bool,
}

impl<S: SessionStorage> Storefront<S> {
    /// Loads the cart from `storage` and arms the flash dismissal, the two
    /// things the page script does before the document is ready.
    pub fn new(config: UiConfig, layout: PageLayout, storage: S) -> Self {
        let store = CartStore::restore_with_key(storage, &config.storage.key);
        let mut scheduler = Scheduler::new();
        let flash = FlashBoard::arm(config.flash.clone(), &layout.flash_notices, &mut scheduler);

        info!(
            lines = store.cart().len(),
            items = store.summary().item_count,
            "Storefront loaded"
        );

        Storefront {
            toast: ToastHost::new(config.toast.clone()),
            reveal: RevealObserver::idle(config.reveal.clone()),
            navbar: Navbar::new(config.navbar.scrolled_threshold_px),
            config,
            layout,
            store,
            scheduler,
            badge: None,
            view: None,
            panel: CartPanel::new(),
            flash,
            entry: EntryAnimation::default(),
            cart_pulse: None,
            ready: false,
        }
    }

    /// Handles one page event.
    pub fn handle(&mut self, event: UiEvent) -> Effect {
        match event {
            UiEvent::Ready => {
                self.on_ready();
                Effect::None
            }
            UiEvent::AddToCart {
                id,
                name,
                price,
                image,
            } => {
                self.add_to_cart(id, &name, price, &image);
                Effect::None
            }
            UiEvent::RemoveFromCart { position } => {
                self.remove_at(position);
                Effect::None
            }
            UiEvent::ToggleCart => {
                self.toggle_cart();
                Effect::None
            }
            UiEvent::Checkout => {
                self.checkout();
                Effect::None
            }
            UiEvent::Scroll { y } => {
                if self.layout.navbar && self.navbar.on_scroll(y) {
                    debug!(scrolled = self.navbar.is_scrolled(), "Navbar state changed");
                }
                Effect::None
            }
            UiEvent::Intersections {
                viewport_height,
                boxes,
            } => {
                self.reveal.on_viewport(viewport_height, &boxes);
                Effect::None
            }
            UiEvent::AnchorClick { href } => match anchor::resolve(&href, &self.layout.anchor_targets) {
                AnchorOutcome::Smooth(intent) => {
                    debug!(target = %intent.target, "Smooth scroll");
                    Effect::ScrollTo(intent)
                }
                AnchorOutcome::Default => Effect::None,
            },
            UiEvent::ViewDetails { id } => Effect::Navigate(self.config.product_path(&id)),
        }
    }

    /// Handles a click on a rendered element. Elements carrying no action do
    /// nothing.
    pub fn click(&mut self, el: &Element) -> Effect {
        match PageAction::from_element(el) {
            Some(action) => self.handle(action.into()),
            None => Effect::None,
        }
    }

    /// Lets `ms` milliseconds pass, firing every timer that comes due.
    pub fn advance(&mut self, ms: u64) {
        let until = self.scheduler.now().saturating_add(ms);
        while let Some(task) = self.scheduler.pop_due(until) {
            self.run_task(task);
        }
        self.scheduler.settle(until);
    }

    fn run_task(&mut self, task: UiTask) {
        match task {
            UiTask::Toast(task) => self.toast.on_task(task, &mut self.scheduler),
            UiTask::Flash(task) => self.flash.on_task(task, &mut self.scheduler),
            UiTask::Hero(HeroRelease) => self.entry.release(),
            UiTask::CartButtonRestore => self.cart_pulse = None,
        }
    }

    // =========================================================================
    // Handlers
    // =========================================================================

    fn on_ready(&mut self) {
        if self.ready {
            debug!("Ready fired twice, ignoring");
            return;
        }
        self.ready = true;

        self.refresh();
        self.reveal = RevealObserver::observe(self.config.reveal.clone(), &self.layout.reveal);
        self.entry = EntryAnimation::start(&self.layout, &self.config.entry, &mut self.scheduler);
    }

    fn add_to_cart(&mut self, id: ProductId, name: &str, price: Money, image: &str) {
        self.store.add_item(id, name, price, image);
        self.refresh();
        let message = self.config.added_message(name);
        self.toast.show(message, ToastKind::Info, &mut self.scheduler);

        if self.layout.cart_button {
            if let Some(timer) = self.cart_pulse.take() {
                self.scheduler.cancel(timer);
            }
            self.cart_pulse = Some(
                self.scheduler
                    .schedule(self.config.cart_button.pulse_ms, UiTask::CartButtonRestore),
            );
        }
    }

    /// Removes the line drawn at `position`. The row is resolved to its
    /// product id first, so a stale position can only miss, never hit a
    /// different line.
    fn remove_at(&mut self, position: usize) {
        let id = self.store.cart().items().get(position).map(|item| item.id.clone());
        match id {
            Some(id) => {
                self.store.remove_by_id(&id);
            }
            None => {
                debug!(position, lines = self.store.cart().len(), "Remove past the end ignored");
                if let Err(e) = self.store.persist() {
                    warn!(error = %e, "Failed to save cart");
                }
            }
        }
        self.refresh();
    }

    fn toggle_cart(&mut self) {
        if !self.layout.can_toggle_panel() {
            return;
        }
        let state = self.panel.toggle();
        debug!(?state, "Cart panel toggled");
    }

    fn checkout(&mut self) {
        if self.store.cart().is_empty() {
            debug!("Checkout on empty cart ignored");
            return;
        }

        let summary = self.store.summary();
        info!(items = summary.item_count, total = %summary.total_price, "Checkout");
        self.toast.show(
            self.config.text.checkout_message.clone(),
            ToastKind::Success,
            &mut self.scheduler,
        );
        self.store.clear();
        self.refresh();
        if self.layout.can_toggle_panel() {
            self.panel.close();
        }
    }

    /// Redraws the cart from current state, limited to the elements the
    /// page has. Badges come first: they do not depend on the item list.
    fn refresh(&mut self) {
        if self.layout.badges > 0 {
            self.badge = Some(self.store.cart().item_count());
        }
        if !self.layout.item_list {
            return;
        }

        let mut view = render_cart(self.store.cart(), &self.config);
        if !self.layout.footer {
            view.footer_visible = false;
            view.total_text = None;
        } else if !self.layout.total {
            view.total_text = None;
        }
        self.view = Some(view);
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn snapshot(&self) -> PageView {
        PageView {
            now_ms: self.scheduler.now(),
            summary: self.store.summary(),
            badge: self.badge,
            cart: self.view.clone(),
            panel: self.panel.state(),
            toast: self.toast.current().cloned(),
            toast_node: self.toast.render(),
            navbar_scrolled: self.navbar.is_scrolled(),
            cart_button: self.render_cart_button(),
            flash: self.flash.notices().to_vec(),
            hero: self.entry.clone(),
            reveal: self.reveal.items().to_vec(),
        }
    }

    fn render_cart_button(&self) -> Option<Node> {
        if !self.layout.cart_button {
            return None;
        }
        let button = Element::new("button").class("cart-btn");
        let button = match self.cart_pulse {
            Some(_) => {
                let pulse = Offset::Scale(self.config.cart_button.pulse_scale_pct);
                button.style("transform", pulse.css())
            }
            None => button,
        };
        Some(button.into())
    }

    pub fn cart(&self) -> &CartState {
        self.store.cart()
    }

    pub fn store(&self) -> &CartStore<S> {
        &self.store
    }

    /// Count last written to the cart badges.
    pub fn badge(&self) -> Option<u64> {
        self.badge
    }

    pub fn view(&self) -> Option<&CartView> {
        self.view.as_ref()
    }

    pub fn panel(&self) -> PanelState {
        self.panel.state()
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.current()
    }

    pub fn now(&self) -> u64 {
        self.scheduler.now()
    }

    /// Timers still waiting to fire.
    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    /// Closes the tab's page, handing back its storage for the next load.
    pub fn into_storage(self) -> S {
        self.store.into_storage()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lamsa_core::MemoryStorage;

    fn page() -> Storefront<MemoryStorage> {
        let mut page = Storefront::new(
            UiConfig::default(),
            PageLayout::storefront(),
            MemoryStorage::new(),
        );
        page.handle(UiEvent::Ready);
        page
    }

    fn add(id: &str, cents: i64) -> UiEvent {
        UiEvent::AddToCart {
            id: ProductId::from(id),
            name: id.to_string(),
            price: Money::from_cents(cents),
            image: String::new(),
        }
    }

    #[test]
    fn test_ready_renders_empty_cart() {
        let page = page();
        let view = page.view().unwrap();
        assert!(!view.footer_visible);
        assert_eq!(page.badge(), Some(0));
    }

    fn cart_button_transform(page: &Storefront<MemoryStorage>) -> Option<String> {
        let button = page.snapshot().cart_button.unwrap();
        button
            .as_element()
            .unwrap()
            .get_style("transform")
            .map(str::to_string)
    }

    #[test]
    fn test_add_shows_toast_and_pulses() {
        let mut page = page();
        page.handle(add("c1", 1250));

        assert_eq!(page.badge(), Some(1));
        assert_eq!(page.toast().unwrap().message, "تمت إضافة \"c1\" للسلة! 🛒");
        assert_eq!(cart_button_transform(&page).as_deref(), Some("scale(1.2)"));

        page.advance(200);
        assert_eq!(cart_button_transform(&page), None);
    }

    #[test]
    fn test_repeat_add_restarts_pulse() {
        let mut page = page();
        page.handle(add("c1", 1250));
        page.advance(150);
        page.handle(add("c1", 1250));
        page.advance(100);
        assert_eq!(cart_button_transform(&page).as_deref(), Some("scale(1.2)"));
        page.advance(100);
        assert_eq!(cart_button_transform(&page), None);
    }

    #[test]
    fn test_no_cart_button_no_pulse() {
        let mut layout = PageLayout::storefront();
        layout.cart_button = false;
        let mut page = Storefront::new(UiConfig::default(), layout, MemoryStorage::new());
        page.handle(add("c1", 1250));
        assert!(page.snapshot().cart_button.is_none());
    }

    #[test]
    fn test_no_badges_leaves_badge_unset() {
        let mut layout = PageLayout::storefront();
        layout.badges = 0;
        let mut page = Storefront::new(UiConfig::default(), layout, MemoryStorage::new());
        page.handle(add("c1", 1250));
        assert_eq!(page.badge(), None);
        assert_eq!(page.view().unwrap().items.find_by_class("cart-item").len(), 1);
    }

    #[test]
    fn test_toggle_guarded_by_layout() {
        let mut layout = PageLayout::storefront();
        layout.backdrop = false;
        let mut page = Storefront::new(UiConfig::default(), layout, MemoryStorage::new());
        page.handle(UiEvent::ToggleCart);
        assert_eq!(page.panel(), PanelState::Closed);
    }

    #[test]
    fn test_checkout_closes_open_panel() {
        let mut page = page();
        page.handle(add("c1", 1250));
        page.handle(UiEvent::ToggleCart);
        assert_eq!(page.panel(), PanelState::Open);

        page.handle(UiEvent::Checkout);
        assert!(page.cart().is_empty());
        assert_eq!(page.panel(), PanelState::Closed);
        assert_eq!(page.toast().unwrap().kind, ToastKind::Success);
    }

    #[test]
    fn test_checkout_never_opens_closed_panel() {
        let mut page = page();
        page.handle(add("c1", 1250));
        page.handle(UiEvent::Checkout);
        assert_eq!(page.panel(), PanelState::Closed);
    }

    #[test]
    fn test_view_details_navigates() {
        let mut page = page();
        assert_eq!(
            page.handle(UiEvent::ViewDetails { id: ProductId::from(7) }),
            Effect::Navigate("/product/7".to_string())
        );
    }

    #[test]
    fn test_footer_missing_hides_total() {
        let mut layout = PageLayout::storefront();
        layout.footer = false;
        let mut page = Storefront::new(UiConfig::default(), layout, MemoryStorage::new());
        page.handle(add("c1", 1250));
        let view = page.view().unwrap();
        assert!(!view.footer_visible);
        assert!(view.total_text.is_none());
        assert_eq!(page.badge(), Some(1));
    }

    #[test]
    fn test_event_json_shape() {
        let event: UiEvent = serde_json::from_str(
            r#"{"type": "add_to_cart", "id": 3, "name": "تارت", "price": 55}"#,
        )
        .unwrap();
        assert_eq!(
            event,
            UiEvent::AddToCart {
                id: ProductId::from(3),
                name: "تارت".to_string(),
                price: Money::from_cents(5500),
                image: String::new(),
            }
        );
    }
}
