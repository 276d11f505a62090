//! Full page flows driven through the storefront controller.

use lamsa_core::{MemoryStorage, Money, ProductId, SessionStorage, StorageError};
use lamsa_ui::reveal::ElementBox;
use lamsa_ui::toast::ToastPhase;
use lamsa_ui::{
    Effect, PageLayout, PanelState, ScrollBlock, ScrollIntent, Storefront, UiConfig, UiEvent,
};

fn open_page(layout: PageLayout, storage: MemoryStorage) -> Storefront<MemoryStorage> {
    let mut page = Storefront::new(UiConfig::default(), layout, storage);
    page.handle(UiEvent::Ready);
    page
}

fn croissant() -> UiEvent {
    UiEvent::AddToCart {
        id: ProductId::from("c1"),
        name: "Croissant".to_string(),
        price: Money::from_cents(1250),
        image: "croissant.png".to_string(),
    }
}

fn tart() -> UiEvent {
    UiEvent::AddToCart {
        id: ProductId::from(3),
        name: "تارت الفراولة الفرنسي".to_string(),
        price: Money::from_cents(5500),
        image: "tart.jpg".to_string(),
    }
}

#[test]
fn croissant_twice_is_one_line_of_two() {
    let mut page = open_page(PageLayout::storefront(), MemoryStorage::new());
    page.handle(croissant());
    page.handle(croissant());

    assert_eq!(page.cart().len(), 1);
    assert_eq!(page.cart().items()[0].quantity, 2);

    assert_eq!(page.badge(), Some(2));
    let view = page.view().unwrap();
    assert_eq!(view.total_text.as_deref(), Some("25.00 ريال"));
    assert_eq!(view.items.find_by_class("cart-item").len(), 1);
}

#[test]
fn cart_survives_reload() {
    let mut page = open_page(PageLayout::storefront(), MemoryStorage::new());
    page.handle(croissant());
    page.handle(tart());
    page.handle(croissant());
    let before = page.cart().clone();

    let reloaded = open_page(PageLayout::storefront(), page.into_storage());
    assert_eq!(reloaded.cart(), &before);
    assert_eq!(reloaded.badge(), Some(3));
    assert_eq!(reloaded.view().unwrap().total_text.as_deref(), Some("80.00 ريال"));
}

#[test]
fn corrupt_slot_loads_empty() {
    let storage = MemoryStorage::with_item("lamsa-cart", "{not json");
    let page = open_page(PageLayout::storefront(), storage);
    assert!(page.cart().is_empty());
    assert!(!page.view().unwrap().footer_visible);
}

#[test]
fn remove_by_clicking_rendered_row() {
    let mut page = open_page(PageLayout::storefront(), MemoryStorage::new());
    page.handle(croissant());
    page.handle(tart());

    let button = page.view().unwrap().items.find_by_class("ci-remove")[0].clone();
    assert_eq!(page.click(&button), Effect::None);

    assert_eq!(page.cart().len(), 1);
    assert_eq!(page.cart().items()[0].id, ProductId::from(3));
    assert_eq!(page.badge(), Some(1));
}

#[test]
fn out_of_range_remove_changes_nothing() {
    let mut page = open_page(PageLayout::storefront(), MemoryStorage::new());
    page.handle(croissant());
    page.handle(UiEvent::RemoveFromCart { position: 5 });
    assert_eq!(page.cart().len(), 1);
}

#[test]
fn remove_takes_out_the_whole_line_at_position() {
    let mut page = open_page(PageLayout::storefront(), MemoryStorage::new());
    page.handle(croissant());
    page.handle(tart());
    page.handle(tart());

    page.handle(UiEvent::RemoveFromCart { position: 1 });
    assert_eq!(page.cart().len(), 1);
    assert_eq!(page.cart().items()[0].id, ProductId::from("c1"));
    assert_eq!(page.badge(), Some(1));
    assert_eq!(
        page.store().storage().get_item("lamsa-cart").as_deref(),
        Some(r#"[{"id":"c1","name":"Croissant","price":12.5,"img":"croissant.png","qty":1}]"#)
    );
}

#[test]
fn missed_remove_still_rewrites_the_slot() {
    // Duplicate ids in the slot merge into one line on load
    let storage = MemoryStorage::with_item(
        "lamsa-cart",
        r#"[{"id":1,"name":"x","price":5,"img":"","qty":1},{"id":1,"name":"x","price":5,"img":"","qty":2}]"#,
    );
    let mut page = open_page(PageLayout::storefront(), storage);
    let before = page.cart().clone();

    page.handle(UiEvent::RemoveFromCart { position: 9 });
    assert_eq!(page.cart(), &before);
    assert_eq!(
        page.store().storage().get_item("lamsa-cart").as_deref(),
        Some(r#"[{"id":1,"name":"x","price":5,"img":"","qty":3}]"#)
    );
}

#[test]
fn checkout_on_empty_cart_does_nothing() {
    let mut page = open_page(PageLayout::storefront(), MemoryStorage::new());
    page.handle(UiEvent::ToggleCart);
    page.handle(UiEvent::Checkout);

    assert!(page.toast().is_none());
    assert_eq!(page.panel(), PanelState::Open);
    assert!(page.store().storage().get_item("lamsa-cart").is_none());
}

#[test]
fn checkout_clears_and_closes() {
    let mut page = open_page(PageLayout::storefront(), MemoryStorage::new());
    page.handle(croissant());
    page.handle(UiEvent::ToggleCart);
    page.handle(UiEvent::Checkout);

    assert!(page.cart().is_empty());
    assert_eq!(page.panel(), PanelState::Closed);
    let view = page.view().unwrap();
    assert!(!view.footer_visible);
    assert_eq!(page.badge(), Some(0));
    assert_eq!(
        page.toast().unwrap().message,
        UiConfig::default().text.checkout_message
    );
    assert_eq!(page.store().storage().get_item("lamsa-cart").as_deref(), Some("[]"));
}

#[test]
fn toggle_twice_restores_state() {
    let mut page = open_page(PageLayout::storefront(), MemoryStorage::new());
    page.handle(UiEvent::ToggleCart);
    page.handle(UiEvent::ToggleCart);
    assert_eq!(page.panel(), PanelState::Closed);
}

#[test]
fn toast_lifecycle() {
    let mut page = open_page(PageLayout::storefront(), MemoryStorage::new());
    page.handle(croissant());
    assert_eq!(page.toast().unwrap().phase, ToastPhase::Entering);

    page.advance(16);
    assert_eq!(page.toast().unwrap().phase, ToastPhase::Visible);

    page.advance(2984);
    assert_eq!(page.toast().unwrap().phase, ToastPhase::Leaving);

    page.advance(399);
    assert!(page.toast().is_some());
    page.advance(1);
    assert!(page.toast().is_none());
}

#[test]
fn replaced_toast_timers_do_not_fire() {
    let mut page = open_page(PageLayout::storefront(), MemoryStorage::new());
    page.handle(croissant());
    page.advance(2000);
    page.handle(tart());

    // The first toast's leave would have fired at 3000
    page.advance(1500);
    let toast = page.toast().unwrap();
    assert!(toast.message.contains("تارت"));
    assert_eq!(toast.phase, ToastPhase::Visible);

    page.advance(1900);
    assert!(page.toast().is_none());
    // Hero and flash timers are long done; nothing left over
    assert_eq!(page.pending_timers(), 0);
}

#[test]
fn flash_notices_gone_by_4300() {
    let mut layout = PageLayout::storefront();
    layout.flash_notices = vec!["welcome".to_string()];
    let mut page = open_page(layout, MemoryStorage::new());

    page.advance(4000);
    let flash = page.snapshot().flash;
    assert_eq!(flash.len(), 1);
    assert!(!flash[0].motion.visible);

    page.advance(299);
    assert_eq!(page.snapshot().flash.len(), 1);
    page.advance(1);
    assert!(page.snapshot().flash.is_empty());
}

#[test]
fn navbar_follows_scroll() {
    let mut page = open_page(PageLayout::storefront(), MemoryStorage::new());
    page.handle(UiEvent::Scroll { y: 21.0 });
    assert!(page.snapshot().navbar_scrolled);
    page.handle(UiEvent::Scroll { y: 20.0 });
    assert!(!page.snapshot().navbar_scrolled);
}

#[test]
fn reveal_happens_once() {
    let mut page = open_page(PageLayout::storefront(), MemoryStorage::new());
    let card = |top| ElementBox {
        key: "product-card-1".to_string(),
        top,
        height: 300.0,
    };

    page.handle(UiEvent::Intersections {
        viewport_height: 800.0,
        boxes: vec![card(100.0)],
    });
    page.handle(UiEvent::Intersections {
        viewport_height: 800.0,
        boxes: vec![card(-1000.0)],
    });

    let reveal = page.snapshot().reveal;
    let first = reveal.iter().find(|r| r.key == "product-card-1").unwrap();
    assert!(first.motion.visible);
    assert!(!first.observed);
    assert!(reveal.iter().filter(|r| r.key != "product-card-1").all(|r| !r.motion.visible));
}

#[test]
fn hero_released_after_ready() {
    let mut page = open_page(PageLayout::storefront(), MemoryStorage::new());
    assert!(page.snapshot().hero.pieces().iter().all(|p| !p.motion.visible));
    page.advance(50);
    let hero = page.snapshot().hero;
    assert!(hero.pieces().iter().all(|p| p.motion.visible));
    assert!(hero.visual().unwrap().visible);
}

#[test]
fn anchors_scroll_only_to_known_targets() {
    let mut page = open_page(PageLayout::storefront(), MemoryStorage::new());
    assert_eq!(
        page.handle(UiEvent::AnchorClick {
            href: "#contact".to_string()
        }),
        Effect::ScrollTo(ScrollIntent {
            target: "contact".to_string(),
            block: ScrollBlock::Start,
        })
    );
    assert_eq!(
        page.handle(UiEvent::AnchorClick {
            href: "#faq".to_string()
        }),
        Effect::None
    );
}

#[test]
fn page_without_item_list_still_updates_badges() {
    let mut layout = PageLayout::storefront();
    layout.item_list = false;
    let mut page = open_page(layout, MemoryStorage::new());
    assert_eq!(page.badge(), Some(0));
    page.handle(croissant());

    assert_eq!(page.badge(), Some(1));
    assert_eq!(page.snapshot().badge, Some(1));
    assert!(page.view().is_none());
    assert!(page.snapshot().cart.is_none());
    assert_eq!(page.cart().item_count(), 1);
    assert!(page.store().storage().get_item("lamsa-cart").is_some());
}

/// Storage that refuses every write, like a tab with storage disabled.
struct ReadOnlyStorage;

impl SessionStorage for ReadOnlyStorage {
    fn get_item(&self, _key: &str) -> Option<String> {
        None
    }

    fn set_item(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable(format!("{key} is read-only")))
    }

    fn remove_item(&mut self, _key: &str) {}
}

#[test]
fn failed_writes_keep_the_page_working() {
    let mut page = Storefront::new(UiConfig::default(), PageLayout::storefront(), ReadOnlyStorage);
    page.handle(UiEvent::Ready);
    page.handle(croissant());

    assert_eq!(page.badge(), Some(1));
    assert!(page.toast().is_some());
}
