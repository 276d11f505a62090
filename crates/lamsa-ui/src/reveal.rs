//! # Scroll Reveal
//!
//! Cards start faded out and pushed down, then rise into place the first
//! time enough of them scrolls into view.
//!
//! ## Observation Rule
//! ```text
//!   viewport top ─────────────────────────  0
//!                 │                     │
//!                 │   ┌─────────────┐   │
//!                 │   │   card      │   │   visible fraction ≥ threshold
//!                 │   └─────────────┘   │   ──► release, stop observing
//!                 │                     │
//!   root bottom ─ ┼ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ┼   viewport height + bottom margin
//!                 │    (margin band)    │   (margin -40px pulls it up)
//!   viewport bottom ──────────────────────
//! ```
//!
//! Each card is released at most once; later scrolls never hide it again.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::RevealSection;
use crate::motion::{Motion, Offset, Transition};

/// An element's box relative to the viewport, as measured by the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementBox {
    pub key: String,
    pub top: f64,
    pub height: f64,
}

/// Fraction of `el` inside the root area `[0, viewport_height + margin_bottom]`.
pub fn intersection_ratio(el: &ElementBox, viewport_height: f64, margin_bottom: f64) -> f64 {
    let root_bottom = viewport_height + margin_bottom;
    if el.height <= 0.0 {
        // Zero-area elements count as fully visible while on screen
        return if (0.0..=root_bottom).contains(&el.top) { 1.0 } else { 0.0 };
    }

    let visible = (el.top + el.height).min(root_bottom) - el.top.max(0.0);
    (visible / el.height).clamp(0.0, 1.0)
}

/// One reveal-eligible element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevealItem {
    pub key: String,
    pub motion: Motion,
    pub observed: bool,
}

/// Tracks every reveal-eligible element on the page.
#[derive(Debug)]
pub struct RevealObserver {
    config: RevealSection,
    items: Vec<RevealItem>,
}

impl RevealObserver {
    /// Hides every element and starts observing it. The transition delay
    /// grows with document position.
    pub fn observe(config: RevealSection, keys: &[String]) -> Self {
        let items = keys
            .iter()
            .enumerate()
            .map(|(i, key)| RevealItem {
                key: key.clone(),
                motion: Motion::hidden(
                    Offset::Y(config.offset_px),
                    Transition::new(config.duration_ms, i as u64 * config.stagger_ms),
                ),
                observed: true,
            })
            .collect();

        RevealObserver { config, items }
    }

    /// An observer watching nothing, for pages before ready.
    pub fn idle(config: RevealSection) -> Self {
        RevealObserver {
            config,
            items: Vec::new(),
        }
    }

    pub fn items(&self) -> &[RevealItem] {
        &self.items
    }

    /// Processes a viewport measurement. Returns the keys released by it.
    pub fn on_viewport(&mut self, viewport_height: f64, boxes: &[ElementBox]) -> Vec<String> {
        let mut released = Vec::new();

        for b in boxes {
            let Some(item) = self.items.iter_mut().find(|i| i.key == b.key) else {
                continue;
            };
            if !item.observed {
                continue;
            }

            let ratio = intersection_ratio(b, viewport_height, self.config.root_margin_bottom_px);
            if ratio > 0.0 && ratio >= self.config.threshold {
                item.motion.release();
                item.observed = false;
                released.push(item.key.clone());
            }
        }

        if !released.is_empty() {
            debug!(count = released.len(), "Revealed on scroll");
        }
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn el(key: &str, top: f64, height: f64) -> ElementBox {
        ElementBox {
            key: key.to_string(),
            top,
            height,
        }
    }

    fn keys(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("card-{i}")).collect()
    }

    #[test]
    fn test_ratio_respects_bottom_margin() {
        // 800px viewport, root ends at 760
        assert_eq!(intersection_ratio(&el("a", 700.0, 100.0), 800.0, -40.0), 0.6);
        assert_eq!(intersection_ratio(&el("a", 760.0, 100.0), 800.0, -40.0), 0.0);
        assert_eq!(intersection_ratio(&el("a", -50.0, 100.0), 800.0, -40.0), 0.5);
        assert_eq!(intersection_ratio(&el("a", -200.0, 100.0), 800.0, -40.0), 0.0);
    }

    #[test]
    fn test_initial_state_is_hidden_and_staggered() {
        let obs = RevealObserver::observe(RevealSection::default(), &keys(3));
        let delays: Vec<_> = obs
            .items()
            .iter()
            .map(|i| i.motion.transition.unwrap().delay_ms)
            .collect();
        assert_eq!(delays, [0, 50, 100]);
        assert!(obs.items().iter().all(|i| !i.motion.visible));
        assert_eq!(obs.items()[0].motion.offset, Offset::Y(30));
        assert!(obs.items().iter().all(|i| i.observed));
    }

    #[test]
    fn test_threshold() {
        let mut obs = RevealObserver::observe(RevealSection::default(), &keys(2));
        // 5% visible above the margin line: not enough
        let released = obs.on_viewport(800.0, &[el("card-0", 755.0, 100.0)]);
        assert!(released.is_empty());

        // 10% visible: released
        let released = obs.on_viewport(800.0, &[el("card-0", 750.0, 100.0)]);
        assert_eq!(released, ["card-0"]);
        assert!(obs.items()[0].motion.visible);
        assert_eq!(obs.items()[0].motion.offset, Offset::Y(0));
    }

    #[test]
    fn test_release_is_one_shot() {
        let mut obs = RevealObserver::observe(RevealSection::default(), &keys(1));
        assert_eq!(obs.on_viewport(800.0, &[el("card-0", 100.0, 100.0)]).len(), 1);
        // Scrolled away and back: nothing new
        assert!(obs.on_viewport(800.0, &[el("card-0", 2000.0, 100.0)]).is_empty());
        assert!(obs.on_viewport(800.0, &[el("card-0", 100.0, 100.0)]).is_empty());
        assert!(obs.items()[0].motion.visible);
        assert!(obs.items().iter().all(|i| !i.observed));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let mut obs = RevealObserver::observe(RevealSection::default(), &keys(1));
        assert!(obs.on_viewport(800.0, &[el("other", 0.0, 100.0)]).is_empty());
    }
}
