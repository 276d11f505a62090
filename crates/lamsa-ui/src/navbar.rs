//! Navbar "scrolled" state: on whenever the page is scrolled past the
//! threshold, re-evaluated on every scroll event.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Navbar {
    threshold_px: f64,
    scrolled: bool,
}

impl Navbar {
    pub fn new(threshold_px: f64) -> Self {
        Navbar {
            threshold_px,
            scrolled: false,
        }
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    /// Returns true if the state flipped.
    pub fn on_scroll(&mut self, scroll_y: f64) -> bool {
        let scrolled = scroll_y > self.threshold_px;
        let changed = scrolled != self.scrolled;
        self.scrolled = scrolled;
        changed
    }
}
