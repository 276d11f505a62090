//! # Cart Panel
//!
//! Open/closed state of the slide-out cart and its backdrop.
//!
//! ```text
//!            toggle()
//!   Closed ◄──────────► Open
//!   (initial)
//! ```
//!
//! Panel and backdrop share one state, so they can never disagree.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelState {
    #[default]
    Closed,
    Open,
}

impl PanelState {
    pub fn toggled(self) -> Self {
        match self {
            PanelState::Closed => PanelState::Open,
            PanelState::Open => PanelState::Closed,
        }
    }
}

/// The cart sidebar plus the dimming overlay behind it.
#[derive(Debug, Clone, Copy, Default)]
pub struct CartPanel {
    state: PanelState,
}

impl CartPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn toggle(&mut self) -> PanelState {
        self.state = self.state.toggled();
        self.state
    }

    pub fn close(&mut self) {
        self.state = PanelState::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_closed() {
        let panel = CartPanel::new();
        assert_eq!(panel.state(), PanelState::Closed);
    }

    #[test]
    fn test_toggle_twice_is_identity() {
        let mut panel = CartPanel::new();
        assert_eq!(panel.toggle(), PanelState::Open);
        assert_eq!(panel.toggle(), PanelState::Closed);
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut panel = CartPanel::new();
        panel.close();
        assert_eq!(panel.state(), PanelState::Closed);
        panel.toggle();
        panel.close();
        assert_eq!(panel.state(), PanelState::Closed);
    }
}
