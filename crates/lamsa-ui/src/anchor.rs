//! # In-page Anchors
//!
//! Clicks on `#fragment` links scroll smoothly to their target instead of
//! jumping. A link whose target is not on the page keeps the browser's
//! default behaviour.

use serde::Serialize;
use std::collections::BTreeSet;

/// Vertical alignment of the target after scrolling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollBlock {
    Start,
}

/// A request to scroll `target` into view smoothly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrollIntent {
    pub target: String,
    pub block: ScrollBlock,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnchorOutcome {
    /// Suppress the default jump and scroll smoothly.
    Smooth(ScrollIntent),
    /// Let the click through untouched.
    Default,
}

/// Decides what a click on a link with `href` does.
pub fn resolve(href: &str, targets: &BTreeSet<String>) -> AnchorOutcome {
    match href.strip_prefix('#') {
        Some(id) if !id.is_empty() && targets.contains(id) => AnchorOutcome::Smooth(ScrollIntent {
            target: id.to_string(),
            block: ScrollBlock::Start,
        }),
        _ => AnchorOutcome::Default,
    }
}
