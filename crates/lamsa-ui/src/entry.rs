//! # Hero Entrance
//!
//! On page ready the hero block fades up piece by piece while the hero
//! visual slides in from the side.
//!
//! ```text
//!   t=0 ms    all hidden, transitions set
//!   t=50 ms   released ──► CSS delays stagger the actual movement
//!
//!   hero-badge     ░░▓▓▓▓▓▓                    delay 100 ms
//!   hero-title       ░░▓▓▓▓▓▓                  delay 200 ms
//!   hero-subtitle      ░░▓▓▓▓▓▓                delay 300 ms
//!   hero-actions         ░░▓▓▓▓▓▓              delay 400 ms
//!   hero-stats             ░░▓▓▓▓▓▓            delay 500 ms
//!   hero-visual        ◄──▓▓▓▓▓▓▓▓             delay 400 ms, from the left
//! ```
//!
//! Only the hero pieces present on the page take part; the stagger index
//! counts present pieces, so a missing badge moves the title up to 100 ms.

use serde::Serialize;
use tracing::debug;

use crate::config::EntrySection;
use crate::layout::PageLayout;
use crate::motion::{Motion, Offset, Transition};
use crate::scheduler::Scheduler;

/// Timer callback releasing the hero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeroRelease;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeroPiece {
    pub class: &'static str,
    pub motion: Motion,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EntryAnimation {
    pieces: Vec<HeroPiece>,
    visual: Option<Motion>,
}

impl EntryAnimation {
    /// Hides the hero and schedules its release.
    pub fn start<T: From<HeroRelease>>(
        layout: &PageLayout,
        config: &EntrySection,
        scheduler: &mut Scheduler<T>,
    ) -> Self {
        let pieces: Vec<HeroPiece> = layout
            .hero_sequence()
            .enumerate()
            .map(|(i, class)| HeroPiece {
                class,
                motion: Motion::hidden(
                    Offset::Y(config.hero_offset_px),
                    Transition::new(
                        config.hero_duration_ms,
                        i as u64 * config.hero_stagger_ms + config.hero_base_delay_ms,
                    ),
                ),
            })
            .collect();

        let visual = layout.hero_visual.then(|| {
            Motion::hidden(
                Offset::X(config.visual_offset_px),
                Transition::new(config.visual_duration_ms, config.visual_delay_ms),
            )
        });

        if !pieces.is_empty() || visual.is_some() {
            scheduler.schedule(config.release_ms, HeroRelease.into());
        }
        debug!(pieces = pieces.len(), visual = visual.is_some(), "Hero entrance armed");

        EntryAnimation { pieces, visual }
    }

    pub fn pieces(&self) -> &[HeroPiece] {
        &self.pieces
    }

    pub fn visual(&self) -> Option<&Motion> {
        self.visual.as_ref()
    }

    pub fn release(&mut self) {
        for piece in &mut self.pieces {
            piece.motion.release();
        }
        if let Some(visual) = self.visual.as_mut() {
            visual.release();
        }
    }
}
