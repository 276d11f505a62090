//! # Flash Notices
//!
//! Server-rendered one-time messages ("saved", "logged in"). They sit for a
//! fixed time after load, fade upward, and are removed once the fade ends.
//! There is no way to keep one on screen.

use serde::Serialize;
use tracing::debug;

use crate::config::FlashSection;
use crate::motion::{Motion, Offset, Transition};
use crate::scheduler::Scheduler;

/// Timer callbacks for the flash notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashTask {
    Fade,
    Remove,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlashNotice {
    pub key: String,
    pub motion: Motion,
}

#[derive(Debug)]
pub struct FlashBoard {
    config: FlashSection,
    notices: Vec<FlashNotice>,
}

impl FlashBoard {
    /// Takes the notices present at load and schedules their dismissal.
    ///
    /// The fade is scheduled even when the page has no notices, the same
    /// way the page script arms its timer unconditionally.
    pub fn arm<T: From<FlashTask>>(
        config: FlashSection,
        keys: &[String],
        scheduler: &mut Scheduler<T>,
    ) -> Self {
        let notices = keys
            .iter()
            .map(|key| FlashNotice {
                key: key.clone(),
                motion: Motion {
                    visible: true,
                    offset: Offset::None,
                    transition: None,
                },
            })
            .collect();

        scheduler.schedule(config.delay_ms, FlashTask::Fade.into());
        FlashBoard { config, notices }
    }

    pub fn notices(&self) -> &[FlashNotice] {
        &self.notices
    }

    pub fn on_task<T: From<FlashTask>>(&mut self, task: FlashTask, scheduler: &mut Scheduler<T>) {
        match task {
            FlashTask::Fade => {
                if self.notices.is_empty() {
                    return;
                }
                let fade = Transition::new(self.config.fade_ms, 0);
                for notice in &mut self.notices {
                    notice.motion.dismiss(Offset::Y(self.config.offset_px), fade);
                }
                scheduler.schedule(self.config.fade_ms, FlashTask::Remove.into());
            }
            FlashTask::Remove => {
                debug!(count = self.notices.len(), "Flash notices removed");
                self.notices.clear();
            }
        }
    }
}
