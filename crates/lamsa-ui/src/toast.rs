//! # Toast Notifications
//!
//! One transient message at a time, sliding up from the bottom of the page.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  show() ──► Entering ──(1 frame)──► Visible ──(dwell)──► Leaving       │
//! │    │        (below, transparent)   (in place)          (sliding out)   │
//! │    │                                                        │          │
//! │    │                                                   (exit)│          │
//! │    │                                                        ▼          │
//! │    │                                                     removed       │
//! │    │                                                                    │
//! │    └── a second show() removes the current toast at once and cancels  │
//! │        every timer it still had queued                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::debug;

use crate::config::ToastSection;
use crate::node::{Element, Node};
use crate::scheduler::{Scheduler, TimerId};

/// Accent of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    #[default]
    Info,
    Success,
}

impl ToastKind {
    fn accent(&self) -> &'static str {
        match self {
            ToastKind::Info => "#e67e22",
            ToastKind::Success => "#27ae60",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastPhase {
    Entering,
    Visible,
    Leaving,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ToastId(u64);

/// Timer callbacks the host expects back from the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastTask {
    Enter(ToastId),
    Leave(ToastId),
    Remove(ToastId),
}

/// The toast currently on the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub kind: ToastKind,
    pub phase: ToastPhase,
}

/// Owns the single toast slot and every timer attached to it.
#[derive(Debug)]
pub struct ToastHost {
    timing: ToastSection,
    current: Option<Toast>,
    timers: Vec<TimerId>,
    next_id: u64,
}

impl ToastHost {
    pub fn new(timing: ToastSection) -> Self {
        ToastHost {
            timing,
            current: None,
            timers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    /// Shows `message`, replacing whatever toast is up.
    pub fn show<T: From<ToastTask>>(
        &mut self,
        message: impl Into<String>,
        kind: ToastKind,
        scheduler: &mut Scheduler<T>,
    ) -> ToastId {
        self.dismiss(scheduler);

        let id = ToastId(self.next_id);
        self.next_id += 1;

        let message = message.into();
        debug!(?kind, %message, "Showing toast");
        self.current = Some(Toast {
            id,
            message,
            kind,
            phase: ToastPhase::Entering,
        });

        self.timers.push(scheduler.schedule(
            self.timing.frame_ms,
            ToastTask::Enter(id).into(),
        ));
        self.timers.push(scheduler.schedule(
            self.timing.dwell_ms,
            ToastTask::Leave(id).into(),
        ));
        id
    }

    /// Removes the current toast immediately, cancelling its timers.
    pub fn dismiss<T>(&mut self, scheduler: &mut Scheduler<T>) {
        for timer in self.timers.drain(..) {
            scheduler.cancel(timer);
        }
        if let Some(old) = self.current.take() {
            debug!(id = ?old.id, "Toast removed early");
        }
    }

    /// Advances the toast whose timer fired. Tasks for a toast that is no
    /// longer current are ignored.
    pub fn on_task<T: From<ToastTask>>(&mut self, task: ToastTask, scheduler: &mut Scheduler<T>) {
        let Some(toast) = self.current.as_mut() else {
            return;
        };

        match task {
            ToastTask::Enter(id) if id == toast.id => toast.phase = ToastPhase::Visible,
            ToastTask::Leave(id) if id == toast.id => {
                toast.phase = ToastPhase::Leaving;
                self.timers.push(scheduler.schedule(
                    self.timing.exit_ms,
                    ToastTask::Remove(id).into(),
                ));
            }
            ToastTask::Remove(id) if id == toast.id => {
                self.current = None;
                // Everything this toast scheduled has fired by now
                self.timers.clear();
            }
            _ => {}
        }
    }

    /// The toast element, if one is up.
    pub fn render(&self) -> Option<Node> {
        let toast = self.current.as_ref()?;
        let shown = toast.phase == ToastPhase::Visible;

        let el = Element::new("div")
            .class("lamsa-toast")
            .class(match toast.kind {
                ToastKind::Info => "toast-info",
                ToastKind::Success => "toast-success",
            })
            .style(
                "transform",
                if shown {
                    "translateX(-50%) translateY(0)"
                } else {
                    "translateX(-50%) translateY(100px)"
                },
            )
            .style("opacity", if shown { "1" } else { "0" })
            .style(
                "transition",
                "transform 0.4s cubic-bezier(0.34, 1.56, 0.64, 1), opacity 0.3s ease",
            )
            .style("border-right", format!("4px solid {}", toast.kind.accent()))
            .text(toast.message.clone());

        Some(el.into())
    }
}
