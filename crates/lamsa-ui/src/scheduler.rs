//! # Scheduler
//!
//! A virtual clock standing in for the page's timer queue.
//!
//! ## Timer Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  schedule(delay, task) ──► deadline = now + delay ──► TimerId          │
//! │                                                                         │
//! │  cancel(TimerId) ────────► task never fires                            │
//! │                                                                         │
//! │  pop_due(until) ─────────► earliest task with deadline ≤ until         │
//! │                            (ties fire in scheduling order)             │
//! │                            clock moves to that deadline                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tasks are plain data. The owner pops them one at a time and runs them,
//! which lets a running task schedule follow-ups that still fire inside the
//! same `advance` window.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Handle for a scheduled task; pass it to [`Scheduler::cancel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TimerId(u64);

/// Deterministic single-threaded timer queue.
#[derive(Debug)]
pub struct Scheduler<T> {
    now_ms: u64,
    next_id: u64,
    /// Keyed by (deadline, id) so equal deadlines pop FIFO.
    queue: BTreeMap<(u64, u64), T>,
    deadlines: HashMap<u64, u64>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Scheduler {
            now_ms: 0,
            next_id: 0,
            queue: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }

    /// Milliseconds since page load.
    pub fn now(&self) -> u64 {
        self.now_ms
    }

    /// Queues `task` to fire `delay_ms` from now.
    pub fn schedule(&mut self, delay_ms: u64, task: T) -> TimerId {
        let id = self.next_id;
        self.next_id += 1;

        let deadline = self.now_ms.saturating_add(delay_ms);
        self.queue.insert((deadline, id), task);
        self.deadlines.insert(id, deadline);
        TimerId(id)
    }

    /// Drops a pending task. Returns false if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, timer: TimerId) -> bool {
        match self.deadlines.remove(&timer.0) {
            Some(deadline) => self.queue.remove(&(deadline, timer.0)).is_some(),
            None => false,
        }
    }

    /// Number of tasks waiting to fire.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Pops the earliest task due at or before `until_ms`, moving the clock
    /// to its deadline.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<T> {
        let (&(deadline, id), _) = self.queue.first_key_value()?;
        if deadline > until_ms {
            return None;
        }

        let task = self.queue.remove(&(deadline, id))?;
        self.deadlines.remove(&id);
        self.now_ms = self.now_ms.max(deadline);
        Some(task)
    }

    /// Moves the clock forward to `until_ms` once everything due has run.
    pub fn settle(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(s: &mut Scheduler<&'static str>, until: u64) -> Vec<&'static str> {
        let mut fired = Vec::new();
        while let Some(task) = s.pop_due(until) {
            fired.push(task);
        }
        s.settle(until);
        fired
    }

    #[test]
    fn test_fires_in_deadline_order() {
        let mut s = Scheduler::new();
        s.schedule(300, "late");
        s.schedule(100, "early");
        assert_eq!(drain(&mut s, 1000), ["early", "late"]);
        assert_eq!(s.now(), 1000);
    }

    #[test]
    fn test_equal_deadlines_are_fifo() {
        let mut s = Scheduler::new();
        s.schedule(50, "a");
        s.schedule(50, "b");
        s.schedule(50, "c");
        assert_eq!(drain(&mut s, 50), ["a", "b", "c"]);
    }

    #[test]
    fn test_not_due_stays_queued() {
        let mut s = Scheduler::new();
        s.schedule(3000, "toast");
        assert!(drain(&mut s, 2999).is_empty());
        assert_eq!(s.pending(), 1);
        assert_eq!(drain(&mut s, 3000), ["toast"]);
    }

    #[test]
    fn test_delay_is_relative_to_now() {
        let mut s = Scheduler::new();
        drain(&mut s, 500);
        s.schedule(100, "x");
        assert!(drain(&mut s, 599).is_empty());
        assert_eq!(drain(&mut s, 600), ["x"]);
    }

    #[test]
    fn test_cancel() {
        let mut s = Scheduler::new();
        let keep = s.schedule(10, "keep");
        let gone = s.schedule(10, "gone");

        assert!(s.cancel(gone));
        assert!(!s.cancel(gone));
        assert_eq!(s.pending(), 1);
        assert_eq!(drain(&mut s, 10), ["keep"]);
        assert!(!s.cancel(keep));
    }

    #[test]
    fn test_clock_tracks_popped_deadline() {
        let mut s = Scheduler::new();
        s.schedule(200, "a");
        assert_eq!(s.pop_due(1000), Some("a"));
        assert_eq!(s.now(), 200);
    }
}
