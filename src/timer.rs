//! Cooperative timer queue on a virtual clock.
//!
//! Models the host page's `setTimeout`: tasks are scheduled relative to
//! [`TimerQueue::now`] and come back out of [`TimerQueue::advance`] once the
//! clock passes their due time. Everything runs on the caller's thread; a
//! fired task is handed back to the owner to run to completion before the
//! next one.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug)]
pub struct TimerQueue<T> {
    now: u64,
    next_id: u64,
    /// Keyed by (due time, id) so ties fire in scheduling order.
    pending: BTreeMap<(u64, TimerId), T>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            now: 0,
            next_id: 0,
            pending: BTreeMap::new(),
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds elapsed on the virtual clock.
    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn schedule(&mut self, delay_ms: u64, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.insert((self.now.saturating_add(delay_ms), id), task);
        id
    }

    /// Returns false if the timer already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let key = self.pending.keys().find(|(_, tid)| *tid == id).copied();
        key.and_then(|k| self.pending.remove(&k)).is_some()
    }

    /// Pop the earliest task due at or before `deadline`, moving the clock to
    /// its due time.
    pub fn pop_due(&mut self, deadline: u64) -> Option<T> {
        let (&(due, _), _) = self.pending.first_key_value()?;
        if due > deadline {
            return None;
        }
        let ((due, _), task) = self.pending.pop_first()?;
        self.now = self.now.max(due);
        Some(task)
    }

    /// Move the clock forward by `ms`, returning every task that came due in
    /// firing order.
    ///
    /// Tasks scheduled by the caller while handling the returned tasks are
    /// not included; use [`pop_due`](Self::pop_due) to interleave.
    pub fn advance(&mut self, ms: u64) -> Vec<T> {
        let deadline = self.now.saturating_add(ms);
        let mut fired = Vec::new();
        while let Some(task) = self.pop_due(deadline) {
            fired.push(task);
        }
        self.now = deadline;
        fired
    }

    /// Set the clock to `deadline` without firing anything.
    pub(crate) fn set_now(&mut self, deadline: u64) {
        self.now = self.now.max(deadline);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fires_in_due_order() {
        let mut q = TimerQueue::new();
        q.schedule(30, "c");
        q.schedule(10, "a");
        q.schedule(20, "b");
        assert_eq!(q.advance(25), vec!["a", "b"]);
        assert_eq!(q.now(), 25);
        assert_eq!(q.advance(5), vec!["c"]);
        assert_eq!(q.pending(), 0);
    }

    #[test]
    fn ties_fire_in_scheduling_order() {
        let mut q = TimerQueue::new();
        q.schedule(5, 1);
        q.schedule(5, 2);
        q.schedule(5, 3);
        assert_eq!(q.advance(5), vec![1, 2, 3]);
    }

    #[test]
    fn nothing_fires_before_due() {
        let mut q = TimerQueue::new();
        q.schedule(1000, ());
        assert!(q.advance(999).is_empty());
        assert_eq!(q.advance(1).len(), 1);
    }

    #[test]
    fn cancel_removes_pending() {
        let mut q = TimerQueue::new();
        let a = q.schedule(10, "a");
        q.schedule(10, "b");
        assert!(q.cancel(a));
        assert!(!q.cancel(a));
        assert_eq!(q.advance(10), vec!["b"]);
    }

    #[test]
    fn schedule_is_relative_to_now() {
        let mut q = TimerQueue::new();
        q.advance(100);
        q.schedule(10, "x");
        assert!(q.advance(9).is_empty());
        assert_eq!(q.advance(1), vec!["x"]);
    }

    #[test]
    fn pop_due_moves_clock_to_task() {
        let mut q = TimerQueue::new();
        q.schedule(7, "x");
        assert_eq!(q.pop_due(50), Some("x"));
        assert_eq!(q.now(), 7);
        assert_eq!(q.pop_due(50), None);
    }

    #[test]
    fn far_future_delays_saturate() {
        let mut q = TimerQueue::new();
        q.advance(10);
        q.schedule(u64::MAX, "late");
        assert!(q.advance(u64::MAX - 11).is_empty());
        assert_eq!(q.advance(u64::MAX), vec!["late"]);
        assert_eq!(q.now(), u64::MAX);
    }
}
