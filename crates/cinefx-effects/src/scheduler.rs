//! Virtual-clock task scheduler.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

#[derive(Debug)]
struct Entry<T> {
    due_ms: u64,
    seq: u64,
    task: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.due_ms == other.due_ms && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due_ms, self.seq).cmp(&(other.due_ms, other.seq))
    }
}

/// One-shot tasks ordered by due time on a millisecond clock.
///
/// Tasks due at the same instant come out in the order they were scheduled.
/// The clock only moves when the owner pops or advances it.
#[derive(Debug)]
pub struct Scheduler<T> {
    now_ms: u64,
    queue: BinaryHeap<Reverse<Entry<T>>>,
    next_seq: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            queue: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Schedule `task` to run `delay_ms` after the current time.
    pub fn schedule_in(&mut self, delay_ms: u64, task: T) {
        let due_ms = self.now_ms.saturating_add(delay_ms);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse(Entry { due_ms, seq, task }));
    }

    /// Pop the earliest task due at or before `until_ms`, moving the clock to
    /// its due time.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<T> {
        let due = self.queue.peek().map(|Reverse(entry)| entry.due_ms)?;
        if due > until_ms {
            return None;
        }
        let Reverse(entry) = self.queue.pop()?;
        self.now_ms = self.now_ms.max(entry.due_ms);
        Some(entry.task)
    }

    /// Move the clock forward without running anything.
    pub fn advance_clock_to(&mut self, target_ms: u64) {
        self.now_ms = self.now_ms.max(target_ms);
    }

    /// Due time of the next pending task.
    pub fn next_due(&self) -> Option<u64> {
        self.queue.peek().map(|Reverse(entry)| entry.due_ms)
    }

    /// Drop every pending task.
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pops_in_due_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_in(300, "c");
        scheduler.schedule_in(100, "a");
        scheduler.schedule_in(200, "b");

        assert_eq!(scheduler.pop_due(1000), Some("a"));
        assert_eq!(scheduler.now_ms(), 100);
        assert_eq!(scheduler.pop_due(1000), Some("b"));
        assert_eq!(scheduler.pop_due(1000), Some("c"));
        assert_eq!(scheduler.pop_due(1000), None);
        assert_eq!(scheduler.now_ms(), 300);
    }

    #[test]
    fn test_same_instant_keeps_insertion_order() {
        let mut scheduler = Scheduler::new();
        for label in ["first", "second", "third"] {
            scheduler.schedule_in(50, label);
        }
        let order: Vec<_> = std::iter::from_fn(|| scheduler.pop_due(50)).collect();
        assert_eq!(order, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_not_due_yet() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_in(100, ());
        assert_eq!(scheduler.pop_due(99), None);
        assert_eq!(scheduler.now_ms(), 0);
        assert_eq!(scheduler.next_due(), Some(100));
        assert_eq!(scheduler.pop_due(100), Some(()));
    }

    #[test]
    fn test_delay_is_relative_to_clock() {
        let mut scheduler = Scheduler::new();
        scheduler.advance_clock_to(1000);
        scheduler.schedule_in(500, 1);
        assert_eq!(scheduler.next_due(), Some(1500));
        // The clock never runs backwards.
        scheduler.advance_clock_to(10);
        assert_eq!(scheduler.now_ms(), 1000);
    }

    #[test]
    fn test_clear_drops_pending() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_in(10, 1);
        scheduler.schedule_in(20, 2);
        assert_eq!(scheduler.len(), 2);
        scheduler.clear();
        assert!(scheduler.is_empty());
        assert_eq!(scheduler.pop_due(u64::MAX), None);
    }
}
