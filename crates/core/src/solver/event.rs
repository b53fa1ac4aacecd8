//! Queue entries for the wavefront scheduler
//!
//! `BinaryHeap` is a max-heap, so `PendingEvent` orders in reverse: the earliest
//! time compares greatest. Equal times fall back to row, then column, ascending,
//! which fixes the settlement order of simultaneous arrivals.

use std::cmp::Ordering;

/// Candidate arrival `(time, row, col)` waiting in the queue
///
/// Several entries for one cell may coexist; all but the earliest are stale and
/// are skipped when popped after the cell has settled.
#[derive(Debug, Clone, Copy)]
pub struct PendingEvent {
    /// Candidate arrival time in minutes
    pub time: f64,
    /// Cell row
    pub row: usize,
    /// Cell column
    pub col: usize,
}

impl PendingEvent {
    /// New event
    #[inline]
    pub fn new(time: f64, row: usize, col: usize) -> Self {
        Self { time, row, col }
    }

    /// Natural (ascending) order: time, then row, then column
    #[inline]
    fn key_cmp(&self, other: &Self) -> Ordering {
        self.time
            .total_cmp(&other.time)
            .then(self.row.cmp(&other.row))
            .then(self.col.cmp(&other.col))
    }
}

impl PartialEq for PendingEvent {
    fn eq(&self, other: &Self) -> bool {
        self.key_cmp(other) == Ordering::Equal
    }
}

impl Eq for PendingEvent {}

impl PartialOrd for PendingEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PendingEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        // reversed for min-heap behaviour
        other.key_cmp(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    #[test]
    fn test_heap_pops_earliest_then_row_major() {
        let mut heap = BinaryHeap::new();
        heap.push(PendingEvent::new(60.0, 0, 0));
        heap.push(PendingEvent::new(10.0, 3, 1));
        heap.push(PendingEvent::new(10.0, 1, 4));
        heap.push(PendingEvent::new(10.0, 1, 2));
        heap.push(PendingEvent::new(0.5, 9, 9));

        let order: Vec<_> = std::iter::from_fn(|| heap.pop())
            .map(|e| (e.time, e.row, e.col))
            .collect();
        assert_eq!(
            order,
            vec![
                (0.5, 9, 9),
                (10.0, 1, 2),
                (10.0, 1, 4),
                (10.0, 3, 1),
                (60.0, 0, 0)
            ]
        );
    }

    #[test]
    fn test_equality_uses_full_key() {
        assert_eq!(PendingEvent::new(1.0, 2, 3), PendingEvent::new(1.0, 2, 3));
        assert_ne!(PendingEvent::new(1.0, 2, 3), PendingEvent::new(1.0, 2, 4));
    }
}
