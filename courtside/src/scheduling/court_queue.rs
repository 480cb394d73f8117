//! Earliest-free-first court queue.

use crate::entities::Court;
use chrono::NaiveDateTime;
use std::{cmp::Reverse, collections::BinaryHeap};

/// Min-heap of `(free_at, court index)`.
///
/// A court is popped to take a match and pushed straight back with its new
/// free time, so no entry is ever removed from the middle of the heap. Equal
/// free times go to the court listed first.
#[derive(Debug)]
pub(crate) struct CourtQueue {
    courts: Vec<Court>,
    heap: BinaryHeap<Reverse<(NaiveDateTime, usize)>>,
}

impl CourtQueue {
    /// Seed every active court as free at `start`
    pub fn new(courts: &[Court], start: NaiveDateTime) -> Self {
        let courts: Vec<Court> = courts.iter().filter(|c| c.is_active).cloned().collect();
        let heap = (0..courts.len()).map(|idx| Reverse((start, idx))).collect();
        Self { courts, heap }
    }

    pub fn pop(&mut self) -> Option<(NaiveDateTime, usize)> {
        self.heap.pop().map(|Reverse(entry)| entry)
    }

    pub fn push(&mut self, court: usize, free_at: NaiveDateTime) {
        self.heap.push(Reverse((free_at, court)));
    }

    pub fn court(&self, idx: usize) -> &Court {
        &self.courts[idx]
    }

    pub fn courts(&self) -> &[Court] {
        &self.courts
    }
}
