//! Staging buffers between the pipeline stages.
//!
//! The input buffer holds completed reads waiting for the compute stage; the
//! output buffer holds synthesized write-backs waiting for dispatch. Both are
//! strict FIFOs with no capacity limit.

use std::collections::VecDeque;

/// Unbounded FIFO with a running count of everything ever pushed.
#[derive(Clone, Debug)]
pub struct StagingBuffer<T> {
    entries: VecDeque<T>,
    pushed: u64,
}

impl<T> Default for StagingBuffer<T> {
    fn default() -> Self {
        Self {
            entries: VecDeque::new(),
            pushed: 0,
        }
    }
}

impl<T> StagingBuffer<T> {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `item` at the tail.
    pub fn push(&mut self, item: T) {
        self.pushed += 1;
        self.entries.push_back(item);
    }

    /// Removes and returns the head.
    pub fn pop(&mut self) -> Option<T> {
        self.entries.pop_front()
    }

    /// Returns the head without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.entries.front()
    }

    /// Number of buffered items.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is buffered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Items pushed since construction.
    #[inline]
    pub const fn total_pushed(&self) -> u64 {
        self.pushed
    }

    /// Iterates from head to tail.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.entries.iter()
    }
}
