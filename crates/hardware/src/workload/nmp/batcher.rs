//! Destination-grouped batching over an index trace.
//!
//! A batch is the run of trace entries at the front of the remaining trace
//! that share the first entry's destination. Once a batch is issued, every
//! remaining entry with that destination is retired, including ones that sit
//! later in the trace behind a different destination.

use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::common::{TraceEntry, Transaction};
use crate::workload::nmp::queue::TransactionQueue;

/// Source reads issued together for one destination.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Batch {
    /// Destination shared by the batch.
    pub dst: u64,
    /// Source addresses, in trace order.
    pub sources: Vec<u64>,
    /// Entries retired from the trace, including the non-contiguous ones.
    pub retired: usize,
}

/// Trace-driven read batcher.
#[derive(Clone, Debug, Default)]
pub struct TraceBatcher {
    entries: VecDeque<TraceEntry>,
    batches: u64,
}

impl TraceBatcher {
    /// Creates a batcher over `entries`.
    pub fn new(entries: impl IntoIterator<Item = TraceEntry>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
            batches: 0,
        }
    }

    /// Trace entries not yet retired.
    pub fn remaining(&self) -> impl Iterator<Item = &TraceEntry> + '_ {
        self.entries.iter()
    }

    /// Number of trace entries not yet retired.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true once the trace is exhausted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Batches issued so far.
    pub const fn batches_issued(&self) -> u64 {
        self.batches
    }

    /// Cuts the next batch from the trace, or `None` if the trace is empty.
    pub fn next_batch(&mut self) -> Option<Batch> {
        let Some(first) = self.entries.front() else {
            trace!("trace batcher: no data");
            return None;
        };
        let dst = first.dst;
        let sources: Vec<u64> = self
            .entries
            .iter()
            .take_while(|entry| entry.dst == dst)
            .map(|entry| entry.src)
            .collect();

        let before = self.entries.len();
        self.entries.retain(|entry| entry.dst != dst);
        let retired = before - self.entries.len();

        self.batches += 1;
        debug!(dst, reads = sources.len(), retired, "trace batch cut");
        Some(Batch {
            dst,
            sources,
            retired,
        })
    }

    /// Queues the next batch as reads, unless a read is still waiting in `queue`.
    pub fn feed(&mut self, queue: &mut TransactionQueue) -> Option<Batch> {
        if queue.has_read() {
            return None;
        }
        let batch = self.next_batch()?;
        queue.extend(batch.sources.iter().copied().map(Transaction::read));
        Some(batch)
    }
}
