//! Transaction queue with retry-preserving admission.
//!
//! Requests wait here until the timing engine admits them. Each cycle the
//! admission pass offers every queued request in order; admitted requests
//! leave the queue and rejected ones stay put. Survivors never change their
//! relative order, and nothing is ever dropped: a request the engine never
//! takes stays queued for the rest of the run.

use std::collections::VecDeque;
use std::mem;

use crate::common::Transaction;
use crate::memory::traits::{TimingEngine, try_submit};

/// Outcome of one admission pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AdmissionReport {
    /// Reads the engine accepted.
    pub admitted_reads: usize,
    /// Writes the engine accepted.
    pub admitted_writes: usize,
    /// Requests offered and left in the queue.
    pub rejected: usize,
}

impl AdmissionReport {
    /// Total requests accepted this pass.
    #[inline]
    pub const fn admitted(&self) -> usize {
        self.admitted_reads + self.admitted_writes
    }
}

/// FIFO of requests awaiting admission.
#[derive(Clone, Debug, Default)]
pub struct TransactionQueue {
    entries: VecDeque<Transaction>,
    reads: usize,
}

impl TransactionQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a request at the tail.
    pub fn push(&mut self, txn: Transaction) {
        if txn.is_read() {
            self.reads += 1;
        }
        self.entries.push_back(txn);
    }

    /// Returns the number of queued requests.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is queued.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if at least one read is still waiting for admission.
    #[inline]
    pub const fn has_read(&self) -> bool {
        self.reads > 0
    }

    /// Number of queued reads.
    #[inline]
    pub const fn read_count(&self) -> usize {
        self.reads
    }

    /// Oldest queued request.
    pub fn front(&self) -> Option<&Transaction> {
        self.entries.front()
    }

    /// Iterates from head to tail.
    pub fn iter(&self) -> impl Iterator<Item = &Transaction> + '_ {
        self.entries.iter()
    }

    /// Offers every queued request to `engine`, head first.
    ///
    /// The pass runs over a snapshot taken when it starts. Accepted requests
    /// are submitted and removed; the rest keep their relative order and stay
    /// ahead of anything enqueued after the snapshot.
    pub fn offer<E: TimingEngine + ?Sized>(&mut self, engine: &mut E) -> AdmissionReport {
        let snapshot = mem::take(&mut self.entries);
        let mut retained = VecDeque::with_capacity(snapshot.len());
        let mut report = AdmissionReport::default();

        for txn in snapshot {
            if try_submit(engine, txn.addr, txn.kind.is_write()) {
                if txn.is_read() {
                    report.admitted_reads += 1;
                } else {
                    report.admitted_writes += 1;
                }
            } else {
                report.rejected += 1;
                retained.push_back(txn);
            }
        }

        self.reads -= report.admitted_reads;
        retained.append(&mut self.entries);
        self.entries = retained;
        report
    }
}

impl Extend<Transaction> for TransactionQueue {
    fn extend<I: IntoIterator<Item = Transaction>>(&mut self, iter: I) {
        for txn in iter {
            self.push(txn);
        }
    }
}
