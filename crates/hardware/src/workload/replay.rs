//! Flat trace replay.
//!
//! Each record carries the cycle at which it may first be issued. Records are
//! issued strictly in file order; a record that is rejected is retried every
//! cycle until the engine takes it.

use tracing::info;

use crate::common::{Transaction, TransactionKind};
use crate::memory::traits::{TimingEngine, try_submit};
use crate::stats::SimStats;
use crate::workload::drain_completions;

/// One line of a replay trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayRecord {
    /// Request to issue.
    pub txn: Transaction,
    /// Earliest cycle at which the request may be issued.
    pub cycle: u64,
}

impl ReplayRecord {
    /// Creates a record.
    pub const fn new(addr: u64, kind: TransactionKind, cycle: u64) -> Self {
        Self {
            txn: Transaction { addr, kind },
            cycle,
        }
    }
}

/// Trace replay workload.
#[derive(Debug)]
pub struct TraceReplayWorkload {
    records: Vec<ReplayRecord>,
    next: usize,
    clk: u64,
}

impl TraceReplayWorkload {
    /// Creates a replay over `records`.
    pub const fn new(records: Vec<ReplayRecord>) -> Self {
        Self {
            records,
            next: 0,
            clk: 0,
        }
    }

    /// Runs one cycle.
    pub fn tick<E: TimingEngine + ?Sized>(&mut self, engine: &mut E, stats: &mut SimStats) {
        engine.advance_cycle();
        if let Some(record) = self.records.get(self.next) {
            if record.cycle <= self.clk {
                let is_write = record.txn.kind.is_write();
                if try_submit(engine, record.txn.addr, is_write) {
                    stats.record_submit(is_write);
                    self.next += 1;
                    if self.next == self.records.len() {
                        info!(cycle = self.clk, records = self.next, "trace replay finished");
                    }
                } else {
                    stats.admission_rejections += 1;
                }
            }
        }
        drain_completions(engine, self.clk, stats);
        self.clk += 1;
    }

    /// Records already issued.
    pub const fn issued(&self) -> usize {
        self.next
    }

    /// Returns true once every record has been issued.
    pub fn is_done(&self) -> bool {
        self.next >= self.records.len()
    }
}
