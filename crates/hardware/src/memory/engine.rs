//! Reference latency-based timing engine.
//!
//! `LatencyEngine` stands in for a full DRAM timing simulator. It keeps a
//! bounded window of in-flight transactions, asks a `LatencyModel` for each
//! access latency, and serializes completions on the data bus so that results
//! come back in submission order.

use std::collections::VecDeque;

use tracing::debug;

use crate::common::{StagedResult, TransactionKind};
use crate::config::MemoryConfig;
use crate::memory::latency::LatencyModel;
use crate::memory::traits::TimingEngine;

#[derive(Debug, Clone, Copy)]
struct InFlight {
    addr: u64,
    kind: TransactionKind,
    ready_at: u64,
}

/// Bounded-window timing engine driven by a latency model.
#[derive(Debug)]
pub struct LatencyEngine {
    model: LatencyModel,
    in_flight: VecDeque<InFlight>,
    depth: usize,
    burst_cycles: u64,
    last_ready: u64,
    clk: u64,
    reads_accepted: u64,
    writes_accepted: u64,
}

impl LatencyEngine {
    /// Creates an engine with the given latency model.
    ///
    /// # Arguments
    ///
    /// * `model` - Latency model consulted on every submission.
    /// * `depth` - Maximum number of in-flight transactions.
    /// * `burst_cycles` - Minimum spacing between two completions.
    pub fn new(model: LatencyModel, depth: usize, burst_cycles: u64) -> Self {
        Self {
            model,
            in_flight: VecDeque::with_capacity(depth),
            depth,
            burst_cycles,
            last_ready: 0,
            clk: 0,
            reads_accepted: 0,
            writes_accepted: 0,
        }
    }

    /// Number of transactions submitted but not yet harvested.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Reads accepted since construction.
    pub const fn reads_accepted(&self) -> u64 {
        self.reads_accepted
    }

    /// Writes accepted since construction.
    pub const fn writes_accepted(&self) -> u64 {
        self.writes_accepted
    }
}

impl TimingEngine for LatencyEngine {
    fn advance_cycle(&mut self) {
        self.clk += 1;
    }

    fn can_accept(&self, _addr: u64, _is_write: bool) -> bool {
        self.in_flight.len() < self.depth
    }

    fn submit(&mut self, addr: u64, is_write: bool) {
        let kind = TransactionKind::from_is_write(is_write);
        let latency = self.model.latency(addr, kind);
        let earliest = self.clk + latency;
        let ready_at = if self.in_flight.is_empty() {
            earliest
        } else {
            earliest.max(self.last_ready + self.burst_cycles)
        };
        self.last_ready = ready_at;
        match kind {
            TransactionKind::Read => self.reads_accepted += 1,
            TransactionKind::Write => self.writes_accepted += 1,
        }
        debug!(addr, %kind, ready_at, "engine accepted transaction");
        self.in_flight.push_back(InFlight {
            addr,
            kind,
            ready_at,
        });
    }

    fn poll_completed(&mut self, cycle: u64) -> Option<StagedResult> {
        if self.in_flight.front()?.ready_at > cycle {
            return None;
        }
        self.in_flight
            .pop_front()
            .map(|done| StagedResult::new(done.addr, done.kind))
    }

    fn cycle(&self) -> u64 {
        self.clk
    }
}

/// Builds the reference engine described by `config`.
pub fn build_engine(config: &MemoryConfig) -> Box<dyn TimingEngine> {
    Box::new(LatencyEngine::new(
        LatencyModel::from_config(config),
        config.queue_depth,
        config.burst_cycles,
    ))
}
