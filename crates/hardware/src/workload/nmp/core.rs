//! Near-memory-processing core.
//!
//! `NmpCore` owns the whole pipeline: the transaction queue, both staging
//! buffers, and the trace batcher. One call to `tick` is one simulated cycle
//! and runs the stages in a fixed order:
//! 1. **Harvest:** take at most one completion from the engine; reads are
//!    staged, writes bump the completed-write count.
//! 2. **Admission:** offer the transaction queue to the engine.
//! 3. **Compute:** paired or trace-drain, per the configured mode.
//! 4. **Dispatch:** paired mode only, one write per cycle.
//! 5. **Issue:** synthetic burst (paired) or next trace batch (trace drain).
//! 6. **Advance:** step the engine clock, then the local cycle and `tid`.

use tracing::debug;

use crate::common::{StagedResult, TraceEntry, Transaction, TransactionKind};
use crate::config::{NmpConfig, NmpMode};
use crate::memory::traits::TimingEngine;
use crate::workload::nmp::batcher::TraceBatcher;
use crate::workload::nmp::compute::{compute_paired, compute_trace_drain, dispatch};
use crate::workload::nmp::queue::{AdmissionReport, TransactionQueue};
use crate::workload::nmp::staging::StagingBuffer;

/// What happened during one `NmpCore::tick`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Cycle the report describes.
    pub cycle: u64,
    /// Completion harvested from the engine.
    pub harvested: Option<StagedResult>,
    /// Admission pass outcome.
    pub admission: AdmissionReport,
    /// Writes synthesized by the compute stage.
    pub computed: usize,
    /// Write promoted by the dispatcher.
    pub dispatched: Option<Transaction>,
    /// Reads newly enqueued by the issue stage.
    pub issued: u64,
    /// Destination of the trace batch issued this cycle.
    pub batch_dst: Option<u64>,
}

/// NMP accelerator model.
#[derive(Debug)]
pub struct NmpCore {
    layout: NmpConfig,
    cycle: u64,
    tid: u64,
    completed_writes: u64,
    queue: TransactionQueue,
    input: StagingBuffer<StagedResult>,
    output: StagingBuffer<Transaction>,
    batcher: TraceBatcher,
}

impl NmpCore {
    /// Creates a core that issues synthetic bursts (paired mode).
    pub fn paired(layout: NmpConfig) -> Self {
        Self::new(
            NmpConfig {
                mode: NmpMode::Paired,
                ..layout
            },
            Vec::new(),
        )
    }

    /// Creates a core fed by an index trace (trace-drain mode).
    pub fn trace_drain(layout: NmpConfig, trace: Vec<TraceEntry>) -> Self {
        Self::new(
            NmpConfig {
                mode: NmpMode::TraceDrain,
                ..layout
            },
            trace,
        )
    }

    /// Creates a core in `layout.mode`; `trace` is only consulted in trace-drain mode.
    pub fn new(layout: NmpConfig, trace: Vec<TraceEntry>) -> Self {
        Self {
            layout,
            cycle: 0,
            tid: 0,
            completed_writes: 0,
            queue: TransactionQueue::new(),
            input: StagingBuffer::new(),
            output: StagingBuffer::new(),
            batcher: TraceBatcher::new(trace),
        }
    }

    /// Runs one cycle of the pipeline against `engine`.
    pub fn tick<E: TimingEngine + ?Sized>(&mut self, engine: &mut E) -> CycleReport {
        let mut report = CycleReport {
            cycle: self.cycle,
            harvested: self.harvest(engine),
            admission: self.queue.offer(engine),
            ..CycleReport::default()
        };

        let write_addr = self.write_addr();
        match self.layout.mode {
            NmpMode::Paired => {
                report.computed =
                    usize::from(compute_paired(&mut self.input, &mut self.output, write_addr).is_some());
                report.dispatched = dispatch(&mut self.output, &mut self.queue);
                report.issued = self.issue_burst();
            }
            NmpMode::TraceDrain => {
                report.computed = compute_trace_drain(
                    &mut self.input,
                    &mut self.output,
                    &mut self.queue,
                    write_addr,
                );
                if let Some(batch) = self.batcher.feed(&mut self.queue) {
                    report.issued = batch.sources.len() as u64;
                    report.batch_dst = Some(batch.dst);
                }
            }
        }

        engine.advance_cycle();
        self.cycle += 1;
        self.tid += 1;
        report
    }

    /// Takes at most one completion from the engine and routes it.
    fn harvest<E: TimingEngine + ?Sized>(&mut self, engine: &mut E) -> Option<StagedResult> {
        let done = engine.poll_completed(self.cycle)?;
        match done.kind {
            TransactionKind::Read => self.input.push(done),
            TransactionKind::Write => self.completed_writes += 1,
        }
        debug!(cycle = self.cycle, addr = done.addr, kind = %done.kind, "harvested");
        Some(done)
    }

    /// Enqueues one synthetic burst when the queue is idle and the cadence is due.
    ///
    /// An `issue_interval` of zero never issues.
    fn issue_burst(&mut self) -> u64 {
        let due = self.cycle.checked_rem(self.layout.issue_interval) == Some(0);
        if !self.queue.is_empty() || !due {
            return 0;
        }
        let NmpConfig {
            input_base1,
            input_base2,
            node_dim,
            count,
            ..
        } = self.layout;
        for row in 0..count {
            let offset = row.wrapping_mul(node_dim).wrapping_add(self.tid);
            self.queue.push(Transaction::read(input_base1.wrapping_add(offset)));
            self.queue.push(Transaction::read(input_base2.wrapping_add(offset)));
        }
        debug!(cycle = self.cycle, tid = self.tid, rows = count, "synthetic burst issued");
        count.saturating_mul(2)
    }

    /// Address of the write-back produced this cycle.
    #[inline]
    const fn write_addr(&self) -> u64 {
        self.layout.output_base.wrapping_add(self.tid)
    }

    /// Configured compute policy.
    pub const fn mode(&self) -> NmpMode {
        self.layout.mode
    }

    /// Local cycle counter.
    pub const fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Current column index.
    pub const fn tid(&self) -> u64 {
        self.tid
    }

    /// Writes harvested as complete ("embedding-sum operations").
    pub const fn completed_writes(&self) -> u64 {
        self.completed_writes
    }

    /// Requests awaiting admission.
    pub const fn queue(&self) -> &TransactionQueue {
        &self.queue
    }

    /// Mutable access to the transaction queue, for injecting work.
    pub fn queue_mut(&mut self) -> &mut TransactionQueue {
        &mut self.queue
    }

    /// Completed reads awaiting compute.
    pub const fn input_buffer(&self) -> &StagingBuffer<StagedResult> {
        &self.input
    }

    /// Synthesized writes awaiting dispatch.
    pub const fn output_buffer(&self) -> &StagingBuffer<Transaction> {
        &self.output
    }

    /// Index-trace batcher.
    pub const fn batcher(&self) -> &TraceBatcher {
        &self.batcher
    }
}
