//! Vector add with host-side arithmetic.
//!
//! For each element `i`, reads `a[i]` and `b[i]` and writes `c[i]`. Each of the
//! three requests is submitted once the engine accepts it; when all three are
//! in, `c[i] = a[i] + b[i]` is computed on the host copy and `i` advances.
//! A rejected element is retried on later cycles, never skipped.

use tracing::{debug, info};

use crate::common::constants::VECTOR_ADD_ELEMENT_BYTES;
use crate::config::VectorAddConfig;
use crate::memory::traits::{TimingEngine, try_submit};
use crate::stats::SimStats;
use crate::workload::drain_completions;

/// Vector-add workload.
#[derive(Debug)]
pub struct VectorAddWorkload {
    input_a: Vec<u64>,
    input_b: Vec<u64>,
    output_c: Vec<u64>,
    bases: [u64; 3],
    inserted: [bool; 3],
    offset: usize,
    clk: u64,
}

impl VectorAddWorkload {
    /// Creates the workload with `a` filled with 1 and `b` with 2.
    pub fn new(config: &VectorAddConfig) -> Self {
        Self {
            input_a: vec![1; config.array_size],
            input_b: vec![2; config.array_size],
            output_c: vec![0; config.array_size],
            bases: [config.a_base, config.b_base, config.c_base],
            inserted: [false; 3],
            offset: 0,
            clk: 0,
        }
    }

    /// Runs one cycle.
    pub fn tick<E: TimingEngine + ?Sized>(&mut self, engine: &mut E, stats: &mut SimStats) {
        if self.offset < self.output_c.len() {
            stats.vector_add_cycles += 1;
            self.step(engine, stats);
        }
        drain_completions(engine, self.clk, stats);
        engine.advance_cycle();
        self.clk += 1;
    }

    fn step<E: TimingEngine + ?Sized>(&mut self, engine: &mut E, stats: &mut SimStats) {
        let element = self.offset as u64 * VECTOR_ADD_ELEMENT_BYTES;
        for (slot, is_write) in [(0, false), (1, false), (2, true)] {
            if self.inserted[slot] {
                continue;
            }
            if try_submit(engine, self.bases[slot].wrapping_add(element), is_write) {
                self.inserted[slot] = true;
                stats.record_submit(is_write);
            } else {
                stats.admission_rejections += 1;
            }
        }

        if !self.inserted.iter().all(|&done| done) {
            debug!(cycle = self.clk, offset = self.offset, "vector add not accepted");
            return;
        }
        let i = self.offset;
        self.output_c[i] = self.input_a[i] + self.input_b[i];
        self.inserted = [false; 3];
        self.offset += 1;
        if self.offset == self.output_c.len() {
            info!(cycle = self.clk, elements = self.offset, "vector add finished");
        }
    }

    /// Elements completed so far.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Host copy of `c`.
    pub fn output(&self) -> &[u64] {
        &self.output_c
    }

    /// Returns true once every element has been issued.
    pub fn is_done(&self) -> bool {
        self.offset >= self.output_c.len()
    }
}
