//! Uniform-random traffic generator.
//!
//! Keeps a single pending request. A fresh address and kind are drawn only
//! after the previous request has been accepted; roughly one request in three
//! is a write.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::common::constants::RANDOM_WRITE_RATIO;
use crate::memory::traits::{TimingEngine, try_submit};
use crate::stats::SimStats;
use crate::workload::drain_completions;

/// Random-address workload.
#[derive(Debug)]
pub struct RandomWorkload {
    rng: StdRng,
    pending_addr: u64,
    pending_write: bool,
    draw_next: bool,
    clk: u64,
}

impl RandomWorkload {
    /// Creates a generator seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            pending_addr: 0,
            pending_write: false,
            draw_next: true,
            clk: 0,
        }
    }

    /// Runs one cycle.
    pub fn tick<E: TimingEngine + ?Sized>(&mut self, engine: &mut E, stats: &mut SimStats) {
        engine.advance_cycle();
        if self.draw_next {
            self.pending_addr = self.rng.next_u64();
            self.pending_write = self.rng.next_u64() % RANDOM_WRITE_RATIO == 0;
        }
        self.draw_next = try_submit(engine, self.pending_addr, self.pending_write);
        if self.draw_next {
            stats.record_submit(self.pending_write);
        } else {
            stats.admission_rejections += 1;
        }
        drain_completions(engine, self.clk, stats);
        self.clk += 1;
    }

    /// Request currently waiting for admission, if the last one was rejected.
    pub const fn pending(&self) -> Option<(u64, bool)> {
        if self.draw_next {
            None
        } else {
            Some((self.pending_addr, self.pending_write))
        }
    }
}
