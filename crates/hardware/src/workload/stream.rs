//! Streaming `c[i] = a[i] + b[i]` traffic generator.
//!
//! Three array bases are drawn at random. Each step reads `a + off` and
//! `b + off` and writes `c + off`; each of the three is inserted once, and the
//! offset advances by the stride when all three are in. When the offset runs
//! past the array size the bases are re-drawn.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::config::StreamConfig;
use crate::memory::traits::{TimingEngine, try_submit};
use crate::stats::SimStats;
use crate::workload::drain_completions;

/// Stream workload.
#[derive(Debug)]
pub struct StreamWorkload {
    rng: StdRng,
    bases: [u64; 3],
    inserted: [bool; 3],
    offset: u64,
    stride: u64,
    array_size: u64,
    clk: u64,
}

impl StreamWorkload {
    /// Creates a generator seeded with `seed`.
    pub fn new(config: &StreamConfig, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            bases: [0; 3],
            inserted: [false; 3],
            offset: 0,
            stride: config.stride,
            array_size: config.array_size,
            clk: 0,
        }
    }

    /// Runs one cycle.
    pub fn tick<E: TimingEngine + ?Sized>(&mut self, engine: &mut E, stats: &mut SimStats) {
        engine.advance_cycle();
        if self.offset >= self.array_size || self.clk == 0 {
            for base in &mut self.bases {
                *base = self.rng.next_u64();
            }
            self.offset = 0;
        }

        // a and b are read, c is written.
        for (slot, is_write) in [(0, false), (1, false), (2, true)] {
            if self.inserted[slot] {
                continue;
            }
            let addr = self.bases[slot].wrapping_add(self.offset);
            if try_submit(engine, addr, is_write) {
                self.inserted[slot] = true;
                stats.record_submit(is_write);
            } else {
                stats.admission_rejections += 1;
            }
        }

        if self.inserted.iter().all(|&done| done) {
            self.offset += self.stride;
            self.inserted = [false; 3];
        }
        drain_completions(engine, self.clk, stats);
        self.clk += 1;
    }

    /// Current offset into the arrays.
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    /// Current `[a, b, c]` bases.
    pub const fn bases(&self) -> [u64; 3] {
        self.bases
    }
}
