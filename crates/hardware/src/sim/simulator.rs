//! Simulator: owns the timing engine and the workload side by side.
//!
//! Keeping both at the top level lets a workload borrow the engine mutably for
//! the length of a cycle without either one owning the other.

use tracing::info;

use crate::common::SimError;
use crate::config::Config;
use crate::memory::engine::build_engine;
use crate::memory::traits::TimingEngine;
use crate::stats::SimStats;
use crate::workload::Workload;

/// Top-level simulator: timing engine + workload + statistics.
pub struct Simulator {
    /// Memory timing model.
    pub engine: Box<dyn TimingEngine>,
    /// Workload driving the engine.
    pub workload: Workload,
    stats: SimStats,
}

impl std::fmt::Debug for Simulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulator")
            .field("engine_cycle", &self.engine.cycle())
            .field("workload", &self.workload.name())
            .field("cycles", &self.stats.cycles)
            .finish_non_exhaustive()
    }
}

impl Simulator {
    /// Builds the reference engine and the configured workload.
    ///
    /// # Errors
    ///
    /// Propagates validation and trace-loading failures.
    pub fn new(config: &Config) -> Result<Self, SimError> {
        config.validate()?;
        let engine = build_engine(&config.memory);
        let workload = Workload::from_config(config)?;
        Ok(Self::with_parts(engine, workload))
    }

    /// Assembles a simulator from an existing engine and workload.
    pub fn with_parts(engine: Box<dyn TimingEngine>, workload: Workload) -> Self {
        Self {
            engine,
            workload,
            stats: SimStats::default(),
        }
    }

    /// Advances the simulator by one clock cycle.
    pub fn tick(&mut self) {
        self.workload.tick(&mut *self.engine, &mut self.stats);
        self.stats.cycles += 1;
    }

    /// Runs `cycles` cycles and returns the accumulated statistics.
    pub fn run(&mut self, cycles: u64) -> &SimStats {
        info!(workload = self.workload.name(), cycles, "simulation started");
        for _ in 0..cycles {
            self.tick();
        }
        info!(
            cycles = self.stats.cycles,
            submitted = self.stats.total_submitted(),
            completed = self.stats.total_completed(),
            "simulation finished"
        );
        &self.stats
    }

    /// Statistics collected so far.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }
}
