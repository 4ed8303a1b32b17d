//! Workloads that drive the timing engine.
//!
//! Every workload is a data-plus-behavior bundle selected at construction and
//! exposes one capability, `tick`, which runs exactly one simulated cycle.
//! 1. **Random:** uniform-random addresses, one pending request.
//! 2. **Stream:** `c = a + b` array sweep.
//! 3. **Trace replay:** flat `<addr> <op> <cycle>` trace.
//! 4. **Vector add:** element-wise add with host-side arithmetic.
//! 5. **NMP:** the near-memory-processing pipeline.

use std::path::Path;

use tracing::info;

use crate::common::SimError;
use crate::config::{Config, NmpMode, WorkloadKind};
use crate::memory::traits::TimingEngine;
use crate::sim::loader;
use crate::stats::SimStats;

/// Near-memory-processing pipeline.
pub mod nmp;

/// Uniform-random generator.
pub mod random;

/// Flat trace replay.
pub mod replay;

/// Streaming array generator.
pub mod stream;

/// Vector add with host arithmetic.
pub mod vector_add;

pub use nmp::NmpCore;
pub use random::RandomWorkload;
pub use replay::{ReplayRecord, TraceReplayWorkload};
pub use stream::StreamWorkload;
pub use vector_add::VectorAddWorkload;

/// Workload selected for a run.
#[derive(Debug)]
pub enum Workload {
    /// Uniform-random generator.
    Random(RandomWorkload),
    /// Streaming array generator.
    Stream(StreamWorkload),
    /// Flat trace replay.
    TraceReplay(TraceReplayWorkload),
    /// Vector add.
    VectorAdd(VectorAddWorkload),
    /// NMP pipeline.
    Nmp(Box<NmpCore>),
}

impl Workload {
    /// Builds the workload selected by `config`, loading any trace it needs.
    ///
    /// A missing or malformed index trace for NMP trace-drain mode is not an
    /// error: it is logged and the core runs with an empty trace.
    ///
    /// # Errors
    ///
    /// Returns `SimError::InvalidConfig` if a trace workload has no trace path
    /// and `SimError::Trace` if a replay trace cannot be loaded.
    pub fn from_config(config: &Config) -> Result<Self, SimError> {
        let workload = &config.workload;
        let seed = config.general.seed;
        let built = match workload.kind {
            WorkloadKind::Random => Self::Random(RandomWorkload::new(seed)),
            WorkloadKind::Stream => Self::Stream(StreamWorkload::new(&workload.stream, seed)),
            WorkloadKind::VectorAdd => {
                Self::VectorAdd(VectorAddWorkload::new(&workload.vector_add))
            }
            WorkloadKind::TraceReplay => {
                let path = required_trace(workload.trace_path.as_deref(), workload.kind)?;
                Self::TraceReplay(TraceReplayWorkload::new(loader::load_replay_trace(path)?))
            }
            WorkloadKind::Nmp => match workload.nmp.mode {
                NmpMode::Paired => Self::Nmp(Box::new(NmpCore::paired(workload.nmp))),
                NmpMode::TraceDrain => {
                    let path = required_trace(workload.trace_path.as_deref(), workload.kind)?;
                    let trace = loader::load_pair_trace_or_empty(path);
                    Self::Nmp(Box::new(NmpCore::trace_drain(workload.nmp, trace)))
                }
            },
        };
        info!(workload = built.name(), "workload ready");
        Ok(built)
    }

    /// Runs one simulated cycle against `engine`.
    pub fn tick(&mut self, engine: &mut dyn TimingEngine, stats: &mut SimStats) {
        match self {
            Self::Random(w) => w.tick(engine, stats),
            Self::Stream(w) => w.tick(engine, stats),
            Self::TraceReplay(w) => w.tick(engine, stats),
            Self::VectorAdd(w) => w.tick(engine, stats),
            Self::Nmp(core) => {
                let report = core.tick(engine);
                stats.record_nmp(&report, core.queue().len());
            }
        }
    }

    /// Short name for logs and reports.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Random(_) => "random",
            Self::Stream(_) => "stream",
            Self::TraceReplay(_) => "trace-replay",
            Self::VectorAdd(_) => "vector-add",
            Self::Nmp(core) => match core.mode() {
                NmpMode::Paired => "nmp-paired",
                NmpMode::TraceDrain => "nmp-trace-drain",
            },
        }
    }

    /// Returns the NMP core, if this is the NMP workload.
    pub fn as_nmp(&self) -> Option<&NmpCore> {
        match self {
            Self::Nmp(core) => Some(&**core),
            _ => None,
        }
    }
}

fn required_trace(path: Option<&Path>, kind: WorkloadKind) -> Result<&Path, SimError> {
    path.ok_or_else(|| SimError::InvalidConfig(format!("workload {kind:?} requires a trace path")))
}

/// Harvests every completion the engine has ready for `cycle`.
///
/// The simple generators do nothing with results beyond counting them, but
/// harvesting frees the engine's in-flight window.
pub(crate) fn drain_completions<E: TimingEngine + ?Sized>(
    engine: &mut E,
    cycle: u64,
    stats: &mut SimStats,
) {
    while let Some(done) = engine.poll_completed(cycle) {
        stats.record_completion(done.kind.is_write());
    }
}
