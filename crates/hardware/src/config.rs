//! Configuration system for the workload driver.
//!
//! This module defines all configuration structures and enums used to parameterize
//! a run. It provides:
//! 1. **Defaults:** Baseline constants (engine timing, NMP address layout, run length).
//! 2. **Structures:** Hierarchical config for general, memory, and workload settings.
//! 3. **Enums:** Memory controller, workload kind, and NMP compute mode.
//!
//! Configuration is supplied as JSON (`Config::from_json`) or built from `Config::default()`.

use std::path::PathBuf;

use serde::Deserialize;

use crate::common::SimError;
use crate::common::constants::NMP_ISSUE_INTERVAL;

/// Default configuration constants.
mod defaults {
    /// Cycles simulated when no limit is given.
    pub const MAX_CYCLES: u64 = 100_000;

    /// Read latency of the flat model, in cycles.
    pub const LATENCY: u64 = 40;

    /// Write latency of the flat model, in cycles.
    pub const WRITE_LATENCY: u64 = 40;

    /// CAS (Column Access Strobe) latency in DRAM cycles.
    pub const T_CAS: u64 = 14;

    /// RAS (Row Access Strobe) latency in DRAM cycles.
    pub const T_RAS: u64 = 14;

    /// Precharge latency in DRAM cycles.
    pub const T_PRE: u64 = 14;

    /// Write recovery added to every DRAM write.
    pub const T_WR: u64 = 12;

    /// Independent DRAM banks.
    pub const BANKS: usize = crate::common::constants::DRAM_BANKS;

    /// Bytes per DRAM row.
    pub const ROW_BYTES: u64 = crate::common::constants::DRAM_ROW_BYTES;

    /// Minimum spacing between two completions on the data bus.
    pub const BURST_CYCLES: u64 = 4;

    /// Maximum transactions in flight inside the engine.
    pub const QUEUE_DEPTH: usize = 32;

    /// Base address of the first NMP input table.
    pub const INPUT_BASE1: u64 = 0;

    /// Base address of the second NMP input table.
    pub const INPUT_BASE2: u64 = 0x0010_0000;

    /// Base address of the NMP output table.
    pub const OUTPUT_BASE: u64 = 0x0020_0000;

    /// Row pitch of the NMP tables.
    pub const NODE_DIM: u64 = 64;

    /// Rows read per synthetic burst.
    pub const COUNT: u64 = 16;

    /// Bytes between consecutive stream accesses.
    pub const STREAM_STRIDE: u64 = crate::common::constants::STREAM_STRIDE;

    /// Elements per stream array.
    pub const STREAM_ARRAY_SIZE: u64 = crate::common::constants::STREAM_ARRAY_SIZE;

    /// Elements per vector-add array.
    pub const VECTOR_ADD_ARRAY_SIZE: usize = crate::common::constants::VECTOR_ADD_ARRAY_SIZE;

    /// Base address of vector-add input `a`.
    pub const VECTOR_A_BASE: u64 = 0x0100_0000;

    /// Base address of vector-add input `b`.
    pub const VECTOR_B_BASE: u64 = 0x0200_0000;

    /// Base address of vector-add output `c`.
    pub const VECTOR_C_BASE: u64 = 0x0300_0000;
}

/// Latency model behind the reference timing engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum MemoryController {
    /// Fixed read and write latencies.
    #[default]
    Simple,
    /// Banked row buffers (CAS, RAS, precharge, write recovery).
    #[serde(alias = "DRAM")]
    Dram,
}

/// Workload driving the timing engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum WorkloadKind {
    /// Uniform-random addresses, one pending request at a time.
    Random,
    /// Streaming `c = a + b` array sweep.
    Stream,
    /// Replay of a flat `<addr> <op> <cycle>` trace.
    TraceReplay,
    /// Element-wise vector add with host-side arithmetic.
    VectorAdd,
    /// Near-memory-processing pipeline.
    #[default]
    #[serde(alias = "NMP")]
    Nmp,
}

/// Compute policy of the NMP pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum NmpMode {
    /// Synthetic address sweep; inputs consumed two at a time.
    #[default]
    Paired,
    /// Index-trace batches; inputs drained in bulk once no read is outstanding.
    TraceDrain,
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General run settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Timing engine parameters
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Workload selection and parameters
    #[serde(default)]
    pub workload: WorkloadConfig,
}

impl Config {
    /// Parses a configuration from JSON; absent fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `SimError::ConfigParse` on malformed JSON and
    /// `SimError::InvalidConfig` when validation fails.
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field constraints that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns `SimError::InvalidConfig` describing the first violated constraint.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.memory.queue_depth == 0 {
            return Err(SimError::InvalidConfig(
                "memory.queue_depth must be at least 1".into(),
            ));
        }
        if self.memory.banks == 0 || self.memory.row_bytes == 0 {
            return Err(SimError::InvalidConfig(
                "memory.banks and memory.row_bytes must be at least 1".into(),
            ));
        }
        if self.memory.burst_cycles == 0 {
            return Err(SimError::InvalidConfig(
                "memory.burst_cycles must be at least 1".into(),
            ));
        }
        if self.workload.nmp.issue_interval == 0 {
            return Err(SimError::InvalidConfig(
                "workload.nmp.issue_interval must be at least 1".into(),
            ));
        }
        if self.workload.stream.stride == 0 {
            return Err(SimError::InvalidConfig(
                "workload.stream.stride must be at least 1".into(),
            ));
        }
        let needs_trace = match self.workload.kind {
            WorkloadKind::TraceReplay => true,
            WorkloadKind::Nmp => self.workload.nmp.mode == NmpMode::TraceDrain,
            _ => false,
        };
        if needs_trace && self.workload.trace_path.is_none() {
            return Err(SimError::InvalidConfig(format!(
                "workload {:?} requires workload.trace_path",
                self.workload.kind
            )));
        }
        Ok(())
    }
}

/// General run settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Number of cycles to simulate
    #[serde(default = "GeneralConfig::default_max_cycles")]
    pub max_cycles: u64,

    /// Seed for the random and stream workloads
    #[serde(default)]
    pub seed: u64,

    /// Statistics sections to print; empty prints all
    #[serde(default)]
    pub stats_sections: Vec<String>,
}

impl GeneralConfig {
    /// Returns the default cycle limit.
    fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            max_cycles: defaults::MAX_CYCLES,
            seed: 0,
            stats_sections: Vec::new(),
        }
    }
}

/// Reference timing engine parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Latency model
    #[serde(default)]
    pub controller: MemoryController,

    /// Read latency in cycles (simple controller)
    #[serde(default = "MemoryConfig::default_latency")]
    pub latency: u64,

    /// Write latency in cycles (simple controller)
    #[serde(default = "MemoryConfig::default_write_latency")]
    pub write_latency: u64,

    /// Column access latency (DRAM controller)
    #[serde(default = "MemoryConfig::default_t_cas")]
    pub t_cas: u64,

    /// Row activation latency (DRAM controller)
    #[serde(default = "MemoryConfig::default_t_ras")]
    pub t_ras: u64,

    /// Precharge latency (DRAM controller)
    #[serde(default = "MemoryConfig::default_t_pre")]
    pub t_pre: u64,

    /// Write recovery (DRAM controller)
    #[serde(default = "MemoryConfig::default_t_wr")]
    pub t_wr: u64,

    /// Bank count (DRAM controller)
    #[serde(default = "MemoryConfig::default_banks")]
    pub banks: usize,

    /// Row size in bytes (DRAM controller)
    #[serde(default = "MemoryConfig::default_row_bytes")]
    pub row_bytes: u64,

    /// Minimum cycles between two completions
    #[serde(default = "MemoryConfig::default_burst_cycles")]
    pub burst_cycles: u64,

    /// Maximum transactions in flight
    #[serde(default = "MemoryConfig::default_queue_depth")]
    pub queue_depth: usize,
}

impl MemoryConfig {
    /// Returns the default read latency.
    fn default_latency() -> u64 {
        defaults::LATENCY
    }

    /// Returns the default write latency.
    fn default_write_latency() -> u64 {
        defaults::WRITE_LATENCY
    }

    /// Returns the default CAS latency.
    fn default_t_cas() -> u64 {
        defaults::T_CAS
    }

    /// Returns the default RAS latency.
    fn default_t_ras() -> u64 {
        defaults::T_RAS
    }

    /// Returns the default precharge latency.
    fn default_t_pre() -> u64 {
        defaults::T_PRE
    }

    /// Returns the default write recovery.
    fn default_t_wr() -> u64 {
        defaults::T_WR
    }

    /// Returns the default bank count.
    fn default_banks() -> usize {
        defaults::BANKS
    }

    /// Returns the default row size.
    fn default_row_bytes() -> u64 {
        defaults::ROW_BYTES
    }

    /// Returns the default completion spacing.
    fn default_burst_cycles() -> u64 {
        defaults::BURST_CYCLES
    }

    /// Returns the default in-flight window.
    fn default_queue_depth() -> usize {
        defaults::QUEUE_DEPTH
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            controller: MemoryController::default(),
            latency: defaults::LATENCY,
            write_latency: defaults::WRITE_LATENCY,
            t_cas: defaults::T_CAS,
            t_ras: defaults::T_RAS,
            t_pre: defaults::T_PRE,
            t_wr: defaults::T_WR,
            banks: defaults::BANKS,
            row_bytes: defaults::ROW_BYTES,
            burst_cycles: defaults::BURST_CYCLES,
            queue_depth: defaults::QUEUE_DEPTH,
        }
    }
}

/// Workload selection and per-workload parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkloadConfig {
    /// Which workload drives the engine
    #[serde(default)]
    pub kind: WorkloadKind,

    /// Trace file for `TraceReplay` and for NMP `TraceDrain`
    #[serde(default)]
    pub trace_path: Option<PathBuf>,

    /// NMP pipeline parameters
    #[serde(default)]
    pub nmp: NmpConfig,

    /// Stream workload parameters
    #[serde(default)]
    pub stream: StreamConfig,

    /// Vector-add workload parameters
    #[serde(default)]
    pub vector_add: VectorAddConfig,
}

/// NMP pipeline address layout and cadence.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct NmpConfig {
    /// Compute policy
    #[serde(default)]
    pub mode: NmpMode,

    /// Base of the first input table
    #[serde(default = "NmpConfig::default_input_base1")]
    pub input_base1: u64,

    /// Base of the second input table
    #[serde(default = "NmpConfig::default_input_base2")]
    pub input_base2: u64,

    /// Base of the output table
    #[serde(default = "NmpConfig::default_output_base")]
    pub output_base: u64,

    /// Row pitch of the tables
    #[serde(default = "NmpConfig::default_node_dim")]
    pub node_dim: u64,

    /// Rows per synthetic burst
    #[serde(default = "NmpConfig::default_count")]
    pub count: u64,

    /// Cycles between synthetic bursts
    #[serde(default = "NmpConfig::default_issue_interval")]
    pub issue_interval: u64,
}

impl NmpConfig {
    /// Returns the default first input base.
    fn default_input_base1() -> u64 {
        defaults::INPUT_BASE1
    }

    /// Returns the default second input base.
    fn default_input_base2() -> u64 {
        defaults::INPUT_BASE2
    }

    /// Returns the default output base.
    fn default_output_base() -> u64 {
        defaults::OUTPUT_BASE
    }

    /// Returns the default row pitch.
    fn default_node_dim() -> u64 {
        defaults::NODE_DIM
    }

    /// Returns the default burst row count.
    fn default_count() -> u64 {
        defaults::COUNT
    }

    /// Returns the default burst cadence.
    fn default_issue_interval() -> u64 {
        NMP_ISSUE_INTERVAL
    }
}

impl Default for NmpConfig {
    fn default() -> Self {
        Self {
            mode: NmpMode::default(),
            input_base1: defaults::INPUT_BASE1,
            input_base2: defaults::INPUT_BASE2,
            output_base: defaults::OUTPUT_BASE,
            node_dim: defaults::NODE_DIM,
            count: defaults::COUNT,
            issue_interval: NMP_ISSUE_INTERVAL,
        }
    }
}

/// Stream workload parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamConfig {
    /// Bytes between consecutive accesses
    #[serde(default = "StreamConfig::default_stride")]
    pub stride: u64,

    /// Offset at which the array bases are re-drawn
    #[serde(default = "StreamConfig::default_array_size")]
    pub array_size: u64,
}

impl StreamConfig {
    /// Returns the default stride.
    fn default_stride() -> u64 {
        defaults::STREAM_STRIDE
    }

    /// Returns the default array size.
    fn default_array_size() -> u64 {
        defaults::STREAM_ARRAY_SIZE
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            stride: defaults::STREAM_STRIDE,
            array_size: defaults::STREAM_ARRAY_SIZE,
        }
    }
}

/// Vector-add workload parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct VectorAddConfig {
    /// Elements per array
    #[serde(default = "VectorAddConfig::default_array_size")]
    pub array_size: usize,

    /// Base address of `a`
    #[serde(default = "VectorAddConfig::default_a_base")]
    pub a_base: u64,

    /// Base address of `b`
    #[serde(default = "VectorAddConfig::default_b_base")]
    pub b_base: u64,

    /// Base address of `c`
    #[serde(default = "VectorAddConfig::default_c_base")]
    pub c_base: u64,
}

impl VectorAddConfig {
    /// Returns the default element count.
    fn default_array_size() -> usize {
        defaults::VECTOR_ADD_ARRAY_SIZE
    }

    /// Returns the default base of `a`.
    fn default_a_base() -> u64 {
        defaults::VECTOR_A_BASE
    }

    /// Returns the default base of `b`.
    fn default_b_base() -> u64 {
        defaults::VECTOR_B_BASE
    }

    /// Returns the default base of `c`.
    fn default_c_base() -> u64 {
        defaults::VECTOR_C_BASE
    }
}

impl Default for VectorAddConfig {
    fn default() -> Self {
        Self {
            array_size: defaults::VECTOR_ADD_ARRAY_SIZE,
            a_base: defaults::VECTOR_A_BASE,
            b_base: defaults::VECTOR_B_BASE,
            c_base: defaults::VECTOR_C_BASE,
        }
    }
}
