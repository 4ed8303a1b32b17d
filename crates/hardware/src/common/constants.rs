//! Global Simulation Constants.
//!
//! This module defines constants shared by the workloads and the reference timing engine.

/// Cycles between synthetic read bursts in paired NMP mode.
pub const NMP_ISSUE_INTERVAL: u64 = 15;

/// Stride in bytes between consecutive stream accesses.
pub const STREAM_STRIDE: u64 = 64;

/// Elements per array in the stream workload.
pub const STREAM_ARRAY_SIZE: u64 = 2 << 20;

/// Elements per array in the vector-add workload.
pub const VECTOR_ADD_ARRAY_SIZE: usize = 1024;

/// Bytes per vector-add element.
pub const VECTOR_ADD_ELEMENT_BYTES: u64 = 8;

/// Bytes per DRAM row in the banked latency model.
pub const DRAM_ROW_BYTES: u64 = 2048;

/// Banks in the banked latency model.
pub const DRAM_BANKS: usize = 8;

/// Denominator of the random workload's write probability (one write in three).
pub const RANDOM_WRITE_RATIO: u64 = 3;
