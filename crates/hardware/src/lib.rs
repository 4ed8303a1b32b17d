//! Synthetic memory workload driver library.
//!
//! This crate issues memory traffic into a cycle-stepped timing engine with the following:
//! 1. **NMP pipeline:** Admission-controlled queue, staging buffers, compute, and trace batching.
//! 2. **Generators:** Random, stream, trace-replay, and vector-add workloads.
//! 3. **Memory:** The timing-engine interface and a latency-based reference engine.
//! 4. **Simulation:** Configuration, trace loading, the cycle loop, and statistics.

/// Common types and constants (transactions, trace entries, errors).
pub mod common;
/// Run configuration (defaults, enums, hierarchical config structures).
pub mod config;
/// Timing engine interface and reference implementation.
pub mod memory;
/// Cycle loop, trace loading, and trace generation.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;
/// Workloads, including the NMP pipeline.
pub mod workload;

/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// Timing engine interface implemented by memory models.
pub use crate::memory::TimingEngine;
/// Top-level simulator; construct with `Simulator::new`.
pub use crate::sim::Simulator;
/// NMP pipeline core.
pub use crate::workload::NmpCore;
