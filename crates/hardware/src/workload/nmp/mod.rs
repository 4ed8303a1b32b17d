//! Near-memory-processing pipeline.
//!
//! Stages read results from the timing engine, performs a nominal compute
//! step, and emits write-backs. Each stage lives in its own module so it can
//! be exercised in isolation; `NmpCore` wires them into one cycle.

/// Destination-grouped trace batching.
pub mod batcher;

/// Compute and dispatch stages.
pub mod compute;

/// Pipeline owner and per-cycle sequencing.
pub mod core;

/// Transaction queue and admission pass.
pub mod queue;

/// Staging FIFOs.
pub mod staging;

pub use self::core::{CycleReport, NmpCore};
pub use batcher::{Batch, TraceBatcher};
pub use queue::{AdmissionReport, TransactionQueue};
pub use staging::StagingBuffer;
