//! Common types used throughout the workload driver.
//!
//! This module provides the building blocks shared by every component. It includes:
//! 1. **Transactions:** Request, completion, and trace-entry records.
//! 2. **Constants:** Cadences, strides, and array sizes for the workloads.
//! 3. **Error Handling:** Trace and simulation error types.

/// Common constants used throughout the simulator.
pub mod constants;

/// Transaction and trace record definitions.
pub mod data;

/// Error types.
pub mod error;

pub use data::{StagedResult, TraceEntry, Transaction, TransactionKind};
pub use error::{SimError, TraceError};
