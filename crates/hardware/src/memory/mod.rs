//! Memory timing seam.
//!
//! This module provides:
//! 1. **Traits:** The `TimingEngine` interface every workload drives.
//! 2. **Latency:** Flat and banked row-buffer latency models.
//! 3. **Engine:** `LatencyEngine`, a reference bounded-window timing engine.

/// Reference timing engine.
pub mod engine;

/// Access latency models.
pub mod latency;

/// Timing engine interface.
pub mod traits;

pub use engine::{LatencyEngine, build_engine};
pub use latency::LatencyModel;
pub use traits::{TimingEngine, try_submit};
