//! # NMP Pipeline Tests
//!
//! Stage-level tests for the queue, staging buffers, compute, and batcher,
//! plus cycle-level tests of the assembled core.

pub mod core;
pub mod queue;
