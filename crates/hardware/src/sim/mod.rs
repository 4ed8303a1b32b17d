//! Simulation driver and trace I/O.
//!
//! Provides the top-level cycle loop, trace loaders, and the index-trace generator.

/// Index-trace generator.
pub mod generator;

/// Trace file loaders.
pub mod loader;

/// Top-level cycle loop.
pub mod simulator;

pub use simulator::Simulator;
