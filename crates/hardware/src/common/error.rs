//! Error definitions.
//!
//! This module defines the error types reported by the driver. It provides:
//! 1. **Trace Errors:** Failures while reading or parsing trace input.
//! 2. **Simulation Errors:** Configuration and setup failures surfaced to the front end.
//!
//! Transient admission rejection is not an error; it is handled by requeueing.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a trace file.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The trace file could not be opened or read.
    #[error("cannot read trace '{path}': {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A token or line could not be parsed.
    #[error("malformed trace at {location}: {reason}")]
    Malformed {
        /// Line number or token index where parsing stopped.
        location: String,
        /// What was wrong.
        reason: String,
    },
}

impl TraceError {
    /// Builds a `Malformed` error.
    pub fn malformed(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            location: location.into(),
            reason: reason.into(),
        }
    }
}

/// Top-level errors surfaced by the simulator.
#[derive(Debug, Error)]
pub enum SimError {
    /// The configuration failed to deserialize.
    #[error("invalid configuration JSON: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// The configuration deserialized but is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A trace required by the selected workload could not be loaded.
    #[error(transparent)]
    Trace(#[from] TraceError),

    /// Statistics could not be serialized.
    #[error("cannot serialize statistics: {0}")]
    Report(#[source] serde_json::Error),

    /// An output file could not be written.
    #[error("cannot write '{path}': {source}")]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}
