//! Trace loading.
//!
//! This module reads the two trace formats the workloads consume:
//! 1. **Index traces:** whitespace-separated `src dst` pairs for the NMP batcher.
//! 2. **Replay traces:** one `<addr> <op> <cycle>` request per line.
//!
//! Index traces are optional input: `load_pair_trace_or_empty` logs a warning
//! and falls back to an empty trace so the run continues with a batcher that
//! never issues. Replay traces are mandatory for their workload and fail loudly.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::common::{TraceEntry, TraceError, TransactionKind};
use crate::workload::replay::ReplayRecord;

/// Parses an index trace of whitespace-separated `src dst` pairs.
///
/// Line breaks carry no meaning; values are paired in the order they appear.
///
/// # Errors
///
/// Returns `TraceError::Malformed` if a token is not an unsigned integer or a
/// source has no matching destination.
pub fn parse_pair_trace(text: &str) -> Result<Vec<TraceEntry>, TraceError> {
    let mut values = text.split_whitespace().enumerate().map(|(index, token)| {
        token.parse::<u64>().map_err(|e| {
            TraceError::malformed(format!("token {index}"), format!("'{token}': {e}"))
        })
    });

    let mut entries = Vec::new();
    while let Some(src) = values.next() {
        let src = src?;
        let dst = values.next().ok_or_else(|| {
            TraceError::malformed(
                format!("entry {}", entries.len()),
                format!("source {src} has no destination"),
            )
        })??;
        entries.push(TraceEntry::new(src, dst));
    }
    Ok(entries)
}

/// Reads and parses an index trace from `path`.
///
/// # Errors
///
/// Returns `TraceError::Io` if the file cannot be read and
/// `TraceError::Malformed` if its contents do not parse.
pub fn load_pair_trace(path: &Path) -> Result<Vec<TraceEntry>, TraceError> {
    let text = fs::read_to_string(path).map_err(|source| TraceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_pair_trace(&text)
}

/// Reads an index trace, degrading to an empty trace on any error.
pub fn load_pair_trace_or_empty(path: &Path) -> Vec<TraceEntry> {
    match load_pair_trace(path) {
        Ok(entries) => {
            info!(path = %path.display(), entries = entries.len(), "index trace loaded");
            entries
        }
        Err(e) => {
            warn!(error = %e, "index trace unavailable; continuing with no trace data");
            Vec::new()
        }
    }
}

fn parse_addr(token: &str) -> Result<u64, std::num::ParseIntError> {
    match token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => token.parse(),
    }
}

fn parse_kind(token: &str) -> Option<TransactionKind> {
    match token.to_ascii_uppercase().as_str() {
        "READ" | "R" => Some(TransactionKind::Read),
        "WRITE" | "W" => Some(TransactionKind::Write),
        _ => None,
    }
}

/// Parses a replay trace.
///
/// Each non-blank line is `<addr> <op> <cycle>`, where `addr` is decimal or
/// `0x`-prefixed hex and `op` is `READ`/`WRITE` (or `R`/`W`). Text after `#`
/// is ignored.
///
/// # Errors
///
/// Returns `TraceError::Malformed` naming the first bad line.
pub fn parse_replay_trace(text: &str) -> Result<Vec<ReplayRecord>, TraceError> {
    let mut records = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }
        let location = format!("line {}", index + 1);
        let fields: Vec<&str> = line.split_whitespace().collect();
        let [addr, op, cycle] = fields[..] else {
            return Err(TraceError::malformed(
                location,
                format!("expected 3 fields, found {}", fields.len()),
            ));
        };
        let addr = parse_addr(addr)
            .map_err(|e| TraceError::malformed(location.clone(), format!("address '{addr}': {e}")))?;
        let kind = parse_kind(op)
            .ok_or_else(|| TraceError::malformed(location.clone(), format!("unknown op '{op}'")))?;
        let cycle = cycle
            .parse::<u64>()
            .map_err(|e| TraceError::malformed(location.clone(), format!("cycle '{cycle}': {e}")))?;
        records.push(ReplayRecord::new(addr, kind, cycle));
    }
    Ok(records)
}

/// Reads and parses a replay trace from `path`.
///
/// # Errors
///
/// Returns `TraceError::Io` if the file cannot be read and
/// `TraceError::Malformed` if its contents do not parse.
pub fn load_replay_trace(path: &Path) -> Result<Vec<ReplayRecord>, TraceError> {
    let text = fs::read_to_string(path).map_err(|source| TraceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_replay_trace(&text)?;
    info!(path = %path.display(), records = records.len(), "replay trace loaded");
    Ok(records)
}
