//! Index trace generation.
//!
//! Produces the `src dst` index arrays consumed by the NMP batcher: random
//! source rows, random destinations, sorted by destination so that each
//! destination forms one contiguous run.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::common::{SimError, TraceEntry};

/// Pairs in the reference index array.
pub const DEFAULT_ROWS: usize = 1024 * 5;

/// Distinct source rows in the reference index array.
pub const DEFAULT_ITEMS: u64 = 20 * 80;

/// Largest destination value in the reference index array.
pub const DEFAULT_MAX_DST: u64 = 20;

/// Generates `rows` random pairs sorted by destination.
///
/// Sources are drawn from `0..items` and destinations from `0..=max_dst`.
/// The sort is stable, so sources keep their draw order within a destination.
pub fn generate_index_array(rows: usize, items: u64, max_dst: u64, seed: u64) -> Vec<TraceEntry> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut entries: Vec<TraceEntry> = (0..rows)
        .map(|_| {
            let src = rng.gen_range(0..items.max(1));
            let dst = rng.gen_range(0..=max_dst);
            TraceEntry::new(src, dst)
        })
        .collect();
    entries.sort_by_key(|entry| entry.dst);
    entries
}

/// Formats `entries` as one `src dst` line each.
pub fn format_pair_trace(entries: &[TraceEntry]) -> String {
    let mut out = String::with_capacity(entries.len() * 8);
    for entry in entries {
        let _ = writeln!(out, "{} {}", entry.src, entry.dst);
    }
    out
}

/// Writes `entries` to `path` in index-trace format.
///
/// # Errors
///
/// Returns `SimError::Write` if the file cannot be written.
pub fn write_pair_trace(path: &Path, entries: &[TraceEntry]) -> Result<(), SimError> {
    fs::write(path, format_pair_trace(entries)).map_err(|source| SimError::Write {
        path: path.to_path_buf(),
        source,
    })
}
