//! Compute and dispatch stages.
//!
//! The compute step is nominal: consumed inputs are discarded and a single
//! write-back request at `output_base + tid` stands for the result.
//! 1. **Paired:** two staged reads make one write, at most once per cycle.
//! 2. **Trace drain:** once no read is waiting for admission, every staged read
//!    becomes a write that is both recorded in the output buffer and queued
//!    directly, skipping the dispatcher.
//! 3. **Dispatch:** moves one output-buffer entry into the transaction queue.

use crate::common::{StagedResult, Transaction};
use crate::workload::nmp::queue::TransactionQueue;
use crate::workload::nmp::staging::StagingBuffer;

/// Inputs consumed per paired compute step.
pub const PAIR_INPUTS: usize = 2;

/// Runs one paired compute step.
///
/// Returns the synthesized write, or `None` if fewer than two inputs are staged.
pub fn compute_paired(
    input: &mut StagingBuffer<StagedResult>,
    output: &mut StagingBuffer<Transaction>,
    write_addr: u64,
) -> Option<Transaction> {
    if input.len() < PAIR_INPUTS {
        return None;
    }
    for _ in 0..PAIR_INPUTS {
        let _ = input.pop();
    }
    let write = Transaction::write(write_addr);
    output.push(write);
    Some(write)
}

/// Drains every staged input when no read is waiting in `queue`.
///
/// Returns the number of writes synthesized.
pub fn compute_trace_drain(
    input: &mut StagingBuffer<StagedResult>,
    output: &mut StagingBuffer<Transaction>,
    queue: &mut TransactionQueue,
    write_addr: u64,
) -> usize {
    if queue.has_read() {
        return 0;
    }
    let mut produced = 0;
    while input.pop().is_some() {
        let write = Transaction::write(write_addr);
        output.push(write);
        queue.push(write);
        produced += 1;
    }
    produced
}

/// Promotes at most one output-buffer entry to the tail of `queue`.
pub fn dispatch(
    output: &mut StagingBuffer<Transaction>,
    queue: &mut TransactionQueue,
) -> Option<Transaction> {
    let write = output.pop()?;
    queue.push(write);
    Some(write)
}
