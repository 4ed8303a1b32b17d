//! Timing engine interface.
//!
//! The driver never models DRAM itself. It talks to a cycle-accurate timing
//! engine through this narrow request/completion interface:
//! 1. **Admission:** `can_accept` is a side-effect-free query; `submit` must only
//!    follow a true `can_accept` for the same arguments in the same cycle.
//! 2. **Completion:** `poll_completed` hands back at most one finished transaction.
//! 3. **Time:** `advance_cycle` is called exactly once per simulated cycle, after
//!    all queue and buffer processing for that cycle.

use crate::common::StagedResult;

/// A cycle-stepped memory timing model.
pub trait TimingEngine {
    /// Advances the engine's internal clock by one tick.
    fn advance_cycle(&mut self);

    /// Returns true if a transaction for `addr` would be accepted this cycle.
    fn can_accept(&self, addr: u64, is_write: bool) -> bool;

    /// Enqueues a transaction. Only legal right after a true `can_accept`.
    fn submit(&mut self, addr: u64, is_write: bool);

    /// Returns at most one finished transaction attributable to `cycle`.
    fn poll_completed(&mut self, cycle: u64) -> Option<StagedResult>;

    /// Returns the engine's own cycle count.
    fn cycle(&self) -> u64;
}

impl<T: TimingEngine + ?Sized> TimingEngine for Box<T> {
    fn advance_cycle(&mut self) {
        (**self).advance_cycle();
    }

    fn can_accept(&self, addr: u64, is_write: bool) -> bool {
        (**self).can_accept(addr, is_write)
    }

    fn submit(&mut self, addr: u64, is_write: bool) {
        (**self).submit(addr, is_write);
    }

    fn poll_completed(&mut self, cycle: u64) -> Option<StagedResult> {
        (**self).poll_completed(cycle)
    }

    fn cycle(&self) -> u64 {
        (**self).cycle()
    }
}

/// Submits `addr` if the engine will take it; returns whether it was submitted.
///
/// Pairs the admission query with the submission so the two can never be
/// separated by caller code.
#[inline]
pub fn try_submit<E: TimingEngine + ?Sized>(engine: &mut E, addr: u64, is_write: bool) -> bool {
    if engine.can_accept(addr, is_write) {
        engine.submit(addr, is_write);
        true
    } else {
        false
    }
}
