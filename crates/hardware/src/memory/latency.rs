//! Access latency models for the reference engine.
//!
//! `LatencyEngine` asks its model how long each accepted transaction takes.
//! 1. **Flat:** one fixed latency for reads and another for writes.
//! 2. **Banked:** addresses are interleaved across banks row by row; each bank
//!    keeps one row open, and writes pay a recovery time on top of the access.

use crate::common::TransactionKind;
use crate::config::{MemoryConfig, MemoryController as ModelKind};

/// DRAM timing parameters, in cycles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DramTiming {
    /// Column access.
    pub t_cas: u64,
    /// Row activation.
    pub t_ras: u64,
    /// Precharge.
    pub t_pre: u64,
    /// Write recovery.
    pub t_wr: u64,
}

/// State of the addressed bank when an access arrives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowOutcome {
    /// The addressed row is already open.
    Hit,
    /// The bank has no open row.
    Empty,
    /// Another row is open and must be closed first.
    Conflict,
}

/// Banked DRAM with one open row per bank.
#[derive(Clone, Debug)]
pub struct BankedDram {
    open_rows: Vec<Option<u64>>,
    row_bytes: u64,
    timing: DramTiming,
}

impl BankedDram {
    /// Creates a model with every bank closed.
    ///
    /// Zero banks or a zero row size are treated as one.
    pub fn new(banks: usize, row_bytes: u64, timing: DramTiming) -> Self {
        Self {
            open_rows: vec![None; banks.max(1)],
            row_bytes: row_bytes.max(1),
            timing,
        }
    }

    /// Maps `addr` to its `(bank, row)`.
    ///
    /// Consecutive rows of the address space land in consecutive banks.
    pub fn locate(&self, addr: u64) -> (usize, u64) {
        let banks = self.open_rows.len() as u64;
        let row_index = addr / self.row_bytes;
        ((row_index % banks) as usize, row_index / banks)
    }

    /// Opens the row holding `addr` and reports what the bank had to do.
    pub fn access(&mut self, addr: u64) -> RowOutcome {
        let (bank, row) = self.locate(addr);
        let slot = &mut self.open_rows[bank];
        let outcome = match *slot {
            Some(open) if open == row => RowOutcome::Hit,
            Some(_) => RowOutcome::Conflict,
            None => RowOutcome::Empty,
        };
        *slot = Some(row);
        outcome
    }

    /// Latency of one access, updating the open rows.
    pub fn latency(&mut self, addr: u64, kind: TransactionKind) -> u64 {
        let DramTiming {
            t_cas,
            t_ras,
            t_pre,
            t_wr,
        } = self.timing;
        let access = match self.access(addr) {
            RowOutcome::Hit => t_cas,
            RowOutcome::Empty => t_ras + t_cas,
            RowOutcome::Conflict => t_pre + t_ras + t_cas,
        };
        match kind {
            TransactionKind::Read => access,
            TransactionKind::Write => access + t_wr,
        }
    }

    /// Row currently open in `bank`, if any.
    pub fn open_row(&self, bank: usize) -> Option<u64> {
        self.open_rows.get(bank).copied().flatten()
    }

    /// Number of banks.
    pub fn banks(&self) -> usize {
        self.open_rows.len()
    }
}

/// Latency model selected for a run.
#[derive(Clone, Debug)]
pub enum LatencyModel {
    /// Fixed latencies, independent of address.
    Flat {
        /// Cycles per read.
        read: u64,
        /// Cycles per write.
        write: u64,
    },
    /// Row-buffer model.
    Banked(BankedDram),
}

impl LatencyModel {
    /// Same fixed latency for reads and writes.
    pub const fn uniform(latency: u64) -> Self {
        Self::Flat {
            read: latency,
            write: latency,
        }
    }

    /// Builds the model named by `config.controller`.
    pub fn from_config(config: &MemoryConfig) -> Self {
        match config.controller {
            ModelKind::Simple => Self::Flat {
                read: config.latency,
                write: config.write_latency,
            },
            ModelKind::Dram => Self::Banked(BankedDram::new(
                config.banks,
                config.row_bytes,
                DramTiming {
                    t_cas: config.t_cas,
                    t_ras: config.t_ras,
                    t_pre: config.t_pre,
                    t_wr: config.t_wr,
                },
            )),
        }
    }

    /// Latency of one access in cycles.
    pub fn latency(&mut self, addr: u64, kind: TransactionKind) -> u64 {
        match self {
            Self::Flat { read, write } => match kind {
                TransactionKind::Read => *read,
                TransactionKind::Write => *write,
            },
            Self::Banked(dram) => dram.latency(addr, kind),
        }
    }
}
