//! Memory Transaction Types.
//!
//! This module defines the request and completion records exchanged between
//! workloads and the timing engine. These types are used for the following:
//! 1. **Issue:** Workloads build `Transaction`s and queue or submit them.
//! 2. **Completion:** The timing engine reports finished work as `StagedResult`s.
//! 3. **Trace Input:** `TraceEntry` is one (source, destination) pair of an index trace.

use std::fmt;

use serde::Serialize;

/// Kind of memory transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum TransactionKind {
    /// Data read.
    Read,
    /// Data write.
    Write,
}

impl TransactionKind {
    /// Returns true for `Write`; matches the `is_write` flag of the engine interface.
    #[inline]
    pub const fn is_write(self) -> bool {
        matches!(self, Self::Write)
    }

    /// Returns true for `Read`.
    #[inline]
    pub const fn is_read(self) -> bool {
        matches!(self, Self::Read)
    }

    /// Converts an engine-style `is_write` flag into a kind.
    #[inline]
    pub const fn from_is_write(is_write: bool) -> Self {
        if is_write { Self::Write } else { Self::Read }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => write!(f, "READ"),
            Self::Write => write!(f, "WRITE"),
        }
    }
}

/// One pending or in-flight memory request.
///
/// Has no identity beyond `(addr, kind)`; duplicates are legal and are told
/// apart only by their position in a queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Transaction {
    /// Target address.
    pub addr: u64,
    /// Read or write.
    pub kind: TransactionKind,
}

impl Transaction {
    /// Creates a read request for `addr`.
    #[inline]
    pub const fn read(addr: u64) -> Self {
        Self {
            addr,
            kind: TransactionKind::Read,
        }
    }

    /// Creates a write request for `addr`.
    #[inline]
    pub const fn write(addr: u64) -> Self {
        Self {
            addr,
            kind: TransactionKind::Write,
        }
    }

    /// Returns true if this is a read request.
    #[inline]
    pub const fn is_read(&self) -> bool {
        self.kind.is_read()
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:#x}", self.kind, self.addr)
    }
}

/// A transaction the timing engine reported as finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StagedResult {
    /// Address of the finished transaction.
    pub addr: u64,
    /// How the transaction completed.
    pub kind: TransactionKind,
}

impl StagedResult {
    /// Creates a completion record.
    #[inline]
    pub const fn new(addr: u64, kind: TransactionKind) -> Self {
        Self { addr, kind }
    }
}

/// One (source, destination) pair of an index trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct TraceEntry {
    /// Source row address; issued as a read.
    pub src: u64,
    /// Destination group the source is accumulated into.
    pub dst: u64,
}

impl TraceEntry {
    /// Creates a trace entry.
    #[inline]
    pub const fn new(src: u64, dst: u64) -> Self {
        Self { src, dst }
    }
}
