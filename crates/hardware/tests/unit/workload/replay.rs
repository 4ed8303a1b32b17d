//! Trace Replay Workload Tests.

use nmpsim_core::common::TransactionKind::{Read, Write};
use nmpsim_core::stats::SimStats;
use nmpsim_core::workload::{ReplayRecord, TraceReplayWorkload};
use pretty_assertions::assert_eq;

use crate::common::mocks::engine::ScriptedEngine;

fn records() -> Vec<ReplayRecord> {
    vec![
        ReplayRecord::new(0x10, Read, 0),
        ReplayRecord::new(0x20, Write, 0),
        ReplayRecord::new(0x30, Read, 5),
    ]
}

#[test]
fn records_wait_for_their_cycle() {
    let mut engine = ScriptedEngine::accepting();
    let mut workload = TraceReplayWorkload::new(records());
    let mut stats = SimStats::default();

    for _ in 0..5 {
        workload.tick(&mut engine, &mut stats);
    }
    assert_eq!(workload.issued(), 2);
    assert!(!workload.is_done());

    workload.tick(&mut engine, &mut stats);
    assert_eq!(workload.issued(), 3);
    assert!(workload.is_done());
    assert_eq!(
        engine.submitted,
        vec![(0x10, false), (0x20, true), (0x30, false)]
    );
}

#[test]
fn rejected_record_blocks_later_ones() {
    let mut engine = ScriptedEngine::with_accept(|addr, _| addr != 0x20);
    let mut workload = TraceReplayWorkload::new(records());
    let mut stats = SimStats::default();

    for _ in 0..10 {
        workload.tick(&mut engine, &mut stats);
    }
    assert_eq!(workload.issued(), 1);
    assert_eq!(stats.admission_rejections, 9);

    engine.set_accept(|_, _| true);
    workload.tick(&mut engine, &mut stats);
    workload.tick(&mut engine, &mut stats);
    assert!(workload.is_done());
    assert_eq!(engine.submitted_addrs(), vec![0x10, 0x20, 0x30]);
}

#[test]
fn empty_trace_is_done_immediately() {
    let mut engine = ScriptedEngine::accepting();
    let mut workload = TraceReplayWorkload::new(Vec::new());
    let mut stats = SimStats::default();
    assert!(workload.is_done());
    workload.tick(&mut engine, &mut stats);
    assert!(engine.submitted.is_empty());
    assert_eq!(engine.advances, 1);
}
