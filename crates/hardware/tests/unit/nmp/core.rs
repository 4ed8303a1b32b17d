//! NMP Core Pipeline Tests.
//!
//! Drives `NmpCore` cycle by cycle against scripted and mocked engines and
//! checks stage ordering, harvest accounting, compute closure, trace gating,
//! and the engine call contract.

use mockall::Sequence;
use mockall::predicate::eq;
use nmpsim_core::NmpCore;
use nmpsim_core::common::{Transaction, TransactionKind};
use nmpsim_core::config::{Config, NmpConfig, NmpMode};
use nmpsim_core::stats::SimStats;
use nmpsim_core::workload::Workload;
use pretty_assertions::assert_eq;

use crate::common::harness::{NmpContext, entries, small_layout};
use crate::common::mocks::engine::{MockEngine, ScriptedEngine};

// ══════════════════════════════════════════════════════════
// 1. Paired mode end to end
// ══════════════════════════════════════════════════════════

#[test]
fn first_cycle_issues_burst_at_tid_zero() {
    let mut ctx = NmpContext::paired(ScriptedEngine::accepting());

    let report = ctx.tick().clone();

    assert_eq!(report.cycle, 0);
    assert_eq!(report.issued, 8);
    let queued: Vec<Transaction> = ctx.core.queue().iter().copied().collect();
    assert_eq!(
        queued,
        [0, 1000, 8, 1008, 16, 1016, 24, 1024]
            .into_iter()
            .map(Transaction::read)
            .collect::<Vec<_>>()
    );
    // Issue runs after admission, so nothing reached the engine yet.
    assert!(ctx.engine.submitted.is_empty());
}

#[test]
fn fifteen_cycle_run_with_accepting_engine() {
    let mut ctx = NmpContext::paired(ScriptedEngine::accepting());

    // Cycles 0..=5: burst issued at 0, admitted at 1, reads harvested from 2.
    ctx.run(6);
    let submitted = ctx.engine.submitted_addrs();
    assert_eq!(
        submitted[..8].to_vec(),
        vec![0, 1000, 8, 1008, 16, 1016, 24, 1024]
    );
    assert_eq!(ctx.core.input_buffer().total_pushed(), 4);
    assert_eq!(ctx.core.output_buffer().total_pushed(), 2);
    let writes: Vec<Option<Transaction>> = ctx.reports.iter().map(|r| r.dispatched).collect();
    assert_eq!(
        writes.into_iter().flatten().collect::<Vec<_>>(),
        vec![Transaction::write(2003), Transaction::write(2005)]
    );

    ctx.run(9);
    assert_eq!(ctx.core.cycle(), 15);
    assert_eq!(ctx.core.tid(), 15);
    assert_eq!(ctx.core.input_buffer().total_pushed(), 8);
    assert_eq!(ctx.core.output_buffer().total_pushed(), 4);
    assert_eq!(ctx.core.completed_writes(), 4);
    assert!(ctx.core.queue().is_empty());
    assert!(ctx.core.input_buffer().is_empty());
    assert!(ctx.core.output_buffer().is_empty());
    assert!(ctx.reports[1..].iter().all(|r| r.issued == 0));
}

#[test]
fn next_burst_sweeps_the_next_column() {
    let mut ctx = NmpContext::paired(ScriptedEngine::accepting());
    ctx.run(15);

    let report = ctx.tick().clone();

    assert_eq!(report.cycle, 15);
    assert_eq!(report.issued, 8);
    let queued: Vec<u64> = ctx.core.queue().iter().map(|t| t.addr).collect();
    assert_eq!(queued, vec![15, 1015, 23, 1023, 31, 1031, 39, 1039]);
}

#[test]
fn burst_waits_for_an_empty_queue() {
    // Nothing is ever admitted, so the cadence point at cycle 15 is skipped.
    let mut ctx = NmpContext::paired(ScriptedEngine::rejecting());
    ctx.run(31);
    assert_eq!(ctx.core.queue().len(), 8);
    assert_eq!(ctx.reports.iter().map(|r| r.issued).sum::<u64>(), 8);
}

#[test]
fn dispatch_promotes_one_write_per_cycle() {
    let mut ctx = NmpContext::paired(ScriptedEngine::rejecting());
    for i in 0..6 {
        ctx.engine.complete_now(i, TransactionKind::Read);
    }
    ctx.run(6);
    assert!(ctx.reports.iter().all(|r| r.computed <= 1));
    assert_eq!(ctx.core.output_buffer().total_pushed(), 3);
    assert_eq!(
        ctx.reports.iter().filter(|r| r.dispatched.is_some()).count(),
        3
    );
}

// ══════════════════════════════════════════════════════════
// 2. Layout edge cases
// ══════════════════════════════════════════════════════════

#[test]
fn zero_issue_interval_never_issues() {
    let layout = NmpConfig {
        issue_interval: 0,
        ..small_layout()
    };
    let mut core = NmpCore::paired(layout);
    let mut engine = ScriptedEngine::accepting();

    for _ in 0..20 {
        let report = core.tick(&mut engine);
        assert_eq!(report.issued, 0);
    }
    assert!(engine.submitted.is_empty());
    assert_eq!(core.cycle(), 20);
}

#[test]
fn unvalidated_workload_with_zero_interval_still_ticks() {
    let mut config = Config::default();
    config.workload.nmp.issue_interval = 0;
    let mut workload = Workload::from_config(&config).expect("paired needs no trace");
    let mut engine = ScriptedEngine::accepting();
    let mut stats = SimStats::default();

    for _ in 0..5 {
        workload.tick(&mut engine, &mut stats);
    }
    assert_eq!(stats.total_submitted(), 0);
    assert_eq!(engine.advances, 5);
}

#[test]
fn issued_counts_two_reads_per_row() {
    let layout = NmpConfig {
        count: 40,
        ..small_layout()
    };
    let mut core = NmpCore::paired(layout);
    let report = core.tick(&mut ScriptedEngine::rejecting());
    assert_eq!(report.issued, 80_u64);
    assert_eq!(core.queue().len(), 80);
}

// ══════════════════════════════════════════════════════════
// 3. Harvest accounting
// ══════════════════════════════════════════════════════════

#[test]
fn harvest_routes_reads_and_counts_writes() {
    let mut ctx = NmpContext::paired(ScriptedEngine::rejecting());
    ctx.engine.complete_now(1, TransactionKind::Read);
    ctx.engine.complete_now(2, TransactionKind::Write);
    ctx.engine.complete_now(3, TransactionKind::Write);

    ctx.run(3);

    assert_eq!(ctx.core.input_buffer().total_pushed(), 1);
    assert_eq!(ctx.core.completed_writes(), 2);
}

#[test]
fn at_most_one_completion_per_cycle() {
    let mut engine = ScriptedEngine::accepting();
    engine.latency = 3;
    let mut ctx = NmpContext::paired(engine);

    ctx.run(200);

    assert_eq!(ctx.engine.polls, 200);
    assert_eq!(
        ctx.engine.harvested,
        ctx.core.input_buffer().total_pushed() + ctx.core.completed_writes()
    );
    let harvested = ctx.reports.iter().filter(|r| r.harvested.is_some()).count() as u64;
    assert_eq!(harvested, ctx.engine.harvested);
    assert_eq!(ctx.engine.advances, 200);
}

#[test]
fn paired_outputs_never_exceed_half_the_inputs() {
    let mut engine = ScriptedEngine::with_accept(|addr, _| addr % 3 != 0);
    engine.latency = 2;
    let mut ctx = NmpContext::paired(engine);

    for _ in 0..150 {
        let _ = ctx.tick();
        let input = ctx.core.input_buffer();
        let output = ctx.core.output_buffer();
        let consumed = input.total_pushed() - input.len() as u64;
        assert_eq!(consumed, 2 * output.total_pushed());
    }
}

// ══════════════════════════════════════════════════════════
// 4. Trace-drain mode
// ══════════════════════════════════════════════════════════

#[test]
fn trace_drain_runs_batches_to_completion() {
    let trace = entries(&[(1, 100), (2, 100), (3, 200), (4, 100)]);
    let mut ctx = NmpContext::trace_drain(ScriptedEngine::accepting(), trace);

    ctx.run(8);

    assert_eq!(ctx.reports[0].batch_dst, Some(100));
    assert_eq!(ctx.reports[0].issued, 2);
    assert_eq!(ctx.reports[1].batch_dst, Some(200));
    assert_eq!(ctx.engine.submitted_addrs(), vec![1, 2, 3, 2002, 2003, 2004]);
    assert_eq!(ctx.core.completed_writes(), 3);
    assert!(ctx.core.batcher().is_empty());
    assert_eq!(ctx.core.batcher().batches_issued(), 2);
    // Trace drain records every write in the output buffer and never pops it.
    assert_eq!(
        ctx.core.output_buffer().iter().map(|t| t.addr).collect::<Vec<_>>(),
        vec![2002, 2003, 2004]
    );
    assert!(ctx.reports.iter().all(|r| r.dispatched.is_none()));
}

#[test]
fn trace_batcher_is_gated_by_an_injected_read() {
    let trace = entries(&[(1, 100), (2, 100), (3, 200)]);
    let mut ctx = NmpContext::trace_drain(ScriptedEngine::rejecting(), trace);
    ctx.core.queue_mut().push(Transaction::read(999));

    let report = ctx.tick().clone();

    assert_eq!(report.issued, 0);
    assert_eq!(report.batch_dst, None);
    assert_eq!(ctx.core.queue().len(), 1);
    assert_eq!(ctx.core.batcher().len(), 3);
}

#[test]
fn trace_batcher_stays_gated_while_batch_reads_are_rejected() {
    let trace = entries(&[(1, 100), (2, 100), (3, 200)]);
    let mut ctx = NmpContext::trace_drain(ScriptedEngine::rejecting(), trace);

    ctx.run(5);

    assert_eq!(ctx.reports.iter().filter(|r| r.batch_dst.is_some()).count(), 1);
    assert_eq!(ctx.core.queue().len(), 2);
    assert_eq!(ctx.core.batcher().len(), 1);
}

#[test]
fn empty_trace_never_issues() {
    let mut ctx = NmpContext::trace_drain(ScriptedEngine::accepting(), Vec::new());

    ctx.run(50);

    assert!(ctx.reports.iter().all(|r| r.issued == 0 && r.batch_dst.is_none()));
    assert!(ctx.core.queue().is_empty());
    assert!(ctx.engine.submitted.is_empty());
    assert_eq!(ctx.core.cycle(), 50);
}

// ══════════════════════════════════════════════════════════
// 5. Engine call contract
// ══════════════════════════════════════════════════════════

#[test]
fn rejected_requests_are_never_submitted() {
    let mut engine = MockEngine::new();
    engine
        .expect_poll_completed()
        .withf(|&cycle| cycle < 2)
        .times(2)
        .returning(|_| None);
    engine.expect_can_accept().times(8).return_const(false);
    engine.expect_submit().never();
    engine.expect_advance_cycle().times(2).return_const(());

    let mut core = NmpCore::paired(small_layout());
    let first = core.tick(&mut engine);
    let second = core.tick(&mut engine);

    assert_eq!(first.issued, 8);
    assert_eq!(second.admission.rejected, 8);
    assert_eq!(core.queue().len(), 8);
}

#[test]
fn submit_follows_its_admission_query() {
    let mut engine = MockEngine::new();
    let mut seq = Sequence::new();
    engine
        .expect_poll_completed()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| None);
    engine
        .expect_can_accept()
        .with(eq(5), eq(false))
        .times(1)
        .in_sequence(&mut seq)
        .return_const(true);
    engine
        .expect_submit()
        .with(eq(5), eq(false))
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());
    engine
        .expect_advance_cycle()
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());

    let mut core = NmpCore::trace_drain(small_layout(), Vec::new());
    core.queue_mut().push(Transaction::read(5));
    let report = core.tick(&mut engine);

    assert_eq!(report.admission.admitted_reads, 1);
    assert_eq!(core.mode(), NmpMode::TraceDrain);
}
