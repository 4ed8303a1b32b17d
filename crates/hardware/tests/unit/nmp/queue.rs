//! Transaction Queue Tests.
//!
//! Verifies admission-pass semantics: accepted requests leave, rejected ones
//! stay in their original relative order, and the read count tracks the
//! queue contents.

use nmpsim_core::common::Transaction;
use nmpsim_core::workload::nmp::TransactionQueue;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::common::mocks::engine::ScriptedEngine;

fn queue_of(txns: &[Transaction]) -> TransactionQueue {
    let mut queue = TransactionQueue::new();
    queue.extend(txns.iter().copied());
    queue
}

fn contents(queue: &TransactionQueue) -> Vec<Transaction> {
    queue.iter().copied().collect()
}

// ══════════════════════════════════════════════════════════
// 1. Basic FIFO behavior
// ══════════════════════════════════════════════════════════

#[test]
fn new_queue_is_empty() {
    let queue = TransactionQueue::new();
    assert!(queue.is_empty());
    assert_eq!(queue.len(), 0);
    assert!(!queue.has_read());
    assert_eq!(queue.front(), None);
}

#[test]
fn push_preserves_insertion_order() {
    let txns = [
        Transaction::read(3),
        Transaction::write(1),
        Transaction::read(2),
    ];
    let queue = queue_of(&txns);
    assert_eq!(contents(&queue), txns.to_vec());
    assert_eq!(queue.front(), Some(&Transaction::read(3)));
}

#[test]
fn has_read_ignores_writes() {
    let queue = queue_of(&[Transaction::write(1), Transaction::write(2)]);
    assert!(!queue.has_read());
    assert_eq!(queue.read_count(), 0);
}

#[test]
fn duplicates_are_tracked_independently() {
    let mut queue = queue_of(&[Transaction::read(7), Transaction::read(7)]);
    assert_eq!(queue.read_count(), 2);

    let mut engine = ScriptedEngine::accepting();
    let report = queue.offer(&mut engine);
    assert_eq!(report.admitted_reads, 2);
    assert_eq!(engine.submitted, vec![(7, false), (7, false)]);
}

// ══════════════════════════════════════════════════════════
// 2. Admission pass
// ══════════════════════════════════════════════════════════

#[test]
fn offer_admits_everything_when_engine_accepts() {
    let mut queue = queue_of(&[Transaction::read(1), Transaction::write(2)]);
    let mut engine = ScriptedEngine::accepting();

    let report = queue.offer(&mut engine);

    assert_eq!(report.admitted(), 2);
    assert_eq!(report.admitted_reads, 1);
    assert_eq!(report.admitted_writes, 1);
    assert_eq!(report.rejected, 0);
    assert!(queue.is_empty());
    assert!(!queue.has_read());
    assert_eq!(engine.submitted, vec![(1, false), (2, true)]);
}

#[test]
fn offer_retains_everything_when_engine_rejects() {
    let txns = [Transaction::read(1), Transaction::write(2), Transaction::read(3)];
    let mut queue = queue_of(&txns);
    let mut engine = ScriptedEngine::rejecting();

    let report = queue.offer(&mut engine);

    assert_eq!(report.admitted(), 0);
    assert_eq!(report.rejected, 3);
    assert_eq!(contents(&queue), txns.to_vec());
    assert!(engine.submitted.is_empty());
}

#[test]
fn offer_keeps_rejected_in_relative_order() {
    let mut queue = queue_of(&[
        Transaction::read(1),
        Transaction::read(2),
        Transaction::write(3),
        Transaction::read(4),
        Transaction::write(5),
    ]);
    // Odd addresses are rejected.
    let mut engine = ScriptedEngine::with_accept(|addr, _| addr % 2 == 0);

    let report = queue.offer(&mut engine);

    assert_eq!(report.admitted(), 2);
    assert_eq!(engine.submitted_addrs(), vec![2, 4]);
    assert_eq!(
        contents(&queue),
        vec![
            Transaction::read(1),
            Transaction::write(3),
            Transaction::write(5)
        ]
    );
    assert_eq!(queue.read_count(), 1);
}

#[test]
fn later_entries_may_pass_a_rejected_head() {
    let mut queue = queue_of(&[Transaction::write(100), Transaction::read(1)]);
    let mut engine = ScriptedEngine::with_accept(|_, is_write| !is_write);

    let _ = queue.offer(&mut engine);

    assert_eq!(engine.submitted, vec![(1, false)]);
    assert_eq!(contents(&queue), vec![Transaction::write(100)]);
    assert!(!queue.has_read());
}

#[test]
fn retained_entries_stay_ahead_of_later_pushes() {
    let mut queue = queue_of(&[Transaction::read(1), Transaction::read(2)]);
    let mut engine = ScriptedEngine::rejecting();
    let _ = queue.offer(&mut engine);

    queue.push(Transaction::write(9));
    assert_eq!(
        contents(&queue),
        vec![
            Transaction::read(1),
            Transaction::read(2),
            Transaction::write(9)
        ]
    );

    engine.set_accept(|_, _| true);
    let _ = queue.offer(&mut engine);
    assert_eq!(engine.submitted_addrs(), vec![1, 2, 9]);
}

#[test]
fn offer_on_empty_queue_is_a_noop() {
    let mut queue = TransactionQueue::new();
    let mut engine = ScriptedEngine::accepting();
    let report = queue.offer(&mut engine);
    assert_eq!(report.admitted(), 0);
    assert_eq!(report.rejected, 0);
    assert!(engine.submitted.is_empty());
}

// ══════════════════════════════════════════════════════════
// 3. FIFO preservation under arbitrary admit/reject outcomes
// ══════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn survivors_keep_relative_order(
        kinds in prop::collection::vec(any::<bool>(), 0..40),
        passes in prop::collection::vec(prop::collection::vec(any::<bool>(), 40), 1..6),
    ) {
        // Address = position, so every request is distinguishable.
        let txns: Vec<Transaction> = kinds
            .iter()
            .enumerate()
            .map(|(i, &is_write)| {
                if is_write { Transaction::write(i as u64) } else { Transaction::read(i as u64) }
            })
            .collect();
        let mut queue = queue_of(&txns);
        let mut expected = txns.clone();
        let mut engine = ScriptedEngine::rejecting();

        for mask in passes {
            let admit = mask.clone();
            engine.set_accept(move |addr, _| admit[addr as usize]);
            let admitted_before = engine.submitted.len();

            let report = queue.offer(&mut engine);

            let admitted: Vec<u64> = expected
                .iter()
                .filter(|t| mask[t.addr as usize])
                .map(|t| t.addr)
                .collect();
            expected.retain(|t| !mask[t.addr as usize]);

            let submitted = engine.submitted_addrs();
            prop_assert_eq!(&submitted[admitted_before..], &admitted[..]);
            prop_assert_eq!(report.admitted(), admitted.len());
            prop_assert_eq!(report.rejected, expected.len());
            prop_assert_eq!(contents(&queue), expected.clone());
            prop_assert_eq!(queue.read_count(), expected.iter().filter(|t| t.is_read()).count());
        }
    }
}
