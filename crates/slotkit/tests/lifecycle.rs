//! Element lifecycle across both containers.
//!
//! Every value must be constructed once and dropped once, no matter how
//! many times the backing block is grown, shrunk, or released in between.
//! Instrumented elements from `slotkit-test-utils` record each clone and
//! drop so the tests can check exact counts.

use slotkit::prelude::*;
use slotkit_test_utils::DropLedger;

const CHURN_ROUNDS: i32 = 64;

#[test]
fn queue_clone_insert_drops_temporary_then_element() {
    let ledger = DropLedger::new();
    {
        let mut queue = CircularQueue::new();
        queue.enqueue_cloned(&ledger.tracked(7));
        // The temporary argument is gone; the queued clone is alive.
        assert_eq!(ledger.drops(), 1);
        assert_eq!(ledger.clones(), 1);
    }
    assert_eq!(ledger.drops(), 2);
}

#[test]
fn queue_take_head_hands_ownership_to_caller() {
    let ledger = DropLedger::new();
    let mut queue = CircularQueue::new();
    for i in 0..CHURN_ROUNDS {
        queue.enqueue(ledger.move_only(i));
    }
    assert_eq!(ledger.drops(), 0);
    while let Some(value) = queue.take_head() {
        // Disarmed values are not counted, so only dequeue() drops count.
        value.disarm();
        queue.dequeue();
    }
    assert_eq!(ledger.drops(), (CHURN_ROUNDS / 2) as usize);
    assert!(queue.is_empty());
}

#[test]
fn stack_take_top_hands_ownership_to_caller() {
    let ledger = DropLedger::new();
    let mut stack = Stack::new();
    for i in 0..CHURN_ROUNDS {
        stack.push(ledger.move_only(i));
    }
    assert_eq!(ledger.drops(), 0);
    let mut expected = CHURN_ROUNDS;
    while let Some(value) = stack.take_top() {
        expected -= 1;
        assert_eq!(value.value(), expected);
        value.disarm();
        stack.pop();
        expected -= 1;
    }
    assert_eq!(ledger.drops(), (CHURN_ROUNDS / 2) as usize);
    assert_eq!(stack.capacity(), 0);
}

#[test]
fn stack_move_insert_never_clones() {
    let ledger = DropLedger::new();
    let mut stack = Stack::new();
    for i in 0..CHURN_ROUNDS {
        stack.push(ledger.tracked(i));
    }
    assert_eq!(ledger.clones(), 0);
    assert_eq!(ledger.drops(), 0);
    drop(stack);
    assert_eq!(ledger.drops(), CHURN_ROUNDS as usize);
}

#[test]
fn sawtooth_churn_drops_each_value_once() {
    let ledger = DropLedger::new();
    let mut created = 0;
    let mut queue = CircularQueue::new();
    let mut stack = Stack::new();

    // Repeatedly grow to 3 * round, then drain to round, crossing every
    // grow and shrink threshold many times.
    for round in 1..=8 {
        for i in 0..3 * round {
            queue.enqueue(ledger.tracked(i));
            stack.push(ledger.tracked(i));
            created += 2;
        }
        while queue.len() > round as usize {
            queue.dequeue();
            stack.pop();
        }
        assert_eq!(ledger.live(created), queue.len() + stack.len());
    }

    queue.clear();
    stack.clear();
    assert_eq!(ledger.drops(), created);
    assert_eq!((queue.capacity(), stack.capacity()), (0, 0));
}

#[test]
fn clone_from_drops_previous_contents() {
    let ledger = DropLedger::new();
    let mut source = CircularQueue::new();
    for i in 0..3 {
        source.enqueue(ledger.tracked(i));
    }
    let mut target = CircularQueue::new();
    for i in 0..5 {
        target.enqueue(ledger.tracked(i));
    }

    target.clone_from(&source);
    assert_eq!(ledger.drops(), 5);
    assert_eq!(ledger.clones(), 3);
    assert_eq!(target.len(), 3);

    drop(source);
    drop(target);
    assert_eq!(ledger.drops(), 11);
}

#[test]
fn stack_clone_is_independent() {
    let ledger = DropLedger::new();
    let mut a = Stack::new();
    a.push(ledger.tracked(1));
    a.push(ledger.tracked(2));

    let b = a.clone();
    a.top_mut().set(99);
    a.pop();

    assert_eq!(b.top().value(), 2);
    assert_eq!(b.len(), 2);
    assert_eq!(ledger.drops(), 1);
}

#[test]
fn boxed_values_survive_relocation() {
    let mut queue = CircularQueue::new();
    let mut stack = Stack::new();
    for i in 0..100 {
        queue.enqueue(Box::new(i));
        stack.push(Box::new(i));
    }
    for expected in 0..90 {
        assert_eq!(**queue.head(), expected);
        queue.dequeue();
        assert_eq!(**stack.top(), 99 - expected);
        stack.pop();
    }
    assert_eq!(queue.len(), 10);
    assert_eq!(stack.len(), 10);
}

#[test]
fn try_enqueue_success_path_consumes_value() {
    let mut queue = CircularQueue::new();
    assert!(queue.try_enqueue(String::from("a")).is_ok());
    let mut stack = Stack::new();
    assert!(stack.try_push(String::from("b")).is_ok());
    assert_eq!((queue.head().as_str(), stack.top().as_str()), ("a", "b"));
}
