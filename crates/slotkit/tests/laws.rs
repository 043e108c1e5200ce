//! Capacity and ordering laws for the public container API.
//!
//! Pass criteria:
//! - growth: 1..=5 inserts give capacities 2, 2, 4, 4, 8 for both containers
//! - shrink: occupancy at or below a quarter halves the block
//! - wraparound: a queue whose head has advanced past 0 still reports
//!   the correct head and tail after its tail wraps to slot 0
//! - size: len == inserts - removals-on-nonempty for any sequence

use proptest::prelude::*;
use slotkit::prelude::*;

fn queue_capacities(inserts: i32) -> Vec<usize> {
    let mut queue = CircularQueue::new();
    (1..=inserts)
        .map(|i| {
            queue.enqueue(i);
            queue.capacity()
        })
        .collect()
}

fn stack_capacities(inserts: i32) -> Vec<usize> {
    let mut stack = Stack::new();
    (1..=inserts)
        .map(|i| {
            stack.push(i);
            stack.capacity()
        })
        .collect()
}

#[test]
fn both_containers_share_growth_law() {
    assert_eq!(queue_capacities(5), [2, 2, 4, 4, 8]);
    assert_eq!(stack_capacities(5), [2, 2, 4, 4, 8]);
    assert_eq!(queue_capacities(17).last(), Some(&32));
}

#[test]
fn queue_shrinks_back_to_initial_block() {
    let mut queue = CircularQueue::new();
    for i in 0..5 {
        queue.enqueue(i);
    }
    let capacities: Vec<usize> = (0..4)
        .map(|_| {
            queue.dequeue();
            queue.capacity()
        })
        .collect();
    assert_eq!(capacities, [8, 8, 4, 2]);
    assert_eq!(*queue.head(), 4);
}

#[test]
fn stack_releases_block_when_emptied() {
    let mut stack = Stack::new();
    for i in 0..5 {
        stack.push(i);
    }
    let capacities: Vec<usize> = (0..5)
        .map(|_| {
            stack.pop();
            stack.capacity()
        })
        .collect();
    assert_eq!(capacities, [8, 8, 4, 2, 0]);
}

#[test]
fn queue_wraparound_reports_true_ends() {
    let mut queue = CircularQueue::new();
    for i in 1..=4 {
        queue.enqueue(i);
    }
    assert_eq!(queue.capacity(), 4);
    queue.dequeue();
    queue.dequeue();
    queue.enqueue(5);
    queue.enqueue(6);
    assert_eq!(queue.capacity(), 4);
    assert_eq!((*queue.head(), *queue.tail()), (3, 6));
    assert_eq!(format!("{queue:?}"), "[3, 4, 5, 6]");
}

#[test]
fn deep_copy_matches_source_at_copy_time() {
    let mut a = Stack::new();
    for i in 1..=3 {
        a.push(i);
    }
    let mut b = Stack::new();
    b.clone_from(&a);
    a.push(4);
    a.push(5);
    assert_eq!((b.len(), b.capacity(), *b.top()), (3, 4, 3));
}

#[test]
fn clear_on_empty_is_noop() {
    let mut queue = CircularQueue::<String>::new();
    queue.clear();
    assert_eq!((queue.len(), queue.capacity()), (0, 0));
    let mut stack = Stack::<String>::new();
    stack.clear();
    assert_eq!((stack.len(), stack.capacity()), (0, 0));
}

#[test]
fn custom_policy_through_facade() {
    let policy = ResizePolicy::new(8, 2, 8, true).unwrap();
    let mut queue = CircularQueue::with_policy(policy).unwrap();
    queue.enqueue(1u8);
    assert_eq!(queue.capacity(), 8);
    queue.dequeue();
    // release_when_empty applies to the queue too when asked for.
    assert_eq!(queue.capacity(), 0);
}

proptest! {
    #[test]
    fn size_law_holds(ops in proptest::collection::vec(any::<bool>(), 0..300)) {
        let mut queue = CircularQueue::new();
        let mut stack = Stack::new();
        let mut expected = 0usize;
        for (i, insert) in ops.into_iter().enumerate() {
            if insert {
                queue.enqueue(i);
                stack.push(i);
                expected += 1;
            } else {
                queue.dequeue();
                stack.pop();
                expected = expected.saturating_sub(1);
            }
            prop_assert_eq!(queue.len(), expected);
            prop_assert_eq!(stack.len(), expected);
            prop_assert!(queue.len() <= queue.capacity());
            prop_assert!(stack.len() <= stack.capacity());
        }
    }

    #[test]
    fn head_is_oldest_tail_is_newest(
        values in proptest::collection::vec(any::<u16>(), 1..100),
        drop_count in 0usize..100,
    ) {
        let mut queue = CircularQueue::new();
        for &v in &values {
            queue.enqueue(v);
        }
        let drop_count = drop_count.min(values.len() - 1);
        for _ in 0..drop_count {
            queue.dequeue();
        }
        prop_assert_eq!(*queue.head(), values[drop_count]);
        prop_assert_eq!(*queue.tail(), values[values.len() - 1]);
    }
}
