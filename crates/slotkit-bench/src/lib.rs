//! Benchmark workloads for the slotkit containers.
//!
//! Provides deterministic operation streams shared by the Criterion
//! benches:
//!
//! - [`sawtooth`]: fill to a peak, drain to a floor, repeat (crosses every
//!   grow and shrink threshold)
//! - [`random_ops`]: seeded insert/remove mix via ChaCha8
//! - [`replay_queue`] / [`replay_stack`]: apply a stream to a container

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use slotkit_queue::CircularQueue;
use slotkit_stack::Stack;

/// One step of a benchmark workload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    /// Insert the payload.
    Insert(u64),
    /// Remove one element (no-op when empty).
    Remove,
}

/// Fill to `peak`, drain to `floor`, `cycles` times.
///
/// # Panics
///
/// Panics if `floor > peak`.
pub fn sawtooth(peak: usize, floor: usize, cycles: usize) -> Vec<Op> {
    assert!(floor <= peak, "sawtooth floor {floor} above peak {peak}");
    let mut ops = Vec::with_capacity(cycles * 2 * peak);
    let mut len = 0usize;
    let mut next = 0u64;
    for _ in 0..cycles {
        while len < peak {
            ops.push(Op::Insert(next));
            next += 1;
            len += 1;
        }
        while len > floor {
            ops.push(Op::Remove);
            len -= 1;
        }
    }
    ops
}

/// `count` seeded operations; roughly `insert_percent`% are inserts.
pub fn random_ops(seed: u64, count: usize, insert_percent: u32) -> Vec<Op> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            if rng.next_u32() % 100 < insert_percent {
                Op::Insert(rng.next_u64())
            } else {
                Op::Remove
            }
        })
        .collect()
}

/// Apply `ops` to `queue`; returns the sum of removed heads so the work
/// cannot be optimised away.
pub fn replay_queue(queue: &mut CircularQueue<u64>, ops: &[Op]) -> u64 {
    let mut checksum = 0u64;
    for op in ops {
        match *op {
            Op::Insert(v) => queue.enqueue(v),
            Op::Remove => {
                if let Some(v) = queue.take_head() {
                    checksum = checksum.wrapping_add(v);
                }
            }
        }
    }
    checksum
}

/// Apply `ops` to `stack`; returns the sum of removed tops.
pub fn replay_stack(stack: &mut Stack<u64>, ops: &[Op]) -> u64 {
    let mut checksum = 0u64;
    for op in ops {
        match *op {
            Op::Insert(v) => stack.push(v),
            Op::Remove => {
                if let Some(v) = stack.take_top() {
                    checksum = checksum.wrapping_add(v);
                }
            }
        }
    }
    checksum
}
