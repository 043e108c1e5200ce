//! Criterion micro-benchmarks for `CircularQueue` against `VecDeque`.

use std::collections::VecDeque;
use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use slotkit_bench::{random_ops, replay_queue, sawtooth, Op};
use slotkit_queue::CircularQueue;

const FILL: u64 = 10_000;

fn replay_vecdeque(queue: &mut VecDeque<u64>, ops: &[Op]) -> u64 {
    let mut checksum = 0u64;
    for op in ops {
        match *op {
            Op::Insert(v) => queue.push_back(v),
            Op::Remove => {
                if let Some(v) = queue.pop_front() {
                    checksum = checksum.wrapping_add(v);
                }
            }
        }
    }
    checksum
}

fn bench_queue_fill_drain(c: &mut Criterion) {
    c.bench_function("queue_fill_drain_10k", |b| {
        b.iter(|| {
            let mut queue = CircularQueue::new();
            for i in 0..FILL {
                queue.enqueue(i);
            }
            let mut sum = 0u64;
            while let Some(v) = queue.take_head() {
                sum = sum.wrapping_add(v);
            }
            black_box(sum);
        });
    });
    c.bench_function("vecdeque_fill_drain_10k", |b| {
        b.iter(|| {
            let mut queue = VecDeque::new();
            for i in 0..FILL {
                queue.push_back(i);
            }
            let mut sum = 0u64;
            while let Some(v) = queue.pop_front() {
                sum = sum.wrapping_add(v);
            }
            black_box(sum);
        });
    });
}

fn bench_queue_sawtooth(c: &mut Criterion) {
    let ops = sawtooth(1024, 16, 8);
    c.bench_function("queue_sawtooth", |b| {
        b.iter(|| {
            let mut queue = CircularQueue::new();
            black_box(replay_queue(&mut queue, &ops));
        });
    });
    c.bench_function("vecdeque_sawtooth", |b| {
        b.iter(|| {
            let mut queue = VecDeque::new();
            black_box(replay_vecdeque(&mut queue, &ops));
        });
    });
}

fn bench_queue_random(c: &mut Criterion) {
    let ops = random_ops(42, 20_000, 55);
    c.bench_function("queue_random_20k", |b| {
        b.iter(|| {
            let mut queue = CircularQueue::new();
            black_box(replay_queue(&mut queue, &ops));
        });
    });
    c.bench_function("vecdeque_random_20k", |b| {
        b.iter(|| {
            let mut queue = VecDeque::new();
            black_box(replay_vecdeque(&mut queue, &ops));
        });
    });
}

criterion_group!(
    benches,
    bench_queue_fill_drain,
    bench_queue_sawtooth,
    bench_queue_random
);
criterion_main!(benches);
