//! Growable FIFO ring buffer over [`RawSlots`].
//!
//! [`CircularQueue`] keeps its live elements in a contiguous block addressed
//! circularly: logical offset `i` lives at physical slot
//! `(head + i) % capacity`. The block is resized according to a
//! [`ResizePolicy`], applied before every insert and after every removal,
//! and every resize relocates the live elements so that `head` becomes 0.

#![allow(unsafe_code)]

use std::fmt;
use std::mem;

use slotkit_core::{fatal, ContainerError, InsertError, RawSlots, ResizePolicy};

/// A first-in, first-out queue backed by a growable ring buffer.
///
/// Elements are moved in by [`enqueue`](Self::enqueue) (or cloned in by
/// [`enqueue_cloned`](Self::enqueue_cloned)) and removed oldest-first by
/// [`dequeue`](Self::dequeue) or [`take_head`](Self::take_head). Both run in
/// amortized O(1).
///
/// With the default policy the first insert allocates 2 slots, a full
/// queue doubles, and a queue whose occupancy falls to a quarter halves:
///
/// ```
/// use slotkit_queue::CircularQueue;
///
/// let mut queue = CircularQueue::new();
/// let mut capacities = Vec::new();
/// for i in 1..=5 {
///     queue.enqueue(i);
///     capacities.push(queue.capacity());
/// }
/// assert_eq!(capacities, [2, 2, 4, 4, 8]);
/// assert_eq!((*queue.head(), *queue.tail()), (1, 5));
/// ```
///
/// # Empty queues
///
/// [`dequeue`](Self::dequeue) on an empty queue is a checked no-op.
/// [`head`](Self::head) and [`tail`](Self::tail) panic on an empty queue;
/// use [`try_head`](Self::try_head), [`try_tail`](Self::try_tail), or
/// [`get`](Self::get) to check instead.
///
/// # Thread safety
///
/// The queue is `Send` and `Sync` exactly when `T` is, so a queue of
/// `Rc` values cannot cross threads:
///
/// ```compile_fail
/// use std::rc::Rc;
/// use slotkit_queue::CircularQueue;
///
/// fn assert_send<T: Send>() {}
/// assert_send::<CircularQueue<Rc<u8>>>();
/// ```
pub struct CircularQueue<T> {
    slots: RawSlots<T>,
    /// Physical index of the oldest element. Meaningless when `len == 0`.
    head: usize,
    len: usize,
    policy: ResizePolicy,
}

impl<T> CircularQueue<T> {
    /// Create an empty queue. Does not allocate.
    pub const fn new() -> Self {
        Self {
            slots: RawSlots::new(),
            head: 0,
            len: 0,
            policy: ResizePolicy::QUEUE,
        }
    }

    /// Create an empty queue with exactly `capacity` slots.
    ///
    /// # Panics
    ///
    /// Panics if the capacity overflows; aborts on allocation failure.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut queue = Self::new();
        queue.reserve(capacity);
        queue
    }

    /// Create an empty queue that resizes according to `policy`.
    ///
    /// Returns `Err(ContainerError::InvalidPolicy)` if the policy does not
    /// validate.
    pub fn with_policy(policy: ResizePolicy) -> Result<Self, ContainerError> {
        policy.validate()?;
        let mut queue = Self::new();
        queue.policy = policy;
        Ok(queue)
    }

    /// The resize policy in force.
    pub fn policy(&self) -> &ResizePolicy {
        &self.policy
    }

    /// Number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of allocated slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Whether the queue holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Physical slot of logical offset `offset`.
    ///
    /// Only valid while `capacity > 0`. Both operands are below
    /// `capacity <= isize::MAX`, so the sum cannot overflow.
    #[inline]
    fn physical(&self, offset: usize) -> usize {
        (self.head + offset) % self.slots.capacity()
    }

    /// Append `value` at the tail.
    ///
    /// Grows the buffer first if it is unallocated or full. Any resize
    /// relocates every element, which is why the borrow checker forbids
    /// holding references into the queue across this call.
    ///
    /// # Panics
    ///
    /// Panics if the capacity overflows; aborts on allocation failure.
    pub fn enqueue(&mut self, value: T) {
        if let Err(err) = self.try_enqueue(value) {
            fatal::<T>(err.error);
        }
    }

    /// Append a clone of `value` at the tail.
    pub fn enqueue_cloned(&mut self, value: &T)
    where
        T: Clone,
    {
        self.enqueue(value.clone());
    }

    /// Append `value` at the tail, returning it inside the error if the
    /// buffer could not grow.
    pub fn try_enqueue(&mut self, value: T) -> Result<(), InsertError<T>> {
        if let Err(error) = self.prepare_insert() {
            return Err(InsertError { error, value });
        }
        // SAFETY: prepare_insert guarantees len < capacity.
        unsafe { self.write_back(value) };
        Ok(())
    }

    /// Remove the oldest element and drop it.
    ///
    /// Does nothing on an empty queue. The removed value is not returned;
    /// read it with [`head`](Self::head) first, or use
    /// [`take_head`](Self::take_head).
    pub fn dequeue(&mut self) {
        // The element is dropped only after the queue's bookkeeping and
        // any shrink have completed.
        drop(self.take_head());
    }

    /// Remove and return the oldest element, or `None` if empty.
    ///
    /// Applies the same index advance and shrink policy as
    /// [`dequeue`](Self::dequeue).
    pub fn take_head(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        // SAFETY: len > 0, so the head slot holds a live value; it is
        // vacated by advancing head below.
        let value = unsafe { self.slots.read(self.head) };
        self.head = (self.head + 1) % self.slots.capacity();
        self.len -= 1;
        if let Some(target) = self.policy.shrink_target(self.capacity(), self.len) {
            self.shrink_to(target);
        }
        Some(value)
    }

    /// The oldest element.
    ///
    /// # Panics
    ///
    /// Panics if the queue is empty.
    #[track_caller]
    pub fn head(&self) -> &T {
        match self.try_head() {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }

    /// Mutable access to the oldest element.
    ///
    /// # Panics
    ///
    /// Panics if the queue is empty.
    #[track_caller]
    pub fn head_mut(&mut self) -> &mut T {
        match self.get_mut(0) {
            Some(value) => value,
            None => {
                let err = ContainerError::Empty {
                    operation: "head_mut",
                };
                panic!("{err}")
            }
        }
    }

    /// The newest element.
    ///
    /// # Panics
    ///
    /// Panics if the queue is empty.
    #[track_caller]
    pub fn tail(&self) -> &T {
        match self.try_tail() {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }

    /// Mutable access to the newest element.
    ///
    /// # Panics
    ///
    /// Panics if the queue is empty.
    #[track_caller]
    pub fn tail_mut(&mut self) -> &mut T {
        // Wraps to usize::MAX when empty, which get_mut rejects.
        let last = self.len.wrapping_sub(1);
        match self.get_mut(last) {
            Some(value) => value,
            None => {
                let err = ContainerError::Empty {
                    operation: "tail_mut",
                };
                panic!("{err}")
            }
        }
    }

    /// The oldest element, or `Err(ContainerError::Empty)`.
    pub fn try_head(&self) -> Result<&T, ContainerError> {
        self.get(0)
            .ok_or(ContainerError::Empty { operation: "head" })
    }

    /// The newest element, or `Err(ContainerError::Empty)`.
    pub fn try_tail(&self) -> Result<&T, ContainerError> {
        self.len
            .checked_sub(1)
            .and_then(|i| self.get(i))
            .ok_or(ContainerError::Empty { operation: "tail" })
    }

    /// The element at logical offset `index` (0 is the head).
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        // SAFETY: index < len, so the mapped slot is live.
        Some(unsafe { self.slots.get(self.physical(index)) })
    }

    /// Mutable access to the element at logical offset `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.len {
            return None;
        }
        let idx = self.physical(index);
        // SAFETY: index < len, so the mapped slot is live.
        Some(unsafe { self.slots.get_mut(idx) })
    }

    /// Grow the buffer to exactly `capacity` slots if it is smaller.
    ///
    /// Unlike `Vec::reserve`, the argument is a total slot count, not an
    /// additional one. Length and element order are unchanged.
    ///
    /// # Panics
    ///
    /// Panics if the capacity overflows; aborts on allocation failure.
    pub fn reserve(&mut self, capacity: usize) {
        if let Err(err) = self.try_reserve(capacity) {
            fatal::<T>(err);
        }
    }

    /// Fallible [`reserve`](Self::reserve).
    pub fn try_reserve(&mut self, capacity: usize) -> Result<(), ContainerError> {
        if capacity <= self.capacity() {
            return Ok(());
        }
        self.relocate(capacity)
    }

    /// Drop every element and release the buffer.
    ///
    /// Leaves the queue with `len() == 0` and `capacity() == 0`. Calling it
    /// on an already-empty queue is a no-op.
    pub fn clear(&mut self) {
        let mut slots = mem::take(&mut self.slots);
        let (head, len) = (self.head, self.len);
        self.head = 0;
        self.len = 0;
        // The queue is already empty here, so a panicking element drop
        // leaks the remaining elements rather than double-dropping them.
        for offset in 0..len {
            let idx = (head + offset) % slots.capacity();
            // SAFETY: offsets below the old len mapped to live slots, and
            // each is dropped exactly once.
            unsafe { slots.drop_in_place(idx) };
        }
    }

    /// Apply the resize policy ahead of an insert.
    ///
    /// On success there is at least one vacant slot at the tail.
    fn prepare_insert(&mut self) -> Result<(), ContainerError> {
        let capacity = self.capacity();
        match self.policy.rebalance_target(capacity, self.len)? {
            Some(target) if target > capacity => self.relocate(target)?,
            Some(target) => self.shrink_to(target),
            None => {}
        }
        // A custom policy may shrink to exactly `len`.
        if let Some(target) = self.policy.grow_target(self.capacity(), self.len)? {
            self.relocate(target)?;
        }
        Ok(())
    }

    /// Shrink is best-effort: keep the current block if the smaller
    /// allocation fails.
    fn shrink_to(&mut self, target: usize) {
        if let Err(err) = self.relocate(target) {
            log::debug!(
                "queue shrink skipped: capacity {}, target {target}: {err}",
                self.capacity()
            );
        }
    }

    /// Move every live element, in logical order, into a fresh block of
    /// `capacity` slots starting at physical index 0.
    fn relocate(&mut self, capacity: usize) -> Result<(), ContainerError> {
        debug_assert!(capacity >= self.len);
        let mut fresh = RawSlots::try_with_capacity(capacity)?;
        if self.len > 0 {
            // The live range is at most two runs: [head, old_cap) then [0, rest).
            let first = self.len.min(self.slots.capacity() - self.head);
            // SAFETY: both runs are live in the old block and land in
            // distinct vacant slots [0, len) of the fresh one. The old
            // block is then dropped without touching its elements.
            unsafe {
                fresh.relocate_from(0, &self.slots, self.head, first);
                fresh.relocate_from(first, &self.slots, 0, self.len - first);
            }
        }
        log::trace!(
            "queue relocate: capacity {} -> {capacity}, len {}",
            self.capacity(),
            self.len
        );
        self.slots = fresh;
        self.head = 0;
        Ok(())
    }

    /// Construct `value` in the slot after the tail.
    ///
    /// # Safety
    ///
    /// `len < capacity`.
    unsafe fn write_back(&mut self, value: T) {
        debug_assert!(self.len < self.capacity());
        let idx = self.physical(self.len);
        // SAFETY: caller guarantees a vacant slot exists; slots outside the
        // live logical range hold no value.
        unsafe { self.slots.write(idx, value) };
        self.len += 1;
    }
}

impl<T> Drop for CircularQueue<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for CircularQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for CircularQueue<T> {
    fn clone(&self) -> Self {
        let mut queue = Self::new();
        queue.clone_from(self);
        queue
    }

    /// Replace `self` with an independent deep copy of `source`.
    ///
    /// The copy has the same length, capacity, policy, and logical order
    /// as `source`; its elements start at physical index 0.
    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.policy = source.policy;
        self.reserve(source.capacity());
        for offset in 0..source.len {
            // SAFETY: offset < source.len, so the mapped slot is live.
            let value = unsafe { source.slots.get(source.physical(offset)) }.clone();
            // SAFETY: capacity equals source.capacity >= source.len > offset
            // = self.len. Insert directly so the policy cannot shrink the
            // copy below the source's capacity.
            unsafe { self.write_back(value) };
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for CircularQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries((0..self.len).filter_map(|i| self.get(i)))
            .finish()
    }
}
