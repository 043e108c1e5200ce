//! Growable LIFO stack over [`RawSlots`].
//!
//! The live range is always the prefix `[0, len)` of the block, so unlike
//! the queue there is no index mapping: the top is slot `len - 1`.

#![allow(unsafe_code)]

use std::fmt;
use std::mem;

use slotkit_core::{fatal, ContainerError, InsertError, RawSlots, ResizePolicy};

/// A last-in, first-out stack backed by a growable array.
///
/// Grows before a push into a full block (the first push allocates 2
/// slots), and after a pop shrinks by half once occupancy drops to a
/// quarter. Popping the last element releases the block entirely.
///
/// ```
/// use slotkit_stack::Stack;
///
/// let mut stack = Stack::new();
/// for i in 1..=5 {
///     stack.push(i);
/// }
/// assert_eq!((stack.len(), stack.capacity()), (5, 8));
/// assert_eq!(*stack.top(), 5);
///
/// while !stack.is_empty() {
///     stack.pop();
/// }
/// assert_eq!(stack.capacity(), 0);
/// ```
///
/// Like the queue, a stack is `Send` and `Sync` exactly when `T` is:
///
/// ```compile_fail
/// use std::rc::Rc;
/// use slotkit_stack::Stack;
///
/// fn assert_send<T: Send>() {}
/// assert_send::<Stack<Rc<u8>>>();
/// ```
pub struct Stack<T> {
    slots: RawSlots<T>,
    len: usize,
    policy: ResizePolicy,
}

impl<T> Stack<T> {
    /// Create an empty stack. Does not allocate.
    pub const fn new() -> Self {
        Self {
            slots: RawSlots::new(),
            len: 0,
            policy: ResizePolicy::STACK,
        }
    }

    /// Create an empty stack with exactly `capacity` slots.
    ///
    /// # Panics
    ///
    /// Panics if the capacity overflows; aborts on allocation failure.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut stack = Self::new();
        stack.reserve(capacity);
        stack
    }

    /// Create an empty stack that resizes according to `policy`.
    pub fn with_policy(policy: ResizePolicy) -> Result<Self, ContainerError> {
        policy.validate()?;
        let mut stack = Self::new();
        stack.policy = policy;
        Ok(stack)
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

    /// Whether the stack holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Push `value` onto the top.
    ///
    /// # Panics
    ///
    /// Panics if the capacity overflows; aborts on allocation failure.
    pub fn push(&mut self, value: T) {
        if let Err(err) = self.try_push(value) {
            fatal::<T>(err.error);
        }
    }

    /// Push a clone of `value` onto the top.
    pub fn push_cloned(&mut self, value: &T)
    where
        T: Clone,
    {
        self.push(value.clone());
    }

    /// Push `value`, returning it inside the error if the block could not
    /// grow.
    pub fn try_push(&mut self, value: T) -> Result<(), InsertError<T>> {
        if let Err(error) = self.prepare_push() {
            return Err(InsertError { error, value });
        }
        // SAFETY: after growing, len < capacity.
        unsafe { self.write_top(value) };
        Ok(())
    }

    /// Drop the top element. Does nothing on an empty stack.
    pub fn pop(&mut self) {
        drop(self.take_top());
    }

    /// Remove and return the top element, or `None` if empty.
    pub fn take_top(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: the slot at the old top was live; decrementing len
        // already marked it vacant.
        let value = unsafe { self.slots.read(self.len) };
        if let Some(target) = self.policy.shrink_target(self.capacity(), self.len) {
            self.shrink_to(target);
        }
        Some(value)
    }

    /// The top element.
    ///
    /// # Panics
    ///
    /// Panics if the stack is empty.
    #[track_caller]
    pub fn top(&self) -> &T {
        match self.try_top() {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }

    /// Mutable access to the top element.
    ///
    /// # Panics
    ///
    /// Panics if the stack is empty.
    #[track_caller]
    pub fn top_mut(&mut self) -> &mut T {
        let last = self.len.wrapping_sub(1);
        match self.get_mut(last) {
            Some(value) => value,
            None => {
                let err = ContainerError::Empty {
                    operation: "top_mut",
                };
                panic!("{err}")
            }
        }
    }

    /// The top element, or `Err(ContainerError::Empty)`.
    pub fn try_top(&self) -> Result<&T, ContainerError> {
        self.get(self.len.wrapping_sub(1))
            .ok_or(ContainerError::Empty { operation: "top" })
    }

    /// The element at `index`, counted from the bottom.
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        // SAFETY: every slot below len is live.
        Some(unsafe { self.slots.get(index) })
    }

    /// Mutable access to the element at `index`, counted from the bottom.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.len {
            return None;
        }
        // SAFETY: every slot below len is live.
        Some(unsafe { self.slots.get_mut(index) })
    }

    /// Grow the block to exactly `capacity` slots if it is smaller.
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

    /// Drop every element and release the block.
    pub fn clear(&mut self) {
        let mut slots = mem::take(&mut self.slots);
        let len = mem::replace(&mut self.len, 0);
        for idx in 0..len {
            // SAFETY: slots below the old len were live; each is dropped once.
            unsafe { slots.drop_in_place(idx) };
        }
    }

    /// Grow ahead of a push if the block is unallocated or full.
    fn prepare_push(&mut self) -> Result<(), ContainerError> {
        if let Some(target) = self.policy.grow_target(self.capacity(), self.len)? {
            self.relocate(target)?;
        }
        Ok(())
    }

    fn shrink_to(&mut self, target: usize) {
        if let Err(err) = self.relocate(target) {
            log::debug!(
                "stack shrink skipped: capacity {}, target {target}: {err}",
                self.capacity()
            );
        }
    }

    /// Move the live prefix into a fresh block of `capacity` slots.
    /// A capacity of 0 releases the block.
    fn relocate(&mut self, capacity: usize) -> Result<(), ContainerError> {
        debug_assert!(capacity >= self.len);
        let mut fresh = RawSlots::try_with_capacity(capacity)?;
        // SAFETY: [0, len) is live in the old block and vacant in the
        // fresh one; the old block is dropped without touching elements.
        unsafe { fresh.relocate_from(0, &self.slots, 0, self.len) };
        log::trace!(
            "stack relocate: capacity {} -> {capacity}, len {}",
            self.capacity(),
            self.len
        );
        self.slots = fresh;
        Ok(())
    }

    /// # Safety
    ///
    /// `len < capacity`.
    unsafe fn write_top(&mut self, value: T) {
        debug_assert!(self.len < self.capacity());
        // SAFETY: caller guarantees slot `len` exists and it is vacant.
        unsafe { self.slots.write(self.len, value) };
        self.len += 1;
    }
}

impl<T> Drop for Stack<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Stack<T> {
    fn clone(&self) -> Self {
        let mut stack = Self::new();
        stack.clone_from(self);
        stack
    }

    /// Replace `self` with an independent deep copy of `source`, keeping
    /// the source's capacity.
    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.policy = source.policy;
        self.reserve(source.capacity());
        for idx in 0..source.len {
            // SAFETY: idx < source.len, so the slot is live.
            let value = unsafe { source.slots.get(idx) }.clone();
            // SAFETY: capacity == source.capacity > idx == self.len.
            unsafe { self.write_top(value) };
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries((0..self.len).filter_map(|i| self.get(i)))
            .finish()
    }
}
