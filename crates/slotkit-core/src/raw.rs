//! Typed slots over an untyped, uninitialized allocation.
//!
//! [`RawSlots<T>`] owns a block of memory sized for exactly `capacity`
//! values of `T` but never tracks which slots are live. Containers layered
//! on top decide when a slot is written, read out, or dropped; this type
//! only guarantees the memory itself is allocated and released exactly once.
//!
//! Every slot primitive is `unsafe` with a `# Safety` contract. Callers
//! must pair each [`write`](RawSlots::write) with exactly one
//! [`read`](RawSlots::read), [`drop_in_place`](RawSlots::drop_in_place), or
//! [`relocate_from`](RawSlots::relocate_from) before the slot is reused or
//! the block is dropped.

#![allow(unsafe_code)]

use std::alloc::{self, Layout};
use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ptr::{self, NonNull};

use crate::error::ContainerError;

/// Uninitialized storage for `capacity` values of `T`.
///
/// Dropping a `RawSlots` releases the memory without running any element
/// destructor. Zero-sized types never allocate; their capacity is tracked
/// logically so growth arithmetic behaves the same as for sized types.
pub struct RawSlots<T> {
    ptr: NonNull<T>,
    capacity: usize,
    _owns: PhantomData<T>,
}

// SAFETY: RawSlots uniquely owns its allocation, like Box<[MaybeUninit<T>]>.
unsafe impl<T: Send> Send for RawSlots<T> {}
// SAFETY: shared access only hands out &T.
unsafe impl<T: Sync> Sync for RawSlots<T> {}

impl<T> RawSlots<T> {
    /// An empty block. Does not allocate.
    pub const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            capacity: 0,
            _owns: PhantomData,
        }
    }

    /// Allocate uninitialized storage for exactly `capacity` slots.
    ///
    /// Returns `Err(ContainerError::CapacityOverflow)` if the slot count or
    /// byte size exceeds `isize::MAX`, or
    /// `Err(ContainerError::AllocationFailed)` if the allocator returns null.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, ContainerError> {
        if capacity == 0 {
            return Ok(Self::new());
        }
        let layout = Self::layout_for(capacity)?;
        if layout.size() == 0 {
            return Ok(Self {
                ptr: NonNull::dangling(),
                capacity,
                _owns: PhantomData,
            });
        }
        // SAFETY: layout has non-zero size.
        let raw = unsafe { alloc::alloc(layout) };
        let ptr = NonNull::new(raw.cast::<T>()).ok_or(ContainerError::AllocationFailed {
            bytes: layout.size(),
        })?;
        Ok(Self {
            ptr,
            capacity,
            _owns: PhantomData,
        })
    }

    /// Layout of a block holding `capacity` slots.
    ///
    /// Also caps zero-sized types at `isize::MAX` slots so that
    /// `head + offset` index arithmetic can never overflow `usize`.
    pub fn layout_for(capacity: usize) -> Result<Layout, ContainerError> {
        if capacity > isize::MAX as usize {
            return Err(ContainerError::CapacityOverflow {
                requested: capacity,
            });
        }
        Layout::array::<T>(capacity).map_err(|_| ContainerError::CapacityOverflow {
            requested: capacity,
        })
    }

    /// Number of slots in this block.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Size of the backing allocation in bytes (0 for unallocated blocks
    /// and zero-sized types).
    pub fn memory_bytes(&self) -> usize {
        self.capacity * mem::size_of::<T>()
    }

    #[inline]
    fn slot(&self, idx: usize) -> *mut T {
        debug_assert!(
            idx < self.capacity,
            "slot {idx} out of bounds ({})",
            self.capacity
        );
        // SAFETY: idx < capacity, so the offset stays inside the allocation
        // (or is a no-op offset for zero-sized T).
        unsafe { self.ptr.as_ptr().add(idx) }
    }

    /// Construct a value in slot `idx`.
    ///
    /// # Safety
    ///
    /// `idx < capacity()` and the slot must not hold a live value (it would
    /// be overwritten without being dropped).
    #[inline]
    pub unsafe fn write(&mut self, idx: usize, value: T) {
        // SAFETY: caller guarantees idx is in bounds and vacant.
        unsafe { self.slot(idx).write(value) }
    }

    /// Move the value out of slot `idx`, leaving the slot vacant.
    ///
    /// # Safety
    ///
    /// `idx < capacity()` and the slot must hold a live value. After this
    /// call the slot is vacant and must not be read or dropped again.
    #[inline]
    pub unsafe fn read(&mut self, idx: usize) -> T {
        // SAFETY: caller guarantees idx is in bounds and live.
        unsafe { self.slot(idx).read() }
    }

    /// Borrow the value in slot `idx`.
    ///
    /// # Safety
    ///
    /// `idx < capacity()` and the slot must hold a live value.
    #[inline]
    pub unsafe fn get(&self, idx: usize) -> &T {
        // SAFETY: caller guarantees idx is in bounds and live.
        unsafe { &*self.slot(idx) }
    }

    /// Mutably borrow the value in slot `idx`.
    ///
    /// # Safety
    ///
    /// `idx < capacity()` and the slot must hold a live value.
    #[inline]
    pub unsafe fn get_mut(&mut self, idx: usize) -> &mut T {
        // SAFETY: caller guarantees idx is in bounds and live.
        unsafe { &mut *self.slot(idx) }
    }

    /// Drop the value in slot `idx`, leaving the slot vacant.
    ///
    /// # Safety
    ///
    /// `idx < capacity()` and the slot must hold a live value.
    #[inline]
    pub unsafe fn drop_in_place(&mut self, idx: usize) {
        // SAFETY: caller guarantees idx is in bounds and live.
        unsafe { ptr::drop_in_place(self.slot(idx)) }
    }

    /// Bitwise-move `count` contiguous live values from `src[src_idx..]`
    /// into vacant slots `self[dst_idx..]`.
    ///
    /// The source slots become vacant: their values now live in `self` and
    /// must not be dropped through `src`.
    ///
    /// # Safety
    ///
    /// Both ranges must be in bounds, every source slot must be live, and
    /// every destination slot must be vacant.
    pub unsafe fn relocate_from(
        &mut self,
        dst_idx: usize,
        src: &RawSlots<T>,
        src_idx: usize,
        count: usize,
    ) {
        if count == 0 {
            return;
        }
        debug_assert!(dst_idx + count <= self.capacity);
        debug_assert!(src_idx + count <= src.capacity);
        // SAFETY: distinct RawSlots never share an allocation (the zero-sized
        // case copies zero bytes), and the caller guarantees both ranges
        // are in bounds.
        unsafe { ptr::copy_nonoverlapping(src.slot(src_idx), self.slot(dst_idx), count) }
    }
}

impl<T> Drop for RawSlots<T> {
    fn drop(&mut self) {
        if self.memory_bytes() == 0 {
            return;
        }
        // Layout was valid when the block was allocated with this capacity.
        if let Ok(layout) = Self::layout_for(self.capacity) {
            // SAFETY: ptr was returned by alloc::alloc with this layout.
            unsafe { alloc::dealloc(self.ptr.as_ptr().cast::<u8>(), layout) }
        }
    }
}

impl<T> Default for RawSlots<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for RawSlots<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawSlots")
            .field("capacity", &self.capacity)
            .field("bytes", &self.memory_bytes())
            .finish()
    }
}
