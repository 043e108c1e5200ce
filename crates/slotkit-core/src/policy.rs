//! Growth and shrink policy for dynamically resized containers.

use crate::error::ContainerError;

/// Configuration controlling when and by how much a container resizes.
///
/// Validated at construction; all values are immutable after creation.
/// The two provided presets, [`ResizePolicy::QUEUE`] and
/// [`ResizePolicy::STACK`], differ only in what happens when the last
/// element is removed.
///
/// Growth and shrink are asymmetric: a container grows by `growth_factor`
/// when full, but only shrinks (dividing by `growth_factor`) once occupancy
/// falls to `1 / shrink_divisor`. Validation requires
/// `shrink_divisor > growth_factor`, which guarantees that a resize can never
/// be undone by the very next single insert or remove.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResizePolicy {
    /// Slots allocated when an empty, unallocated container first grows.
    ///
    /// Default: 2. Must be at least 1.
    pub initial_capacity: usize,

    /// Multiplier applied on growth, and divisor applied on shrink.
    ///
    /// Default: 2. Must be at least 2.
    pub growth_factor: usize,

    /// Shrink once `len <= capacity / shrink_divisor`.
    ///
    /// Default: 4. Must be strictly greater than `growth_factor`.
    pub shrink_divisor: usize,

    /// Release storage entirely when the last element is removed.
    pub release_when_empty: bool,
}

impl ResizePolicy {
    /// Default first allocation size.
    pub const DEFAULT_INITIAL_CAPACITY: usize = 2;

    /// Default growth multiplier.
    pub const DEFAULT_GROWTH_FACTOR: usize = 2;

    /// Default low-water divisor (shrink at 25% occupancy).
    pub const DEFAULT_SHRINK_DIVISOR: usize = 4;

    /// Queue preset: keeps its block when emptied by removal.
    pub const QUEUE: Self = Self {
        initial_capacity: Self::DEFAULT_INITIAL_CAPACITY,
        growth_factor: Self::DEFAULT_GROWTH_FACTOR,
        shrink_divisor: Self::DEFAULT_SHRINK_DIVISOR,
        release_when_empty: false,
    };

    /// Stack preset: releases its block when the last element is popped.
    pub const STACK: Self = Self {
        initial_capacity: Self::DEFAULT_INITIAL_CAPACITY,
        growth_factor: Self::DEFAULT_GROWTH_FACTOR,
        shrink_divisor: Self::DEFAULT_SHRINK_DIVISOR,
        release_when_empty: true,
    };

    /// Create and validate a policy.
    ///
    /// Returns `Err(ContainerError::InvalidPolicy)` if any constraint on the
    /// fields is violated.
    pub fn new(
        initial_capacity: usize,
        growth_factor: usize,
        shrink_divisor: usize,
        release_when_empty: bool,
    ) -> Result<Self, ContainerError> {
        let policy = Self {
            initial_capacity,
            growth_factor,
            shrink_divisor,
            release_when_empty,
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Check the field constraints.
    pub fn validate(&self) -> Result<(), ContainerError> {
        if self.initial_capacity == 0 {
            return Err(ContainerError::InvalidPolicy {
                reason: "initial_capacity must be at least 1",
            });
        }
        if self.growth_factor < 2 {
            return Err(ContainerError::InvalidPolicy {
                reason: "growth_factor must be at least 2",
            });
        }
        if self.shrink_divisor <= self.growth_factor {
            return Err(ContainerError::InvalidPolicy {
                reason: "shrink_divisor must be greater than growth_factor",
            });
        }
        Ok(())
    }

    /// Capacity to grow to before inserting into a container holding `len`
    /// elements in `capacity` slots, or `None` if there is room already.
    ///
    /// An unallocated container grows to `initial_capacity`; a full one is
    /// multiplied by `growth_factor`.
    pub fn grow_target(
        &self,
        capacity: usize,
        len: usize,
    ) -> Result<Option<usize>, ContainerError> {
        if len < capacity {
            return Ok(None);
        }
        if capacity == 0 {
            return Ok(Some(self.initial_capacity));
        }
        capacity
            .checked_mul(self.growth_factor)
            .map(Some)
            .ok_or(ContainerError::CapacityOverflow {
                requested: capacity.saturating_mul(self.growth_factor),
            })
    }

    /// Capacity to shrink to after a removal left `len` elements in
    /// `capacity` slots, or `None` if no shrink is due.
    ///
    /// `Some(0)` means the storage should be released entirely, which only
    /// happens when `release_when_empty` is set.
    pub fn shrink_target(&self, capacity: usize, len: usize) -> Option<usize> {
        if capacity == 0 {
            return None;
        }
        if len == 0 {
            return self.release_when_empty.then_some(0);
        }
        if len > capacity / self.shrink_divisor {
            return None;
        }
        // `shrink_divisor > growth_factor` keeps this above `len`; the max
        // is for hand-built policies that skipped validation.
        Some((capacity / self.growth_factor).max(len))
    }

    /// Rule applied by the queue before every insert: grow if unallocated
    /// or full, otherwise shrink if `0 < len <= capacity / shrink_divisor`.
    ///
    /// An empty but allocated container keeps its block here even when
    /// `release_when_empty` is set; release only happens on removal.
    pub fn rebalance_target(
        &self,
        capacity: usize,
        len: usize,
    ) -> Result<Option<usize>, ContainerError> {
        match self.grow_target(capacity, len)? {
            Some(target) => Ok(Some(target)),
            None if len == 0 => Ok(None),
            None => Ok(self.shrink_target(capacity, len)),
        }
    }
}

impl Default for ResizePolicy {
    fn default() -> Self {
        Self::QUEUE
    }
}
