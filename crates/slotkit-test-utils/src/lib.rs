//! Test utilities for slotkit development.
//!
//! Provides instrumented element types that record every clone and drop
//! in a shared [`DropLedger`], so tests can assert that containers
//! construct and destroy each value exactly once:
//!
//! - [`Tracked`]: cloneable; counts clones and drops.
//! - [`MoveOnly`]: not `Clone`; counts drops only.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Shared clone/drop counters.
///
/// Cloning a ledger shares the counters, so one ledger can be handed to
/// any number of tracked values.
#[derive(Clone, Default)]
pub struct DropLedger {
    drops: Rc<Cell<usize>>,
    clones: Rc<Cell<usize>>,
}

impl DropLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tracked values dropped so far.
    pub fn drops(&self) -> usize {
        self.drops.get()
    }

    /// Number of [`Tracked`] clones made so far.
    pub fn clones(&self) -> usize {
        self.clones.get()
    }

    /// Values created through this ledger that have not been dropped yet.
    ///
    /// `created` is the number of values made via [`tracked`] and
    /// [`move_only`]; clones are added automatically.
    ///
    /// [`tracked`]: DropLedger::tracked
    /// [`move_only`]: DropLedger::move_only
    pub fn live(&self, created: usize) -> usize {
        created + self.clones() - self.drops()
    }

    pub fn tracked(&self, value: i32) -> Tracked {
        Tracked {
            value,
            ledger: self.clone(),
        }
    }

    pub fn move_only(&self, value: i32) -> MoveOnly {
        MoveOnly {
            value,
            ledger: Some(self.clone()),
        }
    }

    fn record_drop(&self) {
        self.drops.set(self.drops.get() + 1);
    }

    fn record_clone(&self) {
        self.clones.set(self.clones.get() + 1);
    }
}

impl fmt::Debug for DropLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DropLedger")
            .field("drops", &self.drops())
            .field("clones", &self.clones())
            .finish()
    }
}

/// Cloneable element that records clones and drops.
pub struct Tracked {
    value: i32,
    ledger: DropLedger,
}

impl Tracked {
    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn set(&mut self, value: i32) {
        self.value = value;
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        self.ledger.record_clone();
        Self {
            value: self.value,
            ledger: self.ledger.clone(),
        }
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.ledger.record_drop();
    }
}

impl fmt::Debug for Tracked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tracked({})", self.value)
    }
}

/// Element that can only be moved; records drops.
///
/// [`MoveOnly::disarm`] detaches the ledger so the value's eventual drop
/// is not counted, mirroring a moved-from handle.
pub struct MoveOnly {
    value: i32,
    ledger: Option<DropLedger>,
}

impl MoveOnly {
    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn disarm(mut self) -> i32 {
        self.ledger = None;
        self.value
    }
}

impl Drop for MoveOnly {
    fn drop(&mut self) {
        if let Some(ledger) = &self.ledger {
            ledger.record_drop();
        }
    }
}

impl fmt::Debug for MoveOnly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MoveOnly({})", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracked_counts_clones_and_drops() {
        let ledger = DropLedger::new();
        let a = ledger.tracked(1);
        let b = a.clone();
        assert_eq!(ledger.clones(), 1);
        drop(a);
        drop(b);
        assert_eq!(ledger.drops(), 2);
        assert_eq!(ledger.live(1), 0);
    }

    #[test]
    fn disarmed_move_only_is_not_counted() {
        let ledger = DropLedger::new();
        let m = ledger.move_only(7);
        assert_eq!(m.disarm(), 7);
        assert_eq!(ledger.drops(), 0);
    }
}
