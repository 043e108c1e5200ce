//! Container error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during container operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContainerError {
    /// The requested slot count cannot be represented as an allocation
    /// (more than `isize::MAX` slots or bytes).
    CapacityOverflow {
        /// Number of slots requested.
        requested: usize,
    },
    /// The global allocator returned null.
    AllocationFailed {
        /// Size of the rejected allocation in bytes.
        bytes: usize,
    },
    /// An accessor was called on a container with no live elements.
    Empty {
        /// Name of the operation that needed an element.
        operation: &'static str,
    },
    /// A [`ResizePolicy`](crate::ResizePolicy) failed validation.
    InvalidPolicy {
        /// Which constraint was violated.
        reason: &'static str,
    },
}

impl fmt::Display for ContainerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityOverflow { requested } => {
                write!(f, "capacity overflow: {requested} slots requested")
            }
            Self::AllocationFailed { bytes } => {
                write!(f, "allocation of {bytes} bytes failed")
            }
            Self::Empty { operation } => {
                write!(f, "{operation}() called on an empty container")
            }
            Self::InvalidPolicy { reason } => {
                write!(f, "invalid resize policy: {reason}")
            }
        }
    }
}

impl Error for ContainerError {}

/// A failed insertion, carrying the value that could not be stored.
///
/// Returned by `try_enqueue` and `try_push` so that a rejected value is
/// handed back to the caller instead of being dropped.
#[derive(Clone, PartialEq, Eq)]
pub struct InsertError<T> {
    /// Why the insertion failed.
    pub error: ContainerError,
    /// The value that was not inserted.
    pub value: T,
}

impl<T> InsertError<T> {
    /// Recover the rejected value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

// Manual impls so that `T` does not need `Debug`/`Display`.
impl<T> fmt::Debug for InsertError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InsertError")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<T> fmt::Display for InsertError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "insert rejected: {}", self.error)
    }
}

impl<T> Error for InsertError<T> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.error)
    }
}
