//! slotkit: growable containers with explicit element lifecycle.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all slotkit sub-crates. For most users, adding `slotkit` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use slotkit::prelude::*;
//!
//! let mut jobs = CircularQueue::new();
//! jobs.enqueue("parse");
//! jobs.enqueue("check");
//! assert_eq!(*jobs.head(), "parse");
//! jobs.dequeue();
//! assert_eq!(*jobs.head(), "check");
//!
//! let mut frames = Stack::new();
//! frames.push(1);
//! frames.push(2);
//! assert_eq!(*frames.top(), 2);
//!
//! // Accessors on empty containers have checked variants.
//! let empty: CircularQueue<u8> = CircularQueue::new();
//! assert!(matches!(empty.try_head(), Err(ContainerError::Empty { .. })));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`primitives`] | `slotkit-core` | `RawSlots`, `ResizePolicy`, error types |
//! | [`queue`] | `slotkit-queue` | `CircularQueue` |
//! | [`stack`] | `slotkit-stack` | `Stack` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Raw slot storage, resize policy, and errors (`slotkit-core`).
///
/// Most users only need [`primitives::ResizePolicy`] and the error types, which
/// are also in the [`prelude`].
pub use slotkit_core as primitives;

/// Ring-buffer FIFO queue (`slotkit-queue`).
pub use slotkit_queue as queue;

/// Array-backed LIFO stack (`slotkit-stack`).
pub use slotkit_stack as stack;

/// Common imports for typical slotkit usage.
///
/// ```rust
/// use slotkit::prelude::*;
/// ```
pub mod prelude {
    // Containers
    pub use slotkit_queue::CircularQueue;
    pub use slotkit_stack::Stack;

    // Configuration and errors
    pub use slotkit_core::{ContainerError, InsertError, ResizePolicy};
}
