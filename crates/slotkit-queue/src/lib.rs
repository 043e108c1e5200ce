//! Growable ring-buffer queue for slotkit.
//!
//! [`CircularQueue<T>`] stores its elements in a single contiguous
//! [`RawSlots`](slotkit_core::RawSlots) block addressed circularly, and
//! constructs and drops each element explicitly at the exact transitions
//! of enqueue, dequeue, clear, and drop. It never requires `T: Default`
//! or `T: Clone` except for the cloning operations themselves.
//!
//! The queue is single-threaded: it has no internal synchronization and is
//! `Send`/`Sync` exactly when `T` is.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod queue;

pub use queue::CircularQueue;
pub use slotkit_core::{ContainerError, InsertError, ResizePolicy};
