//! Shared primitives for slotkit containers.
//!
//! Provides raw slot storage, the growth/shrink policy, and the error
//! types used by `slotkit-queue` and `slotkit-stack`. All `unsafe` code
//! in this crate lives in `raw.rs`.
//!
//! # Architecture
//!
//! ```text
//! CircularQueue<T> / Stack<T>   (track which slots are live)
//! ├── RawSlots<T>               (uninitialized block, alloc/dealloc only)
//! └── ResizePolicy              (when to grow, shrink, or release)
//! ```
//!
//! A container asks its [`ResizePolicy`] for a target capacity, allocates
//! a fresh [`RawSlots`] of that size, relocates its live values into it
//! in logical order, and lets the old block drop. Dropping a block never
//! runs element destructors; only the owning container knows which slots
//! hold live values.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod error;
pub mod policy;
pub mod raw;

// Public re-exports for the primary API surface.
pub use error::{ContainerError, InsertError};
pub use policy::ResizePolicy;
pub use raw::RawSlots;

/// Turn a failed reservation into the fatal outcome the infallible
/// container API promises.
///
/// Allocator failures are routed to [`std::alloc::handle_alloc_error`];
/// everything else panics with the error message.
#[track_caller]
pub fn fatal<T>(err: ContainerError) -> ! {
    if let ContainerError::AllocationFailed { bytes } = err {
        if let Ok(layout) = std::alloc::Layout::from_size_align(bytes, std::mem::align_of::<T>()) {
            std::alloc::handle_alloc_error(layout);
        }
    }
    panic!("{err}");
}
