//! Growable array-backed stack for slotkit.
//!
//! [`Stack<T>`] shares its allocation discipline with
//! `slotkit-queue`: a single [`RawSlots`](slotkit_core::RawSlots) block,
//! explicit construction on push and destruction on pop, and resizing by
//! relocating live values into a fresh block. Its live range is always the
//! prefix `[0, len)`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod stack;

pub use slotkit_core::{ContainerError, InsertError, ResizePolicy};
pub use stack::Stack;
