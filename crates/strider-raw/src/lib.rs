//! Type-erased, stride-addressed growable buffer.
//!
//! [`RawBuf`] stores any fixed-size element type through a uniform
//! byte-level protocol: the caller picks a stride (element size in bytes)
//! at construction and every element slot is exactly that wide. One buffer
//! instance serves one element type; nothing checks that the caller stays
//! consistent beyond the stride itself.
//!
//! This is the boundary layer for untyped storage. Code that knows its
//! element type at compile time should prefer `strider-vec`, which wraps
//! the same growth and shrink policy in a generic API.
//!
//! # Ownership
//!
//! A `RawBuf` is a single exclusively-owned value. Growth and shrink swap
//! the backing allocation internally; no pointer into the payload outlives
//! a mutating call, so the stale-handle bugs endemic to relocatable
//! buffers cannot be expressed against this API.
//!
//! # Threading
//!
//! There is no internal locking. Sharing a buffer across threads requires
//! external synchronization or the usual single-owner discipline; `&mut`
//! exclusivity enforces the latter within one thread.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod buf;

pub use buf::{ElemBytes, RawBuf};
pub use strider_core::BufError;
