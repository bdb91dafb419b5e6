//! Core types for the strider buffer crates.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! shared error type and the growth/shrink policy constants used by both
//! the raw (type-erased) and typed buffer layers.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod policy;

// Public re-exports for the primary API surface.
pub use error::BufError;
pub use policy::{next_capacity, DEFAULT_CAPACITY, GROWTH_FACTOR, SHRINK_SLACK};
