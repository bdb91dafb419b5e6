//! Typed growable vector with the strider growth and shrink policy.
//!
//! [`GrowVec`] is the compile-time-generic counterpart of the raw
//! byte-level buffer in `strider-raw`: the same doubling growth, the same
//! `len + 1` shrink-to-fit, the same positional insert/remove contract,
//! with the element type known statically instead of described by a
//! caller-supplied stride. Code that does not have to interoperate with
//! untyped memory should use this layer.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod vec;

pub use strider_core::BufError;
pub use vec::GrowVec;
