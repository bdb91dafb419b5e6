//! Growable stride-addressed buffers.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the strider sub-crates. For most users, adding `strider` as a single
//! dependency is sufficient.
//!
//! Two layers share one growth policy (doubling when full, `len + 1` on
//! shrink-to-fit, positional insert/remove with gap shifting):
//!
//! - [`GrowVec<T>`](GrowVec): the typed layer. Use this when the element
//!   type is known at compile time.
//! - [`RawBuf`]: the type-erased boundary layer. Elements are opaque
//!   fixed-stride byte strings; use this to back storage for foreign or
//!   dynamically described records.
//!
//! # Quick start
//!
//! ```rust
//! use strider::prelude::*;
//!
//! let mut scores: GrowVec<u32> = GrowVec::with_capacity(1);
//! scores.push(10);
//! scores.push(30);
//! scores.insert(1, 20).unwrap();
//! assert_eq!(scores.as_slice(), &[10, 20, 30]);
//!
//! // Same contract on the raw layer, addressed in stride-sized bytes.
//! let mut raw = RawBuf::new(4).unwrap();
//! raw.push(&10u32.to_le_bytes());
//! raw.push(&30u32.to_le_bytes());
//! raw.insert(1, &20u32.to_le_bytes()).unwrap();
//! assert_eq!(raw.get(1), Some(&20u32.to_le_bytes()[..]));
//!
//! // Out-of-range positions are structured errors, not silent no-ops.
//! assert_eq!(
//!     raw.insert(3, &40u32.to_le_bytes()),
//!     Err(BufError::IndexOutOfRange { index: 3, len: 3 })
//! );
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub use strider_core::{next_capacity, BufError, DEFAULT_CAPACITY, GROWTH_FACTOR, SHRINK_SLACK};
pub use strider_raw::{ElemBytes, RawBuf};
pub use strider_vec::GrowVec;

/// Convenience re-exports for glob import.
pub mod prelude {
    pub use strider_core::BufError;
    pub use strider_raw::{ElemBytes, RawBuf};
    pub use strider_vec::GrowVec;
}
