//! Error types for buffer operations.

use std::error::Error;
use std::fmt;

/// Errors that can occur during buffer operations.
///
/// Allocation failure is deliberately absent: running out of memory aborts
/// through the global allocator rather than returning a partially valid
/// buffer. Stale-handle use has no variant either — mutators take
/// `&mut self` and no payload pointer is ever exposed, so the condition
/// cannot be expressed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BufError {
    /// A positional insert or remove was given an index at or past the
    /// current length.
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The buffer length at the time of the call.
        len: usize,
    },
    /// A tail removal was attempted on a buffer with no elements.
    Empty,
    /// A buffer was constructed with a zero element stride.
    ZeroStride,
}

impl fmt::Display for BufError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for buffer of length {len}")
            }
            Self::Empty => write!(f, "remove from empty buffer"),
            Self::ZeroStride => write!(f, "element stride must be non-zero"),
        }
    }
}

impl Error for BufError {}
