//! Shared setup helpers for the strider benchmarks.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

use strider_raw::RawBuf;
use strider_vec::GrowVec;

/// Stride used by the raw-buffer benchmarks: one `u64` per element.
pub const BENCH_STRIDE: usize = 8;

/// A raw buffer pre-filled with `n` sequential `u64` elements.
pub fn filled_raw(n: usize) -> RawBuf {
    let mut buf = RawBuf::with_capacity(n, BENCH_STRIDE).expect("non-zero stride");
    for i in 0..n as u64 {
        buf.push(&i.to_le_bytes());
    }
    buf
}

/// A typed vector pre-filled with `n` sequential `u64` elements.
pub fn filled_vec(n: usize) -> GrowVec<u64> {
    let mut vec = GrowVec::with_capacity(n);
    for i in 0..n as u64 {
        vec.push(i);
    }
    vec
}
