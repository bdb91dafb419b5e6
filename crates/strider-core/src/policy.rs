//! Growth and shrink policy shared by the raw and typed buffers.
//!
//! Both layers must be observably identical in when and how far they
//! reallocate, so the policy lives here rather than in either crate.

/// Initial capacity (in elements) used by the `new` constructors.
pub const DEFAULT_CAPACITY: usize = 1;

/// Multiplier applied to capacity when a full buffer must grow.
pub const GROWTH_FACTOR: usize = 2;

/// Spare slots retained beyond `len` by shrink-to-fit.
///
/// The spare slot keeps the "is full" check from re-triggering growth on
/// the very next push after a shrink.
pub const SHRINK_SLACK: usize = 1;

/// The capacity a buffer grows to from `capacity`.
///
/// Zero-capacity buffers are treated as capacity 1 so the first growth
/// always produces room for at least one element. Saturates at
/// `usize::MAX` rather than wrapping; an allocation that large aborts in
/// the allocator long before the arithmetic matters.
pub fn next_capacity(capacity: usize) -> usize {
    capacity.max(1).saturating_mul(GROWTH_FACTOR)
}
