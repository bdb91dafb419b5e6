//! The type-erased growable buffer.

use std::fmt;

use smallvec::SmallVec;
use strider_core::{next_capacity, BufError, DEFAULT_CAPACITY, SHRINK_SLACK};

/// Removed element bytes returned by the by-value removal methods.
///
/// Inline for strides up to 16 bytes; larger strides spill to the heap.
pub type ElemBytes = SmallVec<[u8; 16]>;

/// A growable buffer of fixed-stride, type-erased elements.
///
/// The payload is always exactly `capacity * stride` bytes and is
/// zero-initialized, so every slot — populated or not — is readable
/// without undefined behavior. The logical content is the first `len`
/// slots; slots between `len` and `capacity` are spare room for future
/// pushes.
///
/// Growth doubles the capacity (`max(1, capacity) * 2`) and happens only
/// when a push or insert finds the buffer full. [`RawBuf::shrink_to_fit`]
/// is the only path that reduces capacity, and it is never triggered
/// automatically.
pub struct RawBuf {
    /// Payload. Always exactly `capacity * stride` bytes.
    data: Vec<u8>,
    /// Number of element slots the payload can hold.
    capacity: usize,
    /// Number of populated slots. Always `<= capacity`.
    len: usize,
    /// Byte size of one element. Fixed for the lifetime of the buffer.
    stride: usize,
}

/// Payload size in bytes for a capacity/stride pair.
///
/// # Panics
///
/// Panics if the product overflows `usize`. A payload that large cannot
/// be allocated anyway, so this is the same hard failure as running out
/// of memory, surfaced before the allocator sees a wrapped size.
fn payload_bytes(capacity: usize, stride: usize) -> usize {
    capacity
        .checked_mul(stride)
        .expect("buffer payload size overflows usize")
}

impl RawBuf {
    /// Create a buffer with the default initial capacity of
    /// [`DEFAULT_CAPACITY`] elements.
    ///
    /// Returns [`BufError::ZeroStride`] if `stride` is zero.
    pub fn new(stride: usize) -> Result<Self, BufError> {
        Self::with_capacity(DEFAULT_CAPACITY, stride)
    }

    /// Create a buffer with room for `capacity` elements of `stride`
    /// bytes each.
    ///
    /// A capacity of zero is legal; the first push simply grows first.
    /// Returns [`BufError::ZeroStride`] if `stride` is zero. Allocation
    /// failure aborts through the global allocator rather than returning
    /// an error.
    pub fn with_capacity(capacity: usize, stride: usize) -> Result<Self, BufError> {
        if stride == 0 {
            return Err(BufError::ZeroStride);
        }
        Ok(Self {
            data: vec![0; payload_bytes(capacity, stride)],
            capacity,
            len: 0,
            stride,
        })
    }

    /// Number of elements the payload can currently hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of populated elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Byte size of one element.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// The populated prefix of the payload: `len * stride` bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.len * self.stride]
    }

    /// Overwrite the length without touching any payload bytes.
    ///
    /// This is the escape hatch behind [`RawBuf::clear`]: lowering the
    /// length logically discards elements while leaving their bytes in
    /// place, and a later push reuses the slots. Raising the length
    /// re-exposes whatever bytes the discarded slots still hold (zeroes,
    /// if nothing was ever written there).
    ///
    /// # Panics
    ///
    /// Panics if `new_len > capacity`.
    pub fn set_len(&mut self, new_len: usize) {
        assert!(
            new_len <= self.capacity,
            "length {new_len} exceeds capacity {}",
            self.capacity
        );
        self.len = new_len;
    }

    /// Discard all elements without reallocating.
    ///
    /// Capacity and payload bytes are untouched.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Byte range of the slot at `index`. Caller guarantees
    /// `index < capacity`.
    fn slot(&self, index: usize) -> std::ops::Range<usize> {
        let start = index * self.stride;
        start..start + self.stride
    }

    /// Swap in a fresh allocation of `new_capacity` slots, carrying over
    /// the populated prefix. Sole reallocation path for both growth and
    /// shrink.
    fn realloc(&mut self, new_capacity: usize) {
        debug_assert!(new_capacity >= self.len);
        let mut data = vec![0; payload_bytes(new_capacity, self.stride)];
        let live = self.len * self.stride;
        data[..live].copy_from_slice(&self.data[..live]);
        self.data = data;
        self.capacity = new_capacity;
    }

    /// Double the capacity. Triggered only by a full push or insert.
    fn grow(&mut self) {
        self.realloc(next_capacity(self.capacity));
    }

    /// Reallocate down to `len + 1` slots, keeping all elements.
    ///
    /// The one spare slot is deliberate: it keeps the next push from
    /// immediately growing again. Never triggered automatically.
    pub fn shrink_to_fit(&mut self) {
        self.realloc(self.len + SHRINK_SLACK);
    }

    /// Append an element, growing first if the buffer is full.
    ///
    /// # Panics
    ///
    /// Panics if `value.len() != stride`.
    pub fn push(&mut self, value: &[u8]) {
        self.check_stride(value.len());
        if self.len == self.capacity {
            self.grow();
        }
        let slot = self.slot(self.len);
        self.data[slot].copy_from_slice(value);
        self.len += 1;
    }

    /// Remove the last element, copying its bytes into `dest`.
    ///
    /// Never reallocates. Returns [`BufError::Empty`] if the buffer holds
    /// no elements; `dest` is untouched in that case.
    ///
    /// # Panics
    ///
    /// Panics if `dest.len() != stride`.
    pub fn pop_into(&mut self, dest: &mut [u8]) -> Result<(), BufError> {
        self.check_stride(dest.len());
        if self.len == 0 {
            return Err(BufError::Empty);
        }
        let slot = self.slot(self.len - 1);
        dest.copy_from_slice(&self.data[slot]);
        self.len -= 1;
        Ok(())
    }

    /// Remove the last element, returning its bytes by value.
    pub fn pop(&mut self) -> Result<ElemBytes, BufError> {
        if self.len == 0 {
            return Err(BufError::Empty);
        }
        let slot = self.slot(self.len - 1);
        let bytes = ElemBytes::from_slice(&self.data[slot]);
        self.len -= 1;
        Ok(bytes)
    }

    /// Insert an element at `index`, displacing the element currently
    /// there and everything after it one slot toward higher indices.
    ///
    /// Valid only for `index < len`: inserting at the tail is not
    /// append-by-insert, it is an out-of-range error — use
    /// [`RawBuf::push`] to extend the sequence. On an invalid index the
    /// buffer is unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `value.len() != stride`.
    pub fn insert(&mut self, index: usize, value: &[u8]) -> Result<(), BufError> {
        self.check_stride(value.len());
        if index >= self.len {
            return Err(BufError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        if self.len == self.capacity {
            self.grow();
        }
        let start = index * self.stride;
        let end = self.len * self.stride;
        // The source and destination ranges overlap whenever more than
        // one element moves; copy_within handles that.
        self.data.copy_within(start..end, start + self.stride);
        self.data[start..start + self.stride].copy_from_slice(value);
        self.len += 1;
        Ok(())
    }

    /// Remove the element at `index`, copying its bytes into `dest` and
    /// closing the gap by shifting everything after it one slot toward
    /// lower indices.
    ///
    /// Valid for `index < len`; the last occupied slot is a legal target.
    /// On an invalid index the buffer and `dest` are both unchanged.
    /// Never reallocates.
    ///
    /// # Panics
    ///
    /// Panics if `dest.len() != stride`.
    pub fn remove_into(&mut self, index: usize, dest: &mut [u8]) -> Result<(), BufError> {
        self.check_stride(dest.len());
        if index >= self.len {
            return Err(BufError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        let start = index * self.stride;
        dest.copy_from_slice(&self.data[start..start + self.stride]);
        let end = self.len * self.stride;
        self.data.copy_within(start + self.stride..end, start);
        self.len -= 1;
        Ok(())
    }

    /// Remove the element at `index`, returning its bytes by value.
    pub fn remove(&mut self, index: usize) -> Result<ElemBytes, BufError> {
        if index >= self.len {
            return Err(BufError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        let start = index * self.stride;
        let bytes = ElemBytes::from_slice(&self.data[start..start + self.stride]);
        let end = self.len * self.stride;
        self.data.copy_within(start + self.stride..end, start);
        self.len -= 1;
        Ok(bytes)
    }

    /// The bytes of the element at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<&[u8]> {
        if index >= self.len {
            return None;
        }
        Some(&self.data[self.slot(index)])
    }

    /// Mutable bytes of the element at `index`, or `None` past the end.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut [u8]> {
        if index >= self.len {
            return None;
        }
        let slot = self.slot(index);
        Some(&mut self.data[slot])
    }

    fn check_stride(&self, got: usize) {
        assert_eq!(
            got, self.stride,
            "value length {got} does not match buffer stride {}",
            self.stride
        );
    }
}

impl fmt::Debug for RawBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawBuf")
            .field("capacity", &self.capacity)
            .field("len", &self.len)
            .field("stride", &self.stride)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn b(v: i32) -> [u8; 4] {
        v.to_le_bytes()
    }

    fn read(buf: &RawBuf, index: usize) -> i32 {
        let bytes = buf.get(index).expect("index in range");
        i32::from_le_bytes(bytes.try_into().unwrap())
    }

    fn filled(values: &[i32]) -> RawBuf {
        let mut buf = RawBuf::with_capacity(values.len(), 4).unwrap();
        for &v in values {
            buf.push(&b(v));
        }
        buf
    }

    fn contents(buf: &RawBuf) -> Vec<i32> {
        (0..buf.len()).map(|i| read(buf, i)).collect()
    }

    #[test]
    fn zero_stride_rejected() {
        assert_eq!(RawBuf::new(0).unwrap_err(), BufError::ZeroStride);
        assert_eq!(
            RawBuf::with_capacity(8, 0).unwrap_err(),
            BufError::ZeroStride
        );
    }

    #[test]
    fn new_buffer_is_empty_with_default_capacity() {
        let buf = RawBuf::new(4).unwrap();
        assert_eq!(buf.capacity(), 1);
        assert_eq!(buf.len(), 0);
        assert_eq!(buf.stride(), 4);
        assert!(buf.is_empty());
    }

    #[test]
    fn push_through_two_doublings() {
        // Capacity 1, three pushes: growth must go 1 -> 2 -> 4.
        let mut buf = RawBuf::with_capacity(1, 4).unwrap();
        buf.push(&b(1));
        assert_eq!(buf.capacity(), 1);
        buf.push(&b(2));
        assert_eq!(buf.capacity(), 2);
        buf.push(&b(3));
        assert_eq!(buf.capacity(), 4);
        assert_eq!(buf.len(), 3);
        assert_eq!(contents(&buf), vec![1, 2, 3]);
    }

    #[test]
    fn zero_capacity_grows_on_first_push() {
        let mut buf = RawBuf::with_capacity(0, 4).unwrap();
        assert_eq!(buf.capacity(), 0);
        buf.push(&b(9));
        assert_eq!(buf.capacity(), 2);
        assert_eq!(contents(&buf), vec![9]);
    }

    #[test]
    fn pop_into_undoes_push() {
        let mut buf = filled(&[1, 2]);
        buf.push(&b(42));
        let mut dest = [0u8; 4];
        buf.pop_into(&mut dest).unwrap();
        assert_eq!(i32::from_le_bytes(dest), 42);
        assert_eq!(contents(&buf), vec![1, 2]);
    }

    #[test]
    fn pop_from_empty_is_checked() {
        let mut buf = RawBuf::new(4).unwrap();
        let mut dest = [7u8; 4];
        assert_eq!(buf.pop_into(&mut dest).unwrap_err(), BufError::Empty);
        // dest untouched on error
        assert_eq!(dest, [7u8; 4]);
        assert_eq!(buf.pop().unwrap_err(), BufError::Empty);
    }

    #[test]
    fn pop_by_value_returns_last_element() {
        let mut buf = filled(&[10, 20]);
        let bytes = buf.pop().unwrap();
        assert_eq!(i32::from_le_bytes(bytes.as_slice().try_into().unwrap()), 20);
        assert_eq!(buf.len(), 1);
    }

    #[test]
    fn insert_shifts_tail_up() {
        // [5, 6, 7] -> insert(1, 99) -> [5, 99, 6, 7]; exercises the
        // overlapping shift of elements 6 and 7.
        let mut buf = filled(&[5, 6, 7]);
        buf.insert(1, &b(99)).unwrap();
        assert_eq!(buf.len(), 4);
        assert_eq!(contents(&buf), vec![5, 99, 6, 7]);
    }

    #[test]
    fn insert_at_first_index_shifts_everything() {
        let mut buf = filled(&[1, 2, 3]);
        buf.insert(0, &b(0)).unwrap();
        assert_eq!(contents(&buf), vec![0, 1, 2, 3]);
    }

    #[test]
    fn insert_grows_when_full() {
        let mut buf = filled(&[1, 2]);
        assert_eq!(buf.capacity(), 2);
        buf.insert(1, &b(9)).unwrap();
        assert_eq!(buf.capacity(), 4);
        assert_eq!(contents(&buf), vec![1, 9, 2]);
    }

    #[test]
    fn insert_at_len_is_out_of_range() {
        // Append-by-insert is not supported; the tail slot is push's job.
        let mut buf = filled(&[1, 2, 3]);
        let err = buf.insert(3, &b(4)).unwrap_err();
        assert_eq!(err, BufError::IndexOutOfRange { index: 3, len: 3 });
        assert_eq!(contents(&buf), vec![1, 2, 3]);
        assert_eq!(buf.capacity(), 3);
    }

    #[test]
    fn remove_closes_gap() {
        // [10, 20, 30, 40] -> remove(1) -> dest 20, [10, 30, 40].
        let mut buf = filled(&[10, 20, 30, 40]);
        let mut dest = [0u8; 4];
        buf.remove_into(1, &mut dest).unwrap();
        assert_eq!(i32::from_le_bytes(dest), 20);
        assert_eq!(buf.len(), 3);
        assert_eq!(contents(&buf), vec![10, 30, 40]);
    }

    #[test]
    fn remove_last_slot_is_legal() {
        let mut buf = filled(&[1, 2, 3]);
        let mut dest = [0u8; 4];
        buf.remove_into(2, &mut dest).unwrap();
        assert_eq!(i32::from_le_bytes(dest), 3);
        assert_eq!(contents(&buf), vec![1, 2]);
    }

    #[test]
    fn remove_at_len_is_out_of_range() {
        let mut buf = filled(&[1, 2, 3]);
        let mut dest = [7u8; 4];
        let err = buf.remove_into(3, &mut dest).unwrap_err();
        assert_eq!(err, BufError::IndexOutOfRange { index: 3, len: 3 });
        assert_eq!(dest, [7u8; 4]);
        assert_eq!(contents(&buf), vec![1, 2, 3]);
    }

    #[test]
    fn remove_by_value_matches_remove_into() {
        let mut buf = filled(&[10, 20, 30]);
        let bytes = buf.remove(1).unwrap();
        assert_eq!(i32::from_le_bytes(bytes.as_slice().try_into().unwrap()), 20);
        assert_eq!(contents(&buf), vec![10, 30]);
    }

    #[test]
    fn insert_then_remove_round_trips() {
        let mut buf = filled(&[1, 2, 3, 4]);
        buf.insert(2, &b(99)).unwrap();
        let mut dest = [0u8; 4];
        buf.remove_into(2, &mut dest).unwrap();
        assert_eq!(i32::from_le_bytes(dest), 99);
        assert_eq!(contents(&buf), vec![1, 2, 3, 4]);
    }

    #[test]
    fn shrink_to_fit_keeps_one_spare_slot() {
        let mut buf = RawBuf::with_capacity(16, 4).unwrap();
        for v in [1, 2, 3] {
            buf.push(&b(v));
        }
        buf.shrink_to_fit();
        assert_eq!(buf.capacity(), 4);
        assert_eq!(contents(&buf), vec![1, 2, 3]);
        // The spare slot means the next push must not grow.
        buf.push(&b(4));
        assert_eq!(buf.capacity(), 4);
    }

    #[test]
    fn shrink_of_empty_buffer_leaves_one_slot() {
        let mut buf = RawBuf::with_capacity(8, 4).unwrap();
        buf.shrink_to_fit();
        assert_eq!(buf.capacity(), 1);
        assert_eq!(buf.len(), 0);
    }

    #[test]
    fn clear_is_zero_cost() {
        let mut buf = filled(&[1, 2, 3]);
        let cap = buf.capacity();
        buf.clear();
        assert_eq!(buf.len(), 0);
        assert_eq!(buf.capacity(), cap);
        // Cleared slots are reused without growth.
        buf.push(&b(5));
        assert_eq!(buf.capacity(), cap);
        assert_eq!(contents(&buf), vec![5]);
    }

    #[test]
    fn set_len_re_exposes_prior_bytes() {
        let mut buf = filled(&[1, 2, 3]);
        buf.set_len(1);
        assert_eq!(contents(&buf), vec![1]);
        buf.set_len(3);
        assert_eq!(contents(&buf), vec![1, 2, 3]);
    }

    #[test]
    #[should_panic(expected = "exceeds capacity")]
    fn set_len_past_capacity_panics() {
        let mut buf = RawBuf::with_capacity(2, 4).unwrap();
        buf.set_len(3);
    }

    #[test]
    #[should_panic(expected = "does not match buffer stride")]
    fn push_with_wrong_width_panics() {
        let mut buf = RawBuf::new(4).unwrap();
        buf.push(&[1, 2, 3]);
    }

    #[test]
    fn get_past_len_is_none() {
        let buf = filled(&[1]);
        assert!(buf.get(0).is_some());
        assert!(buf.get(1).is_none());
    }

    #[test]
    fn get_mut_writes_through() {
        let mut buf = filled(&[1, 2]);
        buf.get_mut(0).unwrap().copy_from_slice(&b(7));
        assert_eq!(contents(&buf), vec![7, 2]);
    }

    #[test]
    fn as_bytes_covers_populated_prefix_only() {
        let mut buf = RawBuf::with_capacity(8, 4).unwrap();
        buf.push(&b(1));
        buf.push(&b(2));
        assert_eq!(buf.as_bytes().len(), 8);
    }

    #[test]
    fn wide_stride_round_trips() {
        // Strides past ElemBytes' inline size must still pop correctly.
        let mut buf = RawBuf::new(32).unwrap();
        let value = [0xAB; 32];
        buf.push(&value);
        let bytes = buf.pop().unwrap();
        assert_eq!(bytes.as_slice(), &value[..]);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn appends_read_back_in_order(values in proptest::collection::vec(any::<i32>(), 0..64)) {
                let mut buf = RawBuf::with_capacity(1, 4).unwrap();
                for &v in &values {
                    buf.push(&b(v));
                }
                prop_assert_eq!(buf.len(), values.len());
                for (i, &v) in values.iter().enumerate() {
                    prop_assert_eq!(read(&buf, i), v);
                }
            }

            #[test]
            fn growth_preserves_existing_elements(
                values in proptest::collection::vec(any::<i32>(), 1..32),
                extra in any::<i32>(),
            ) {
                let mut buf = filled(&values);
                // Buffer is exactly full; this push must grow.
                let cap_before = buf.capacity();
                buf.push(&b(extra));
                prop_assert!(buf.capacity() > cap_before);
                let mut expected = values.clone();
                expected.push(extra);
                prop_assert_eq!(contents(&buf), expected);
            }

            #[test]
            fn insert_remove_round_trip(
                values in proptest::collection::vec(any::<i32>(), 1..32),
                index in 0usize..32,
                inserted in any::<i32>(),
            ) {
                prop_assume!(index < values.len());
                let mut buf = filled(&values);
                buf.insert(index, &b(inserted)).unwrap();
                let mut dest = [0u8; 4];
                buf.remove_into(index, &mut dest).unwrap();
                prop_assert_eq!(i32::from_le_bytes(dest), inserted);
                prop_assert_eq!(contents(&buf), values);
            }

            #[test]
            fn pop_undoes_push(
                values in proptest::collection::vec(any::<i32>(), 0..32),
                pushed in any::<i32>(),
            ) {
                let mut buf = filled(&values);
                let len_before = buf.len();
                buf.push(&b(pushed));
                let mut dest = [0u8; 4];
                buf.pop_into(&mut dest).unwrap();
                prop_assert_eq!(i32::from_le_bytes(dest), pushed);
                prop_assert_eq!(buf.len(), len_before);
                prop_assert_eq!(contents(&buf), values);
            }

            #[test]
            fn len_never_exceeds_capacity(
                ops in proptest::collection::vec((0u8..4, any::<i32>(), 0usize..16), 1..64),
            ) {
                let mut buf = RawBuf::with_capacity(0, 4).unwrap();
                for (op, value, index) in ops {
                    match op {
                        0 => buf.push(&b(value)),
                        1 => { let _ = buf.pop(); }
                        2 => { let _ = buf.insert(index, &b(value)); }
                        _ => { let _ = buf.remove(index); }
                    }
                    prop_assert!(buf.len() <= buf.capacity());
                }
            }

            #[test]
            fn shrink_preserves_contents(values in proptest::collection::vec(any::<i32>(), 0..32)) {
                let mut buf = RawBuf::with_capacity(64, 4).unwrap();
                for &v in &values {
                    buf.push(&b(v));
                }
                buf.shrink_to_fit();
                prop_assert_eq!(buf.capacity(), values.len() + 1);
                prop_assert_eq!(contents(&buf), values);
            }
        }
    }
}
