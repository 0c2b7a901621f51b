use std::fmt::{self, Write as _};
use std::mem::ManuallyDrop;
use std::ops::{Deref, DerefMut};
use std::ptr;
use std::slice;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::ArrayError;
use crate::growth::next_capacity;
use crate::iter::{IntoIter, Iter, IterMut, Origin, Position};
use crate::raw::RawBuf;

/// A contiguous growable array.
///
/// Appending is amortized *O*(1): a full array grows to
/// `floor(capacity * 1.618 + 5)` slots (see [`crate::growth`]). Elements are
/// relocated bitwise on growth and on positional insert/erase.
///
/// ```
/// use dynamic_array::dynamic_array;
///
/// let mut arr = dynamic_array![1, 2, 3];
/// arr.push(4);
/// assert_eq!(arr.to_string(), "[1, 2, 3, 4]");
///
/// let pos = (*arr.begin().advance()).position();
/// arr.insert(pos, 9).unwrap();
/// assert_eq!(arr, [1, 9, 2, 3, 4]);
/// ```
pub struct DynamicArray<E> {
    buf: RawBuf<E>,
    len: usize,
    id: usize,
}

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

fn next_id() -> usize {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

impl<E> DynamicArray<E> {
    /// Creates an empty array without allocating.
    pub fn new() -> Self {
        Self {
            buf: RawBuf::new(),
            len: 0,
            id: next_id(),
        }
    }

    /// Creates an empty array with room for exactly `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: RawBuf::with_capacity(capacity),
            len: 0,
            id: next_id(),
        }
    }

    /// Number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when the array holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of allocated slots, live or not.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Drops every element. Capacity and storage are kept for reuse.
    pub fn clear(&mut self) {
        let live = ptr::slice_from_raw_parts_mut(self.buf.ptr(), self.len);
        self.len = 0;
        // SAFETY: the slots were live; len is already 0 so a panicking
        // destructor leaves nothing to be dropped twice.
        unsafe { ptr::drop_in_place(live) };
    }

    /// Grows the storage to hold at least `capacity` elements in total.
    ///
    /// Does nothing when the array can already hold that many.
    pub fn reserve(&mut self, capacity: usize) {
        if capacity <= self.capacity() {
            return;
        }
        self.buf.resize(capacity);
    }

    /// Reallocates so that capacity equals length, releasing storage entirely
    /// when the array is empty.
    pub fn shrink_to_fit(&mut self) {
        if self.capacity() <= self.len {
            return;
        }
        self.buf.resize(self.len);
    }

    /// Appends `value`, growing the storage first when the array is full.
    pub fn push(&mut self, value: E) {
        if self.len == self.capacity() {
            self.grow();
        }

        // SAFETY: len < capacity after growing, so the slot is allocated and unused.
        unsafe { ptr::write(self.buf.ptr().add(self.len), value) };
        self.len += 1;
    }

    /// Removes the last element and returns it.
    pub fn pop(&mut self) -> Result<E, ArrayError> {
        if self.len == 0 {
            return Err(ArrayError::EmptyContainer);
        }

        self.len -= 1;
        // SAFETY: the slot at the old last index is initialized and no longer counted as live.
        Ok(unsafe { ptr::read(self.buf.ptr().add(self.len)) })
    }

    /// Bounds-checked access.
    pub fn at(&self, index: usize) -> Result<&E, ArrayError> {
        self.as_slice().get(index).ok_or(ArrayError::IndexOutOfRange {
            index,
            len: self.len,
        })
    }

    /// Bounds-checked mutable access.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut E, ArrayError> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(ArrayError::IndexOutOfRange { index, len })
    }

    /// Inserts `value` before `position`, shifting later elements up.
    ///
    /// `position` may equal [`end`](Self::end), which appends. Positions taken
    /// from another array, or from before the storage was last reallocated, are
    /// rejected with [`ArrayError::IteratorOutOfRange`].
    ///
    /// Returns an iterator at the inserted element.
    pub fn insert(&mut self, position: Position, value: E) -> Result<IterMut<'_, E>, ArrayError> {
        let index = self
            .offset_of(position)
            .filter(|&index| index <= self.len)
            .ok_or(ArrayError::IteratorOutOfRange)?;

        if self.len == self.capacity() {
            self.grow();
        }

        // SAFETY: index <= len < capacity. The tail [index, len) is moved up one
        // slot (ptr::copy handles the overlap) before the gap is written.
        unsafe {
            let slot = self.buf.ptr().add(index);
            ptr::copy(slot, slot.add(1), self.len - index);
            ptr::write(slot, value);
        }
        self.len += 1;

        Ok(self.iter_mut_at(index))
    }

    /// Removes the element at `position`, shifting later elements down.
    ///
    /// Returns an iterator at the element that took its place, which is
    /// [`end`](Self::end) when the last element was removed.
    pub fn erase(&mut self, position: Position) -> Result<IterMut<'_, E>, ArrayError> {
        let index = self
            .offset_of(position)
            .filter(|&index| index < self.len)
            .ok_or(ArrayError::IteratorOutOfRange)?;

        drop(self.take_at(index));

        Ok(self.iter_mut_at(index))
    }

    /// Removes and returns the element at `index`, shifting later elements down.
    pub fn remove(&mut self, index: usize) -> Result<E, ArrayError> {
        if index >= self.len {
            return Err(ArrayError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }

        Ok(self.take_at(index))
    }

    /// Iterator at the first element.
    pub fn begin(&self) -> Iter<'_, E> {
        Iter::new(self.origin(), 0, self.as_slice())
    }

    /// Iterator one past the last element.
    pub fn end(&self) -> Iter<'_, E> {
        Iter::new(self.origin(), self.len, &self.as_slice()[self.len..])
    }

    /// Mutable iterator at the first element.
    pub fn begin_mut(&mut self) -> IterMut<'_, E> {
        self.iter_mut_at(0)
    }

    /// Mutable iterator one past the last element.
    pub fn end_mut(&mut self) -> IterMut<'_, E> {
        self.iter_mut_at(self.len)
    }

    /// Same as [`begin`](Self::begin).
    pub fn iter(&self) -> Iter<'_, E> {
        self.begin()
    }

    /// Same as [`begin_mut`](Self::begin_mut).
    pub fn iter_mut(&mut self) -> IterMut<'_, E> {
        self.begin_mut()
    }

    /// The live elements as a slice.
    pub fn as_slice(&self) -> &[E] {
        // SAFETY: [0, len) is initialized and the pointer is non-null and aligned.
        unsafe { slice::from_raw_parts(self.buf.ptr(), self.len) }
    }

    /// The live elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [E] {
        // SAFETY: as in `as_slice`, and `&mut self` guarantees exclusive access.
        unsafe { slice::from_raw_parts_mut(self.buf.ptr(), self.len) }
    }

    fn grow(&mut self) {
        self.buf.resize(next_capacity(self.capacity()));
    }

    fn origin(&self) -> Origin {
        Origin {
            id: self.id,
            generation: self.buf.generation(),
        }
    }

    fn offset_of(&self, position: Position) -> Option<usize> {
        (position.origin == self.origin()).then_some(position.index)
    }

    fn iter_mut_at(&mut self, index: usize) -> IterMut<'_, E> {
        let origin = self.origin();
        IterMut::new(origin, index, &mut self.as_mut_slice()[index..])
    }

    // Caller guarantees index < len.
    fn take_at(&mut self, index: usize) -> E {
        // SAFETY: the slot is live; it is read out before the tail
        // [index + 1, len) is moved down over it.
        unsafe {
            let slot = self.buf.ptr().add(index);
            let value = ptr::read(slot);
            ptr::copy(slot.add(1), slot, self.len - index - 1);
            self.len -= 1;
            value
        }
    }
}

impl<E> Drop for DynamicArray<E> {
    fn drop(&mut self) {
        // RawBuf frees the storage afterwards.
        self.clear();
    }
}

impl<E> Default for DynamicArray<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Clone> Clone for DynamicArray<E> {
    fn clone(&self) -> Self {
        let mut copy = Self::with_capacity(self.capacity());
        copy.extend(self.iter().cloned());
        copy
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        if source.len > self.capacity() {
            self.buf.resize(source.capacity());
        }
        self.extend(source.iter().cloned());
    }
}

impl<E> Deref for DynamicArray<E> {
    type Target = [E];

    fn deref(&self) -> &[E] {
        self.as_slice()
    }
}

impl<E> DerefMut for DynamicArray<E> {
    fn deref_mut(&mut self) -> &mut [E] {
        self.as_mut_slice()
    }
}

impl<E> Extend<E> for DynamicArray<E> {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<E> FromIterator<E> for DynamicArray<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut arr = Self::new();
        arr.extend(iter);
        arr
    }
}

impl<E, const N: usize> From<[E; N]> for DynamicArray<E> {
    fn from(list: [E; N]) -> Self {
        let mut arr = Self::with_capacity(N);
        arr.extend(list);
        arr
    }
}

impl<E> IntoIterator for DynamicArray<E> {
    type Item = E;
    type IntoIter = IntoIter<E>;

    fn into_iter(self) -> IntoIter<E> {
        let me = ManuallyDrop::new(self);
        // SAFETY: `me` is never dropped, so the buffer has exactly one owner.
        let buf = unsafe { ptr::read(&me.buf) };
        IntoIter::new(buf, me.len)
    }
}

impl<'a, E> IntoIterator for &'a DynamicArray<E> {
    type Item = &'a E;
    type IntoIter = Iter<'a, E>;

    fn into_iter(self) -> Iter<'a, E> {
        self.iter()
    }
}

impl<'a, E> IntoIterator for &'a mut DynamicArray<E> {
    type Item = &'a mut E;
    type IntoIter = IterMut<'a, E>;

    fn into_iter(self) -> IterMut<'a, E> {
        self.iter_mut()
    }
}

impl<E: PartialEq> PartialEq for DynamicArray<E> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<E: Eq> Eq for DynamicArray<E> {}

impl<E: PartialEq> PartialEq<[E]> for DynamicArray<E> {
    fn eq(&self, other: &[E]) -> bool {
        self.as_slice() == other
    }
}

impl<E: PartialEq, const N: usize> PartialEq<[E; N]> for DynamicArray<E> {
    fn eq(&self, other: &[E; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<E: fmt::Debug> fmt::Debug for DynamicArray<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<E: fmt::Display> fmt::Display for DynamicArray<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('[')?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            fmt::Display::fmt(value, f)?;
        }
        f.write_char(']')
    }
}
