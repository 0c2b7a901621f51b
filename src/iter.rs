//! Forward iterators over a [`DynamicArray`](crate::DynamicArray).
//!
//! [`Iter`] and [`IterMut`] borrow the array, so the borrow checker rules out
//! using them across a mutation. A [`Position`] is the detached form handed to
//! [`DynamicArray::insert`](crate::DynamicArray::insert) and
//! [`DynamicArray::erase`](crate::DynamicArray::erase). It only matches the
//! array it was taken from, and goes stale once that array reallocates.

use std::fmt;
use std::iter::FusedIterator;
use std::mem;
use std::ops::Sub;
use std::ptr;

use crate::raw::RawBuf;

/// Identifies one array and one generation of its storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Origin {
    pub(crate) id: usize,
    pub(crate) generation: usize,
}

/// Detached iterator position: the array and storage generation it was taken
/// from, plus an offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub(crate) origin: Origin,
    pub(crate) index: usize,
}

impl Position {
    /// Offset of this position from the start of the array it came from.
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Read-only forward iterator.
pub struct Iter<'a, E> {
    origin: Origin,
    pos: usize,
    rest: &'a [E],
}

impl<'a, E> Iter<'a, E> {
    pub(crate) fn new(origin: Origin, pos: usize, rest: &'a [E]) -> Self {
        Self { origin, pos, rest }
    }

    /// Element under the iterator, or `None` at the end.
    pub fn get(&self) -> Option<&'a E> {
        self.rest.first()
    }

    /// Steps forward one element and returns the iterator itself.
    pub fn advance(&mut self) -> &mut Self {
        self.next();
        self
    }

    /// Detaches the current position so it can be handed to `insert` or `erase`.
    pub fn position(&self) -> Position {
        Position {
            origin: self.origin,
            index: self.pos,
        }
    }

    /// Signed distance from `origin` to `self`, both taken from the same array.
    pub fn offset_from(&self, origin: &Iter<'_, E>) -> isize {
        (self.pos as isize).wrapping_sub(origin.pos as isize)
    }
}

impl<E> Clone for Iter<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Iter<'_, E> {}

impl<'a, E> Iterator for Iter<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<&'a E> {
        let (first, rest) = self.rest.split_first()?;
        self.rest = rest;
        self.pos += 1;
        Some(first)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.rest.len(), Some(self.rest.len()))
    }
}

impl<E> ExactSizeIterator for Iter<'_, E> {}

impl<E> FusedIterator for Iter<'_, E> {}

impl<'b, E> PartialEq<Iter<'b, E>> for Iter<'_, E> {
    fn eq(&self, other: &Iter<'b, E>) -> bool {
        self.origin == other.origin && self.pos == other.pos
    }
}

impl<E> Eq for Iter<'_, E> {}

impl<'b, E> Sub<Iter<'b, E>> for Iter<'_, E> {
    type Output = isize;

    fn sub(self, rhs: Iter<'b, E>) -> isize {
        self.offset_from(&rhs)
    }
}

impl<E> fmt::Debug for Iter<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("position", &self.pos)
            .field("remaining", &self.rest.len())
            .finish()
    }
}

/// Mutable forward iterator. Converts into an [`Iter`] and compares with one.
pub struct IterMut<'a, E> {
    origin: Origin,
    pos: usize,
    rest: &'a mut [E],
}

impl<'a, E> IterMut<'a, E> {
    pub(crate) fn new(origin: Origin, pos: usize, rest: &'a mut [E]) -> Self {
        Self { origin, pos, rest }
    }

    /// Read-only view of the same position.
    pub fn as_const(&self) -> Iter<'_, E> {
        Iter::new(self.origin, self.pos, &*self.rest)
    }

    /// Element under the iterator, or `None` at the end.
    pub fn get(&self) -> Option<&E> {
        self.rest.first()
    }

    /// Mutable access to the element under the iterator.
    pub fn get_mut(&mut self) -> Option<&mut E> {
        self.rest.first_mut()
    }

    /// Steps forward one element and returns the iterator itself.
    pub fn advance(&mut self) -> &mut Self {
        self.next();
        self
    }

    /// Detaches the current position, see [`Iter::position`].
    pub fn position(&self) -> Position {
        self.as_const().position()
    }
}

impl<'a, E> From<IterMut<'a, E>> for Iter<'a, E> {
    fn from(iter: IterMut<'a, E>) -> Self {
        Iter::new(iter.origin, iter.pos, iter.rest)
    }
}

impl<'a, E> Iterator for IterMut<'a, E> {
    type Item = &'a mut E;

    fn next(&mut self) -> Option<&'a mut E> {
        let (first, rest) = mem::take(&mut self.rest).split_first_mut()?;
        self.rest = rest;
        self.pos += 1;
        Some(first)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.rest.len(), Some(self.rest.len()))
    }
}

impl<E> ExactSizeIterator for IterMut<'_, E> {}

impl<E> FusedIterator for IterMut<'_, E> {}

impl<'b, E> PartialEq<Iter<'b, E>> for IterMut<'_, E> {
    fn eq(&self, other: &Iter<'b, E>) -> bool {
        self.as_const() == *other
    }
}

impl<'b, E> PartialEq<IterMut<'b, E>> for Iter<'_, E> {
    fn eq(&self, other: &IterMut<'b, E>) -> bool {
        *self == other.as_const()
    }
}

impl<'b, E> PartialEq<IterMut<'b, E>> for IterMut<'_, E> {
    fn eq(&self, other: &IterMut<'b, E>) -> bool {
        self.as_const() == other.as_const()
    }
}

impl<E> fmt::Debug for IterMut<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut")
            .field("position", &self.pos)
            .field("remaining", &self.rest.len())
            .finish()
    }
}

/// Owning iterator returned by `DynamicArray::into_iter`.
pub struct IntoIter<E> {
    buf: RawBuf<E>,
    start: usize,
    end: usize,
}

impl<E> IntoIter<E> {
    pub(crate) fn new(buf: RawBuf<E>, len: usize) -> Self {
        Self {
            buf,
            start: 0,
            end: len,
        }
    }
}

impl<E> Iterator for IntoIter<E> {
    type Item = E;

    fn next(&mut self) -> Option<E> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: slots in [start, end) are initialized and not yet read.
        let value = unsafe { ptr::read(self.buf.ptr().add(self.start)) };
        self.start += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end - self.start;
        (len, Some(len))
    }
}

impl<E> ExactSizeIterator for IntoIter<E> {}

impl<E> FusedIterator for IntoIter<E> {}

impl<E> Drop for IntoIter<E> {
    fn drop(&mut self) {
        let remaining = self.end - self.start;
        let start = self.start;
        self.start = self.end;
        // SAFETY: the unread slots are still initialized; `start` was moved
        // past them first so a panicking destructor cannot drop them twice.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.buf.ptr().add(start), remaining));
        }
    }
}
