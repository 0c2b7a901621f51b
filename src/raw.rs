use std::alloc::{alloc, dealloc, handle_alloc_error, realloc, Layout};
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;

/// Single-owner storage block backing a [`DynamicArray`](crate::DynamicArray).
///
/// `RawBuf` only manages memory: it never reads, writes or drops elements.
/// The owning array is responsible for which slots are initialized.
pub(crate) struct RawBuf<E> {
    ptr: NonNull<E>,
    cap: usize,
    generation: usize,
    _marker: PhantomData<E>,
}

// SAFETY: RawBuf exclusively owns its allocation, so it can move to another
// thread whenever the elements can.
unsafe impl<E: Send> Send for RawBuf<E> {}
// SAFETY: shared access to RawBuf never mutates the allocation.
unsafe impl<E: Sync> Sync for RawBuf<E> {}

impl<E> RawBuf<E> {
    const IS_ZST: bool = mem::size_of::<E>() == 0;

    pub(crate) const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            generation: 0,
            _marker: PhantomData,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut buf = Self::new();
        buf.resize(capacity);
        buf
    }

    #[inline]
    pub(crate) fn ptr(&self) -> *mut E {
        self.ptr.as_ptr()
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.cap
    }

    /// Number of times the storage has been resized.
    #[inline]
    pub(crate) fn generation(&self) -> usize {
        self.generation
    }

    /// Moves the storage to a block of exactly `new_cap` slots.
    ///
    /// Slot contents are relocated bitwise up to `min(cap, new_cap)`; the
    /// caller must make sure no initialized slot lies past `new_cap`.
    pub(crate) fn resize(&mut self, new_cap: usize) {
        if new_cap == self.cap {
            return;
        }
        self.generation = self.generation.wrapping_add(1);

        if Self::IS_ZST {
            self.cap = new_cap;
            return;
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(from = self.cap, to = new_cap, "resizing array storage");

        if new_cap == 0 {
            self.release();
            return;
        }

        let new_layout = Self::layout(new_cap);
        let new_ptr = if self.cap == 0 {
            // SAFETY: new_layout has a non-zero size.
            unsafe { alloc(new_layout) }
        } else {
            // SAFETY: ptr was allocated by us with the layout for `cap` slots
            // and the new size is non-zero and fits in isize.
            unsafe { realloc(self.ptr.as_ptr().cast(), Self::layout(self.cap), new_layout.size()) }
        };

        self.ptr = match NonNull::new(new_ptr.cast::<E>()) {
            Some(p) => p,
            None => handle_alloc_error(new_layout),
        };
        self.cap = new_cap;
    }

    fn release(&mut self) {
        if self.cap != 0 && !Self::IS_ZST {
            // SAFETY: ptr was allocated with the layout for `cap` slots.
            unsafe { dealloc(self.ptr.as_ptr().cast(), Self::layout(self.cap)) };
        }
        self.ptr = NonNull::dangling();
        self.cap = 0;
    }

    fn layout(cap: usize) -> Layout {
        match Layout::array::<E>(cap) {
            Ok(layout) => layout,
            Err(_) => panic!("capacity overflow"),
        }
    }
}

impl<E> Drop for RawBuf<E> {
    fn drop(&mut self) {
        if self.cap != 0 && !Self::IS_ZST {
            #[cfg(feature = "tracing")]
            tracing::trace!(capacity = self.cap, "releasing array storage");
        }
        self.release();
    }
}
