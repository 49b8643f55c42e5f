//! `Global`: the heap-backed default allocator.
//!
//! Delegates to `std::alloc`. Every `Global` handle is equal to every other,
//! whatever its element type, because they all share the process heap.

use core::fmt;
use core::marker::PhantomData;
use core::ptr::NonNull;
use std::alloc::{alloc, dealloc};

use crate::alloc::allocator::{array_layout, AllocError, Allocator};

/// A zero-sized handle to the global heap for element type `T`.
pub struct Global<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> Global<T> {
    /// Creates a new heap handle.
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Clone for Global<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Global<T> {}

impl<T> Default for Global<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Global<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Global")
    }
}

impl<T, U> PartialEq<Global<U>> for Global<T> {
    fn eq(&self, _other: &Global<U>) -> bool {
        true
    }
}

impl<T> Eq for Global<T> {}

impl<T> Allocator for Global<T> {
    type Value = T;
    type Rebind<U> = Global<U>;

    fn rebind<U>(&self) -> Global<U> {
        Global::new()
    }

    fn allocate(&self, n: usize) -> Result<NonNull<T>, AllocError> {
        let layout = array_layout::<T>(n)?;
        if layout.size() == 0 {
            return Ok(NonNull::dangling());
        }
        // SAFETY: layout has non-zero size.
        let raw = unsafe { alloc(layout) };
        NonNull::new(raw.cast::<T>()).ok_or(AllocError::OutOfMemory {
            size: layout.size(),
            align: layout.align(),
        })
    }

    unsafe fn deallocate(&self, ptr: NonNull<T>, n: usize) {
        let layout = array_layout::<T>(n);
        debug_assert!(layout.is_ok(), "deallocate with a count no allocation accepted");
        // SAFETY: `n` is the count of a successful `allocate`, whose layout was valid.
        let layout = layout.unwrap_unchecked();
        if layout.size() != 0 {
            dealloc(ptr.as_ptr().cast::<u8>(), layout);
        }
    }
}
