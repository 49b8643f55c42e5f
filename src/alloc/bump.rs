//! Fixed-capacity bump allocation.
//!
//! [`StackStorage`] owns an `N`-byte buffer and a running offset. Any number of
//! [`StackAllocator`] handles, for any element types, can borrow one storage
//! and carve aligned spans out of it. Space is never given back: the offset
//! only grows, and `deallocate` is a no-op.
//!
//! When a request does not fit, allocation fails with
//! [`AllocError::Exhausted`]. There is no fallback to the heap; size the
//! storage for the worst case. A [`List`](crate::List) over this storage takes
//! its sentinel from it as well as every node, so budget one link pair
//! (two pointers) per list on top of the nodes.

use core::alloc::Layout;
use core::cell::{Cell, UnsafeCell};
use core::fmt;
use core::marker::PhantomData;
use core::mem::MaybeUninit;
use core::ptr::{self, NonNull};

use crate::alloc::allocator::{array_layout, AllocError, Allocator};

/// An `N`-byte arena that [`StackAllocator`] handles draw from.
///
/// Not `Clone`: two storages must never believe they own the same bytes.
/// Not `Sync`: handles mutate the offset through a shared reference.
pub struct StackStorage<const N: usize> {
    buffer: UnsafeCell<[MaybeUninit<u8>; N]>,
    shift: Cell<usize>,
}

impl<const N: usize> StackStorage<N> {
    /// Creates an empty storage.
    pub const fn new() -> Self {
        Self {
            buffer: UnsafeCell::new([MaybeUninit::uninit(); N]),
            shift: Cell::new(0),
        }
    }

    /// Total size of the buffer in bytes.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Bytes consumed so far, alignment padding included.
    pub fn used(&self) -> usize {
        self.shift.get()
    }

    /// Bytes not yet handed out.
    pub fn remaining(&self) -> usize {
        N - self.shift.get()
    }

    /// Carves `layout` out of the buffer, or fails without moving the offset.
    fn carve(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        let shift = self.shift.get();
        let remaining = N - shift;
        let base = self.buffer.get().cast::<u8>();
        // SAFETY: shift <= N, so the cursor is in bounds or one past the end.
        let cursor = unsafe { base.add(shift) };

        let pad = cursor.align_offset(layout.align());
        let fits = pad
            .checked_add(layout.size())
            .filter(|&needed| needed <= remaining);

        let Some(needed) = fits else {
            trace_event!(warn, requested = layout.size(), remaining, "stack storage exhausted");
            return Err(AllocError::Exhausted {
                requested: layout.size(),
                remaining,
            });
        };

        self.shift.set(shift + needed);
        trace_event!(trace, offset = shift + pad, size = layout.size(), "carved span");
        // SAFETY: pad + size <= remaining, so the span lies inside the buffer.
        Ok(unsafe { NonNull::new_unchecked(cursor.add(pad)) })
    }
}

impl<const N: usize> Default for StackStorage<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Debug for StackStorage<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StackStorage")
            .field("capacity", &N)
            .field("used", &self.used())
            .finish()
    }
}

/// A copyable handle allocating `T`s from a borrowed [`StackStorage`].
///
/// Two handles are equal iff they borrow the same storage, regardless of
/// their element types.
pub struct StackAllocator<'s, T, const N: usize> {
    storage: &'s StackStorage<N>,
    _marker: PhantomData<fn() -> T>,
}

impl<'s, T, const N: usize> StackAllocator<'s, T, N> {
    /// Binds a handle to `storage`.
    pub const fn new(storage: &'s StackStorage<N>) -> Self {
        Self {
            storage,
            _marker: PhantomData,
        }
    }

    /// The storage this handle draws from.
    pub const fn storage(&self) -> &'s StackStorage<N> {
        self.storage
    }
}

impl<'s, T, const N: usize> From<&'s StackStorage<N>> for StackAllocator<'s, T, N> {
    fn from(storage: &'s StackStorage<N>) -> Self {
        Self::new(storage)
    }
}

impl<T, const N: usize> Clone for StackAllocator<'_, T, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, const N: usize> Copy for StackAllocator<'_, T, N> {}

impl<T, U, const N: usize, const M: usize> PartialEq<StackAllocator<'_, U, M>>
    for StackAllocator<'_, T, N>
{
    fn eq(&self, other: &StackAllocator<'_, U, M>) -> bool {
        let lhs = (self.storage as *const StackStorage<N>).cast::<()>();
        let rhs = (other.storage as *const StackStorage<M>).cast::<()>();
        ptr::eq(lhs, rhs)
    }
}

impl<T, const N: usize> Eq for StackAllocator<'_, T, N> {}

impl<T, const N: usize> fmt::Debug for StackAllocator<'_, T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StackAllocator")
            .field("storage", &(self.storage as *const StackStorage<N>))
            .field("used", &self.storage.used())
            .finish()
    }
}

impl<'s, T, const N: usize> Allocator for StackAllocator<'s, T, N> {
    type Value = T;
    type Rebind<U> = StackAllocator<'s, U, N>;

    const PROPAGATE_ON_CONTAINER_COPY_ASSIGNMENT: bool = true;

    fn rebind<U>(&self) -> StackAllocator<'s, U, N> {
        StackAllocator::new(self.storage)
    }

    fn allocate(&self, n: usize) -> Result<NonNull<T>, AllocError> {
        let layout = array_layout::<T>(n)?;
        if layout.size() == 0 {
            return Ok(NonNull::dangling());
        }
        self.storage.carve(layout).map(NonNull::cast)
    }

    unsafe fn deallocate(&self, _ptr: NonNull<T>, _n: usize) {
        // Arena bytes are reclaimed only when the storage itself goes away.
    }
}
