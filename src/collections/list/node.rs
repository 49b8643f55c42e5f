use core::mem;
use core::ptr::{self, NonNull};

use crate::alloc::{AllocError, Allocator};

/// The link pair every ring member carries. On its own it is the sentinel.
#[repr(C)]
pub(crate) struct Links {
    pub(crate) prev: NonNull<Links>,
    pub(crate) next: NonNull<Links>,
}

/// A value node. `links` comes first so a `NonNull<Links>` pointing at a value
/// node can be cast back to the node.
#[repr(C)]
pub(crate) struct Node<T> {
    // Only ever read through casts of `NonNull<Links>`.
    #[allow(dead_code)]
    links: Links,
    value: T,
}

impl Links {
    /// Takes a sentinel from `alloc` and closes it on itself.
    ///
    /// The list holds the sentinel by address, so the ring stays valid when
    /// the list value moves.
    pub(crate) fn new_sentinel<A>(alloc: &A) -> Result<NonNull<Links>, AllocError>
    where
        A: Allocator<Value = Links>,
    {
        let ptr = alloc.allocate(1)?;
        // SAFETY: a fresh allocation for one `Links`.
        unsafe { alloc.construct(ptr, Links { prev: ptr, next: ptr }) };
        Ok(ptr)
    }

    /// # Safety
    /// `sentinel` must come from [`Links::new_sentinel`] on `alloc` (or a handle
    /// equal to it) and be unreachable afterwards.
    pub(crate) unsafe fn free_sentinel<A>(alloc: &A, sentinel: NonNull<Links>)
    where
        A: Allocator<Value = Links>,
    {
        alloc.deallocate(sentinel, 1);
    }

    /// Splices `node` in between the adjacent pair `prev`/`next`.
    ///
    /// # Safety
    /// `prev.next == next` must hold, and `node` must not be in any ring.
    pub(crate) unsafe fn link_between(node: NonNull<Links>, prev: NonNull<Links>, next: NonNull<Links>) {
        (*node.as_ptr()).prev = prev;
        (*node.as_ptr()).next = next;
        (*prev.as_ptr()).next = node;
        (*next.as_ptr()).prev = node;
    }

    /// Detaches `node` from its ring, closing the gap. `node`'s own links are left stale.
    ///
    /// # Safety
    /// `node` must be a value node of a consistent ring.
    pub(crate) unsafe fn unlink(node: NonNull<Links>) {
        let prev = (*node.as_ptr()).prev;
        let next = (*node.as_ptr()).next;
        (*prev.as_ptr()).next = next;
        (*next.as_ptr()).prev = prev;
    }

    #[inline]
    pub(crate) unsafe fn next(node: NonNull<Links>) -> NonNull<Links> {
        (*node.as_ptr()).next
    }

    #[inline]
    pub(crate) unsafe fn prev(node: NonNull<Links>) -> NonNull<Links> {
        (*node.as_ptr()).prev
    }
}

impl<T> Node<T> {
    /// # Safety
    /// `link` must point at a live value node holding a `T`.
    #[inline]
    pub(crate) unsafe fn value<'a>(link: NonNull<Links>) -> &'a T {
        &(*link.cast::<Node<T>>().as_ptr()).value
    }

    /// # Safety
    /// As [`Node::value`], and no other reference to the value may be live.
    #[inline]
    pub(crate) unsafe fn value_mut<'a>(link: NonNull<Links>) -> &'a mut T {
        &mut (*link.cast::<Node<T>>().as_ptr()).value
    }

    /// Moves the value out and releases the node. `link` must already be unlinked.
    pub(crate) unsafe fn take<A>(alloc: &A, link: NonNull<Links>) -> T
    where
        A: Allocator<Value = Node<T>>,
    {
        let node = link.cast::<Node<T>>();
        let value = ptr::read(ptr::addr_of!((*node.as_ptr()).value));
        alloc.deallocate(node, 1);
        value
    }

    /// Drops the value in place and releases the node, even if the drop
    /// panics. `link` must already be unlinked.
    pub(crate) unsafe fn destroy<A>(alloc: &A, link: NonNull<Links>)
    where
        A: Allocator<Value = Node<T>>,
    {
        struct Release<'a, A: Allocator>(&'a A, NonNull<A::Value>);

        impl<A: Allocator> Drop for Release<'_, A> {
            fn drop(&mut self) {
                // SAFETY: the node came from this allocator and is released once.
                unsafe { self.0.deallocate(self.1, 1) };
            }
        }

        let node = link.cast::<Node<T>>();
        let _release = Release(alloc, node);
        alloc.destroy(node);
    }
}

/// Owns a freshly allocated, still uninitialized node until its value exists.
///
/// If building the value unwinds, dropping the guard hands the memory back, so
/// a half-built node is never linked and never leaked.
pub(crate) struct NodeGuard<'a, T, A: Allocator<Value = Node<T>>> {
    alloc: &'a A,
    node: NonNull<Node<T>>,
}

impl<'a, T, A: Allocator<Value = Node<T>>> NodeGuard<'a, T, A> {
    pub(crate) fn allocate(alloc: &'a A) -> Result<Self, AllocError> {
        let node = alloc.allocate(1)?;
        Ok(Self { alloc, node })
    }

    /// Constructs the node around `value` and returns it, unlinked.
    pub(crate) fn construct(self, value: T) -> NonNull<Links> {
        let node = self.node;
        // SAFETY: `node` is a live, uninitialized allocation for one `Node<T>`.
        unsafe {
            self.alloc.construct(
                node,
                Node {
                    links: Links {
                        prev: NonNull::dangling(),
                        next: NonNull::dangling(),
                    },
                    value,
                },
            );
        }
        mem::forget(self);
        node.cast()
    }
}

impl<T, A: Allocator<Value = Node<T>>> Drop for NodeGuard<'_, T, A> {
    fn drop(&mut self) {
        // SAFETY: the node was allocated by `alloc` and never constructed.
        unsafe { self.alloc.deallocate(self.node, 1) };
    }
}
