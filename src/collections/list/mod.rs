//! A doubly linked list over a pluggable [`Allocator`].
//!
//! The nodes form one circular ring closed by a payload-free sentinel:
//! `sentinel.next` is the first element and `sentinel.prev` the last, and the
//! sentinel itself doubles as the past-the-end position. Every value node is
//! requested from the injected allocator rebound to the node type, and the
//! sentinel from the same allocator rebound to the bare link pair, so a list
//! over a [`StackAllocator`](crate::StackAllocator) never touches the heap.
//!
//! # Failure behaviour
//! - Allocation failures are returned by the `try_*` methods and panic in
//!   the infallible ones. Either way the list is left unchanged.
//! - A panic while building a value (from `T::clone`, `T::default` or the
//!   closure given to [`List::push_back_with`]) releases the node's memory
//!   before unwinding; nothing is linked.
//! - Bulk construction and assignment build a separate list first, so a
//!   failure part-way drops the partial copy and never touches the target.

mod cursor;
mod iter;
mod node;
mod serde_impl;

use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use core::mem;
use core::ptr::NonNull;

use crate::alloc::{AllocError, Allocator, Global};

pub use cursor::{Cursor, CursorMut};
pub use iter::{IntoIter, Iter, IterMut};

use node::{Links, Node, NodeGuard};

/// A doubly linked list whose nodes come from an allocator of type `A`.
///
/// # Example
///
/// ```rust
/// use ringlist::{List, StackAllocator, StackStorage};
///
/// let storage = StackStorage::<1024>::new();
/// let mut list = List::new_in(StackAllocator::new(&storage));
/// list.push_back(1);
/// list.push_back(2);
/// list.push_front(0);
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), [0, 1, 2]);
/// ```
pub struct List<T, A: Allocator<Value = T> = Global<T>> {
    sentinel: NonNull<Links>,
    len: usize,
    alloc: A,
    _marker: PhantomData<T>,
}

// SAFETY: the list owns its nodes exclusively; sending or sharing it is no
// different from sending or sharing the `T`s and the allocator.
unsafe impl<T: Send, A: Allocator<Value = T> + Send> Send for List<T, A> {}
unsafe impl<T: Sync, A: Allocator<Value = T> + Sync> Sync for List<T, A> {}

impl<T> List<T> {
    /// Creates an empty list on the global heap.
    ///
    /// # Panics
    /// Panics if the heap cannot provide the sentinel.
    pub fn new() -> Self {
        Self::new_in(Global::new())
    }

    /// Creates a list of `len` default values on the global heap.
    pub fn with_len(len: usize) -> Self
    where
        T: Default,
    {
        Self::with_len_in(len, Global::new())
    }

    /// Creates a list of `len` clones of `value` on the global heap.
    pub fn from_elem(len: usize, value: &T) -> Self
    where
        T: Clone,
    {
        Self::from_elem_in(len, value, Global::new())
    }
}

impl<T, A: Allocator<Value = T>> List<T, A> {
    /// Creates an empty list bound to `alloc`.
    ///
    /// # Panics
    /// Panics if `alloc` cannot provide the sentinel.
    pub fn new_in(alloc: A) -> Self {
        unwrap_alloc(Self::try_new_in(alloc))
    }

    /// Creates an empty list bound to `alloc`, taking its sentinel from it.
    ///
    /// # Errors
    /// Returns the allocator's error if the sentinel does not fit.
    pub fn try_new_in(alloc: A) -> Result<Self, AllocError> {
        let sentinel = Links::new_sentinel(&alloc.rebind::<Links>())?;
        Ok(Self {
            sentinel,
            len: 0,
            alloc,
            _marker: PhantomData,
        })
    }

    /// Creates a list of `len` default values.
    ///
    /// # Panics
    /// Panics if `alloc` cannot provide `len` nodes.
    pub fn with_len_in(len: usize, alloc: A) -> Self
    where
        T: Default,
    {
        unwrap_alloc(Self::try_with_len_in(len, alloc))
    }

    /// Fallible [`List::with_len_in`]. On error every node built so far is released.
    ///
    /// # Errors
    /// Returns the first allocation failure.
    pub fn try_with_len_in(len: usize, alloc: A) -> Result<Self, AllocError>
    where
        T: Default,
    {
        let mut list = Self::try_new_in(alloc)?;
        for _ in 0..len {
            list.try_push_back_with(T::default)?;
        }
        Ok(list)
    }

    /// Creates a list of `len` clones of `value`.
    ///
    /// # Panics
    /// Panics if `alloc` cannot provide `len` nodes.
    pub fn from_elem_in(len: usize, value: &T, alloc: A) -> Self
    where
        T: Clone,
    {
        unwrap_alloc(Self::try_from_elem_in(len, value, alloc))
    }

    /// Fallible [`List::from_elem_in`]. On error every node built so far is released.
    ///
    /// # Errors
    /// Returns the first allocation failure.
    pub fn try_from_elem_in(len: usize, value: &T, alloc: A) -> Result<Self, AllocError>
    where
        T: Clone,
    {
        let mut list = Self::try_new_in(alloc)?;
        for _ in 0..len {
            list.try_push_back_with(|| value.clone())?;
        }
        Ok(list)
    }

    /// Returns the number of elements. O(1).
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a copy of the allocator handle.
    pub fn allocator(&self) -> A {
        self.alloc.clone()
    }

    /// Returns a reference to the first element.
    pub fn front(&self) -> Option<&T> {
        // SAFETY: a non-empty ring starts with a value node.
        (!self.is_empty()).then(|| unsafe { Node::value(self.first()) })
    }

    /// Returns a reference to the last element.
    pub fn back(&self) -> Option<&T> {
        // SAFETY: a non-empty ring ends with a value node.
        (!self.is_empty()).then(|| unsafe { Node::value(self.last()) })
    }

    /// Returns a mutable reference to the first element.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        let first = self.first();
        // SAFETY: as `front`; `&mut self` guarantees exclusivity.
        (!self.is_empty()).then(|| unsafe { Node::value_mut(first) })
    }

    /// Returns a mutable reference to the last element.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        let last = self.last();
        // SAFETY: as `back`; `&mut self` guarantees exclusivity.
        (!self.is_empty()).then(|| unsafe { Node::value_mut(last) })
    }

    /// Prepends `value`.
    ///
    /// # Panics
    /// Panics if the allocator cannot provide a node.
    pub fn push_front(&mut self, value: T) {
        unwrap_alloc(self.try_push_front(value));
    }

    /// Appends `value`.
    ///
    /// # Panics
    /// Panics if the allocator cannot provide a node.
    pub fn push_back(&mut self, value: T) {
        unwrap_alloc(self.try_push_back(value));
    }

    /// Prepends `value`, or leaves the list unchanged and drops `value`.
    ///
    /// # Errors
    /// Returns the allocator's error.
    pub fn try_push_front(&mut self, value: T) -> Result<(), AllocError> {
        // SAFETY: the first link belongs to this ring.
        unsafe { self.insert_before_link(self.first(), || value) }.map(|_| ())
    }

    /// Appends `value`, or leaves the list unchanged and drops `value`.
    ///
    /// # Errors
    /// Returns the allocator's error.
    pub fn try_push_back(&mut self, value: T) -> Result<(), AllocError> {
        self.try_push_back_with(|| value)
    }

    /// Allocates a node, then builds its value with `make` and appends it.
    ///
    /// If `make` panics the node is released and the list is unchanged.
    ///
    /// # Panics
    /// Panics if the allocator cannot provide a node.
    pub fn push_back_with<F: FnOnce() -> T>(&mut self, make: F) {
        unwrap_alloc(self.try_push_back_with(make));
    }

    /// Fallible [`List::push_back_with`]. `make` is not called when allocation fails.
    ///
    /// # Errors
    /// Returns the allocator's error.
    pub fn try_push_back_with<F: FnOnce() -> T>(&mut self, make: F) -> Result<(), AllocError> {
        // SAFETY: the sentinel belongs to this ring.
        unsafe { self.insert_before_link(self.sentinel, make) }.map(|_| ())
    }

    /// Removes the first element and returns it, or `None` if the list is empty.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: non-empty.
        Some(unsafe { self.pop_front_unchecked() })
    }

    /// Removes the last element and returns it, or `None` if the list is empty.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: non-empty.
        Some(unsafe { self.pop_back_unchecked() })
    }

    /// Removes the first element without checking for emptiness.
    ///
    /// # Safety
    /// The list must not be empty.
    pub unsafe fn pop_front_unchecked(&mut self) -> T {
        debug_assert!(!self.is_empty(), "pop_front_unchecked on an empty list");
        self.unlink_take(self.first())
    }

    /// Removes the last element without checking for emptiness.
    ///
    /// # Safety
    /// The list must not be empty.
    pub unsafe fn pop_back_unchecked(&mut self) -> T {
        debug_assert!(!self.is_empty(), "pop_back_unchecked on an empty list");
        self.unlink_take(self.last())
    }

    /// Removes every element, back to front.
    ///
    /// If dropping an element panics, the remaining ones are still dropped and
    /// released before the panic resumes.
    pub fn clear(&mut self) {
        struct ClearGuard<'a, T, A: Allocator<Value = T>>(&'a mut List<T, A>);

        impl<T, A: Allocator<Value = T>> Drop for ClearGuard<'_, T, A> {
            fn drop(&mut self) {
                self.0.clear();
            }
        }

        let node_alloc = self.node_alloc();
        while !self.is_empty() {
            let last = self.last();
            // SAFETY: non-empty, so `last` is a value node of this ring. It is
            // unlinked before its value drops, so the guard never sees it.
            unsafe {
                Links::unlink(last);
                self.len -= 1;
                let guard = ClearGuard(self);
                Node::<T>::destroy(&node_alloc, last);
                mem::forget(guard);
            }
        }
    }

    /// Returns `true` if some element equals `value`.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|x| x == value)
    }

    /// Front-to-back iterator over shared references.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.first(), self.last(), self.len)
    }

    /// Front-to-back iterator over mutable references.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self.first(), self.last(), self.len)
    }

    /// A cursor at the first element (past-the-end if empty).
    pub fn cursor_front(&self) -> Cursor<'_, T, A> {
        Cursor::new(self, self.first(), 0)
    }

    /// A cursor at the last element (past-the-end if empty).
    pub fn cursor_back(&self) -> Cursor<'_, T, A> {
        Cursor::new(self, self.last(), self.len.saturating_sub(1))
    }

    /// A cursor at the past-the-end position.
    pub fn cursor_end(&self) -> Cursor<'_, T, A> {
        Cursor::new(self, self.sentinel, self.len)
    }

    /// A mutable cursor at the first element (past-the-end if empty).
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, T, A> {
        let first = self.first();
        CursorMut::new(self, first, 0)
    }

    /// A mutable cursor at the last element (past-the-end if empty).
    pub fn cursor_back_mut(&mut self) -> CursorMut<'_, T, A> {
        let (last, index) = (self.last(), self.len.saturating_sub(1));
        CursorMut::new(self, last, index)
    }

    /// A mutable cursor at the past-the-end position.
    pub fn cursor_end_mut(&mut self) -> CursorMut<'_, T, A> {
        let (sentinel, len) = (self.sentinel, self.len);
        CursorMut::new(self, sentinel, len)
    }

    /// Exchanges the contents and allocators of two lists. O(1).
    ///
    /// Each sentinel travels with the allocator it came from, together with its
    /// ring and length, so both rings stay closed without touching any node.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.alloc, &mut other.alloc);
        mem::swap(&mut self.sentinel, &mut other.sentinel);
        mem::swap(&mut self.len, &mut other.len);
    }

    /// Deep copy using the allocator's copy-construction choice.
    ///
    /// # Errors
    /// Returns the first allocation failure; the partial copy is released.
    pub fn try_clone(&self) -> Result<Self, AllocError>
    where
        T: Clone,
    {
        self.copy_in(self.alloc.select_on_container_copy_construction())
    }

    /// Replaces the contents with a deep copy of `source`.
    ///
    /// The copy is built in full before anything in `self` changes; it uses
    /// `source`'s allocator if `A` propagates on copy assignment, otherwise
    /// `self`'s.
    ///
    /// # Errors
    /// Returns the first allocation failure; `self` is untouched.
    pub fn try_assign_from(&mut self, source: &Self) -> Result<(), AllocError>
    where
        T: Clone,
    {
        let alloc = if A::PROPAGATE_ON_CONTAINER_COPY_ASSIGNMENT {
            source.alloc.clone()
        } else {
            self.alloc.clone()
        };
        let mut copy = source.copy_in(alloc)?;
        self.swap(&mut copy);
        Ok(())
    }

    fn copy_in(&self, alloc: A) -> Result<Self, AllocError>
    where
        T: Clone,
    {
        let mut copy = Self::try_new_in(alloc)?;
        for value in self {
            copy.try_push_back_with(|| value.clone())?;
        }
        Ok(copy)
    }

    #[inline]
    fn first(&self) -> NonNull<Links> {
        // SAFETY: the sentinel lives as long as the list.
        unsafe { Links::next(self.sentinel) }
    }

    #[inline]
    fn last(&self) -> NonNull<Links> {
        // SAFETY: the sentinel lives as long as the list.
        unsafe { Links::prev(self.sentinel) }
    }

    fn node_alloc(&self) -> A::Rebind<Node<T>> {
        self.alloc.rebind()
    }

    /// Allocates a node, builds its value with `make`, and links it right
    /// before `next`. Returns the new node.
    ///
    /// # Safety
    /// `next` must be the sentinel or a value node of this list.
    unsafe fn insert_before_link<F: FnOnce() -> T>(
        &mut self,
        next: NonNull<Links>,
        make: F,
    ) -> Result<NonNull<Links>, AllocError> {
        let node_alloc = self.node_alloc();
        let guard = NodeGuard::<T, _>::allocate(&node_alloc).map_err(|err| {
            trace_event!(debug, %err, len = self.len, "list node allocation failed");
            err
        })?;
        let node = guard.construct(make());
        Links::link_between(node, Links::prev(next), next);
        self.len += 1;
        Ok(node)
    }

    /// Unlinks a value node and moves its value out.
    ///
    /// # Safety
    /// `node` must be a value node of this list.
    unsafe fn unlink_take(&mut self, node: NonNull<Links>) -> T {
        Links::unlink(node);
        self.len -= 1;
        Node::<T>::take(&self.node_alloc(), node)
    }
}

#[cold]
#[track_caller]
fn alloc_failure(err: AllocError) -> ! {
    panic!("list allocation failed: {err}")
}

#[inline]
#[track_caller]
fn unwrap_alloc<R>(result: Result<R, AllocError>) -> R {
    match result {
        Ok(value) => value,
        Err(err) => alloc_failure(err),
    }
}

impl<T, A: Allocator<Value = T>> Drop for List<T, A> {
    fn drop(&mut self) {
        struct SentinelGuard<'a, T, A: Allocator<Value = T>>(&'a mut List<T, A>);

        impl<T, A: Allocator<Value = T>> Drop for SentinelGuard<'_, T, A> {
            fn drop(&mut self) {
                let list = &mut *self.0;
                // SAFETY: the ring is empty, nothing refers to the sentinel any more.
                unsafe { Links::free_sentinel(&list.alloc.rebind::<Links>(), list.sentinel) };
            }
        }

        let mut guard = SentinelGuard(self);
        guard.0.clear();
    }
}

impl<T, A: Allocator<Value = T> + Default> Default for List<T, A> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<T: Clone, A: Allocator<Value = T>> Clone for List<T, A> {
    fn clone(&self) -> Self {
        unwrap_alloc(self.try_clone())
    }

    fn clone_from(&mut self, source: &Self) {
        unwrap_alloc(self.try_assign_from(source));
    }
}

impl<T: fmt::Debug, A: Allocator<Value = T>> fmt::Debug for List<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self).finish()
    }
}

impl<T, A, B> PartialEq<List<T, B>> for List<T, A>
where
    T: PartialEq,
    A: Allocator<Value = T>,
    B: Allocator<Value = T>,
{
    fn eq(&self, other: &List<T, B>) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq, A: Allocator<Value = T>> Eq for List<T, A> {}

impl<T: Hash, A: Allocator<Value = T>> Hash for List<T, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for value in self {
            value.hash(state);
        }
    }
}

impl<T, A: Allocator<Value = T>> Extend<T> for List<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<'a, T: Copy + 'a, A: Allocator<Value = T>> Extend<&'a T> for List<T, A> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T, A: Allocator<Value = T> + Default> FromIterator<T> for List<T, A> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::default();
        list.extend(iter);
        list
    }
}

impl<T, A: Allocator<Value = T>> IntoIterator for List<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> IntoIter<T, A> {
        IntoIter::new(self)
    }
}

impl<'a, T, A: Allocator<Value = T>> IntoIterator for &'a List<T, A> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T, A: Allocator<Value = T>> IntoIterator for &'a mut List<T, A> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::{StackAllocator, StackStorage};

    /// Walks the ring both ways and checks every link invariant.
    fn assert_ring<T, A: Allocator<Value = T>>(list: &List<T, A>) {
        unsafe {
            let mut node = list.sentinel;
            let mut count = 0;
            loop {
                let next = Links::next(node);
                assert_eq!(Links::prev(next), node, "next.prev must point back");
                node = next;
                if node == list.sentinel {
                    break;
                }
                count += 1;
            }
            assert_eq!(count, list.len);
        }
    }

    #[test]
    fn test_push_pop_both_ends() {
        let mut list = List::new();
        list.push_back(1);
        list.push_back(2);
        list.push_front(0);
        assert_ring(&list);
        assert_eq!(list.len(), 3);
        assert_eq!(list.front(), Some(&0));
        assert_eq!(list.back(), Some(&2));

        assert_eq!(list.pop_front(), Some(0));
        assert_eq!(list.pop_back(), Some(2));
        assert_eq!(list.pop_back(), Some(1));
        assert_eq!(list.pop_back(), None);
        assert_eq!(list.pop_front(), None);
        assert_ring(&list);
    }

    #[test]
    fn test_unchecked_pops() {
        let mut list: List<_> = (1..=3).collect();
        unsafe {
            assert_eq!(list.pop_front_unchecked(), 1);
            assert_eq!(list.pop_back_unchecked(), 3);
        }
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), [2]);
    }

    #[test]
    fn test_front_back_mut() {
        let mut list = List::from_elem(2, &10);
        *list.front_mut().unwrap() += 1;
        *list.back_mut().unwrap() += 2;
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), [11, 12]);

        let mut empty = List::<i32>::new();
        assert!(empty.front_mut().is_none());
        assert!(empty.back().is_none());
    }

    #[test]
    fn test_swap_repairs_both_rings() {
        let mut a: List<_> = (0..4).collect();
        let mut b: List<_> = (10..12).collect();
        a.swap(&mut b);
        assert_ring(&a);
        assert_ring(&b);
        assert_eq!(a.iter().copied().collect::<Vec<_>>(), [10, 11]);
        assert_eq!(b.iter().copied().collect::<Vec<_>>(), [0, 1, 2, 3]);
    }

    #[test]
    fn test_swap_with_empty() {
        let mut a: List<_> = (0..3).collect();
        let mut b = List::new();
        a.swap(&mut b);
        assert_ring(&a);
        assert_ring(&b);
        assert!(a.is_empty());
        assert_eq!(b.len(), 3);

        b.swap(&mut a);
        assert_ring(&a);
        assert_ring(&b);
        assert_eq!(a.iter().rev().copied().collect::<Vec<_>>(), [2, 1, 0]);

        let mut c = List::<u8>::new();
        let mut d = List::<u8>::new();
        c.swap(&mut d);
        assert_ring(&c);
        assert_ring(&d);
    }

    #[test]
    fn test_list_survives_moves() {
        let mut list = List::new();
        list.push_back(String::from("a"));
        let mut moved = vec![list];
        let mut list = moved.pop().unwrap();
        list.push_back(String::from("b"));
        assert_ring(&list);
        assert_eq!(list.back().map(String::as_str), Some("b"));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let storage = StackStorage::<512>::new();
        let mut list = List::from_elem_in(5, &7u32, StackAllocator::new(&storage));
        list.clear();
        assert_ring(&list);
        assert!(list.is_empty());
        list.clear();
        assert_eq!(list.len(), 0);
        assert_eq!(list.iter().next(), None);
    }

    #[test]
    fn test_with_len_defaults() {
        let list = List::<String>::with_len(3);
        assert_eq!(list.len(), 3);
        assert!(list.iter().all(String::is_empty));
    }

    #[test]
    fn test_assign_uses_propagation_policy() {
        let first = StackStorage::<1024>::new();
        let second = StackStorage::<1024>::new();
        let mut target = List::from_elem_in(2, &1u64, StackAllocator::new(&first));
        let source = List::from_elem_in(3, &9u64, StackAllocator::new(&second));

        let second_used = second.used();
        target.clone_from(&source);
        assert_ring(&target);
        assert_eq!(target, source);
        // Stack allocators propagate on copy assignment.
        assert!(target.allocator() == source.allocator());
        assert!(second.used() > second_used);
    }

    #[test]
    fn test_assign_keeps_heap_allocator() {
        let mut target: List<_> = (0..5).collect();
        let source: List<_> = (7..9).collect();
        target.clone_from(&source);
        assert_ring(&target);
        assert_eq!(target.iter().copied().collect::<Vec<_>>(), [7, 8]);
    }

    #[test]
    fn test_failed_assignment_leaves_target_untouched() {
        let storage = StackStorage::<256>::new();
        let mut target = List::from_elem_in(1, &5u64, StackAllocator::new(&storage));
        // Room for the originals but not for a second copy of `source`.
        let source = List::from_elem_in(8, &1u64, StackAllocator::new(&storage));

        let err = target.try_assign_from(&source).unwrap_err();
        assert!(err.is_exhausted());
        assert_ring(&target);
        assert_eq!(target.iter().copied().collect::<Vec<_>>(), [5]);
        assert_eq!(source.len(), 8);
    }

    #[test]
    fn test_sentinel_comes_from_the_allocator() {
        let storage = StackStorage::<64>::new();
        let list = List::<u8, _>::new_in(StackAllocator::new(&storage));
        assert!(storage.used() >= core::mem::size_of::<Links>());
        assert_ring(&list);

        let tiny = StackStorage::<8>::new();
        let err = List::<u8, _>::try_new_in(StackAllocator::new(&tiny)).unwrap_err();
        assert!(err.is_exhausted());
        assert_eq!(tiny.used(), 0);
    }

    #[test]
    fn test_failed_push_keeps_ring_intact() {
        let storage = StackStorage::<128>::new();
        let mut list = List::new_in(StackAllocator::new(&storage));
        while list.try_push_back(7u64).is_ok() {}
        let len = list.len();

        assert!(list.try_push_front(1).is_err());
        assert!(list.cursor_front_mut().try_insert_before(2).is_err());
        assert_eq!(list.len(), len);
        assert_ring(&list);
        assert!(list.iter().all(|&v| v == 7));
    }

    #[test]
    fn test_swap_across_storages() {
        let left = StackStorage::<256>::new();
        let right = StackStorage::<256>::new();
        let mut a = List::from_elem_in(3, &1u16, StackAllocator::new(&left));
        let mut b = List::from_elem_in(1, &2u16, StackAllocator::new(&right));

        a.swap(&mut b);
        assert_ring(&a);
        assert_ring(&b);
        assert!(a.allocator() == StackAllocator::<u16, 256>::new(&right));
        assert_eq!(a.iter().copied().collect::<Vec<_>>(), [2]);

        let used = right.used();
        a.push_back(3);
        assert!(right.used() > used);
    }
}
