use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::ptr::NonNull;

use super::node::{Links, Node};
use super::List;
use crate::alloc::Allocator;

/// Iterator over shared references to the elements of a [`List`].
pub struct Iter<'a, T> {
    head: NonNull<Links>,
    tail: NonNull<Links>,
    len: usize,
    _marker: PhantomData<&'a T>,
}

impl<'a, T> Iter<'a, T> {
    pub(super) fn new(head: NonNull<Links>, tail: NonNull<Links>, len: usize) -> Self {
        Self {
            head,
            tail,
            len,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        let node = self.head;
        self.len -= 1;
        // SAFETY: `len` counts the value nodes left between `head` and `tail`.
        unsafe {
            self.head = Links::next(node);
            Some(Node::value(node))
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        let node = self.tail;
        self.len -= 1;
        // SAFETY: as in `next`.
        unsafe {
            self.tail = Links::prev(node);
            Some(Node::value(node))
        }
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter::new(self.head, self.tail, self.len)
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.len).finish()
    }
}

// SAFETY: behaves like `&'a T`.
unsafe impl<T: Sync> Send for Iter<'_, T> {}
unsafe impl<T: Sync> Sync for Iter<'_, T> {}

/// Iterator over mutable references to the elements of a [`List`].
///
/// Converts into an [`Iter`] over the remaining elements, never the other way.
pub struct IterMut<'a, T> {
    head: NonNull<Links>,
    tail: NonNull<Links>,
    len: usize,
    _marker: PhantomData<&'a mut T>,
}

impl<'a, T> IterMut<'a, T> {
    pub(super) fn new(head: NonNull<Links>, tail: NonNull<Links>, len: usize) -> Self {
        Self {
            head,
            tail,
            len,
            _marker: PhantomData,
        }
    }

    /// A shared view of the elements not yet yielded.
    pub fn as_iter(&self) -> Iter<'_, T> {
        Iter::new(self.head, self.tail, self.len)
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<&'a mut T> {
        if self.len == 0 {
            return None;
        }
        let node = self.head;
        self.len -= 1;
        // SAFETY: each node is yielded once, so the `&mut` never aliases.
        unsafe {
            self.head = Links::next(node);
            Some(Node::value_mut(node))
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.len == 0 {
            return None;
        }
        let node = self.tail;
        self.len -= 1;
        // SAFETY: as in `next`.
        unsafe {
            self.tail = Links::prev(node);
            Some(Node::value_mut(node))
        }
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

impl<'a, T> From<IterMut<'a, T>> for Iter<'a, T> {
    fn from(iter: IterMut<'a, T>) -> Self {
        Iter::new(iter.head, iter.tail, iter.len)
    }
}

impl<T: fmt::Debug> fmt::Debug for IterMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IterMut").field(&self.as_iter()).finish()
    }
}

// SAFETY: behaves like `&'a mut T`.
unsafe impl<T: Send> Send for IterMut<'_, T> {}
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

/// Owning iterator over the elements of a [`List`].
pub struct IntoIter<T, A: Allocator<Value = T>> {
    list: List<T, A>,
}

impl<T, A: Allocator<Value = T>> IntoIter<T, A> {
    pub(super) fn new(list: List<T, A>) -> Self {
        Self { list }
    }
}

impl<T, A: Allocator<Value = T>> Iterator for IntoIter<T, A> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T, A: Allocator<Value = T>> DoubleEndedIterator for IntoIter<T, A> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back()
    }
}

impl<T, A: Allocator<Value = T>> ExactSizeIterator for IntoIter<T, A> {}
impl<T, A: Allocator<Value = T>> FusedIterator for IntoIter<T, A> {}

impl<T: fmt::Debug, A: Allocator<Value = T>> fmt::Debug for IntoIter<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.list).finish()
    }
}
