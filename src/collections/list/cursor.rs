//! Positions inside a [`List`].
//!
//! A cursor sits either on an element or on the past-the-end position (the
//! sentinel). Stepping is circular, as the ring is: moving forward from the
//! past-the-end position lands on the first element, moving back from it
//! lands on the last.
//!
//! [`CursorMut`] is the only way to insert or remove in the middle of a list.
//! Edits made through it keep the cursor valid: inserting never moves it, and
//! removing advances it to the following position.

use core::fmt;
use core::ptr::NonNull;

use super::node::{Links, Node};
use super::{unwrap_alloc, List};
use crate::alloc::{AllocError, Allocator, Global};

/// A read-only cursor.
pub struct Cursor<'a, T, A: Allocator<Value = T> = Global<T>> {
    current: NonNull<Links>,
    index: usize,
    list: &'a List<T, A>,
}

impl<'a, T, A: Allocator<Value = T>> Cursor<'a, T, A> {
    pub(super) fn new(list: &'a List<T, A>, current: NonNull<Links>, index: usize) -> Self {
        Self { current, index, list }
    }

    /// Index of the current element, or `None` at the past-the-end position.
    pub fn index(&self) -> Option<usize> {
        (!self.is_end()).then_some(self.index)
    }

    /// Returns `true` at the past-the-end position.
    pub fn is_end(&self) -> bool {
        self.current == self.list.sentinel
    }

    /// Steps to the following position.
    pub fn move_next(&mut self) {
        (self.current, self.index) = step_next(self.list, self.current, self.index);
    }

    /// Steps to the preceding position.
    pub fn move_prev(&mut self) {
        (self.current, self.index) = step_prev(self.list, self.current, self.index);
    }

    /// The current element, or `None` at the past-the-end position.
    pub fn current(&self) -> Option<&'a T> {
        // SAFETY: not the sentinel, so a value node of `list`.
        (!self.is_end()).then(|| unsafe { Node::value(self.current) })
    }

    /// The element after the current position, without moving.
    pub fn peek_next(&self) -> Option<&'a T> {
        // SAFETY: the cursor always sits on a live ring member.
        let next = unsafe { Links::next(self.current) };
        (next != self.list.sentinel).then(|| unsafe { Node::value(next) })
    }

    /// The element before the current position, without moving.
    pub fn peek_prev(&self) -> Option<&'a T> {
        // SAFETY: the cursor always sits on a live ring member.
        let prev = unsafe { Links::prev(self.current) };
        (prev != self.list.sentinel).then(|| unsafe { Node::value(prev) })
    }
}

impl<T, A: Allocator<Value = T>> Clone for Cursor<'_, T, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, A: Allocator<Value = T>> Copy for Cursor<'_, T, A> {}

impl<T: fmt::Debug, A: Allocator<Value = T>> fmt::Debug for Cursor<'_, T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.index()).field(&self.current()).finish()
    }
}

/// A cursor that can edit the list around its position.
pub struct CursorMut<'a, T, A: Allocator<Value = T> = Global<T>> {
    current: NonNull<Links>,
    index: usize,
    list: &'a mut List<T, A>,
}

impl<'a, T, A: Allocator<Value = T>> CursorMut<'a, T, A> {
    pub(super) fn new(list: &'a mut List<T, A>, current: NonNull<Links>, index: usize) -> Self {
        Self { current, index, list }
    }

    /// Index of the current element, or `None` at the past-the-end position.
    pub fn index(&self) -> Option<usize> {
        (!self.is_end()).then_some(self.index)
    }

    /// Returns `true` at the past-the-end position.
    pub fn is_end(&self) -> bool {
        self.current == self.list.sentinel
    }

    /// Steps to the following position.
    pub fn move_next(&mut self) {
        (self.current, self.index) = step_next(self.list, self.current, self.index);
    }

    /// Steps to the preceding position.
    pub fn move_prev(&mut self) {
        (self.current, self.index) = step_prev(self.list, self.current, self.index);
    }

    /// The current element, or `None` at the past-the-end position.
    pub fn current(&mut self) -> Option<&mut T> {
        let current = self.current;
        // SAFETY: not the sentinel; `&mut self` borrows the whole list.
        (!self.is_end()).then(|| unsafe { Node::value_mut(current) })
    }

    /// The element after the current position, without moving.
    pub fn peek_next(&mut self) -> Option<&mut T> {
        // SAFETY: the cursor always sits on a live ring member.
        let next = unsafe { Links::next(self.current) };
        (next != self.list.sentinel).then(|| unsafe { Node::value_mut(next) })
    }

    /// The element before the current position, without moving.
    pub fn peek_prev(&mut self) -> Option<&mut T> {
        // SAFETY: the cursor always sits on a live ring member.
        let prev = unsafe { Links::prev(self.current) };
        (prev != self.list.sentinel).then(|| unsafe { Node::value_mut(prev) })
    }

    /// A read-only cursor at the same position, borrowing this one.
    pub fn as_cursor(&self) -> Cursor<'_, T, A> {
        Cursor::new(self.list, self.current, self.index)
    }

    /// Inserts `value` right before the current position.
    ///
    /// At the past-the-end position this appends. The cursor keeps pointing
    /// at the same element.
    ///
    /// # Panics
    /// Panics if the allocator cannot provide a node.
    pub fn insert_before(&mut self, value: T) {
        unwrap_alloc(self.try_insert_before(value));
    }

    /// Fallible [`CursorMut::insert_before`]; the list is unchanged on error.
    ///
    /// # Errors
    /// Returns the allocator's error.
    pub fn try_insert_before(&mut self, value: T) -> Result<(), AllocError> {
        // SAFETY: `current` is a member of `list`'s ring.
        unsafe { self.list.insert_before_link(self.current, || value)? };
        self.index += 1;
        Ok(())
    }

    /// Removes the current element and returns it, moving to the following
    /// position. Returns `None` (and does nothing) at the past-the-end position.
    pub fn remove_current(&mut self) -> Option<T> {
        if self.is_end() {
            return None;
        }
        let node = self.current;
        // SAFETY: `node` is a value node of `list`; it is read before unlinking.
        unsafe {
            self.current = Links::next(node);
            Some(self.list.unlink_take(node))
        }
    }
}

impl<'a, T, A: Allocator<Value = T>> From<CursorMut<'a, T, A>> for Cursor<'a, T, A> {
    fn from(cursor: CursorMut<'a, T, A>) -> Self {
        let CursorMut { current, index, list } = cursor;
        Cursor::new(list, current, index)
    }
}

impl<T: fmt::Debug, A: Allocator<Value = T>> fmt::Debug for CursorMut<'_, T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CursorMut").field(&self.as_cursor()).finish()
    }
}

fn step_next<T, A: Allocator<Value = T>>(
    list: &List<T, A>,
    current: NonNull<Links>,
    index: usize,
) -> (NonNull<Links>, usize) {
    // SAFETY: `current` is a live member of `list`'s ring.
    let next = unsafe { Links::next(current) };
    if current == list.sentinel {
        (next, 0)
    } else {
        (next, index + 1)
    }
}

fn step_prev<T, A: Allocator<Value = T>>(
    list: &List<T, A>,
    current: NonNull<Links>,
    index: usize,
) -> (NonNull<Links>, usize) {
    // SAFETY: `current` is a live member of `list`'s ring.
    let prev = unsafe { Links::prev(current) };
    if prev == list.sentinel {
        (prev, list.len)
    } else if current == list.sentinel {
        (prev, list.len - 1)
    } else {
        (prev, index - 1)
    }
}
