//! # `ringlist` - Allocator-Aware Linked List and Bump Arena
//!
//! Two building blocks that compose through one trait:
//!
//! - [`List`]: a doubly linked list laid out as a circular ring around a
//!   payload-free sentinel node. The sentinel and every value node are
//!   requested from an injected [`Allocator`], so a list over a
//!   [`StackStorage`] never touches the heap; insertion and removal at either
//!   end or at a [`CursorMut`] are O(1).
//! - [`StackStorage`] / [`StackAllocator`]: a fixed-capacity bump arena and
//!   the copyable handles that carve aligned spans out of it. Space is never
//!   reclaimed; running out is a hard [`AllocError::Exhausted`] failure.
//!
//! ## Failure model
//!
//! - **Strong guarantee**: a push or insert that fails (allocation error or a
//!   panic while building the value) leaves the list exactly as it was.
//! - **Build, then exchange**: copies are built in a separate list and only
//!   swapped in once complete; a partial copy is torn down on failure.
//! - **Single-threaded**: the arena is `!Sync`; no operation blocks.
//!
//! ## Example
//!
//! ```rust
//! use ringlist::{List, StackAllocator, StackStorage};
//!
//! let storage = StackStorage::<4096>::new();
//! let alloc = StackAllocator::new(&storage);
//!
//! let mut list = List::new_in(alloc);
//! list.push_back(1);
//! list.push_back(2);
//! list.push_front(0);
//!
//! let mut cursor = list.cursor_front_mut();
//! cursor.move_next();
//! assert_eq!(cursor.remove_current(), Some(1));
//!
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), [0, 2]);
//! assert!(storage.used() > 0);
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

#[macro_use]
mod macros;

pub mod alloc;
pub mod collections;

pub use alloc::{AllocError, Allocator, Global, StackAllocator, StackStorage};
pub use collections::{Cursor, CursorMut, List};

// Compile-time layout checks.
const _: () = {
    use core::mem;

    // Handles are a single reference or nothing at all.
    assert!(mem::size_of::<Global<u64>>() == 0);
    assert!(mem::size_of::<StackAllocator<'static, u64, 64>>() == mem::size_of::<usize>());

    // A list is a sentinel pointer plus a length, and the allocator on top.
    assert!(mem::size_of::<List<u64>>() == 2 * mem::size_of::<usize>());
    assert!(
        mem::size_of::<List<u64, StackAllocator<'static, u64, 64>>>() == 3 * mem::size_of::<usize>()
    );
};
