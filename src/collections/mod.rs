//! Allocator-aware containers.

pub mod list;

pub use list::{Cursor, CursorMut, IntoIter, Iter, IterMut, List};
