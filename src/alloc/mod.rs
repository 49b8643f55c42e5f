//! Allocators: the capability trait, the heap, and the bump arena.

/// The `Allocator` capability and its error type.
pub mod allocator;
/// Fixed-capacity bump arena.
pub mod bump;
/// Heap-backed default allocator.
pub mod heap;

pub use allocator::{AllocError, Allocator};
pub use bump::{StackAllocator, StackStorage};
pub use heap::Global;
