use core::alloc::Layout;
use core::ptr::{self, NonNull};

/// A typed, rebindable allocator handle.
///
/// This is the capability a [`List`](crate::List) consumes: it never looks at an
/// allocator's internals, it only asks for room for `n` values, constructs and
/// destroys values in that room, and gives the room back.
///
/// Handles are cheap to clone. [`rebind`](Allocator::rebind) produces a handle
/// for another element type that still draws from the same resource, which is
/// how a container turns an allocator for `T` into one for its node type.
///
/// Equality (`PartialEq`) means "backed by the same resource": memory obtained
/// through one handle may be released through any handle equal to it.
pub trait Allocator: Clone + PartialEq {
    /// The element type this handle allocates for.
    type Value;

    /// The same allocator, rebound to element type `U`.
    type Rebind<U>: Allocator<Value = U>;

    /// Whether assigning one container over another adopts the source's
    /// allocator (`true`) or keeps the target's own (`false`).
    const PROPAGATE_ON_CONTAINER_COPY_ASSIGNMENT: bool = false;

    /// Returns a handle for element type `U` over the same resource.
    fn rebind<U>(&self) -> Self::Rebind<U>;

    /// Allocates uninitialized room for `n` values.
    ///
    /// # Errors
    /// Returns an [`AllocError`] if the resource cannot satisfy the request.
    fn allocate(&self, n: usize) -> Result<NonNull<Self::Value>, AllocError>;

    /// Releases room for `n` values.
    ///
    /// # Safety
    /// `ptr` must come from [`allocate`](Allocator::allocate) with the same `n`
    /// on this handle (or one equal to it), and must not be released twice.
    unsafe fn deallocate(&self, ptr: NonNull<Self::Value>, n: usize);

    /// Moves `value` into the uninitialized slot at `ptr`.
    ///
    /// # Safety
    /// `ptr` must be valid for writes and properly aligned.
    unsafe fn construct(&self, ptr: NonNull<Self::Value>, value: Self::Value) {
        ptr.as_ptr().write(value);
    }

    /// Drops the value at `ptr` in place. The slot itself is not released.
    ///
    /// # Safety
    /// `ptr` must point to an initialized value that is not used afterwards.
    unsafe fn destroy(&self, ptr: NonNull<Self::Value>) {
        ptr::drop_in_place(ptr.as_ptr());
    }

    /// The allocator a copy of a container should use.
    fn select_on_container_copy_construction(&self) -> Self {
        self.clone()
    }
}

/// Computes the layout of `n` consecutive `T`s.
pub(crate) fn array_layout<T>(n: usize) -> Result<Layout, AllocError> {
    Layout::array::<T>(n).map_err(|_| AllocError::CapacityOverflow)
}

/// The error type for allocation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AllocError {
    /// The underlying heap refused the request.
    #[error("memory allocation of {size} bytes (align {align}) failed")]
    OutOfMemory {
        /// Requested size in bytes.
        size: usize,
        /// Requested alignment.
        align: usize,
    },
    /// The requested size does not fit in `isize`.
    #[error("requested allocation size overflows")]
    CapacityOverflow,
    /// A fixed-capacity arena has no room left for the request.
    #[error("arena exhausted: requested {requested} bytes, {remaining} remaining")]
    Exhausted {
        /// Requested size in bytes, excluding alignment padding.
        requested: usize,
        /// Bytes left in the arena before the request.
        remaining: usize,
    },
}

impl AllocError {
    /// Returns `true` for arena exhaustion, which no retry can fix.
    pub const fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted { .. })
    }
}
