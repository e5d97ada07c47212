use alloc::collections::TryReserveError;
use core::fmt;

use smallvec::CollectionAllocErr;

/// The error returned when a container could not obtain the memory a mutation needed.
///
/// A call that fails with `AllocError` leaves the container exactly as it was before
/// the call: no node, key or value is linked into the tree.
///
/// # Examples
///
/// ```
/// use avl_multi::{AllocError, AvlMultiset};
///
/// let mut set = AvlMultiset::new();
/// let result: Result<(), AllocError> = set.try_insert(7);
/// assert!(result.is_ok());
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum AllocError {
    /// The allocator refused a request for node or value storage.
    OutOfMemory,
    /// The container already holds as many nodes (or values under one key) as it can address.
    CapacityOverflow,
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocError::OutOfMemory => f.write_str("memory allocation failed"),
            AllocError::CapacityOverflow => f.write_str("capacity overflow"),
        }
    }
}

impl core::error::Error for AllocError {}

impl From<TryReserveError> for AllocError {
    // `TryReserveError::kind()` is unstable, so every reservation failure is reported as
    // an allocator refusal.
    fn from(_: TryReserveError) -> Self {
        AllocError::OutOfMemory
    }
}

impl From<CollectionAllocErr> for AllocError {
    fn from(error: CollectionAllocErr) -> Self {
        match error {
            CollectionAllocErr::CapacityOverflow => AllocError::CapacityOverflow,
            CollectionAllocErr::AllocErr { .. } => AllocError::OutOfMemory,
        }
    }
}
