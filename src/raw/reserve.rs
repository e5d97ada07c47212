//! Every allocation the containers make goes through this module, so that a failed
//! request is always caught before anything is linked into a tree.

use alloc::vec::Vec;

use smallvec::{Array, SmallVec};

use crate::AllocError;

/// Reserves room for `additional` more elements in `vec`.
pub(crate) fn try_reserve<T>(vec: &mut Vec<T>, additional: usize) -> Result<(), AllocError> {
    #[cfg(test)]
    fail_point::hit()?;
    vec.try_reserve(additional).map_err(|error| {
        tracing::debug!(additional, "node storage reservation failed");
        AllocError::from(error)
    })
}

/// Reserves room for `additional` more values in a multimap value chain.
pub(crate) fn try_reserve_chain<A: Array>(chain: &mut SmallVec<A>, additional: usize) -> Result<(), AllocError> {
    #[cfg(test)]
    fail_point::hit()?;
    chain.try_reserve(additional).map_err(|error| {
        tracing::debug!(additional, "value chain reservation failed");
        AllocError::from(error)
    })
}

/// Forces the N-th upcoming allocation of the current test thread to fail.
#[cfg(test)]
pub(crate) mod fail_point {
    use core::cell::Cell;

    use crate::AllocError;

    std::thread_local! {
        static COUNTDOWN: Cell<Option<usize>> = const { Cell::new(None) };
        static HITS: Cell<usize> = const { Cell::new(0) };
    }

    /// Lets `skip` allocations succeed, then fails the next one. Disarms after firing.
    pub(crate) fn fail_after(skip: usize) {
        COUNTDOWN.with(|countdown| countdown.set(Some(skip)));
    }

    pub(crate) fn disarm() {
        COUNTDOWN.with(|countdown| countdown.set(None));
    }

    /// Number of allocation points passed on this thread since the last reset.
    pub(crate) fn hits() -> usize {
        HITS.with(Cell::get)
    }

    pub(crate) fn reset_hits() {
        HITS.with(|hits| hits.set(0));
    }

    pub(super) fn hit() -> Result<(), AllocError> {
        HITS.with(|hits| hits.set(hits.get() + 1));
        COUNTDOWN.with(|countdown| match countdown.get() {
            Some(0) => {
                countdown.set(None);
                Err(AllocError::OutOfMemory)
            }
            Some(skip) => {
                countdown.set(Some(skip - 1));
                Ok(())
            }
            None => Ok(()),
        })
    }
}
