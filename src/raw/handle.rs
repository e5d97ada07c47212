use core::fmt;
use core::num::NonZero;

/// A stable index of a node slot in the arena.
///
/// Handles are stored off by one so that `Option<Handle>` (the parent/left/right
/// links of a node) costs no more than the raw integer.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<u32>);

impl Handle {
    /// The largest slot index a handle can address.
    pub(crate) const MAX: usize = (u32::MAX - 1) as usize;

    /// Returns the handle of slot `index`, or `None` if `index` is past [`Handle::MAX`].
    #[inline]
    pub(crate) const fn try_from_index(index: usize) -> Option<Self> {
        if index > Self::MAX {
            return None;
        }
        #[allow(clippy::cast_possible_truncation)]
        match NonZero::new((index + 1) as u32) {
            Some(raw) => Some(Self(raw)),
            None => None,
        }
    }

    #[inline]
    pub(crate) const fn to_index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_index())
    }
}
