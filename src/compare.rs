use core::cmp::Ordering;

/// A total order over `T`, used to place keys (and multimap values) in the tree.
///
/// Any `Fn(&T, &T) -> Ordering` closure is a comparator, so a custom ordering can be
/// supplied without defining a type:
///
/// ```
/// use avl_multi::AvlMultiset;
///
/// // Largest first.
/// let mut set = AvlMultiset::with_comparator(|a: &i32, b: &i32| b.cmp(a));
/// set.extend([1, 3, 2]);
///
/// let keys: Vec<_> = set.iter().map(|(key, _)| *key).collect();
/// assert_eq!(keys, [3, 2, 1]);
/// ```
///
/// It is a logic error for a comparator to be inconsistent (for example, for the
/// result of comparing two keys to change while they are in a container). The
/// behavior resulting from such a logic error is not specified, but will be
/// encapsulated to the container that observed it and not result in undefined
/// behavior.
pub trait Comparator<T: ?Sized> {
    /// Compares `a` against `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// The [`Ord`] ordering of `T`. This is the default comparator of every container.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Natural;

impl<T: ?Sized + Ord> Comparator<T> for Natural {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}
