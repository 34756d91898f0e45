//! Stock total orders: the one that makes this crate behave as per the standard
//! library, namely using the [`Ord`] trait for comparisons, and an adaptor that
//! reverses any other.

use crate::TotalOrder;
use core::{cmp::Ordering, fmt, marker::PhantomData};

/// A zero-sized total order that delegates to the [`Ord`] implementation
/// of its type parameter `T`.
pub struct OrdTotalOrder<T: ?Sized>(PhantomData<fn(&T)>);

impl<T: ?Sized> OrdTotalOrder<T> {
    /// Creates the total order.
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T: ?Sized> Default for OrdTotalOrder<T> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<T: ?Sized> Clone for OrdTotalOrder<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for OrdTotalOrder<T> {}

impl<T: ?Sized> fmt::Debug for OrdTotalOrder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OrdTotalOrder")
    }
}

impl<T: ?Sized + Ord> TotalOrder<T> for OrdTotalOrder<T> {
    // Delegate to `T`'s implementation of [`Ord`].
    fn cmp(&self, this: &T, that: &T) -> Ordering {
        this.cmp(that)
    }

    // The following delegate to `T`'s implementations of [`PartialEq`] and
    // [`PartialOrd`] rather than merely to its implementation of [`Ord`], so that
    // types whose implementations disagree observe the same comparisons as they
    // would under the standard library.

    fn eq(&self, this: &T, that: &T) -> bool {
        this == that
    }
    fn ne(&self, this: &T, that: &T) -> bool {
        this != that
    }

    fn ge(&self, this: &T, that: &T) -> bool {
        this >= that
    }
    fn gt(&self, this: &T, that: &T) -> bool {
        this > that
    }
    fn le(&self, this: &T, that: &T) -> bool {
        this <= that
    }
    fn lt(&self, this: &T, that: &T) -> bool {
        this < that
    }
}

/// A total order that reverses another, turning a max-heap into a min-heap.
///
/// # Examples
///
/// ```
/// use poplar_heap::{OrdTotalOrder, PoplarHeap, ReverseOrder};
///
/// let mut heap = PoplarHeap::new(ReverseOrder(OrdTotalOrder::new()));
/// heap.extend([5, 1, 8, 3]);
/// assert_eq!(heap.pop(), Some(1));
/// assert_eq!(heap.pop(), Some(3));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReverseOrder<O>(pub O);

impl<T: ?Sized, O: TotalOrder<T>> TotalOrder<T> for ReverseOrder<O> {
    #[inline]
    fn cmp(&self, this: &T, that: &T) -> Ordering {
        self.0.cmp(that, this)
    }
    #[inline]
    fn lt(&self, this: &T, that: &T) -> bool {
        self.0.lt(that, this)
    }
}
