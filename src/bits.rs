//! Power-of-two arithmetic used to locate poplar boundaries.
//!
//! A poplar heap stores no layout information: the size of every poplar is
//! recomputed from the element count alone, and the only primitive that
//! computation needs is the *bit floor* of an unsigned integer.

use crate::polyfill::*;

/// Unsigned integers whose bit floor can be taken.
///
/// This trait is sealed and implemented for every unsigned primitive.
pub trait BitFloor: Copy + private::Sealed {
    /// Returns the largest power of two that is less than or equal to `self`,
    /// or `0` if `self` is `0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use poplar_heap::bits::BitFloor;
    ///
    /// assert_eq!(0u32.bit_floor(), 0);
    /// assert_eq!(1u32.bit_floor(), 1);
    /// assert_eq!(12u32.bit_floor(), 8);
    /// assert_eq!(u8::MAX.bit_floor(), 128);
    /// ```
    #[must_use]
    fn bit_floor(self) -> Self;

    /// Returns the largest power of two that is less than or equal to `self`,
    /// skipping the zero check.
    ///
    /// # Safety
    ///
    /// `self` must not be zero.
    #[must_use]
    unsafe fn bit_floor_unguarded(self) -> Self;
}

mod private {
    pub trait Sealed {}
}

macro_rules! bit_floor {
    ($($t:ty),* $(,)?) => {$(
        impl private::Sealed for $t {}

        impl BitFloor for $t {
            #[inline]
            #[allow(unstable_name_collisions)]
            fn bit_floor(self) -> Self {
                // Zero smears to zero, so no special case is needed here.
                self.isolate_highest_one()
            }

            #[inline]
            unsafe fn bit_floor_unguarded(self) -> Self {
                debug_assert!(self != 0);
                1 << (<$t>::BITS - 1 - self.leading_zeros())
            }
        }
    )*};
}

bit_floor!(u8, u16, u32, u64, u128, usize);

/// Returns the size of the first (leftmost, largest) poplar of a poplar heap
/// holding `size` elements.
///
/// That is the largest number of the form `2^k - 1` that does not exceed
/// `size`. The arithmetic wraps: a forest of `usize::MAX` elements is a single
/// poplar, since `usize::MAX + 1` wraps to zero and back again.
///
/// # Examples
///
/// ```
/// use poplar_heap::bits::first_poplar_size;
///
/// assert_eq!(first_poplar_size(0), 0);
/// assert_eq!(first_poplar_size(7), 7);
/// assert_eq!(first_poplar_size(12), 7);
/// assert_eq!(first_poplar_size(usize::MAX), usize::MAX);
/// ```
#[inline]
#[must_use]
pub fn first_poplar_size(size: usize) -> usize {
    size.wrapping_add(1).bit_floor().wrapping_sub(1)
}
