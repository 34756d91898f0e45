//! Poplar heaps: an implicit forest of perfect binary max-heaps laid out in a
//! single slice.
//!
//! A poplar heap of `n` elements is the left-to-right sequence of *poplars*
//! obtained by repeatedly carving the largest `2^k - 1` elements off the front
//! of the slice. Each poplar stores its two subpoplars back to back, followed by
//! its root. Because the layout is a function of `n` alone, no auxiliary storage
//! is ever needed: every operation recomputes poplar boundaries with a little
//! bit arithmetic (see [`bits`]).
//!
//! The [`slice`] module offers the in-place heap algorithms over `&mut [T]`,
//! in the manner of the standard library's `sort`, `sort_by` and `sort_by_key`.
//! [`PoplarHeap`] is a priority queue built on top of them that, like the rest
//! of this crate's API, orders its items by a runtime [`TotalOrder`] rather than
//! requiring the [`Ord`] trait.
//!
//! ```
//! use poplar_heap::slice;
//!
//! let mut v = [1, 3, 6, 5, 2, 7, 4];
//! slice::make_heap(&mut v);
//! assert!(slice::is_heap(&v));
//! assert_eq!(v[6], 7);
//!
//! slice::sort_heap(&mut v);
//! assert_eq!(v, [1, 2, 3, 4, 5, 6, 7]);
//! ```
#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![cfg_attr(feature = "error_in_core", feature(error_in_core))]
#![cfg_attr(feature = "exact_size_is_empty", feature(exact_size_is_empty))]
#![cfg_attr(
    feature = "isolate_most_least_significant_one",
    feature(isolate_most_least_significant_one)
)]
#![cfg_attr(feature = "trusted_len", feature(trusted_len))]
// documentation controls
#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg))]
#![deny(missing_docs)]
#![cfg_attr(test, allow(clippy::needless_range_loop, clippy::redundant_clone, clippy::useless_vec))]

extern crate alloc;

mod polyfill;

pub mod bits;
pub mod default;
pub mod heap;
mod poplar;
pub mod slice;


use core::cmp::Ordering;

pub use default::{OrdTotalOrder, ReverseOrder};
pub use heap::{NotAPoplarHeap, PoplarHeap};

/// A runtime total order over values of type `T`.
///
/// Implementors must ensure that `cmp` is a total order: it must be
/// consistent, antisymmetric and transitive, and it must not change for the
/// lifetime of any collection or heap-ordered slice that it arranges. A
/// violation of these requirements is a logic error whose consequences are
/// unspecified but memory safe.
///
/// # Examples
///
/// ```
/// use core::cmp::Ordering;
/// use poplar_heap::{PoplarHeap, TotalOrder};
///
/// /// Orders strings by their length alone.
/// struct ByLength;
///
/// impl TotalOrder<&str> for ByLength {
///     fn cmp(&self, this: &&str, that: &&str) -> Ordering {
///         this.len().cmp(&that.len())
///     }
/// }
///
/// let mut heap = PoplarHeap::new(ByLength);
/// heap.push("aa");
/// heap.push("aaaa");
/// heap.push("a");
/// assert_eq!(heap.pop(), Some("aaaa"));
/// ```
pub trait TotalOrder<T: ?Sized> {
    /// Compares `this` with `that` under this total order.
    fn cmp(&self, this: &T, that: &T) -> Ordering;

    /// Tests whether `this` and `that` are equivalent under this total order.
    #[inline]
    fn eq(&self, this: &T, that: &T) -> bool {
        self.cmp(this, that).is_eq()
    }
    /// Tests whether `this` and `that` are not equivalent under this total order.
    #[inline]
    fn ne(&self, this: &T, that: &T) -> bool {
        self.cmp(this, that).is_ne()
    }

    /// Tests whether `this` is ordered at or after `that`.
    #[inline]
    fn ge(&self, this: &T, that: &T) -> bool {
        self.cmp(this, that).is_ge()
    }
    /// Tests whether `this` is ordered strictly after `that`.
    #[inline]
    fn gt(&self, this: &T, that: &T) -> bool {
        self.cmp(this, that).is_gt()
    }
    /// Tests whether `this` is ordered at or before `that`.
    #[inline]
    fn le(&self, this: &T, that: &T) -> bool {
        self.cmp(this, that).is_le()
    }
    /// Tests whether `this` is ordered strictly before `that`.
    #[inline]
    fn lt(&self, this: &T, that: &T) -> bool {
        self.cmp(this, that).is_lt()
    }
}

impl<T: ?Sized, O: ?Sized + TotalOrder<T>> TotalOrder<T> for &O {
    #[inline]
    fn cmp(&self, this: &T, that: &T) -> Ordering {
        (**self).cmp(this, that)
    }
    #[inline]
    fn eq(&self, this: &T, that: &T) -> bool {
        (**self).eq(this, that)
    }
    #[inline]
    fn ne(&self, this: &T, that: &T) -> bool {
        (**self).ne(this, that)
    }
    #[inline]
    fn ge(&self, this: &T, that: &T) -> bool {
        (**self).ge(this, that)
    }
    #[inline]
    fn gt(&self, this: &T, that: &T) -> bool {
        (**self).gt(this, that)
    }
    #[inline]
    fn le(&self, this: &T, that: &T) -> bool {
        (**self).le(this, that)
    }
    #[inline]
    fn lt(&self, this: &T, that: &T) -> bool {
        (**self).lt(this, that)
    }
}


#[cfg(test)]
#[allow(dead_code)] // Not used in all configurations
pub(crate) mod test_helpers {
    /// Seeds a fresh RNG per call site, so that each test sees its own
    /// reproducible-within-a-run sequence.
    #[track_caller]
    pub(crate) fn test_rng() -> rand_xorshift::XorShiftRng {
        use std::hash::{BuildHasher, Hash, Hasher};
        let mut hasher = std::collections::hash_map::RandomState::new().build_hasher();
        std::panic::Location::caller().hash(&mut hasher);
        let hc64 = hasher.finish();
        let seed_vec =
            hc64.to_le_bytes().into_iter().chain(0u8..8).collect::<alloc::vec::Vec<u8>>();
        let seed: [u8; 16] = seed_vec.as_slice().try_into().unwrap();
        rand::SeedableRng::from_seed(seed)
    }
}
