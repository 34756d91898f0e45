//! In-place poplar heap algorithms over slices.
//!
//! Every operation comes in three flavours, mirroring the standard library's
//! sorting methods: one ordered by [`Ord`], one `_by` a comparator function, and
//! one `_by_key` an extracted [`Ord`] key. The comparator must describe a total
//! order; if it does not, or if a precondition below is violated, the resulting
//! arrangement is unspecified, but every element remains in the slice exactly
//! once. The same holds if the comparator panics.
//!
//! None of these functions allocate.
//!
//! # Examples
//!
//! Maintaining a heap by hand, the way one would with C++'s `<algorithm>`:
//!
//! ```
//! use poplar_heap::slice;
//!
//! let mut v = vec![4, 9, 1, 7];
//! slice::make_heap(&mut v);
//!
//! v.push(8);
//! slice::push_heap(&mut v);
//! assert!(slice::is_heap(&v));
//!
//! slice::pop_heap(&mut v);
//! assert_eq!(v.pop(), Some(9));
//! slice::pop_heap(&mut v);
//! assert_eq!(v.pop(), Some(8));
//! assert!(slice::is_heap(&v));
//! ```

use core::cmp::Ordering;

use crate::poplar;

/// Restores the heap property of `v` after an element was added at its end.
///
/// `v[..v.len() - 1]` must be a valid poplar heap; the last element is the
/// one being admitted. Afterwards, the whole of `v` is a valid poplar heap.
///
/// # Current implementation
///
/// The new element becomes the root of the last poplar of the forest and is
/// sifted down that poplar: *O*(log(*n*)) comparisons and no allocation.
///
/// # Examples
///
/// ```
/// use poplar_heap::slice;
///
/// let mut v = vec![];
/// for x in [3, 1, 4, 1, 5, 9, 2, 6] {
///     v.push(x);
///     slice::push_heap(&mut v);
/// }
/// assert!(slice::is_heap(&v));
/// ```
pub fn push_heap<T: Ord>(v: &mut [T]) {
    poplar::push_heap(v, &mut T::lt);
}

/// Moves the greatest element of the poplar heap `v` to its end.
///
/// `v` must be a valid poplar heap. Afterwards, `v[v.len() - 1]` holds the
/// element that was greatest and `v[..v.len() - 1]` is a valid poplar heap.
/// Slices of fewer than two elements are left untouched.
///
/// # Current implementation
///
/// The roots of the poplars are scanned for the greatest one, which is
/// exchanged with the root of the last poplar before the poplar it came from
/// is repaired: *O*(log(*n*)) comparisons and no allocation.
///
/// # Examples
///
/// ```
/// use poplar_heap::slice;
///
/// let mut v = [5, 2, 8, 1, 9, 3];
/// slice::make_heap(&mut v);
/// slice::pop_heap(&mut v);
/// assert_eq!(v[5], 9);
/// assert!(slice::is_heap(&v[..5]));
/// ```
pub fn pop_heap<T: Ord>(v: &mut [T]) {
    poplar::pop_heap(v, &mut T::lt);
}

/// Arranges `v` into a valid poplar heap.
///
/// # Current implementation
///
/// Each poplar of the forest is assembled from insertion-sorted blocks of 15
/// elements that are fused following the binary carry sequence. This takes
/// *O*(*n* \* log(*n*)) comparisons in the worst case, and no allocation. It
/// is often observed to run in linear time, but that is not guaranteed.
///
/// # Examples
///
/// ```
/// use poplar_heap::slice;
///
/// let mut v = [1, 3, 6, 5, 2, 7, 4];
/// slice::make_heap(&mut v);
/// assert!(slice::is_heap(&v));
/// // Seven elements form a single poplar, rooted at the end.
/// assert_eq!(v[6], 7);
/// ```
pub fn make_heap<T: Ord>(v: &mut [T]) {
    poplar::make_heap(v, &mut T::lt);
}

/// Arranges `v` into a valid poplar heap by pushing its elements one at a
/// time.
///
/// This has the same result contract as [`make_heap`] and performs
/// *O*(*n* \* log(*n*)) comparisons; it is generally slower.
///
/// # Examples
///
/// ```
/// use poplar_heap::slice;
///
/// let mut v = [6, 0, 2, 9, 4];
/// slice::make_heap_naive(&mut v);
/// assert!(slice::is_heap(&v));
/// ```
pub fn make_heap_naive<T: Ord>(v: &mut [T]) {
    poplar::make_heap_naive(v, &mut T::lt);
}

/// Arranges `v` into a valid poplar heap, building every poplar top-down.
///
/// This has the same result contract as [`make_heap`] and performs
/// *O*(*n* \* log(*n*)) comparisons, but recurses into both subpoplars of
/// every poplar and so uses *O*(log(*n*)) stack space.
///
/// # Examples
///
/// ```
/// use poplar_heap::slice;
///
/// let mut v = [6, 0, 2, 9, 4];
/// slice::make_heap_recursive(&mut v);
/// assert!(slice::is_heap(&v));
/// ```
pub fn make_heap_recursive<T: Ord>(v: &mut [T]) {
    poplar::make_heap_recursive(v, &mut T::lt);
}

/// Sorts the poplar heap `v` into ascending order.
///
/// `v` must be a valid poplar heap.
///
/// # Current implementation
///
/// The greatest element is popped to the end of the shrinking heap until one
/// element remains: *O*(*n* \* log(*n*)) comparisons and no allocation.
///
/// # Examples
///
/// ```
/// use poplar_heap::slice;
///
/// let mut v = [1, 3, 6, 5, 2, 7, 4];
/// slice::make_heap(&mut v);
/// slice::sort_heap(&mut v);
/// assert_eq!(v, [1, 2, 3, 4, 5, 6, 7]);
/// ```
pub fn sort_heap<T: Ord>(v: &mut [T]) {
    poplar::sort_heap(v, &mut T::lt);
}

/// Sorts `v` into ascending order with poplar sort: [`make_heap`] followed by
/// [`sort_heap`].
///
/// The sort is unstable, in place, and performs *O*(*n* \* log(*n*))
/// comparisons.
///
/// # Examples
///
/// ```
/// use poplar_heap::slice;
///
/// let mut v = [-5, 4, 1, -3, 2];
/// slice::heapsort(&mut v);
/// assert_eq!(v, [-5, -3, 1, 2, 4]);
/// ```
pub fn heapsort<T: Ord>(v: &mut [T]) {
    let is_less = &mut T::lt;
    poplar::make_heap(v, is_less);
    poplar::sort_heap(v, is_less);
}

/// Checks whether `v` is a valid poplar heap.
///
/// Empty and single-element slices always are, and so is every slice sorted
/// in ascending order. Performs *O*(*n*) comparisons.
///
/// # Examples
///
/// ```
/// use poplar_heap::slice;
///
/// assert!(slice::is_heap::<i32>(&[]));
/// assert!(slice::is_heap(&[1, 2, 3, 4]));
/// assert!(!slice::is_heap(&[3, 2, 1]));
/// ```
#[must_use]
pub fn is_heap<T: Ord>(v: &[T]) -> bool {
    poplar::is_heap(v, &mut T::lt)
}

/// Returns the length of the longest prefix of `v` that is a valid poplar
/// heap.
///
/// If the whole of `v` is a valid poplar heap, this is `v.len()`; otherwise
/// it is the index of the first poplar root found to be smaller than one of
/// its subpoplar roots. Performs *O*(*n*) comparisons.
///
/// # Examples
///
/// ```
/// use poplar_heap::slice;
///
/// // The 7-element poplar's root, 4, is smaller than its right subpoplar's root, 7.
/// assert_eq!(slice::is_heap_until(&[1, 3, 6, 5, 2, 7, 4, 9]), 6);
/// assert_eq!(slice::is_heap_until(&[1, 3, 6, 2, 4, 5, 7, 9]), 8);
/// ```
#[must_use]
pub fn is_heap_until<T: Ord>(v: &[T]) -> usize {
    poplar::is_heap_until(v, &mut T::lt)
}

macro_rules! ordered_by {
    ($(
        $(#[$attr:meta])*
        $base:ident => $by:ident, $by_key:ident ($($mutability:tt)?) $(-> $ret:ty)?;
    )*) => {$(
        #[doc = concat!("Like [`", stringify!($base), "`], but ordered by the comparator function `compare`.")]
        ///
        /// `compare` must define a total order over the elements of `v`.
        $(#[$attr])*
        pub fn $by<T, F>(v: &$($mutability)? [T], mut compare: F) $(-> $ret)?
        where
            F: FnMut(&T, &T) -> Ordering,
        {
            poplar::$base(v, &mut |a: &T, b: &T| compare(a, b) == Ordering::Less)
        }

        #[doc = concat!("Like [`", stringify!($base), "`], but ordered by the key extracted by `f`.")]
        ///
        /// `f` is called twice per comparison; it must return keys whose order
        /// does not change between calls.
        $(#[$attr])*
        pub fn $by_key<T, K, F>(v: &$($mutability)? [T], mut f: F) $(-> $ret)?
        where
            F: FnMut(&T) -> K,
            K: Ord,
        {
            poplar::$base(v, &mut |a: &T, b: &T| f(a).lt(&f(b)))
        }
    )*};
}

ordered_by! {
    push_heap => push_heap_by, push_heap_by_key (mut);
    pop_heap => pop_heap_by, pop_heap_by_key (mut);
    make_heap => make_heap_by, make_heap_by_key (mut);
    make_heap_naive => make_heap_naive_by, make_heap_naive_by_key (mut);
    make_heap_recursive => make_heap_recursive_by, make_heap_recursive_by_key (mut);
    sort_heap => sort_heap_by, sort_heap_by_key (mut);
    #[must_use]
    is_heap => is_heap_by, is_heap_by_key () -> bool;
    #[must_use]
    is_heap_until => is_heap_until_by, is_heap_until_by_key () -> usize;
}

/// Like [`heapsort`], but ordered by the comparator function `compare`.
///
/// # Examples
///
/// ```
/// use poplar_heap::slice;
///
/// let mut v = [5, 4, 1, 3, 2];
/// slice::heapsort_by(&mut v, |a, b| b.cmp(a));
/// assert_eq!(v, [5, 4, 3, 2, 1]);
/// ```
pub fn heapsort_by<T, F>(v: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let is_less = &mut |a: &T, b: &T| compare(a, b) == Ordering::Less;
    poplar::make_heap(v, is_less);
    poplar::sort_heap(v, is_less);
}

/// Like [`heapsort`], but ordered by the key extracted by `f`.
///
/// # Examples
///
/// ```
/// use poplar_heap::slice;
///
/// let mut v = [-5i32, 4, 1, -3, 2];
/// slice::heapsort_by_key(&mut v, |k| k.abs());
/// assert_eq!(v, [1, 2, -3, 4, -5]);
/// ```
pub fn heapsort_by_key<T, K, F>(v: &mut [T], mut f: F)
where
    F: FnMut(&T) -> K,
    K: Ord,
{
    let is_less = &mut |a: &T, b: &T| f(a).lt(&f(b));
    poplar::make_heap(v, is_less);
    poplar::sort_heap(v, is_less);
}
