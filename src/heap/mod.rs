//! A priority queue implemented with a poplar heap.
//!
//! Insertion and popping the largest element have *O*(log(*n*)) time
//! complexity, as does peeking at it (the maximum is the greatest of the
//! *O*(log(*n*)) poplar roots). Converting a vector to a poplar heap happens in
//! place, and a poplar heap can be converted to a sorted vector in place too.
//!
//! Compared with the standard library's binary heap, a poplar heap only ever
//! looks at elements near the end of the storage when it pushes, which keeps
//! its memory accesses local, but it is generally slower.
//!
//! # Examples
//!
//! ```
//! use poplar_heap::PoplarHeap;
//!
//! let mut heap = PoplarHeap::<_>::default();
//! heap.push(2);
//! heap.push(7);
//! heap.push(4);
//! assert_eq!(heap.peek(), Some(&7));
//! assert_eq!(heap.into_sorted_vec(), [2, 4, 7]);
//! ```

use core::fmt;
#[cfg(feature = "trusted_len")]
use core::iter::TrustedLen;
use core::iter::{FromIterator, FusedIterator};
use core::ops::{Deref, DerefMut};

use alloc::collections::TryReserveError;
use alloc::slice;
use alloc::vec::{self, Vec};
use cfg_if::cfg_if;
use log::{debug, trace};

use crate::poplar;
use crate::{OrdTotalOrder, TotalOrder};


/// Builds the `is_less` predicate the slice algorithms expect out of a total
/// order.
#[inline]
fn is_less<'a, T: 'a, O: TotalOrder<T>>(order: &'a O) -> impl FnMut(&T, &T) -> bool + 'a {
    move |a: &T, b: &T| order.lt(a, b)
}

/// A priority queue implemented with a poplar heap.
///
/// This will be a max-heap, according to the [`TotalOrder`] `O`.
///
/// It is a logic error for an item or the total order to be modified (except
/// via the [`order_mut`] method) in such a way that the item's ordering
/// relative to any other item changes while they are in the heap. This is
/// normally only possible through the [`order_mut_unchecked`] method, interior
/// mutability, global state, I/O, or unsafe code. The behavior resulting from
/// such a logic error is not specified, but will be encapsulated to the
/// `PoplarHeap` that observed the logic error and not result in undefined
/// behavior.
///
/// # Examples
///
/// ```
/// use poplar_heap::PoplarHeap;
///
/// // The element type is inferred; the order defaults to `OrdTotalOrder`,
/// // making this a `PoplarHeap<i32, OrdTotalOrder<i32>>`.
/// let mut heap = PoplarHeap::<_>::default();
///
/// // We can use peek to look at the next item in the heap. In this case,
/// // there's no items in there yet so we get None.
/// assert_eq!(heap.peek(), None);
///
/// heap.push(1);
/// heap.push(5);
/// heap.push(2);
///
/// // Now peek shows the most important item in the heap.
/// assert_eq!(heap.peek(), Some(&5));
/// assert_eq!(heap.len(), 3);
///
/// // If we pop these scores, they come back in order.
/// assert_eq!(heap.pop(), Some(5));
/// assert_eq!(heap.pop(), Some(2));
/// assert_eq!(heap.pop(), Some(1));
/// assert_eq!(heap.pop(), None);
/// ```
///
/// ## Min-heap
///
/// Either [`core::cmp::Reverse`], a custom [`Ord`] implementation or a custom
/// total order can be used to make `PoplarHeap` a min-heap.
///
/// ```
/// use core::cmp::Ordering;
/// use poplar_heap::{PoplarHeap, TotalOrder};
///
/// struct ReversedOrder;
///
/// impl TotalOrder<i32> for ReversedOrder {
///     fn cmp(&self, this: &i32, that: &i32) -> Ordering {
///         that.cmp(this)
///     }
/// }
///
/// let mut heap = PoplarHeap::new(ReversedOrder);
/// heap.push(1);
/// heap.push(5);
/// heap.push(2);
///
/// assert_eq!(heap.pop(), Some(1));
/// assert_eq!(heap.pop(), Some(2));
/// assert_eq!(heap.pop(), Some(5));
/// ```
///
/// # Time complexity
///
/// | [push]        | [pop]         | [peek]        |
/// |---------------|---------------|---------------|
/// | *O*(log(*n*)) | *O*(log(*n*)) | *O*(log(*n*)) |
///
/// [`order_mut`]: Self::order_mut
/// [`order_mut_unchecked`]: Self::order_mut_unchecked
/// [push]: PoplarHeap::push
/// [pop]: PoplarHeap::pop
/// [peek]: PoplarHeap::peek
pub struct PoplarHeap<T, O = OrdTotalOrder<T>> {
    data: Vec<T>,
    order: O,
}

/// The error returned by [`PoplarHeap::try_from_heap_vec`] when the vector
/// handed over is not arranged as a poplar heap.
///
/// The rejected vector can be recovered with [`into_vec`](Self::into_vec).
#[derive(Clone, PartialEq, Eq)]
pub struct NotAPoplarHeap<T> {
    vec: Vec<T>,
    index: usize,
}

impl<T> NotAPoplarHeap<T> {
    /// Index of the first poplar root that is smaller than one of its
    /// subpoplar roots; everything before it is a valid poplar heap.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the rejected vector, unmodified.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.vec
    }
}

impl<T> fmt::Debug for NotAPoplarHeap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotAPoplarHeap")
            .field("len", &self.vec.len())
            .field("index", &self.index)
            .finish()
    }
}

impl<T> fmt::Display for NotAPoplarHeap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "vector of {} elements is not a poplar heap: the root at index {} is smaller than one of its subpoplar roots",
            self.vec.len(),
            self.index
        )
    }
}

cfg_if! {
    if #[cfg(feature = "error_in_core")] {
        impl<T> core::error::Error for NotAPoplarHeap<T> {}
    } else if #[cfg(any(feature = "std", test))] {
        impl<T> std::error::Error for NotAPoplarHeap<T> {}
    }
}

impl<T: Clone, O: Clone> Clone for PoplarHeap<T, O> {
    fn clone(&self) -> Self {
        PoplarHeap { data: self.data.clone(), order: self.order.clone() }
    }

    fn clone_from(&mut self, source: &Self) {
        self.data.clone_from(&source.data);
        self.order.clone_from(&source.order);
    }
}

impl<T, O: TotalOrder<T> + Default> Default for PoplarHeap<T, O> {
    /// Creates an empty `PoplarHeap<T, O>`.
    #[inline]
    fn default() -> PoplarHeap<T, O> {
        PoplarHeap::new(O::default())
    }
}

impl<T: fmt::Debug, O> fmt::Debug for PoplarHeap<T, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, O: TotalOrder<T>> PoplarHeap<T, O> {
    /// Creates an empty `PoplarHeap` as a max-heap under `order`.
    ///
    /// # Examples
    ///
    /// ```
    /// use poplar_heap::{OrdTotalOrder, PoplarHeap};
    /// let mut heap = PoplarHeap::new(OrdTotalOrder::new());
    /// heap.push(4);
    /// ```
    #[must_use]
    pub fn new(order: O) -> PoplarHeap<T, O> {
        PoplarHeap { data: Vec::new(), order }
    }

    /// Creates an empty `PoplarHeap` with at least the specified capacity.
    ///
    /// The heap will be able to hold at least `capacity` elements without
    /// reallocating. If `capacity` is 0, the heap will not allocate.
    ///
    /// # Examples
    ///
    /// ```
    /// use poplar_heap::PoplarHeap;
    /// let mut heap = PoplarHeap::<_>::with_capacity(Default::default(), 10);
    /// heap.push(4);
    /// assert!(heap.capacity() >= 10);
    /// ```
    #[must_use]
    pub fn with_capacity(order: O, capacity: usize) -> PoplarHeap<T, O> {
        PoplarHeap { data: Vec::with_capacity(capacity), order }
    }

    /// Arranges `vec` into a heap under `order`, in place.
    ///
    /// # Examples
    ///
    /// ```
    /// use poplar_heap::{OrdTotalOrder, PoplarHeap, ReverseOrder};
    ///
    /// let heap = PoplarHeap::from_vec_with(vec![3, 9, 1], ReverseOrder(OrdTotalOrder::new()));
    /// assert_eq!(heap.peek(), Some(&1));
    /// ```
    pub fn from_vec_with(vec: Vec<T>, order: O) -> PoplarHeap<T, O> {
        let mut heap = PoplarHeap { data: vec, order };
        heap.rebuild();
        heap
    }

    /// Adopts `vec` as a heap under `order` without reordering it, provided
    /// it already is a valid poplar heap.
    ///
    /// # Errors
    ///
    /// If `vec` is not a valid poplar heap, it is handed back inside the error
    /// together with the position of the first violation.
    ///
    /// # Examples
    ///
    /// ```
    /// use poplar_heap::{OrdTotalOrder, PoplarHeap};
    ///
    /// // Any ascending vector is a valid poplar heap.
    /// let heap = PoplarHeap::try_from_heap_vec(vec![1, 2, 3], OrdTotalOrder::new()).unwrap();
    /// assert_eq!(heap.into_vec(), [1, 2, 3]);
    ///
    /// let err = PoplarHeap::try_from_heap_vec(vec![3, 2, 1], OrdTotalOrder::new()).unwrap_err();
    /// assert_eq!(err.index(), 2);
    /// assert_eq!(err.into_vec(), [3, 2, 1]);
    /// ```
    pub fn try_from_heap_vec(vec: Vec<T>, order: O) -> Result<PoplarHeap<T, O>, NotAPoplarHeap<T>> {
        let index = poplar::is_heap_until(&vec, &mut is_less(&order));
        if index != vec.len() {
            debug!("rejecting vector of {} elements: heap property fails at {}", vec.len(), index);
            return Err(NotAPoplarHeap { vec, index });
        }
        Ok(PoplarHeap { data: vec, order })
    }

    /// Returns the greatest item in the heap, or `None` if it is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use poplar_heap::PoplarHeap;
    /// let mut heap = PoplarHeap::<_>::default();
    /// assert_eq!(heap.peek(), None);
    ///
    /// heap.push(1);
    /// heap.push(5);
    /// heap.push(2);
    /// assert_eq!(heap.peek(), Some(&5));
    /// ```
    ///
    /// # Time complexity
    ///
    /// Cost is *O*(log(*n*)) in the worst case: every poplar root is examined.
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        let last = self.data.len().checked_sub(1)?;
        let index = poplar::greater_root(&self.data, &mut is_less(&self.order))
            .map_or(last, |poplar| poplar.root());
        Some(&self.data[index])
    }

    /// Removes the greatest item from the heap and returns it, or `None` if it
    /// is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use poplar_heap::PoplarHeap;
    /// let mut heap = PoplarHeap::<_>::from([1, 3]);
    ///
    /// assert_eq!(heap.pop(), Some(3));
    /// assert_eq!(heap.pop(), Some(1));
    /// assert_eq!(heap.pop(), None);
    /// ```
    ///
    /// # Time complexity
    ///
    /// The worst case cost of `pop` on a heap containing *n* elements is
    /// *O*(log(*n*)).
    pub fn pop(&mut self) -> Option<T> {
        poplar::pop_heap(&mut self.data, &mut is_less(&self.order));
        self.data.pop()
    }

    /// Pushes an item onto the heap.
    ///
    /// # Examples
    ///
    /// ```
    /// use poplar_heap::PoplarHeap;
    /// let mut heap = PoplarHeap::<_>::default();
    /// heap.push(3);
    /// heap.push(5);
    /// heap.push(1);
    ///
    /// assert_eq!(heap.len(), 3);
    /// assert_eq!(heap.peek(), Some(&5));
    /// ```
    ///
    /// # Time complexity
    ///
    /// *O*(log(*n*)) comparisons; the item only ever moves within the last
    /// poplar. A push that has to grow the storage additionally costs
    /// *O*(*n*), amortized away over many pushes.
    pub fn push(&mut self, item: T) {
        self.data.push(item);
        poplar::push_heap(&mut self.data, &mut is_less(&self.order));
    }

    /// Consumes the `PoplarHeap` and returns a vector in sorted
    /// (ascending) order.
    ///
    /// # Examples
    ///
    /// ```
    /// use poplar_heap::PoplarHeap;
    ///
    /// let mut heap = PoplarHeap::<_>::from([1, 2, 4, 5, 7]);
    /// heap.push(6);
    /// heap.push(3);
    ///
    /// let vec = heap.into_sorted_vec();
    /// assert_eq!(vec, [1, 2, 3, 4, 5, 6, 7]);
    /// ```
    #[must_use = "`self` will be dropped if the result is not used"]
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        poplar::sort_heap(&mut self.data, &mut is_less(&self.order));
        self.into_vec()
    }

    /// Returns an iterator which retrieves elements in heap order, greatest
    /// first. This method consumes the original heap.
    ///
    /// # Examples
    ///
    /// ```
    /// use poplar_heap::PoplarHeap;
    /// let heap = PoplarHeap::<_>::from([1, 2, 3, 4, 5]);
    ///
    /// assert_eq!(heap.into_iter_sorted().take(2).collect::<Vec<_>>(), [5, 4]);
    /// ```
    pub fn into_iter_sorted(self) -> IntoIterSorted<T, O> {
        IntoIterSorted { inner: self }
    }

    /// Rebuild assuming data[0..start] is still a proper heap.
    fn rebuild_tail(&mut self, start: usize) {
        if start == self.len() {
            return;
        }

        let tail_len = self.len() - start;

        #[inline(always)]
        fn log2_fast(x: usize) -> usize {
            (usize::BITS - x.leading_zeros() - 1) as usize
        }

        // Pushing the tail costs about 2 * log2(len) comparisons per element,
        // while building from scratch costs a small multiple of len in
        // practice (with an *O*(n log n) worst case). Rebuild whenever the tail
        // dominates.
        let better_to_rebuild = start < tail_len || 4 * self.len() < tail_len * log2_fast(start);
        trace!(
            "restoring heap of {} elements with a tail of {}: {}",
            self.len(),
            tail_len,
            if better_to_rebuild { "rebuild" } else { "push" }
        );

        if better_to_rebuild {
            self.rebuild();
        } else {
            let is_less = &mut is_less(&self.order);
            for end in start + 1..=self.data.len() {
                poplar::push_heap(&mut self.data[..end], is_less);
            }
        }
    }

    fn rebuild(&mut self) {
        poplar::make_heap(&mut self.data, &mut is_less(&self.order));
    }

    /// Moves all the elements of `other` into `self`, leaving `other` empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use poplar_heap::PoplarHeap;
    ///
    /// let mut a = PoplarHeap::<_>::from([-10, 1, 2, 3, 3]);
    /// let mut b = PoplarHeap::<_>::from([-20, 5, 43]);
    ///
    /// a.append(&mut b);
    ///
    /// assert_eq!(a.into_sorted_vec(), [-20, -10, 1, 2, 3, 3, 5, 43]);
    /// assert!(b.is_empty());
    /// ```
    pub fn append(&mut self, other: &mut Self) {
        // Only our own storage is known to be a heap under `self.order`.
        let start = self.data.len();

        self.data.append(&mut other.data);

        self.rebuild_tail(start);
    }

    /// Retains only the elements specified by the predicate.
    ///
    /// In other words, remove all elements `e` for which `f(&e)` returns
    /// `false`. The elements are visited in unsorted (and unspecified) order.
    ///
    /// # Examples
    ///
    /// ```
    /// use poplar_heap::PoplarHeap;
    ///
    /// let mut heap = PoplarHeap::<_>::from([-10, -5, 1, 2, 4, 13]);
    ///
    /// heap.retain(|x| x % 2 == 0); // only keep even numbers
    ///
    /// assert_eq!(heap.into_sorted_vec(), [-10, 2, 4])
    /// ```
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> bool,
    {
        struct RebuildOnDrop<'a, T, O: TotalOrder<T>> {
            heap: &'a mut PoplarHeap<T, O>,
            first_removed: usize,
        }

        let mut guard = RebuildOnDrop { first_removed: self.len(), heap: self };

        let mut i = 0;
        guard.heap.data.retain(|e| {
            let keep = f(e);
            if !keep && i < guard.first_removed {
                guard.first_removed = i;
            }
            i += 1;
            keep
        });

        impl<'a, T, O: TotalOrder<T>> Drop for RebuildOnDrop<'a, T, O> {
            fn drop(&mut self) {
                // data[..first_removed] is untouched, so we only need to
                // rebuild the tail:
                self.heap.rebuild_tail(self.first_removed);
            }
        }
    }

    /// Mutably borrow this heap's total order. When the returned guard is
    /// dropped, the heap will be rebuilt.
    ///
    /// # Examples
    ///
    /// ```
    /// use core::cmp::Ordering;
    /// use poplar_heap::{PoplarHeap, TotalOrder};
    ///
    /// struct Direction {
    ///     descending: bool,
    /// }
    ///
    /// impl TotalOrder<i32> for Direction {
    ///     fn cmp(&self, this: &i32, that: &i32) -> Ordering {
    ///         if self.descending { that.cmp(this) } else { this.cmp(that) }
    ///     }
    /// }
    ///
    /// let mut heap = PoplarHeap::new(Direction { descending: false });
    /// heap.extend([4, 8, 2]);
    /// assert_eq!(heap.peek(), Some(&8));
    ///
    /// heap.order_mut().descending = true;
    /// assert_eq!(heap.peek(), Some(&2));
    /// ```
    pub fn order_mut(&mut self) -> OrderMut<'_, T, O> {
        OrderMut(self)
    }
}

impl<T, O> PoplarHeap<T, O> {
    /// Returns an iterator visiting all values in the underlying vector, in
    /// arbitrary order.
    ///
    /// # Examples
    ///
    /// ```
    /// use poplar_heap::PoplarHeap;
    /// let heap = PoplarHeap::<_>::from([1, 2, 3, 4]);
    ///
    /// // Print 1, 2, 3, 4 in arbitrary order
    /// for x in heap.iter() {
    ///     println!("{x}");
    /// }
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { iter: self.data.iter() }
    }

    /// Borrow this heap's total order.
    pub fn order(&self) -> &O {
        &self.order
    }

    /// Mutably borrow this heap's total order. It is a logic error for the
    /// order to be modified in a way that changes the relative ordering of any
    /// two items contained in the heap. The behavior resulting from such a
    /// logic error is not specified, but will be encapsulated to the
    /// `PoplarHeap` that observed the logic error and not result in undefined
    /// behavior.
    ///
    /// If the order might be modified in such a way, consider using
    /// [`order_mut`] instead, which will reorder the heap once the guard is
    /// dropped so as to uphold its invariants.
    ///
    /// [`order_mut`]: Self::order_mut
    pub fn order_mut_unchecked(&mut self) -> &mut O {
        &mut self.order
    }

    /// Returns the number of elements the heap can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Reserves the minimum capacity for at least `additional` elements more
    /// than the current length. Does nothing if the capacity is already
    /// sufficient.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity overflows [`usize`].
    pub fn reserve_exact(&mut self, additional: usize) {
        self.data.reserve_exact(additional);
    }

    /// Reserves capacity for at least `additional` elements more than the
    /// current length. The allocator may reserve more space to speculatively
    /// avoid frequent allocations.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity overflows [`usize`].
    ///
    /// # Examples
    ///
    /// ```
    /// use poplar_heap::PoplarHeap;
    /// let mut heap = PoplarHeap::<_>::default();
    /// heap.reserve(100);
    /// assert!(heap.capacity() >= 100);
    /// heap.push(4);
    /// ```
    pub fn reserve(&mut self, additional: usize) {
        self.data.reserve(additional);
    }

    /// Tries to reserve the minimum capacity for at least `additional`
    /// elements more than the current length.
    ///
    /// # Errors
    ///
    /// If the capacity overflows, or the allocator reports a failure, then an
    /// error is returned.
    pub fn try_reserve_exact(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.data.try_reserve_exact(additional)
    }

    /// Tries to reserve capacity for at least `additional` elements more than
    /// the current length.
    ///
    /// # Errors
    ///
    /// If the capacity overflows, or the allocator reports a failure, then an
    /// error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use poplar_heap::PoplarHeap;
    /// use std::collections::TryReserveError;
    ///
    /// fn find_max_slow(data: &[u32]) -> Result<Option<u32>, TryReserveError> {
    ///     let mut heap = PoplarHeap::<_>::default();
    ///
    ///     // Pre-reserve the memory, exiting if we can't
    ///     heap.try_reserve(data.len())?;
    ///
    ///     // Now we know this can't OOM in the middle of our complex work
    ///     heap.extend(data.iter().copied());
    ///
    ///     Ok(heap.pop())
    /// }
    /// # find_max_slow(&[1, 2, 3]).expect("why is the test harness OOMing on 12 bytes?");
    /// ```
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.data.try_reserve(additional)
    }

    /// Discards as much additional capacity as possible.
    pub fn shrink_to_fit(&mut self) {
        self.data.shrink_to_fit();
    }

    /// Discards capacity with a lower bound.
    ///
    /// The capacity will remain at least as large as both the length
    /// and the supplied value.
    pub fn shrink_to(&mut self, min_capacity: usize) {
        self.data.shrink_to(min_capacity)
    }

    /// Returns a slice of all values in the underlying vector, in arbitrary
    /// order (which is, in fact, poplar heap order).
    ///
    /// # Examples
    ///
    /// ```
    /// use poplar_heap::{slice, PoplarHeap};
    /// let heap = PoplarHeap::<_>::from([1, 2, 3, 4, 5, 6, 7]);
    /// assert!(slice::is_heap(heap.as_slice()));
    /// ```
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        self.data.as_slice()
    }

    /// Consumes the `PoplarHeap` and returns the underlying vector
    /// in arbitrary order.
    #[must_use = "`self` will be dropped if the result is not used"]
    pub fn into_vec(self) -> Vec<T> {
        self.into()
    }

    /// Returns the length of the heap.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Checks if the heap is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears the heap, returning an iterator over the removed elements
    /// in arbitrary order. If the iterator is dropped before being fully
    /// consumed, it drops the remaining elements in arbitrary order.
    ///
    /// # Examples
    ///
    /// ```
    /// use poplar_heap::PoplarHeap;
    /// let mut heap = PoplarHeap::<_>::from([1, 3]);
    ///
    /// assert!(!heap.is_empty());
    ///
    /// for x in heap.drain() {
    ///     println!("{x}");
    /// }
    ///
    /// assert!(heap.is_empty());
    /// ```
    #[inline]
    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain { iter: self.data.drain(..) }
    }

    /// Drops all items from the heap.
    pub fn clear(&mut self) {
        self.drain();
    }
}

/// Guard returned by [`PoplarHeap::order_mut`]; rebuilds the heap on drop.
pub struct OrderMut<'a, T, O: TotalOrder<T>>(&'a mut PoplarHeap<T, O>);

impl<T, O: TotalOrder<T>> Deref for OrderMut<'_, T, O> {
    type Target = O;
    fn deref(&self) -> &Self::Target {
        &self.0.order
    }
}

impl<T, O: TotalOrder<T>> DerefMut for OrderMut<'_, T, O> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0.order
    }
}

impl<T, O: TotalOrder<T>> Drop for OrderMut<'_, T, O> {
    fn drop(&mut self) {
        self.0.rebuild()
    }
}

/// An iterator over the elements of a `PoplarHeap`.
///
/// This `struct` is created by [`PoplarHeap::iter()`]. See its
/// documentation for more.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a> {
    iter: slice::Iter<'a, T>,
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.iter.as_slice()).finish()
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter { iter: self.iter.clone() }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        self.iter.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a T> {
        self.iter.next_back()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    #[cfg(feature = "exact_size_is_empty")]
    fn is_empty(&self) -> bool {
        self.iter.is_empty()
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

/// An owning iterator over the elements of a `PoplarHeap`.
///
/// This `struct` is created by [`PoplarHeap::into_iter()`]
/// (provided by the [`IntoIterator`] trait). See its documentation for more.
#[derive(Clone)]
pub struct IntoIter<T> {
    iter: vec::IntoIter<T>,
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.iter.as_slice()).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.iter.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.iter.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    #[cfg(feature = "exact_size_is_empty")]
    fn is_empty(&self) -> bool {
        self.iter.is_empty()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

/// An owning iterator over the elements of a `PoplarHeap`, greatest first.
///
/// This `struct` is created by [`PoplarHeap::into_iter_sorted()`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
#[derive(Clone, Debug)]
pub struct IntoIterSorted<T, O = OrdTotalOrder<T>> {
    inner: PoplarHeap<T, O>,
}

impl<T, O: TotalOrder<T>> Iterator for IntoIterSorted<T, O> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.inner.pop()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let exact = self.inner.len();
        (exact, Some(exact))
    }
}

impl<T, O: TotalOrder<T>> ExactSizeIterator for IntoIterSorted<T, O> {}

impl<T, O: TotalOrder<T>> FusedIterator for IntoIterSorted<T, O> {}

#[cfg(feature = "trusted_len")]
unsafe impl<T, O: TotalOrder<T>> TrustedLen for IntoIterSorted<T, O> {}

/// A draining iterator over the elements of a `PoplarHeap`.
///
/// This `struct` is created by [`PoplarHeap::drain()`]. See its
/// documentation for more.
#[derive(Debug)]
pub struct Drain<'a, T: 'a> {
    iter: vec::Drain<'a, T>,
}

impl<T> Iterator for Drain<'_, T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.iter.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<T> DoubleEndedIterator for Drain<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.iter.next_back()
    }
}

impl<T> ExactSizeIterator for Drain<'_, T> {
    #[cfg(feature = "exact_size_is_empty")]
    fn is_empty(&self) -> bool {
        self.iter.is_empty()
    }
}

impl<T> FusedIterator for Drain<'_, T> {}

impl<T, O: TotalOrder<T> + Default> From<Vec<T>> for PoplarHeap<T, O> {
    /// Converts a `Vec<T>` into a `PoplarHeap<T, O>`.
    ///
    /// This conversion happens in-place.
    fn from(vec: Vec<T>) -> PoplarHeap<T, O> {
        PoplarHeap::from_vec_with(vec, O::default())
    }
}

impl<T, O: TotalOrder<T> + Default, const N: usize> From<[T; N]> for PoplarHeap<T, O> {
    /// ```
    /// use poplar_heap::PoplarHeap;
    ///
    /// let mut h1 = PoplarHeap::<_>::from([1, 4, 2, 3]);
    /// let mut h2: PoplarHeap<_> = [1, 4, 2, 3].into();
    /// while let Some((a, b)) = h1.pop().zip(h2.pop()) {
    ///     assert_eq!(a, b);
    /// }
    /// ```
    fn from(arr: [T; N]) -> Self {
        Self::from_iter(arr)
    }
}

impl<T, O> From<PoplarHeap<T, O>> for Vec<T> {
    /// Converts a `PoplarHeap<T, O>` into a `Vec<T>`.
    ///
    /// This conversion requires no data movement or allocation, and has
    /// constant time complexity.
    fn from(heap: PoplarHeap<T, O>) -> Vec<T> {
        heap.data
    }
}

impl<T, O: TotalOrder<T> + Default> FromIterator<T> for PoplarHeap<T, O> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> PoplarHeap<T, O> {
        PoplarHeap::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<T, O> IntoIterator for PoplarHeap<T, O> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Creates a consuming iterator, that is, one that moves each value out of
    /// the heap in arbitrary order. The heap cannot be used after calling
    /// this.
    ///
    /// # Examples
    ///
    /// ```
    /// use poplar_heap::PoplarHeap;
    /// let heap = PoplarHeap::<_>::from([1, 2, 3, 4]);
    ///
    /// // Print 1, 2, 3, 4 in arbitrary order
    /// for x in heap.into_iter() {
    ///     // x has type i32, not &i32
    ///     println!("{x}");
    /// }
    /// ```
    fn into_iter(self) -> IntoIter<T> {
        IntoIter { iter: self.data.into_iter() }
    }
}

impl<'a, T, O> IntoIterator for &'a PoplarHeap<T, O> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T, O: TotalOrder<T>> Extend<T> for PoplarHeap<T, O> {
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let start = self.data.len();
        self.data.extend(iter);
        self.rebuild_tail(start);
    }
}

impl<'a, T: 'a + Copy, O: TotalOrder<T>> Extend<&'a T> for PoplarHeap<T, O> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().cloned());
    }
}
