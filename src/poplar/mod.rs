//! The poplar heap algorithms proper.
//!
//! Everything in here works on a slice and an `is_less` predicate, the way the
//! standard library's sorting routines do; the public wrappers in
//! [`crate::slice`] and [`crate::heap`] only build that predicate.
//!
//! A poplar of size `2^k - 1` occupying `v[begin..begin + size]` has its root at
//! `v[begin + size - 1]`, its right subpoplar ending just before the root, and
//! its left subpoplar occupying `v[begin..begin + size / 2]`.

use core::iter::FusedIterator;
use core::mem::ManuallyDrop;
use core::ops::Range;
use core::ptr;

use log::trace;

use crate::bits::first_poplar_size;

#[cfg(test)]
mod tests;

/// Poplars of at most this many elements are built by insertion sort, and
/// bigger ones are assembled from blocks of this size. Must be `2^m - 1`.
const SMALL_POPLAR_SIZE: usize = 15;

/// Location of one poplar within a forest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Poplar {
    pub(crate) begin: usize,
    pub(crate) size: usize,
}

impl Poplar {
    /// Index of the root. The poplar must not be empty.
    #[inline]
    pub(crate) fn root(&self) -> usize {
        self.begin + (self.size - 1)
    }

    #[inline]
    pub(crate) fn range(&self) -> Range<usize> {
        self.begin..self.begin + self.size
    }
}

/// Walks the poplars of a forest from left to right.
///
/// Only the position and remaining element count are kept; the size of each
/// poplar is recomputed from the count as the walk advances.
#[derive(Clone, Debug)]
pub(crate) struct PoplarWalk {
    begin: usize,
    remaining: usize,
}

impl PoplarWalk {
    #[inline]
    pub(crate) fn new(size: usize) -> Self {
        PoplarWalk { begin: 0, remaining: size }
    }
}

impl Iterator for PoplarWalk {
    type Item = Poplar;

    #[inline]
    fn next(&mut self) -> Option<Poplar> {
        if self.remaining == 0 {
            return None;
        }
        let poplar = Poplar { begin: self.begin, size: first_poplar_size(self.remaining) };
        self.begin += poplar.size;
        self.remaining -= poplar.size;
        Some(poplar)
    }
}

impl FusedIterator for PoplarWalk {}

/// Returns the size of the last (rightmost) poplar of a forest of `size`
/// elements, which is the poplar a freshly pushed element ends up rooting.
#[inline]
pub(crate) fn last_poplar_size(mut size: usize) -> usize {
    let mut poplar_size = first_poplar_size(size);
    while size != poplar_size {
        size -= poplar_size;
        poplar_size = first_poplar_size(size);
    }
    poplar_size
}

/// Hole represents a hole in a slice i.e., an index without valid value
/// (because it was moved from or duplicated).
/// In drop, `Hole` will restore the slice by filling the hole
/// position with the value that was originally removed.
struct Hole<'a, T: 'a> {
    data: &'a mut [T],
    elt: ManuallyDrop<T>,
    pos: usize,
}

impl<'a, T> Hole<'a, T> {
    /// Create a new `Hole` at index `pos`.
    ///
    /// Unsafe because pos must be within the data slice.
    #[inline]
    unsafe fn new(data: &'a mut [T], pos: usize) -> Self {
        debug_assert!(pos < data.len());
        // SAFE: pos should be inside the slice
        let elt = unsafe { ptr::read(data.get_unchecked(pos)) };
        Hole { data, elt: ManuallyDrop::new(elt), pos }
    }

    #[inline]
    fn pos(&self) -> usize {
        self.pos
    }

    /// Returns a reference to the element removed.
    #[inline]
    fn element(&self) -> &T {
        &self.elt
    }

    /// Returns a reference to the element at `index`.
    ///
    /// Unsafe because index must be within the data slice and not equal to pos.
    #[inline]
    unsafe fn get(&self, index: usize) -> &T {
        debug_assert!(index != self.pos);
        debug_assert!(index < self.data.len());
        unsafe { self.data.get_unchecked(index) }
    }

    /// Move hole to new location
    ///
    /// Unsafe because index must be within the data slice and not equal to pos.
    #[inline]
    unsafe fn move_to(&mut self, index: usize) {
        debug_assert!(index != self.pos);
        debug_assert!(index < self.data.len());
        unsafe {
            let ptr = self.data.as_mut_ptr();
            let index_ptr: *const _ = ptr.add(index);
            let hole_ptr = ptr.add(self.pos);
            ptr::copy_nonoverlapping(index_ptr, hole_ptr, 1);
        }
        self.pos = index;
    }
}

impl<T> Drop for Hole<'_, T> {
    #[inline]
    fn drop(&mut self) {
        // fill the hole again
        unsafe {
            let pos = self.pos;
            ptr::copy_nonoverlapping(&*self.elt, self.data.get_unchecked_mut(pos), 1);
        }
    }
}

/// Turns the semipoplar `v` into a poplar by moving its root down until it
/// dominates both of its subpoplar roots.
///
/// `v.len()` must be of the form `2^k - 1`, and both subpoplars of `v` must
/// already be valid poplars.
pub(crate) fn sift<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let mut size = v.len();
    debug_assert_eq!(size & size.wrapping_add(1), 0, "{size} is not a poplar size");
    if size < 2 {
        return;
    }

    // SAFETY: size >= 2, so the root is a valid index.
    let mut hole = unsafe { Hole::new(v, size - 1) };

    loop {
        let root = hole.pos();
        let right = root - 1;
        let left = root - (size - size / 2);

        // SAFETY: both subpoplar roots lie strictly below the root within the
        //  poplar, which is itself a prefix of the data slice.
        let max_root = unsafe {
            let mut max_root = root;
            if is_less(hole.element(), hole.get(right)) {
                max_root = right;
            }
            let max = if max_root == root { hole.element() } else { hole.get(max_root) };
            if is_less(max, hole.get(left)) {
                max_root = left;
            }
            max_root
        };
        if max_root == root {
            return;
        }

        // SAFETY: max_root is one of the subpoplar roots checked above.
        unsafe { hole.move_to(max_root) };

        size /= 2;
        if size < 2 {
            return;
        }
    }
}

/// Sorts `v` by insertion. A sorted slice is a valid poplar, and for tiny
/// poplars this beats building them level by level.
fn insertion_sort<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    for i in 1..v.len() {
        // Compare first so an element already in place costs no moves.
        if is_less(&v[i], &v[i - 1]) {
            // SAFETY: i < v.len().
            let mut hole = unsafe { Hole::new(v, i) };
            // SAFETY: every index below the hole is in bounds and not the hole.
            unsafe {
                hole.move_to(i - 1);
                while hole.pos() > 0 && is_less(hole.element(), hole.get(hole.pos() - 1)) {
                    hole.move_to(hole.pos() - 1);
                }
            }
        }
    }
}

/// Restores the heap property of `v` after its last element was appended to
/// the valid poplar heap `v[..v.len() - 1]`.
pub(crate) fn push_heap<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let size = v.len();
    let poplar_size = last_poplar_size(size);
    sift(&mut v[size - poplar_size..], is_less);
}

/// Finds the poplar, other than the last one, whose root is strictly greater
/// than every other root of `v`, if any.
///
/// `None` means the last poplar's root holds the maximum.
pub(crate) fn greater_root<T, F>(v: &[T], is_less: &mut F) -> Option<Poplar>
where
    F: FnMut(&T, &T) -> bool,
{
    let last_root = v.len().checked_sub(1)?;
    let mut bigger: Option<Poplar> = None;
    for poplar in PoplarWalk::new(v.len()) {
        let root = poplar.root();
        if root == last_root {
            break;
        }
        let best = bigger.map_or(last_root, |b| b.root());
        if is_less(&v[best], &v[root]) {
            bigger = Some(poplar);
        }
    }
    bigger
}

/// Moves the greatest element of the valid poplar heap `v[..size]` to
/// `v[size - 1]`, leaving `v[..size - 1]` a valid poplar heap.
pub(crate) fn pop_heap_with_size<T, F>(v: &mut [T], size: usize, is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    if size < 2 {
        return;
    }
    let v = &mut v[..size];

    // Exchange the greatest root with the last one, and sift the poplar that
    // received the last root.
    if let Some(poplar) = greater_root(v, is_less) {
        v.swap(poplar.root(), size - 1);
        sift(&mut v[poplar.range()], is_less);
    }
}

#[inline]
pub(crate) fn pop_heap<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let size = v.len();
    pop_heap_with_size(v, size, is_less);
}

/// Arranges `v` into a poplar heap, building each poplar of the forest
/// independently with [`make_poplar`].
pub(crate) fn make_heap<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    if v.len() < 2 {
        return;
    }
    trace!(
        "making poplar heap of {} elements in {} poplars",
        v.len(),
        PoplarWalk::new(v.len()).count()
    );
    for poplar in PoplarWalk::new(v.len()) {
        make_poplar(&mut v[poplar.range()], is_less);
    }
}

/// Builds a single poplar out of `v`, whose length is `2^k - 1`.
///
/// Blocks of [`SMALL_POPLAR_SIZE`] elements are insertion sorted left to
/// right. After the block numbered `level`, the trailing poplars of equal size
/// are fused `trailing_zeros(level)` times, each fusion taking the next
/// unsorted element as the new root. The number of fusions per block follows
/// the binary carry sequence.
fn make_poplar<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let size = v.len();
    if size < 2 {
        return;
    }
    if size <= SMALL_POPLAR_SIZE {
        insertion_sort(v, is_less);
        return;
    }

    let mut level: usize = 1;
    let mut it = 0;
    let mut next = SMALL_POPLAR_SIZE;
    loop {
        insertion_sort(&mut v[it..next], is_less);

        let mut poplar_size = SMALL_POPLAR_SIZE;
        let mut begin = it;
        let mut i = (level & level.wrapping_neg()) >> 1;
        while i != 0 {
            begin -= poplar_size;
            poplar_size = 2 * poplar_size + 1;
            sift(&mut v[begin..begin + poplar_size], is_less);
            next += 1;
            i >>= 1;
        }

        if next == size {
            return;
        }
        it = next;
        next += SMALL_POPLAR_SIZE;
        level += 1;
    }
}

/// Arranges `v` into a poplar heap by pushing its elements one at a time.
pub(crate) fn make_heap_naive<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    for end in 2..=v.len() {
        push_heap(&mut v[..end], is_less);
    }
}

/// Arranges `v` into a poplar heap, building every poplar top-down: both
/// subpoplars first, then the root is sifted into place.
///
/// Uses stack space logarithmic in the size of the largest poplar.
pub(crate) fn make_heap_recursive<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    for poplar in PoplarWalk::new(v.len()) {
        make_poplar_recursive(&mut v[poplar.range()], is_less);
    }
}

fn make_poplar_recursive<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let half = v.len() / 2;
    if half == 0 {
        return;
    }
    let (left, rest) = v.split_at_mut(half);
    make_poplar_recursive(left, is_less);
    make_poplar_recursive(&mut rest[..half], is_less);
    sift(v, is_less);
}

/// Sorts the valid poplar heap `v` into ascending order.
pub(crate) fn sort_heap<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let mut size = v.len();
    while size > 1 {
        pop_heap_with_size(v, size, is_less);
        size -= 1;
    }
}

/// Returns the length of the longest prefix of `v` that is a valid poplar
/// heap.
///
/// Elements are visited in the order the unblocked bulk build would place
/// them: after leaf number `level`, `trailing_zeros(level)` roots close
/// successively bigger poplars. Each root is checked against its two
/// subpoplar roots as soon as it is reached, so every element is compared at
/// most twice.
pub(crate) fn is_heap_until<T, F>(v: &[T], is_less: &mut F) -> usize
where
    F: FnMut(&T, &T) -> bool,
{
    let size = v.len();
    if size < 2 {
        return size;
    }

    let mut level: usize = 1;
    // One past the last element reached so far.
    let mut next = 1;
    loop {
        let mut poplar_size = 1;
        let mut begin = next - 1;
        let mut i = (level & level.wrapping_neg()) >> 1;
        while i != 0 {
            if next == size {
                return size;
            }
            begin -= poplar_size;
            poplar_size = 2 * poplar_size + 1;

            let root = next;
            debug_assert_eq!(root, begin + poplar_size - 1);
            if is_less(&v[root], &v[root - 1])
                || is_less(&v[root], &v[begin + poplar_size / 2 - 1])
            {
                return root;
            }

            next += 1;
            i >>= 1;
        }

        if next == size {
            return size;
        }
        next += 1;
        level += 1;
    }
}

#[inline]
pub(crate) fn is_heap<T, F>(v: &[T], is_less: &mut F) -> bool
where
    F: FnMut(&T, &T) -> bool,
{
    is_heap_until(v, is_less) == v.len()
}
