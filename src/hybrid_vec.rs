//! The [`HybridVec`] container and its owning iterator.

use alloc::vec::Vec;
use core::ops::RangeBounds;
use core::{fmt, mem, ptr};

use crate::error::OutOfRange;
use crate::growth::next_capacity;
use crate::inline::InlineBuf;
use crate::utils::split_range_bound;

/// Creates a [`HybridVec`] with `vec!`-like syntax.
///
/// # Examples
///
/// ```
/// use hybridvec::{HybridVec, hybridvec};
///
/// let empty: HybridVec<i32> = hybridvec![];
/// assert!(empty.is_empty());
///
/// let filled: HybridVec<u8, 4> = hybridvec![0; 6];
/// assert_eq!(filled.len(), 6);
/// assert_eq!(filled.capacity(), 9);
///
/// let listed: HybridVec<i32, 4> = hybridvec![1, 2, 3];
/// assert_eq!(listed, [1, 2, 3]);
/// ```
#[macro_export]
macro_rules! hybridvec {
    () => {
        $crate::HybridVec::new()
    };
    ($elem:expr; $n:expr) => {
        $crate::HybridVec::from_elem($elem, $n)
    };
    ($($item:expr),+ $(,)?) => {
        $crate::HybridVec::from([$($item),+])
    };
}

enum Storage<T, const N: usize> {
    Inline(InlineBuf<T, N>),
    Heap(Vec<T>),
}

/// A contiguous growable array that stores up to `N` elements inline.
///
/// While the length stays at or below `N` the elements live in a buffer
/// embedded in the value itself and `capacity()` reports `N`. The first
/// operation that pushes the length past `N` moves everything into a
/// single heap allocation, and the first operation that brings the length
/// back down to `N` moves everything back inline and frees the heap
/// buffer. The storage location is a pure function of the current length.
///
/// Heap reallocations are sized to one and a half times the length the
/// vector will have after the pending operation; the buffer never doubles
/// on its own.
///
/// `HybridVec<T>` defaults to an inline capacity of 16.
///
/// # Examples
///
/// ```
/// use hybridvec::{HybridVec, hybridvec};
///
/// let mut vec: HybridVec<i32, 4> = hybridvec![1, 2, 3];
/// assert!(vec.is_inline());
/// assert_eq!(vec.capacity(), 4);
///
/// vec.push(4);
/// vec.push(5); // exceeds the inline capacity
/// assert!(!vec.is_inline());
/// assert_eq!(vec.capacity(), 7);
/// assert_eq!(vec, [1, 2, 3, 4, 5]);
///
/// vec.pop(); // back at the threshold
/// assert!(vec.is_inline());
/// assert_eq!(vec.capacity(), 4);
/// ```
pub struct HybridVec<T, const N: usize = 16> {
    storage: Storage<T, N>,
}

impl<T, const N: usize> HybridVec<T, N> {
    /// Creates an empty vector in the inline state.
    ///
    /// Nothing is allocated until the length exceeds `N`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hybridvec::HybridVec;
    ///
    /// let vec = HybridVec::<i32, 4>::new();
    /// assert!(vec.is_empty());
    /// assert_eq!(vec.capacity(), 4);
    /// ```
    #[inline]
    pub const fn new() -> Self {
        Self {
            storage: Storage::Inline(InlineBuf::new()),
        }
    }

    /// Creates a vector holding `count` clones of `elem`.
    ///
    /// Past the inline capacity the heap buffer is sized by the growth
    /// rule, not to `count` exactly.
    ///
    /// # Examples
    ///
    /// ```
    /// use hybridvec::HybridVec;
    ///
    /// let small: HybridVec<i32, 4> = HybridVec::from_elem(1, 3);
    /// assert_eq!(small, [1, 1, 1]);
    /// assert!(small.is_inline());
    ///
    /// let large: HybridVec<i32, 4> = HybridVec::from_elem(7, 6);
    /// assert_eq!(large.len(), 6);
    /// assert_eq!(large.capacity(), 9);
    /// ```
    pub fn from_elem(elem: T, count: usize) -> Self
    where
        T: Clone,
    {
        if count <= N {
            let mut buf = InlineBuf::new();
            let base_ptr: *mut T = buf.as_mut_ptr();
            unsafe {
                let mut cnt = 1;
                while cnt < count {
                    ptr::write(base_ptr.add(cnt), elem.clone());
                    cnt += 1;
                }
                if count > 0 {
                    // Reduce one copy.
                    ptr::write(base_ptr, elem);
                    buf.set_len(count);
                }
            }
            Self {
                storage: Storage::Inline(buf),
            }
        } else {
            let mut vec = Vec::with_capacity(next_capacity(N, count, 0));
            let base_ptr: *mut T = vec.as_mut_ptr();
            unsafe {
                let mut cnt = 1;
                while cnt < count {
                    ptr::write(base_ptr.add(cnt), elem.clone());
                    cnt += 1;
                }
                ptr::write(base_ptr, elem);
                vec.set_len(count);
            }
            Self {
                storage: Storage::Heap(vec),
            }
        }
    }

    /// Creates a vector by cloning the elements of a slice.
    ///
    /// # Examples
    ///
    /// ```
    /// use hybridvec::HybridVec;
    ///
    /// let vec: HybridVec<i32, 4> = HybridVec::from_slice(&[1, 2, 3, 4, 5]);
    /// assert_eq!(vec, [1, 2, 3, 4, 5]);
    /// assert_eq!(vec.capacity(), 7);
    /// ```
    pub fn from_slice(values: &[T]) -> Self
    where
        T: Clone,
    {
        let count = values.len();
        if count <= N {
            let mut buf = InlineBuf::new();
            for value in values {
                unsafe { buf.push_unchecked(value.clone()) };
            }
            Self {
                storage: Storage::Inline(buf),
            }
        } else {
            let mut vec = Vec::with_capacity(next_capacity(N, count, 0));
            vec.extend_from_slice(values);
            Self {
                storage: Storage::Heap(vec),
            }
        }
    }

    /// Returns `true` while the elements live in the inline buffer.
    #[inline]
    pub const fn is_inline(&self) -> bool {
        matches!(self.storage, Storage::Inline(_))
    }

    /// Returns the number of elements in the vector.
    #[inline]
    pub const fn len(&self) -> usize {
        match &self.storage {
            Storage::Inline(buf) => buf.len(),
            Storage::Heap(vec) => vec.len(),
        }
    }

    /// Returns `true` if the vector contains no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the capacity of the active storage.
    ///
    /// This is always `N` in the inline state.
    #[inline]
    pub const fn capacity(&self) -> usize {
        match &self.storage {
            Storage::Inline(_) => N,
            Storage::Heap(vec) => vec.capacity(),
        }
    }

    /// Returns a pointer to the base of the active storage.
    ///
    /// Any operation that migrates or reallocates storage invalidates the
    /// pointer.
    #[inline]
    pub const fn as_ptr(&self) -> *const T {
        match &self.storage {
            Storage::Inline(buf) => buf.as_ptr(),
            Storage::Heap(vec) => vec.as_ptr(),
        }
    }

    /// Returns a mutable pointer to the base of the active storage.
    ///
    /// Any operation that migrates or reallocates storage invalidates the
    /// pointer.
    #[inline]
    pub const fn as_mut_ptr(&mut self) -> *mut T {
        match &mut self.storage {
            Storage::Inline(buf) => buf.as_mut_ptr(),
            Storage::Heap(vec) => vec.as_mut_ptr(),
        }
    }

    /// Returns a slice over all elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use hybridvec::{HybridVec, hybridvec};
    ///
    /// let vec: HybridVec<i32, 4> = hybridvec![1, 2, 3];
    /// assert_eq!(vec.as_slice(), &[1, 2, 3]);
    /// ```
    #[inline]
    pub const fn as_slice(&self) -> &[T] {
        match &self.storage {
            Storage::Inline(buf) => buf.as_slice(),
            Storage::Heap(vec) => vec.as_slice(),
        }
    }

    /// Returns a mutable slice over all elements.
    #[inline]
    pub const fn as_mut_slice(&mut self) -> &mut [T] {
        match &mut self.storage {
            Storage::Inline(buf) => buf.as_mut_slice(),
            Storage::Heap(vec) => vec.as_mut_slice(),
        }
    }

    /// Returns a reference to the element at `index`, or an
    /// [`OutOfRange`] error if `index` is not below the length.
    ///
    /// # Examples
    ///
    /// ```
    /// use hybridvec::{HybridVec, hybridvec};
    ///
    /// let vec: HybridVec<i32, 4> = hybridvec![1, 2, 3];
    /// assert_eq!(vec.at(1), Ok(&2));
    ///
    /// let err = vec.at(3).unwrap_err();
    /// assert_eq!(err.index, 3);
    /// assert_eq!(err.len, 3);
    /// ```
    #[inline]
    pub fn at(&self, index: usize) -> Result<&T, OutOfRange> {
        let len = self.len();
        self.as_slice().get(index).ok_or(OutOfRange { index, len })
    }

    /// Returns a mutable reference to the element at `index`, or an
    /// [`OutOfRange`] error if `index` is not below the length.
    ///
    /// # Examples
    ///
    /// ```
    /// use hybridvec::{HybridVec, hybridvec};
    ///
    /// let mut vec: HybridVec<i32, 4> = hybridvec![1, 2, 3];
    /// *vec.at_mut(0).unwrap() = 9;
    /// assert_eq!(vec, [9, 2, 3]);
    /// assert!(vec.at_mut(5).is_err());
    /// ```
    #[inline]
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, OutOfRange> {
        let len = self.len();
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(OutOfRange { index, len })
    }

    /// Appends an element to the back of the vector.
    ///
    /// Pushing past the inline capacity moves all elements to the heap.
    /// A full heap buffer is replaced by one sized to one and a half
    /// times the new length.
    ///
    /// # Time complexity
    ///
    /// Amortized *O*(1); *O*(`len`) when storage migrates or reallocates.
    ///
    /// # Examples
    ///
    /// ```
    /// use hybridvec::HybridVec;
    ///
    /// let mut vec = HybridVec::<i32, 4>::new();
    /// for value in 1..=4 {
    ///     vec.push(value);
    /// }
    /// assert!(vec.is_inline());
    ///
    /// vec.push(5);
    /// assert!(!vec.is_inline());
    /// assert_eq!(vec.capacity(), 7);
    /// ```
    #[inline]
    pub fn push(&mut self, value: T) {
        match &mut self.storage {
            Storage::Inline(buf) => {
                if buf.len() < N {
                    unsafe { buf.push_unchecked(value) };
                } else {
                    let mut new_vec: Vec<T> = Vec::with_capacity(next_capacity(N, N, 1));
                    let dst_ptr = new_vec.as_mut_ptr();
                    unsafe {
                        ptr::copy_nonoverlapping(buf.as_ptr(), dst_ptr, N);
                        ptr::write(dst_ptr.add(N), value);
                        buf.set_len(0);
                        new_vec.set_len(N + 1);
                    }
                    self.storage = Storage::Heap(new_vec);
                }
            }
            Storage::Heap(vec) => {
                if vec.len() < vec.capacity() {
                    vec.push(value);
                } else {
                    let len = vec.len();
                    let mut new_vec: Vec<T> = Vec::with_capacity(next_capacity(N, len, 1));
                    let dst_ptr = new_vec.as_mut_ptr();
                    unsafe {
                        ptr::copy_nonoverlapping(vec.as_ptr(), dst_ptr, len);
                        ptr::write(dst_ptr.add(len), value);
                        vec.set_len(0);
                        new_vec.set_len(len + 1);
                    }
                    *vec = new_vec;
                }
            }
        }
    }

    /// Removes the last element and returns it, or `None` if the vector
    /// is empty.
    ///
    /// A pop that brings the length down to `N` moves the elements back
    /// into the inline buffer and frees the heap allocation. No other pop
    /// changes the capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use hybridvec::{HybridVec, hybridvec};
    ///
    /// let mut vec: HybridVec<i32, 4> = hybridvec![1, 2, 3, 4, 5];
    /// assert!(!vec.is_inline());
    ///
    /// assert_eq!(vec.pop(), Some(5));
    /// assert!(vec.is_inline());
    /// assert_eq!(vec.capacity(), 4);
    /// ```
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        match &mut self.storage {
            Storage::Inline(buf) => buf.pop(),
            Storage::Heap(vec) => {
                let value = vec.pop();
                if vec.len() == N {
                    self.storage = Storage::Inline(unsafe { InlineBuf::from_vec_unchecked(vec) });
                }
                value
            }
        }
    }

    /// Inserts an element at `index`, shifting everything after it to
    /// the right.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    ///
    /// # Time complexity
    ///
    /// *O*(`len`).
    ///
    /// # Examples
    ///
    /// ```
    /// use hybridvec::{HybridVec, hybridvec};
    ///
    /// let mut vec: HybridVec<i32, 4> = hybridvec![1, 2, 3, 4];
    /// vec.insert(2, 9);
    /// assert_eq!(vec, [1, 2, 9, 3, 4]);
    /// assert_eq!(vec.capacity(), 7);
    /// ```
    #[inline]
    pub fn insert(&mut self, index: usize, element: T) {
        assert!(index <= self.len(), "insertion index should be <= len");
        match &mut self.storage {
            Storage::Inline(buf) => {
                if buf.len() < N {
                    unsafe { buf.insert_unchecked(index, element) };
                } else {
                    let mut new_vec: Vec<T> = Vec::with_capacity(next_capacity(N, N, 1));
                    let dst_ptr = new_vec.as_mut_ptr();
                    let src_ptr = buf.as_ptr();
                    unsafe {
                        ptr::copy_nonoverlapping(src_ptr, dst_ptr, index);
                        ptr::write(dst_ptr.add(index), element);
                        ptr::copy_nonoverlapping(
                            src_ptr.add(index),
                            dst_ptr.add(index + 1),
                            N - index,
                        );
                        buf.set_len(0);
                        new_vec.set_len(N + 1);
                    }
                    self.storage = Storage::Heap(new_vec);
                }
            }
            Storage::Heap(vec) => {
                if vec.len() < vec.capacity() {
                    vec.insert(index, element);
                } else {
                    let len = vec.len();
                    let mut new_vec: Vec<T> = Vec::with_capacity(next_capacity(N, len, 1));
                    let dst_ptr = new_vec.as_mut_ptr();
                    let src_ptr = vec.as_ptr();
                    unsafe {
                        ptr::copy_nonoverlapping(src_ptr, dst_ptr, index);
                        ptr::write(dst_ptr.add(index), element);
                        ptr::copy_nonoverlapping(
                            src_ptr.add(index),
                            dst_ptr.add(index + 1),
                            len - index,
                        );
                        vec.set_len(0);
                        new_vec.set_len(len + 1);
                    }
                    *vec = new_vec;
                }
            }
        }
    }

    /// Inserts clones of a slice at `index`, shifting everything after
    /// it right by the slice length.
    ///
    /// An empty slice never reallocates. Room is sized by the growth rule
    /// applied to the combined new length.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hybridvec::{HybridVec, hybridvec};
    ///
    /// let mut vec: HybridVec<i32, 4> = hybridvec![1, 2, 3, 4];
    /// vec.insert_slice(2, &[9, 9]);
    /// assert_eq!(vec, [1, 2, 9, 9, 3, 4]);
    /// assert_eq!(vec.capacity(), 9);
    /// ```
    pub fn insert_slice(&mut self, index: usize, values: &[T])
    where
        T: Clone,
    {
        let len = self.len();
        assert!(index <= len, "insertion index should be <= len");
        let delta = values.len();

        match &mut self.storage {
            Storage::Inline(buf) => {
                if len + delta <= N {
                    unsafe { buf.insert_slice_unchecked(index, values) };
                } else {
                    let mut new_vec: Vec<T> = Vec::with_capacity(next_capacity(N, len, delta));
                    let dst_ptr = new_vec.as_mut_ptr();
                    let src_ptr = buf.as_ptr();
                    unsafe {
                        ptr::copy_nonoverlapping(src_ptr, dst_ptr, index);
                        ptr::copy_nonoverlapping(
                            src_ptr.add(index),
                            dst_ptr.add(index + delta),
                            len - index,
                        );
                        buf.set_len(0);
                        for (offset, value) in values.iter().enumerate() {
                            ptr::write(dst_ptr.add(index + offset), value.clone());
                        }
                        new_vec.set_len(len + delta);
                    }
                    self.storage = Storage::Heap(new_vec);
                }
            }
            Storage::Heap(vec) => {
                if len + delta <= vec.capacity() {
                    unsafe {
                        let gap_ptr = vec.as_mut_ptr().add(index);
                        if index < len {
                            ptr::copy(gap_ptr, gap_ptr.add(delta), len - index);
                        }
                        // As in the inline case, a panicking clone leaks
                        // the shifted tail rather than exposing the gap.
                        vec.set_len(index);
                        for (offset, value) in values.iter().enumerate() {
                            ptr::write(gap_ptr.add(offset), value.clone());
                        }
                        vec.set_len(len + delta);
                    }
                } else {
                    let mut new_vec: Vec<T> = Vec::with_capacity(next_capacity(N, len, delta));
                    let dst_ptr = new_vec.as_mut_ptr();
                    let src_ptr = vec.as_ptr();
                    unsafe {
                        ptr::copy_nonoverlapping(src_ptr, dst_ptr, index);
                        ptr::copy_nonoverlapping(
                            src_ptr.add(index),
                            dst_ptr.add(index + delta),
                            len - index,
                        );
                        vec.set_len(0);
                        for (offset, value) in values.iter().enumerate() {
                            ptr::write(dst_ptr.add(index + offset), value.clone());
                        }
                        new_vec.set_len(len + delta);
                    }
                    *vec = new_vec;
                }
            }
        }
    }

    /// Appends clones of a slice to the back of the vector.
    ///
    /// Equivalent to [`insert_slice`](Self::insert_slice) at the current
    /// length.
    ///
    /// # Examples
    ///
    /// ```
    /// use hybridvec::{HybridVec, hybridvec};
    ///
    /// let mut vec: HybridVec<i32, 4> = hybridvec![1, 2];
    /// vec.extend_from_slice(&[3, 4]);
    /// assert!(vec.is_inline());
    ///
    /// vec.extend_from_slice(&[5, 6]);
    /// assert_eq!(vec, [1, 2, 3, 4, 5, 6]);
    /// assert_eq!(vec.capacity(), 9);
    /// ```
    #[inline]
    pub fn extend_from_slice(&mut self, values: &[T])
    where
        T: Clone,
    {
        self.insert_slice(self.len(), values);
    }

    /// Removes the element at `index` and returns it, shifting everything
    /// after it to the left.
    ///
    /// A removal that brings the length down to `N` moves the elements
    /// back into the inline buffer and frees the heap allocation.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hybridvec::{HybridVec, hybridvec};
    ///
    /// let mut vec: HybridVec<i32, 4> = hybridvec![1, 2, 3, 4, 5];
    /// assert_eq!(vec.remove(0), 1);
    /// assert_eq!(vec, [2, 3, 4, 5]);
    /// assert!(vec.is_inline());
    /// ```
    #[inline]
    pub fn remove(&mut self, index: usize) -> T {
        assert!(index < self.len(), "removal index should be < len");
        match &mut self.storage {
            Storage::Inline(buf) => unsafe { buf.remove_unchecked(index) },
            Storage::Heap(vec) => {
                let value = vec.remove(index);
                if vec.len() == N {
                    self.storage = Storage::Inline(unsafe { InlineBuf::from_vec_unchecked(vec) });
                }
                value
            }
        }
    }

    /// Removes the element at `index` by replacing it with the last
    /// element, without preserving order.
    ///
    /// Shrinks back to the inline buffer under the same rule as
    /// [`remove`](Self::remove).
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hybridvec::{HybridVec, hybridvec};
    ///
    /// let mut vec: HybridVec<i32, 4> = hybridvec![1, 2, 3, 4, 5];
    /// assert_eq!(vec.swap_remove(0), 1);
    /// assert_eq!(vec, [5, 2, 3, 4]);
    /// assert!(vec.is_inline());
    /// ```
    pub fn swap_remove(&mut self, index: usize) -> T {
        assert!(index < self.len(), "removal index should be < len");
        match &mut self.storage {
            Storage::Inline(buf) => unsafe { buf.swap_remove_unchecked(index) },
            Storage::Heap(vec) => {
                let value = vec.swap_remove(index);
                if vec.len() == N {
                    self.storage = Storage::Inline(unsafe { InlineBuf::from_vec_unchecked(vec) });
                }
                value
            }
        }
    }

    /// Removes the elements in `range`, shifting everything after the
    /// range to the left.
    ///
    /// When the surviving length lands strictly below `N` while on the
    /// heap, the gap is closed and the elements migrate inline in a
    /// single pass. Otherwise the range is removed one element at a time
    /// from the front, which costs *O*(`range.len()` × `len`); a removal
    /// that ends exactly at length `N` still migrates, on its final step.
    ///
    /// # Panics
    ///
    /// Panics if the range is decreasing or its end exceeds the length.
    ///
    /// # Examples
    ///
    /// ```
    /// use hybridvec::{HybridVec, hybridvec};
    ///
    /// let mut vec: HybridVec<i32, 4> = hybridvec![1, 2, 3, 4, 5, 6];
    /// vec.erase_range(1..3);
    /// assert_eq!(vec, [1, 4, 5, 6]);
    /// assert!(vec.is_inline());
    /// assert_eq!(vec.capacity(), 4);
    /// ```
    pub fn erase_range(&mut self, range: impl RangeBounds<usize>) {
        let (start, end) = split_range_bound(&range, self.len());
        assert!(start <= end, "range start should be <= end");
        assert!(end <= self.len(), "range end should be <= len");
        let dist = end - start;

        match &mut self.storage {
            Storage::Heap(vec) if vec.len() - dist < N => {
                vec.drain(start..end);
                self.storage = Storage::Inline(unsafe { InlineBuf::from_vec_unchecked(vec) });
            }
            _ => {
                for _ in 0..dist {
                    self.remove(start);
                }
            }
        }
    }

    /// Shortens the vector to `len` elements, dropping the rest.
    ///
    /// Does nothing if `len` is not below the current length. Truncating
    /// to at most `N` elements moves them back into the inline buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// use hybridvec::{HybridVec, hybridvec};
    ///
    /// let mut vec: HybridVec<i32, 4> = hybridvec![1, 2, 3, 4, 5, 6];
    /// vec.truncate(2);
    /// assert_eq!(vec, [1, 2]);
    /// assert!(vec.is_inline());
    /// ```
    pub fn truncate(&mut self, len: usize) {
        match &mut self.storage {
            Storage::Inline(buf) => buf.truncate(len),
            Storage::Heap(vec) => {
                vec.truncate(len);
                if vec.len() <= N {
                    self.storage = Storage::Inline(unsafe { InlineBuf::from_vec_unchecked(vec) });
                }
            }
        }
    }

    /// Keeps only the elements for which the predicate returns `true`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hybridvec::{HybridVec, hybridvec};
    ///
    /// let mut vec: HybridVec<i32, 4> = hybridvec![1, 2, 3, 4, 5, 6];
    /// vec.retain(|value| value % 2 == 1);
    /// assert_eq!(vec, [1, 3, 5]);
    /// assert!(vec.is_inline());
    /// ```
    #[inline]
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.retain_mut(|elem| f(elem));
    }

    /// Keeps only the elements for which the predicate returns `true`,
    /// passing a mutable reference.
    ///
    /// Shrinks back to the inline buffer when at most `N` elements
    /// survive.
    pub fn retain_mut<F>(&mut self, f: F)
    where
        F: FnMut(&mut T) -> bool,
    {
        match &mut self.storage {
            Storage::Inline(buf) => buf.retain_mut(f),
            Storage::Heap(vec) => {
                vec.retain_mut(f);
                if vec.len() <= N {
                    self.storage = Storage::Inline(unsafe { InlineBuf::from_vec_unchecked(vec) });
                }
            }
        }
    }

    /// Removes every element and releases the heap buffer if one is held.
    ///
    /// The vector is left in the inline state with capacity `N`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hybridvec::{HybridVec, hybridvec};
    ///
    /// let mut vec: HybridVec<i32, 4> = hybridvec![1, 2, 3, 4, 5];
    /// vec.clear();
    /// assert!(vec.is_empty());
    /// assert!(vec.is_inline());
    /// assert_eq!(vec.capacity(), 4);
    /// ```
    #[inline]
    pub fn clear(&mut self) {
        self.storage = Storage::Inline(InlineBuf::new());
    }

    /// Converts the vector into a plain `Vec`.
    ///
    /// A heap-backed vector hands over its buffer as is; an inline vector
    /// allocates exactly its length.
    ///
    /// # Examples
    ///
    /// ```
    /// use hybridvec::{HybridVec, hybridvec};
    ///
    /// let vec: HybridVec<i32, 4> = hybridvec![1, 2, 3];
    /// assert_eq!(vec.into_vec(), [1, 2, 3]);
    /// ```
    pub fn into_vec(self) -> Vec<T> {
        match self.storage {
            Storage::Inline(mut buf) => unsafe { buf.into_vec_with_capacity_unchecked(buf.len()) },
            Storage::Heap(vec) => vec,
        }
    }
}

impl<T, const N: usize> Default for HybridVec<T, N> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, const N: usize> Clone for HybridVec<T, N> {
    /// Deep-copies the elements and reproduces the source's capacity.
    fn clone(&self) -> Self {
        match &self.storage {
            Storage::Inline(buf) => Self {
                storage: Storage::Inline(buf.clone()),
            },
            Storage::Heap(vec) => {
                let mut new_vec = Vec::with_capacity(vec.capacity());
                new_vec.extend_from_slice(vec.as_slice());
                Self {
                    storage: Storage::Heap(new_vec),
                }
            }
        }
    }
}

impl<T, const N: usize> Extend<T> for HybridVec<T, N> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<'a, T: 'a + Clone, const N: usize> Extend<&'a T> for HybridVec<T, N> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item.clone());
        }
    }
}

impl<T: Clone, const N: usize> From<&[T]> for HybridVec<T, N> {
    #[inline]
    fn from(value: &[T]) -> Self {
        Self::from_slice(value)
    }
}

impl<T, const N: usize, const M: usize> From<[T; M]> for HybridVec<T, N> {
    /// Moves an array into the vector without cloning.
    fn from(value: [T; M]) -> Self {
        if M <= N {
            let buf = unsafe { InlineBuf::copy_from_raw(value.as_ptr(), M) };
            mem::forget(value);
            Self {
                storage: Storage::Inline(buf),
            }
        } else {
            let mut vec = Vec::with_capacity(next_capacity(N, M, 0));
            unsafe {
                ptr::copy_nonoverlapping(value.as_ptr(), vec.as_mut_ptr(), M);
                vec.set_len(M);
            }
            mem::forget(value);
            Self {
                storage: Storage::Heap(vec),
            }
        }
    }
}

impl<T, const N: usize> From<Vec<T>> for HybridVec<T, N> {
    /// Adopts the allocation when it must stay on the heap; otherwise the
    /// elements move inline and the allocation is released.
    fn from(mut value: Vec<T>) -> Self {
        if value.len() <= N {
            let buf = unsafe { InlineBuf::from_vec_unchecked(&mut value) };
            Self {
                storage: Storage::Inline(buf),
            }
        } else {
            Self {
                storage: Storage::Heap(value),
            }
        }
    }
}

impl<T, const N: usize> FromIterator<T> for HybridVec<T, N> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut res = Self::new();
        for item in iter {
            res.push(item);
        }
        res
    }
}

impl<T, const N: usize> IntoIterator for HybridVec<T, N> {
    type Item = T;
    type IntoIter = IntoIter<T, N>;

    /// # Examples
    ///
    /// ```
    /// use hybridvec::{HybridVec, hybridvec};
    ///
    /// let vec: HybridVec<i32, 4> = hybridvec![1, 2, 3];
    /// let mut sum = 0;
    /// for value in vec {
    ///     sum += value;
    /// }
    /// assert_eq!(sum, 6);
    /// ```
    #[inline]
    fn into_iter(self) -> IntoIter<T, N> {
        match self.storage {
            Storage::Inline(buf) => IntoIter {
                inner: IntoIterInner::Inline(buf.into_iter()),
            },
            Storage::Heap(vec) => IntoIter {
                inner: IntoIterInner::Heap(vec.into_iter()),
            },
        }
    }
}

/// An iterator that moves out of a [`HybridVec`].
#[derive(Clone)]
pub struct IntoIter<T, const N: usize> {
    inner: IntoIterInner<T, N>,
}

#[derive(Clone)]
enum IntoIterInner<T, const N: usize> {
    Inline(crate::inline::IntoIter<T, N>),
    Heap(alloc::vec::IntoIter<T>),
}

impl<T, const N: usize> IntoIter<T, N> {
    /// Returns the remaining elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        match &self.inner {
            IntoIterInner::Inline(iter) => iter.as_slice(),
            IntoIterInner::Heap(iter) => iter.as_slice(),
        }
    }

    /// Returns the remaining elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        match &mut self.inner {
            IntoIterInner::Inline(iter) => iter.as_mut_slice(),
            IntoIterInner::Heap(iter) => iter.as_mut_slice(),
        }
    }
}

impl<T, const N: usize> Iterator for IntoIter<T, N> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        match &mut self.inner {
            IntoIterInner::Inline(iter) => iter.next(),
            IntoIterInner::Heap(iter) => iter.next(),
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            IntoIterInner::Inline(iter) => iter.size_hint(),
            IntoIterInner::Heap(iter) => iter.size_hint(),
        }
    }
}

impl<T, const N: usize> DoubleEndedIterator for IntoIter<T, N> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        match &mut self.inner {
            IntoIterInner::Inline(iter) => iter.next_back(),
            IntoIterInner::Heap(iter) => iter.next_back(),
        }
    }
}

impl<T, const N: usize> ExactSizeIterator for IntoIter<T, N> {}

impl<T, const N: usize> core::iter::FusedIterator for IntoIter<T, N> {}

impl<T, const N: usize> Default for IntoIter<T, N> {
    #[inline]
    fn default() -> Self {
        HybridVec::new().into_iter()
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for IntoIter<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T: PartialEq<U>, U, const N: usize, const M: usize> PartialEq<HybridVec<U, M>>
    for HybridVec<T, N>
{
    #[inline]
    fn eq(&self, other: &HybridVec<U, M>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

crate::utils::impl_common_traits!(HybridVec<T, N>);
