use alloc::vec::Vec;
use core::mem::{ManuallyDrop, MaybeUninit};
use core::{ptr, slice};

/// Fixed-capacity buffer backing the inline state of [`HybridVec`].
///
/// The first `len` slots are initialized, the rest are not. `len` never
/// exceeds `N`.
///
/// [`HybridVec`]: crate::HybridVec
pub(crate) struct InlineBuf<T, const N: usize> {
    data: [MaybeUninit<T>; N],
    len: usize,
}

unsafe impl<T: Send, const N: usize> Send for InlineBuf<T, N> {}
unsafe impl<T: Sync, const N: usize> Sync for InlineBuf<T, N> {}

impl<T, const N: usize> Drop for InlineBuf<T, N> {
    fn drop(&mut self) {
        if self.len > 0 {
            unsafe {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.as_mut_ptr(), self.len));
            }
        }
    }
}

impl<T, const N: usize> InlineBuf<T, N> {
    pub(crate) const fn new() -> Self {
        Self {
            data: unsafe { MaybeUninit::<[MaybeUninit<T>; N]>::uninit().assume_init() },
            len: 0,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// # Safety
    ///
    /// The first `new_len` slots must be initialized, and `new_len <= N`.
    pub(crate) const unsafe fn set_len(&mut self, new_len: usize) {
        debug_assert!(new_len <= N);
        self.len = new_len;
    }

    pub(crate) const fn as_ptr(&self) -> *const T {
        &raw const self.data as *const T
    }

    pub(crate) const fn as_mut_ptr(&mut self) -> *mut T {
        &raw mut self.data as *mut T
    }

    pub(crate) const fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.as_ptr(), self.len) }
    }

    pub(crate) const fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), self.len) }
    }

    /// Builds a buffer by bitwise-copying `length` elements from `src`.
    ///
    /// # Safety
    ///
    /// `src` must be valid for reads of `length` elements, `length <= N`,
    /// and the caller gives up ownership of the copied elements.
    pub(crate) const unsafe fn copy_from_raw(src: *const T, length: usize) -> Self {
        debug_assert!(length <= N);
        let mut res = Self::new();
        unsafe {
            ptr::copy_nonoverlapping(src, res.as_mut_ptr(), length);
        }
        res.len = length;
        res
    }

    /// Moves the contents of `vec` into a fresh buffer, leaving `vec` empty
    /// with its allocation intact.
    ///
    /// # Safety
    ///
    /// `vec.len() <= N`.
    pub(crate) unsafe fn from_vec_unchecked(vec: &mut Vec<T>) -> Self {
        unsafe {
            let res = Self::copy_from_raw(vec.as_ptr(), vec.len());
            vec.set_len(0);
            res
        }
    }

    /// Moves the contents into a new `Vec` of the given capacity, leaving
    /// this buffer empty.
    ///
    /// # Safety
    ///
    /// `capacity >= self.len()`.
    pub(crate) unsafe fn into_vec_with_capacity_unchecked(&mut self, capacity: usize) -> Vec<T> {
        let mut vec = Vec::with_capacity(capacity);
        unsafe {
            core::hint::assert_unchecked(capacity >= self.len);
            ptr::copy_nonoverlapping(self.as_ptr(), vec.as_mut_ptr(), self.len);
            vec.set_len(self.len);
        }
        self.len = 0;
        vec
    }

    /// # Safety
    ///
    /// The buffer must not be full.
    pub(crate) const unsafe fn push_unchecked(&mut self, value: T) {
        debug_assert!(self.len < N);
        unsafe {
            ptr::write(self.as_mut_ptr().add(self.len), value);
        }
        self.len += 1;
    }

    pub(crate) const fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            None
        } else {
            self.len -= 1;
            unsafe { Some(ptr::read(self.as_ptr().add(self.len))) }
        }
    }

    /// # Safety
    ///
    /// `index <= self.len()` and the buffer must not be full.
    pub(crate) const unsafe fn insert_unchecked(&mut self, index: usize, element: T) {
        debug_assert!(self.len < N && index <= self.len);
        unsafe {
            let ptr = self.as_mut_ptr().add(index);
            if index < self.len {
                ptr::copy(ptr, ptr.add(1), self.len - index);
            }
            ptr::write(ptr, element);
        }
        self.len += 1;
    }

    /// Inserts clones of `values` at `index`, shifting the tail right.
    ///
    /// # Safety
    ///
    /// `index <= self.len()` and `self.len() + values.len() <= N`.
    pub(crate) unsafe fn insert_slice_unchecked(&mut self, index: usize, values: &[T])
    where
        T: Clone,
    {
        let len = self.len;
        let delta = values.len();
        debug_assert!(index <= len && len + delta <= N);
        unsafe {
            let ptr = self.as_mut_ptr().add(index);
            if index < len {
                ptr::copy(ptr, ptr.add(delta), len - index);
            }
            // Keep `len` at the prefix while the clones run; a panicking
            // clone leaks the shifted tail instead of exposing the gap.
            self.len = index;
            for (offset, value) in values.iter().enumerate() {
                ptr::write(ptr.add(offset), value.clone());
            }
        }
        self.len = len + delta;
    }

    /// # Safety
    ///
    /// `index < self.len()`.
    pub(crate) const unsafe fn remove_unchecked(&mut self, index: usize) -> T {
        debug_assert!(index < self.len);
        unsafe {
            let ptr = self.as_mut_ptr().add(index);
            let value = ptr::read(ptr);
            ptr::copy(ptr.add(1), ptr, self.len - index - 1);
            self.len -= 1;
            value
        }
    }

    /// # Safety
    ///
    /// `index < self.len()`.
    pub(crate) const unsafe fn swap_remove_unchecked(&mut self, index: usize) -> T {
        debug_assert!(index < self.len);
        unsafe {
            let base_ptr = self.as_mut_ptr();
            let value = ptr::read(base_ptr.add(index));
            self.len -= 1;
            ptr::copy(base_ptr.add(self.len), base_ptr.add(index), 1);
            value
        }
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        if len < self.len {
            let num = self.len - len;
            // Shorten first so a panicking destructor cannot run twice.
            self.len = len;
            unsafe {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                    self.as_mut_ptr().add(len),
                    num,
                ));
            }
        }
    }

    pub(crate) fn retain_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut T) -> bool,
    {
        let len = self.len;
        let base_ptr = self.as_mut_ptr();
        let mut count = 0;

        // While the predicate runs, `len` covers no element; a panic leaks
        // the survivors instead of double-dropping anything.
        self.len = 0;
        unsafe {
            for index in 0..len {
                let item = base_ptr.add(index);
                if f(&mut *item) {
                    if count < index {
                        ptr::copy_nonoverlapping(item, base_ptr.add(count), 1);
                    }
                    count += 1;
                } else {
                    ptr::drop_in_place(item);
                }
            }
        }
        self.len = count;
    }
}

impl<T: Clone, const N: usize> Clone for InlineBuf<T, N> {
    fn clone(&self) -> Self {
        let mut res = Self::new();
        for item in self.as_slice() {
            unsafe {
                res.push_unchecked(item.clone());
            }
        }
        res
    }
}

impl<T, const N: usize> IntoIterator for InlineBuf<T, N> {
    type Item = T;
    type IntoIter = IntoIter<T, N>;

    #[inline]
    fn into_iter(self) -> IntoIter<T, N> {
        IntoIter {
            buf: ManuallyDrop::new(self),
            index: 0,
        }
    }
}

/// Owning iterator over an [`InlineBuf`].
///
/// Elements in `buf` at positions `index..buf.len()` are still alive;
/// everything before `index` has been read out.
pub(crate) struct IntoIter<T, const N: usize> {
    buf: ManuallyDrop<InlineBuf<T, N>>,
    index: usize,
}

unsafe impl<T: Send, const N: usize> Send for IntoIter<T, N> {}
unsafe impl<T: Sync, const N: usize> Sync for IntoIter<T, N> {}

impl<T, const N: usize> IntoIter<T, N> {
    pub(crate) fn as_slice(&self) -> &[T] {
        unsafe {
            slice::from_raw_parts(self.buf.as_ptr().add(self.index), self.buf.len() - self.index)
        }
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe {
            slice::from_raw_parts_mut(
                self.buf.as_mut_ptr().add(self.index),
                self.buf.len() - self.index,
            )
        }
    }
}

impl<T, const N: usize> Iterator for IntoIter<T, N> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.index < self.buf.len() {
            let value = unsafe { ptr::read(self.buf.as_ptr().add(self.index)) };
            self.index += 1;
            Some(value)
        } else {
            None
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remain = self.buf.len() - self.index;
        (remain, Some(remain))
    }
}

impl<T, const N: usize> DoubleEndedIterator for IntoIter<T, N> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        if self.index < self.buf.len() {
            unsafe {
                let last = self.buf.len() - 1;
                self.buf.set_len(last);
                Some(ptr::read(self.buf.as_ptr().add(last)))
            }
        } else {
            None
        }
    }
}

impl<T, const N: usize> ExactSizeIterator for IntoIter<T, N> {}

impl<T, const N: usize> core::iter::FusedIterator for IntoIter<T, N> {}

impl<T, const N: usize> Drop for IntoIter<T, N> {
    fn drop(&mut self) {
        let remain = self.buf.len() - self.index;
        if remain > 0 {
            unsafe {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                    self.buf.as_mut_ptr().add(self.index),
                    remain,
                ));
            }
        }
    }
}

impl<T: Clone, const N: usize> Clone for IntoIter<T, N> {
    fn clone(&self) -> Self {
        // Only the unconsumed part is cloned; the fresh iterator starts
        // from position zero.
        let mut buf = InlineBuf::new();
        for item in self.as_slice() {
            unsafe {
                buf.push_unchecked(item.clone());
            }
        }
        IntoIter {
            buf: ManuallyDrop::new(buf),
            index: 0,
        }
    }
}

impl<T, const N: usize> Default for IntoIter<T, N> {
    #[inline]
    fn default() -> Self {
        InlineBuf::new().into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::InlineBuf;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::Cell;

    struct Counted(Rc<Cell<usize>>);

    impl Drop for Counted {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn push_and_pop_move_values_in_order() {
        let mut buf: InlineBuf<i32, 4> = InlineBuf::new();
        for value in 1..=4 {
            unsafe { buf.push_unchecked(value) };
        }
        assert_eq!(buf.as_slice(), [1, 2, 3, 4]);
        assert_eq!(buf.pop(), Some(4));
        assert_eq!(buf.pop(), Some(3));
        assert_eq!(buf.len(), 2);
    }

    #[test]
    fn from_vec_unchecked_drains_the_source() {
        let mut vec = Vec::with_capacity(10);
        vec.extend_from_slice(&[1, 2, 3]);
        let buf: InlineBuf<i32, 4> = unsafe { InlineBuf::from_vec_unchecked(&mut vec) };
        assert_eq!(buf.as_slice(), [1, 2, 3]);
        assert!(vec.is_empty());
        assert_eq!(vec.capacity(), 10);
    }

    #[test]
    fn retain_mut_keeps_order_and_drops_the_rest() {
        let drops = Rc::new(Cell::new(0));
        let mut buf: InlineBuf<(i32, Counted), 8> = InlineBuf::new();
        for value in 0..6 {
            unsafe { buf.push_unchecked((value, Counted(drops.clone()))) };
        }

        buf.retain_mut(|item| item.0 % 2 == 0);
        let kept: Vec<i32> = buf.as_slice().iter().map(|item| item.0).collect();
        assert_eq!(kept, [0, 2, 4]);
        assert_eq!(drops.get(), 3);
    }

    #[test]
    fn into_iter_drops_whatever_is_left() {
        let drops = Rc::new(Cell::new(0));
        let mut buf: InlineBuf<Counted, 8> = InlineBuf::new();
        for _ in 0..5 {
            unsafe { buf.push_unchecked(Counted(drops.clone())) };
        }

        let mut iter = buf.into_iter();
        drop(iter.next());
        drop(iter.next_back());
        assert_eq!(iter.len(), 3);
        drop(iter);
        assert_eq!(drops.get(), 5);
    }
}
