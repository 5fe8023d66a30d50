extern crate std;

use std::io::{IoSlice, Write};

use crate::HybridVec;

/// Write is implemented for `HybridVec<u8, N>` by appending to the vector.
/// The vector will grow as needed and a write is never short.
impl<const N: usize> Write for HybridVec<u8, N> {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.extend_from_slice(buf);
        Ok(buf.len())
    }

    #[inline(always)]
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }

    #[inline]
    fn write_vectored(&mut self, bufs: &[IoSlice<'_>]) -> std::io::Result<usize> {
        let mut num = 0;
        for buf in bufs {
            self.extend_from_slice(buf);
            num += buf.len();
        }
        Ok(num)
    }

    #[inline]
    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
        Write::write(self, buf)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::io::{IoSlice, Write};

    use crate::HybridVec;

    #[test]
    fn write_spills_at_the_boundary() {
        let mut vec: HybridVec<u8, 4> = HybridVec::new();
        assert_eq!(vec.write(b"ab").unwrap(), 2);
        assert!(vec.is_inline());

        assert_eq!(vec.write(b"cdef").unwrap(), 4);
        assert_eq!(vec, b"abcdef");
        assert_eq!(vec.capacity(), 9);
        vec.flush().unwrap();
    }

    #[test]
    fn write_and_vectored() {
        let mut vec: HybridVec<u8, 4> = HybridVec::new();

        let num = vec.write(b"hello").unwrap();
        assert_eq!(num, 5);
        assert_eq!(vec.len(), 5);
        assert_eq!(vec, b"hello");

        let bufs = [IoSlice::new(b" "), IoSlice::new(b"world")];
        let num = vec.write_vectored(&bufs).unwrap();
        assert_eq!(num, 6);
        assert_eq!(vec, b"hello world");
    }

    #[test]
    fn write_all_grows() {
        let mut vec: HybridVec<u8, 3> = HybridVec::new();
        let data = [b'x'; 257];
        vec.write_all(&data).unwrap();
        assert_eq!(vec.len(), 257);
        assert!(vec.as_slice().iter().all(|&byte| byte == b'x'));
    }
}
