use core::fmt;

/// The error returned by [`HybridVec::at`](crate::HybridVec::at) and
/// [`HybridVec::at_mut`](crate::HybridVec::at_mut) when the requested index
/// is not below the current length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfRange {
    /// The index that was requested.
    pub index: usize,
    /// The length of the vector at the time of the access.
    pub len: usize,
}

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "index {} out of range for length {}", self.index, self.len)
    }
}

impl core::error::Error for OutOfRange {}

#[cfg(test)]
mod tests {
    use super::OutOfRange;

    #[test]
    fn display_names_the_index_and_the_length() {
        let err = OutOfRange { index: 4, len: 4 };
        assert_eq!(
            alloc::format!("{err}"),
            "index 4 out of range for length 4"
        );
    }
}
