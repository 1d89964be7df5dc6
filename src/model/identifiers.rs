//! Core index newtypes.
//!
//! Record positions are plain `usize` values inside the dataset; wrapping them
//! keeps record indices from being confused with slot positions or pixel
//! offsets at API boundaries.

use std::fmt;

/// Position of a record within the dataset. 0-indexed internally, 1-based for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RecordIndex(usize);

impl RecordIndex {
    /// Create a new RecordIndex from a raw 0-based value.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw 0-based index value.
    pub fn get(&self) -> usize {
        self.0
    }

    /// Get the 1-based index for display purposes.
    pub fn display(&self) -> usize {
        self.0 + 1
    }

    /// Get the next record index.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// Get the previous record index, saturating at 0.
    pub fn prev(&self) -> Self {
        Self(self.0.saturating_sub(1))
    }
}

impl From<usize> for RecordIndex {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for RecordIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_one_based() {
        assert_eq!(RecordIndex::new(0).display(), 1);
        assert_eq!(RecordIndex::new(41).to_string(), "#42");
    }

    #[test]
    fn prev_saturates_at_zero() {
        assert_eq!(RecordIndex::new(0).prev(), RecordIndex::new(0));
        assert_eq!(RecordIndex::new(3).prev(), RecordIndex::new(2));
    }

    #[test]
    fn next_increments() {
        assert_eq!(RecordIndex::new(7).next().get(), 8);
    }

    #[test]
    fn ordering_follows_raw_value() {
        assert!(RecordIndex::new(1) < RecordIndex::new(2));
        assert_eq!(RecordIndex::from(5), RecordIndex::new(5));
    }
}
