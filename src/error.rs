//! Error types for rowdiff.
//!
//! The diff engine and the projector are total; errors only come from the
//! section adapter and from replaying a malformed edit script.

use thiserror::Error;

/// Errors that can occur while managing sections or replaying edits.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ListError {
    /// Section index not registered with the adapter
    #[error("section {section} out of range (adapter has {count} sections)")]
    SectionOutOfRange {
        /// Requested section
        section: usize,
        /// Number of registered sections
        count: usize,
    },

    /// Section holds items of a different type than requested
    #[error("section {section} does not hold items of type {expected}")]
    ItemTypeMismatch {
        /// Requested section
        section: usize,
        /// Requested item type name
        expected: &'static str,
    },

    /// Operation refers to a row outside its sequence
    #[error("row {row} out of range for {side} sequence of length {len}")]
    RowOutOfRange {
        /// Offending row
        row: usize,
        /// "old" or "new"
        side: &'static str,
        /// Length of that sequence
        len: usize,
    },

    /// Two operations target the same row
    #[error("{side} row {row} is claimed by more than one operation")]
    RowConflict {
        /// Conflicting row
        row: usize,
        /// "old" or "new"
        side: &'static str,
    },

    /// Replay did not produce a sequence of the expected length
    #[error("replay produced {actual} rows, expected {expected}")]
    LengthMismatch {
        /// Length of the new sequence
        expected: usize,
        /// Rows actually produced
        actual: usize,
    },
}

/// Result type alias for list operations.
pub type ListResult<T> = Result<T, ListError>;

impl ListError {
    /// Create a type mismatch error for items of type `T`.
    pub fn type_mismatch<T>(section: usize) -> Self {
        Self::ItemTypeMismatch {
            section,
            expected: std::any::type_name::<T>(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ListError::SectionOutOfRange { section: 3, count: 2 };
        assert_eq!(err.to_string(), "section 3 out of range (adapter has 2 sections)");

        let err = ListError::RowConflict { row: 4, side: "new" };
        assert_eq!(err.to_string(), "new row 4 is claimed by more than one operation");
    }

    #[test]
    fn test_type_mismatch_names_type() {
        let err = ListError::type_mismatch::<u32>(1);
        assert_eq!(err.to_string(), "section 1 does not hold items of type u32");
    }

    #[test]
    fn test_error_is_send_sync() {
        static_assertions::assert_impl_all!(ListError: Send, Sync);
    }
}
