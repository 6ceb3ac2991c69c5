use super::Error;

/// Error when an operation expects exactly one row but the database reported
/// more.
///
/// This occurs when:
/// - A select that should match one row matches several
/// - An insert, update or delete keyed on a non-unique predicate touches several rows
#[derive(Debug)]
pub(super) struct TooManyRecordsError {
    count: u64,
}

impl std::error::Error for TooManyRecordsError {}

impl core::fmt::Display for TooManyRecordsError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "too many records: expected 1 row, got {}", self.count)
    }
}

impl Error {
    /// Creates a too many records error carrying the actual row count.
    pub fn too_many_records(count: u64) -> Error {
        Error::from(super::ErrorKind::TooManyRecords(TooManyRecordsError {
            count,
        }))
    }

    /// Returns `true` if this error is a too many records error.
    pub fn is_too_many_records(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::TooManyRecords(_))
    }

    /// The number of rows reported for a too many records error.
    pub fn row_count(&self) -> Option<u64> {
        match self.kind() {
            super::ErrorKind::TooManyRecords(err) => Some(err.count),
            _ => None,
        }
    }
}
