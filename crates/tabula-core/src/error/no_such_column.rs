use super::Error;

/// Error when an attribute name is not one of the table's columns.
#[derive(Debug)]
pub(super) struct NoSuchColumnError {
    table: Box<str>,
    column: Box<str>,
}

impl std::error::Error for NoSuchColumnError {}

impl core::fmt::Display for NoSuchColumnError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "no such column: {:?} on table {}", self.column, self.table)
    }
}

impl Error {
    /// Creates a no such column error.
    ///
    /// `table` is the quoted table name and `column` the name that was looked up.
    pub fn no_such_column(table: impl Into<String>, column: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::NoSuchColumn(NoSuchColumnError {
            table: table.into().into(),
            column: column.into().into(),
        }))
    }

    /// Returns `true` if this error is a no such column error.
    pub fn is_no_such_column(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::NoSuchColumn(_))
    }
}
