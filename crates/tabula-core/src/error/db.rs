use super::Error;

/// An error reported by the database server.
///
/// Drivers convert their native server error into this type so record types
/// can translate constraint violations without depending on a driver crate.
#[derive(Debug, Clone, PartialEq)]
pub struct DbError {
    code: Box<str>,
    message: Box<str>,
    detail: Option<Box<str>>,
    schema: Option<Box<str>>,
    table: Option<Box<str>>,
    column: Option<Box<str>>,
    constraint: Option<Box<str>>,
}

impl DbError {
    /// Creates a database error from a SQLSTATE code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> DbError {
        DbError {
            code: code.into().into(),
            message: message.into().into(),
            detail: None,
            schema: None,
            table: None,
            column: None,
            constraint: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> DbError {
        self.detail = Some(detail.into().into());
        self
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> DbError {
        self.schema = Some(schema.into().into());
        self
    }

    pub fn with_table(mut self, table: impl Into<String>) -> DbError {
        self.table = Some(table.into().into());
        self
    }

    pub fn with_column(mut self, column: impl Into<String>) -> DbError {
        self.column = Some(column.into().into());
        self
    }

    pub fn with_constraint(mut self, constraint: impl Into<String>) -> DbError {
        self.constraint = Some(constraint.into().into());
        self
    }

    /// The five character SQLSTATE code.
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    pub fn constraint(&self) -> Option<&str> {
        self.constraint.as_deref()
    }

    /// SQLSTATE class 23.
    pub fn is_integrity_constraint_violation(&self) -> bool {
        self.code.starts_with("23")
    }

    pub fn is_unique_violation(&self) -> bool {
        &*self.code == "23505"
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        &*self.code == "23503"
    }

    pub fn is_not_null_violation(&self) -> bool {
        &*self.code == "23502"
    }

    pub fn is_check_violation(&self) -> bool {
        &*self.code == "23514"
    }

    pub fn is_undefined_table(&self) -> bool {
        &*self.code == "42P01"
    }

    pub fn is_invalid_schema_name(&self) -> bool {
        &*self.code == "3F000"
    }
}

impl std::error::Error for DbError {}

impl core::fmt::Display for DbError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "database error {}: {}", self.code, self.message)
    }
}

impl Error {
    /// Creates an error from a server-reported database error.
    pub fn db(err: DbError) -> Error {
        Error::from(super::ErrorKind::Database(err))
    }

    /// Returns `true` if this error was reported by the database server.
    pub fn is_db_error(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Database(_))
    }

    /// Returns the server-reported database error, if this is one.
    pub fn as_db_error(&self) -> Option<&DbError> {
        match self.kind() {
            super::ErrorKind::Database(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for Error {
    fn from(err: DbError) -> Error {
        Error::db(err)
    }
}
