use tabula_core::{DbError, Error};

/// Converts a `tokio-postgres` error, keeping server errors inspectable as
/// [`DbError`].
pub(crate) fn from_postgres(err: tokio_postgres::Error) -> Error {
    let Some(db) = err.as_db_error() else {
        return Error::driver(err);
    };

    let mut converted = DbError::new(db.code().code(), db.message());

    if let Some(detail) = db.detail() {
        converted = converted.with_detail(detail);
    }

    if let Some(schema) = db.schema() {
        converted = converted.with_schema(schema);
    }

    if let Some(table) = db.table() {
        converted = converted.with_table(table);
    }

    if let Some(column) = db.column() {
        converted = converted.with_column(column);
    }

    if let Some(constraint) = db.constraint() {
        converted = converted.with_constraint(constraint);
    }

    Error::db(converted)
}
