//! Dynamic active records over PostgreSQL tables.
//!
//! A [`Table`] discovers its columns from the database catalog at runtime.
//! [`Record`]s bound to the table hold one value per column and know how to
//! insert, update, delete and reload themselves. The free functions in
//! [`crud`] implement the protocol for any type exposing the capability
//! traits in [`model`].

pub mod crud;
pub use crud::{delete, insert, select_all, select_one, select_row, select_rows, update};

pub mod model;
pub use model::{
    Deletable, Insertable, Model, Op, SelectCollection, Selectable, Updatable,
};

mod record;
pub use record::{Record, Records};

mod table;
pub use table::{Column, Table};

pub use tabula_core::{
    async_trait, bail, err, Cursor, DbError, Error, FromValue, Opaque, Queryer, Result, Row, Rows,
    Value,
};

pub mod stmt {
    pub use tabula_sql::stmt::*;
}

#[cfg(feature = "postgresql")]
pub use tabula_driver_postgresql::{PgTransaction, PostgreSQL};
