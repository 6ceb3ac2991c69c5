//! Capabilities the CRUD functions require of their targets.
//!
//! [`Record`](crate::Record) implements all of them. Application types can
//! implement only the ones they need.

use crate::{Error, Result, Row};

use tabula_sql::{Insert, Name, Select, Update};

/// The write operation a [`Model::before_save`] hook is running for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Insert,
    Update,
}

/// Hooks shared by every capability. Both have no-op defaults.
pub trait Model: Send {
    /// Runs before an insert or update statement is built. Returning an
    /// error aborts the operation before any I/O.
    fn before_save(&mut self, op: Op) -> Result<()> {
        let _ = op;
        Ok(())
    }

    /// Converts an error reported by the database server, for example turning
    /// a unique violation into an application validation error.
    ///
    /// Only called with errors for which [`Error::is_db_error`] is `true`.
    fn map_db_error(&self, err: Error) -> Error {
        err
    }
}

pub trait Insertable: Model {
    fn insert_statement(&self) -> Insert;

    /// Receives the row produced by the insert's returning clause.
    fn insert_scan(&mut self, row: Row) -> Result<()> {
        let _ = row;
        Ok(())
    }
}

pub trait Updatable: Model {
    /// An update restricted to this entity's row.
    ///
    /// An update without assignments is skipped.
    fn update_statement(&self) -> Result<Update>;
}

pub trait Deletable: Model {
    fn table_name(&self) -> Name;

    /// A scope selecting this entity's row by primary key.
    fn where_primary_key(&self) -> Result<Select>;
}

pub trait Selectable: Model {
    /// Selects entities of this kind. Scopes are applied on top.
    fn select_statement(&self) -> Select;

    /// Populates this entity from a selected row.
    fn select_scan(&mut self, row: Row) -> Result<()>;
}

/// A growable collection filled by [`select_all`](crate::select_all).
pub trait SelectCollection: Send {
    type Item: Selectable;

    /// Allocates an empty entity that can be appended to this collection.
    fn new_record(&self) -> Self::Item;

    fn push(&mut self, item: Self::Item);
}

impl<T: Selectable + Default> SelectCollection for Vec<T> {
    type Item = T;

    fn new_record(&self) -> T {
        T::default()
    }

    fn push(&mut self, item: T) {
        Vec::push(self, item);
    }
}
