use super::{Expr, Name};

/// An `insert` of a single row.
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub table: Name,

    /// Columns receiving values. Empty inserts `default values`.
    pub columns: Vec<String>,

    /// One value per column.
    pub values: Vec<Expr>,

    pub returning: Vec<Expr>,
}

impl Insert {
    pub fn new(table: impl Into<Name>) -> Insert {
        Insert {
            table: table.into(),
            columns: vec![],
            values: vec![],
            returning: vec![],
        }
    }

    pub fn value(mut self, column: impl Into<String>, value: impl Into<Expr>) -> Insert {
        self.columns.push(column.into());
        self.values.push(value.into());
        self
    }

    pub fn returning(mut self, exprs: impl IntoIterator<Item = Expr>) -> Insert {
        self.returning.extend(exprs);
        self
    }
}
