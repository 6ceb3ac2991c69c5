use super::{Expr, Name, Select};

#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub table: Name,

    /// `set` assignments, in order
    pub assignments: Vec<(String, Expr)>,

    pub filter: Option<Expr>,

    pub returning: Vec<Expr>,
}

impl Update {
    pub fn new(table: impl Into<Name>) -> Update {
        Update {
            table: table.into(),
            assignments: vec![],
            filter: None,
            returning: vec![],
        }
    }

    pub fn set(mut self, column: impl Into<String>, value: impl Into<Expr>) -> Update {
        self.assignments.push((column.into(), value.into()));
        self
    }

    pub fn filter(mut self, expr: Expr) -> Update {
        self.filter = Some(match self.filter.take() {
            Some(existing) => existing.and_with(expr),
            None => expr,
        });
        self
    }

    /// Applies the filter of each scope. Other parts of the scopes are
    /// ignored.
    pub fn apply<'a>(mut self, scopes: impl IntoIterator<Item = &'a Select>) -> Update {
        for scope in scopes {
            if let Some(filter) = &scope.filter {
                self = self.filter(filter.clone());
            }
        }
        self
    }

    pub fn returning(mut self, exprs: impl IntoIterator<Item = Expr>) -> Update {
        self.returning.extend(exprs);
        self
    }
}
