use super::{Expr, Name, Select};

#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    pub table: Name,

    pub filter: Option<Expr>,

    pub returning: Vec<Expr>,
}

impl Delete {
    pub fn new(table: impl Into<Name>) -> Delete {
        Delete {
            table: table.into(),
            filter: None,
            returning: vec![],
        }
    }

    pub fn filter(mut self, expr: Expr) -> Delete {
        self.filter = Some(match self.filter.take() {
            Some(existing) => existing.and_with(expr),
            None => expr,
        });
        self
    }

    /// Applies the filter of each scope. Other parts of the scopes are
    /// ignored.
    pub fn apply<'a>(mut self, scopes: impl IntoIterator<Item = &'a Select>) -> Delete {
        for scope in scopes {
            if let Some(filter) = &scope.filter {
                self = self.filter(filter.clone());
            }
        }
        self
    }

    pub fn returning(mut self, exprs: impl IntoIterator<Item = Expr>) -> Delete {
        self.returning.extend(exprs);
        self
    }
}
