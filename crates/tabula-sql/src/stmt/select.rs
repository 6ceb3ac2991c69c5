use super::{Expr, Name};

/// A `select` statement. Also used as a scope: a partial select merged into
/// another with [`Select::apply`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Select {
    /// The select list. Empty means `*`.
    pub columns: Vec<Expr>,

    pub from: Option<Name>,

    pub filter: Option<Expr>,

    pub order_by: Vec<OrderBy>,

    pub limit: Option<u64>,

    pub offset: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub expr: Expr,
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Select {
    pub fn new() -> Select {
        Select::default()
    }

    pub fn columns(mut self, columns: impl IntoIterator<Item = Expr>) -> Select {
        self.columns.extend(columns);
        self
    }

    pub fn from(mut self, table: impl Into<Name>) -> Select {
        self.from = Some(table.into());
        self
    }

    /// Adds a predicate, ANDed with any existing one.
    pub fn filter(mut self, expr: Expr) -> Select {
        self.filter = Some(match self.filter.take() {
            Some(existing) => existing.and_with(expr),
            None => expr,
        });
        self
    }

    pub fn order_by(mut self, expr: Expr, direction: Direction) -> Select {
        self.order_by.push(OrderBy { expr, direction });
        self
    }

    pub fn limit(mut self, limit: u64) -> Select {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Select {
        self.offset = Some(offset);
        self
    }

    /// Merges scopes into this statement, in order.
    ///
    /// Select lists and order-by terms are appended, filters are ANDed, and
    /// `from`, `limit` and `offset` are replaced when the scope sets them.
    pub fn apply<'a>(mut self, scopes: impl IntoIterator<Item = &'a Select>) -> Select {
        for scope in scopes {
            self.columns.extend(scope.columns.iter().cloned());

            if let Some(from) = &scope.from {
                self.from = Some(from.clone());
            }

            if let Some(filter) = &scope.filter {
                self = self.filter(filter.clone());
            }

            self.order_by.extend(scope.order_by.iter().cloned());

            if scope.limit.is_some() {
                self.limit = scope.limit;
            }

            if scope.offset.is_some() {
                self.offset = scope.offset;
            }
        }

        self
    }
}
