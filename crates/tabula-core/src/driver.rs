mod row;
pub use row::Row;

mod rows;
pub use rows::{Cursor, Rows};

use crate::{async_trait, Result, Value};

use std::sync::Arc;

/// Executes SQL against a database.
///
/// A `Queryer` may be a plain connection or a transaction; nothing in Tabula
/// depends on which.
#[async_trait]
pub trait Queryer: Send + Sync {
    /// Executes `sql` with positional `params`, returning a cursor over the
    /// result rows.
    ///
    /// The cursor reports the affected or selected row count once it has been
    /// drained.
    async fn query(&self, sql: &str, params: &[Value]) -> Result<Rows>;
}

#[async_trait]
impl<Q: Queryer + ?Sized> Queryer for &Q {
    async fn query(&self, sql: &str, params: &[Value]) -> Result<Rows> {
        (**self).query(sql, params).await
    }
}

#[async_trait]
impl<Q: Queryer + ?Sized> Queryer for Arc<Q> {
    async fn query(&self, sql: &str, params: &[Value]) -> Result<Rows> {
        (**self).query(sql, params).await
    }
}

#[async_trait]
impl<Q: Queryer + ?Sized> Queryer for Box<Q> {
    async fn query(&self, sql: &str, params: &[Value]) -> Result<Rows> {
        (**self).query(sql, params).await
    }
}
