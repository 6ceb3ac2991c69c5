//! PostgreSQL statement builder.
//!
//! Statements are plain data ([`stmt`]) turned into SQL text plus positional
//! parameters by [`build`].

pub mod serializer;
pub use serializer::{Params, Placeholder, Serializer};

pub mod stmt;
pub use stmt::{Delete, Expr, Insert, Name, Select, Statement, Update};

use tabula_core::Value;

/// Serializes `stmt` into SQL text and its parameters, in placeholder order.
pub fn build(stmt: &Statement) -> (String, Vec<Value>) {
    let mut params = Vec::new();
    let sql = Serializer::postgresql().serialize(stmt, &mut params);
    (sql, params)
}
