pub mod driver;
pub use driver::{Cursor, Queryer, Row, Rows};

mod error;
pub use error::{DbError, Error, IntoError};

mod value;
pub use value::{FromValue, Opaque, Value};

/// A Result type alias that uses Tabula's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
