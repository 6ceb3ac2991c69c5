use crate::{Error, Result};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// A dynamically typed column value.
///
/// `Null` doubles as "unset" for record attributes.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Boolean value
    Bool(bool),

    /// Binary data
    Bytes(Vec<u8>),

    /// Calendar date
    Date(NaiveDate),

    /// Arbitrary precision decimal
    Decimal(Decimal),

    /// 32-bit float
    F32(f32),

    /// 64-bit float
    F64(f64),

    /// Signed 16-bit integer
    I16(i16),

    /// Signed 32-bit integer
    I32(i32),

    /// Signed 64-bit integer
    I64(i64),

    /// JSON document
    Json(serde_json::Value),

    /// Null value
    #[default]
    Null,

    /// A value of a type with no dedicated variant
    Opaque(Opaque),

    /// String value
    String(String),

    /// Time of day
    Time(NaiveTime),

    /// Timestamp without time zone
    Timestamp(NaiveDateTime),

    /// Timestamp with time zone
    TimestampTz(DateTime<Utc>),

    /// UUID value
    Uuid(Uuid),
}

/// A value kept in the database's binary wire encoding, tagged with the type
/// OID it was read as.
///
/// Rows of any column type can be loaded this way, and the value can be
/// written back to a column of the same type unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opaque {
    pub oid: u32,
    pub bytes: Vec<u8>,
}

impl Value {
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Self::Bool(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the value as an `i64` if it is any integer variant.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::I16(v) => Some(v.into()),
            Self::I32(v) => Some(v.into()),
            Self::I64(v) => Some(v),
            _ => None,
        }
    }

    /// Takes the value out, leaving `Null` in its place.
    pub fn take(&mut self) -> Value {
        std::mem::take(self)
    }

    pub(crate) fn variant_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "Bool",
            Self::Bytes(_) => "Bytes",
            Self::Date(_) => "Date",
            Self::Decimal(_) => "Decimal",
            Self::F32(_) => "F32",
            Self::F64(_) => "F64",
            Self::I16(_) => "I16",
            Self::I32(_) => "I32",
            Self::I64(_) => "I64",
            Self::Json(_) => "Json",
            Self::Null => "Null",
            Self::Opaque(_) => "Opaque",
            Self::String(_) => "String",
            Self::Time(_) => "Time",
            Self::Timestamp(_) => "Timestamp",
            Self::TimestampTz(_) => "TimestampTz",
            Self::Uuid(_) => "Uuid",
        }
    }
}

macro_rules! impl_from {
    ( $( $variant:ident($ty:ty) ),* ) => {
        $(
            impl From<$ty> for Value {
                fn from(src: $ty) -> Self {
                    Self::$variant(src)
                }
            }
        )*
    };
}

impl_from!(
    Bool(bool),
    Bytes(Vec<u8>),
    Date(NaiveDate),
    Decimal(Decimal),
    F32(f32),
    F64(f64),
    I16(i16),
    I32(i32),
    I64(i64),
    Json(serde_json::Value),
    Opaque(Opaque),
    String(String),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
    TimestampTz(DateTime<Utc>),
    Uuid(Uuid)
);

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::String(src.to_string())
    }
}

impl From<&String> for Value {
    fn from(src: &String) -> Self {
        Self::String(src.clone())
    }
}

impl From<&[u8]> for Value {
    fn from(src: &[u8]) -> Self {
        Self::Bytes(src.to_vec())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(src: Option<T>) -> Self {
        match src {
            Some(value) => value.into(),
            None => Self::Null,
        }
    }
}

/// Conversion from a [`Value`] into a Rust type.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self>;
}

macro_rules! impl_from_value {
    ( $( $ty:ty => $name:literal { $( $variant:ident ),* } ),* ) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: Value) -> Result<Self> {
                    match value {
                        $( Value::$variant(v) => Ok(v.into()), )*
                        _ => Err(Error::type_conversion(value, $name)),
                    }
                }
            }
        )*
    };
}

// Only lossless widening is accepted.
impl_from_value!(
    bool => "bool" { Bool },
    i16 => "i16" { I16 },
    i32 => "i32" { I16, I32 },
    i64 => "i64" { I16, I32, I64 },
    f32 => "f32" { F32 },
    f64 => "f64" { F32, F64 },
    Decimal => "Decimal" { Decimal },
    String => "String" { String },
    Vec<u8> => "Vec<u8>" { Bytes },
    NaiveDate => "NaiveDate" { Date },
    NaiveTime => "NaiveTime" { Time },
    NaiveDateTime => "NaiveDateTime" { Timestamp },
    DateTime<Utc> => "DateTime<Utc>" { TimestampTz },
    serde_json::Value => "serde_json::Value" { Json },
    Opaque => "Opaque" { Opaque },
    Uuid => "Uuid" { Uuid }
);

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self> {
        Ok(value)
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            value => T::from_value(value).map(Some),
        }
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl PartialEq<i32> for Value {
    fn eq(&self, other: &i32) -> bool {
        matches!(self, Self::I32(v) if v == other)
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        matches!(self, Self::I64(v) if v == other)
    }
}
