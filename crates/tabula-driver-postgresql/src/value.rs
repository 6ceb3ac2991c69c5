use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use postgres_types::{private::BytesMut, to_sql_checked, FromSql, IsNull, ToSql, Type};
use rust_decimal::Decimal;
use tabula_core::{Opaque, Value as CoreValue};

type BoxError = Box<dyn std::error::Error + Sync + Send>;

/// Wraps a Tabula value so it can be bound to, or read from, a PostgreSQL
/// statement.
#[derive(Debug)]
pub(crate) struct Value(pub(crate) CoreValue);

impl From<CoreValue> for Value {
    fn from(value: CoreValue) -> Self {
        Self(value)
    }
}

impl ToSql for Value {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError>
    where
        Self: Sized,
    {
        // Integers adapt to the width the server inferred for the parameter.
        // Narrowing fails instead of truncating.
        match &self.0 {
            CoreValue::Null => Ok(IsNull::Yes),
            CoreValue::Bool(value) => value.to_sql_checked(ty, out),
            CoreValue::I16(value) => match *ty {
                Type::INT4 => i32::from(*value).to_sql(ty, out),
                Type::INT8 => i64::from(*value).to_sql(ty, out),
                _ => value.to_sql_checked(ty, out),
            },
            CoreValue::I32(value) => match *ty {
                Type::INT2 => i16::try_from(*value)?.to_sql(ty, out),
                Type::INT8 => i64::from(*value).to_sql(ty, out),
                _ => value.to_sql_checked(ty, out),
            },
            CoreValue::I64(value) => match *ty {
                Type::INT2 => i16::try_from(*value)?.to_sql(ty, out),
                Type::INT4 => i32::try_from(*value)?.to_sql(ty, out),
                _ => value.to_sql_checked(ty, out),
            },
            CoreValue::F32(value) => match *ty {
                Type::FLOAT8 => f64::from(*value).to_sql(ty, out),
                _ => value.to_sql_checked(ty, out),
            },
            CoreValue::F64(value) => value.to_sql_checked(ty, out),
            CoreValue::String(value) => value.to_sql_checked(ty, out),
            CoreValue::Bytes(value) => value.to_sql_checked(ty, out),
            CoreValue::Uuid(value) => value.to_sql_checked(ty, out),
            CoreValue::Decimal(value) => value.to_sql_checked(ty, out),
            CoreValue::Date(value) => value.to_sql_checked(ty, out),
            CoreValue::Time(value) => value.to_sql_checked(ty, out),
            CoreValue::Timestamp(value) => match *ty {
                Type::TIMESTAMPTZ => value.and_utc().to_sql(ty, out),
                _ => value.to_sql_checked(ty, out),
            },
            CoreValue::TimestampTz(value) => match *ty {
                Type::TIMESTAMP => value.naive_utc().to_sql(ty, out),
                _ => value.to_sql_checked(ty, out),
            },
            CoreValue::Json(value) => value.to_sql_checked(ty, out),
            CoreValue::Opaque(value) => {
                if value.oid != ty.oid() {
                    return Err(format!(
                        "cannot bind a value read as type oid {} to a `{ty}` parameter",
                        value.oid
                    )
                    .into());
                }
                out.extend_from_slice(&value.bytes);
                Ok(IsNull::No)
            }
        }
    }

    // Null binds to any type; mismatches are reported by `to_sql`.
    fn accepts(_: &Type) -> bool {
        true
    }

    to_sql_checked!();
}

impl<'a> FromSql<'a> for Value {
    fn from_sql(ty: &Type, raw: &'a [u8]) -> Result<Self, BoxError> {
        let value = match *ty {
            Type::BOOL => CoreValue::Bool(bool::from_sql(ty, raw)?),
            Type::INT2 => CoreValue::I16(i16::from_sql(ty, raw)?),
            Type::INT4 => CoreValue::I32(i32::from_sql(ty, raw)?),
            Type::INT8 => CoreValue::I64(i64::from_sql(ty, raw)?),
            Type::OID => CoreValue::I64(u32::from_sql(ty, raw)?.into()),
            Type::FLOAT4 => CoreValue::F32(f32::from_sql(ty, raw)?),
            Type::FLOAT8 => CoreValue::F64(f64::from_sql(ty, raw)?),
            Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME | Type::UNKNOWN => {
                CoreValue::String(String::from_sql(ty, raw)?)
            }
            Type::BYTEA => CoreValue::Bytes(Vec::<u8>::from_sql(ty, raw)?),
            Type::UUID => CoreValue::Uuid(uuid::Uuid::from_sql(ty, raw)?),
            Type::JSON | Type::JSONB => CoreValue::Json(serde_json::Value::from_sql(ty, raw)?),
            // NaN, infinities and out of range values fall back to opaque.
            Type::NUMERIC => decode_or_opaque::<Decimal>(ty, raw, CoreValue::Decimal),
            Type::DATE => decode_or_opaque::<NaiveDate>(ty, raw, CoreValue::Date),
            Type::TIME => decode_or_opaque::<NaiveTime>(ty, raw, CoreValue::Time),
            Type::TIMESTAMP => decode_or_opaque::<NaiveDateTime>(ty, raw, CoreValue::Timestamp),
            Type::TIMESTAMPTZ => {
                decode_or_opaque::<DateTime<Utc>>(ty, raw, CoreValue::TimestampTz)
            }
            _ => opaque(ty, raw),
        };

        Ok(Value(value))
    }

    fn from_sql_null(_: &Type) -> Result<Self, BoxError> {
        Ok(Value(CoreValue::Null))
    }

    fn accepts(_: &Type) -> bool {
        true
    }
}

fn decode_or_opaque<'a, T: FromSql<'a>>(
    ty: &Type,
    raw: &'a [u8],
    variant: impl FnOnce(T) -> CoreValue,
) -> CoreValue {
    match T::from_sql(ty, raw) {
        Ok(value) => variant(value),
        Err(_) => opaque(ty, raw),
    }
}

fn opaque(ty: &Type, raw: &[u8]) -> CoreValue {
    CoreValue::Opaque(Opaque {
        oid: ty.oid(),
        bytes: raw.to_vec(),
    })
}
