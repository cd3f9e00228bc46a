use serde::{Deserialize, Serialize};
use chrono::{NaiveDate, NaiveDateTime, DateTime, Utc};
use uuid::Uuid;
use rust_decimal::Decimal;

use super::error::MapperError;

/// A single statement parameter or result column value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Value {
    Null,
    // Numeric types
    Integer(i64),
    Real(f64),
    Numeric(Decimal),
    // String types
    Text(String),
    // Boolean
    Boolean(bool),
    // Date/Time types
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
    TimestampTz(DateTime<Utc>),
    // Special types
    Uuid(Uuid),
    Bytea(Vec<u8>),
}

impl Value {
    /// Short type name used in conversion errors.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "NULL",
            Self::Integer(_) => "INTEGER",
            Self::Real(_) => "REAL",
            Self::Numeric(_) => "NUMERIC",
            Self::Text(_) => "TEXT",
            Self::Boolean(_) => "BOOLEAN",
            Self::Date(_) => "DATE",
            Self::Timestamp(_) => "TIMESTAMP",
            Self::TimestampTz(_) => "TIMESTAMPTZ",
            Self::Uuid(_) => "UUID",
            Self::Bytea(_) => "BYTEA",
        }
    }

    /// SQL literal form, for display only. Never fed back to a driver.
    #[must_use]
    pub fn to_sql_literal(&self) -> String {
        match self {
            Self::Null => "NULL".to_string(),
            Self::Integer(n) => n.to_string(),
            Self::Real(f) => f.to_string(),
            Self::Numeric(d) => d.to_string(),
            Self::Text(s) => format!("'{}'", s.replace('\'', "''")),
            Self::Boolean(b) => {
                if *b {
                    "TRUE".to_string()
                } else {
                    "FALSE".to_string()
                }
            }
            Self::Date(d) => format!("'{}'", d.format("%Y-%m-%d")),
            Self::Timestamp(ts) => format!("'{}'", ts.format("%Y-%m-%d %H:%M:%S")),
            Self::TimestampTz(ts) => format!("'{}'", ts.format("%Y-%m-%d %H:%M:%S%z")),
            Self::Uuid(u) => format!("'{u}'"),
            Self::Bytea(b) => format!("'\\x{}'", hex::encode(b)),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Real(r) => write!(f, "{r}"),
            Self::Numeric(d) => write!(f, "{d}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Self::Timestamp(t) => write!(f, "{}", t.format("%Y-%m-%d %H:%M:%S")),
            Self::TimestampTz(t) => write!(f, "{}", t.format("%Y-%m-%d %H:%M:%S %Z")),
            Self::Uuid(u) => write!(f, "{u}"),
            Self::Bytea(b) => write!(f, "\\x{}", hex::encode(b)),
        }
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

value_from! {
    i64 => Integer,
    i32 => Integer,
    i16 => Integer,
    i8 => Integer,
    u32 => Integer,
    u16 => Integer,
    u8 => Integer,
    f64 => Real,
    f32 => Real,
    Decimal => Numeric,
    String => Text,
    bool => Boolean,
    NaiveDate => Date,
    NaiveDateTime => Timestamp,
    DateTime<Utc> => TimestampTz,
    Uuid => Uuid,
    Vec<u8> => Bytea,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Self::Bytea(v.to_vec())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// Conversion out of a [`Value`], used when scanning columns into Rust storage.
///
/// Only lossless conversions succeed. `NULL` converts only into `Option<T>`.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self, MapperError>;
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self, MapperError> {
        Ok(value)
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self, MapperError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: Value) -> Result<Self, MapperError> {
        match value {
            Value::Integer(i) => Ok(i),
            other => Err(MapperError::type_mismatch("i64", "INTEGER", &other)),
        }
    }
}

macro_rules! narrow_int {
    ($($ty:ty),*) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: Value) -> Result<Self, MapperError> {
                    match value {
                        Value::Integer(i) => <$ty>::try_from(i).map_err(|_| MapperError::TypeMismatch {
                            target: stringify!($ty).to_string(),
                            expected: "INTEGER in range",
                            found: i.to_string(),
                        }),
                        other => Err(MapperError::type_mismatch(stringify!($ty), "INTEGER", &other)),
                    }
                }
            }
        )*
    };
}

narrow_int!(i32, i16, i8, u32, u16, u8);

/// 2^63, the first integer-valued float past `i64::MAX`.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// `i` as a float, if the float holds it exactly.
#[allow(clippy::cast_possible_truncation)]
fn exact_float(i: i64) -> Option<f64> {
    let f = i as f64;
    (f < I64_BOUND && f as i64 == i).then_some(f)
}

fn inexact(target: &str, expected: &'static str, found: impl ToString) -> MapperError {
    MapperError::TypeMismatch {
        target: target.to_string(),
        expected,
        found: found.to_string(),
    }
}

impl FromValue for f64 {
    fn from_value(value: Value) -> Result<Self, MapperError> {
        match value {
            Value::Real(r) => Ok(r),
            Value::Integer(i) => exact_float(i).ok_or_else(|| inexact("f64", "INTEGER exact as f64", i)),
            other => Err(MapperError::type_mismatch("f64", "REAL", &other)),
        }
    }
}

impl FromValue for f32 {
    #[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
    fn from_value(value: Value) -> Result<Self, MapperError> {
        let wide = match value {
            Value::Real(r) => r,
            Value::Integer(i) => exact_float(i).ok_or_else(|| inexact("f32", "INTEGER exact as f32", i))?,
            other => return Err(MapperError::type_mismatch("f32", "REAL", &other)),
        };

        let narrow = wide as Self;
        if f64::from(narrow) == wide || wide.is_nan() {
            Ok(narrow)
        } else {
            Err(inexact("f32", "REAL exact as f32", wide))
        }
    }
}

impl FromValue for Decimal {
    fn from_value(value: Value) -> Result<Self, MapperError> {
        match value {
            Value::Numeric(d) => Ok(d),
            Value::Integer(i) => Ok(Self::from(i)),
            other => Err(MapperError::type_mismatch("Decimal", "NUMERIC", &other)),
        }
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self, MapperError> {
        match value {
            Value::Text(s) => Ok(s),
            other => Err(MapperError::type_mismatch("String", "TEXT", &other)),
        }
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self, MapperError> {
        match value {
            Value::Boolean(b) => Ok(b),
            // MySQL and SQLite store BOOL as a small integer
            Value::Integer(0) => Ok(false),
            Value::Integer(1) => Ok(true),
            other => Err(MapperError::type_mismatch("bool", "BOOLEAN", &other)),
        }
    }
}

impl FromValue for NaiveDate {
    fn from_value(value: Value) -> Result<Self, MapperError> {
        match value {
            Value::Date(d) => Ok(d),
            other => Err(MapperError::type_mismatch("NaiveDate", "DATE", &other)),
        }
    }
}

impl FromValue for NaiveDateTime {
    fn from_value(value: Value) -> Result<Self, MapperError> {
        match value {
            Value::Timestamp(t) => Ok(t),
            other => Err(MapperError::type_mismatch("NaiveDateTime", "TIMESTAMP", &other)),
        }
    }
}

impl FromValue for DateTime<Utc> {
    fn from_value(value: Value) -> Result<Self, MapperError> {
        match value {
            Value::TimestampTz(t) => Ok(t),
            Value::Timestamp(t) => Ok(t.and_utc()),
            other => Err(MapperError::type_mismatch("DateTime<Utc>", "TIMESTAMPTZ", &other)),
        }
    }
}

impl FromValue for Uuid {
    fn from_value(value: Value) -> Result<Self, MapperError> {
        match value {
            Value::Uuid(u) => Ok(u),
            other => Err(MapperError::type_mismatch("Uuid", "UUID", &other)),
        }
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: Value) -> Result<Self, MapperError> {
        match value {
            Value::Bytea(b) => Ok(b),
            other => Err(MapperError::type_mismatch("Vec<u8>", "BYTEA", &other)),
        }
    }
}
