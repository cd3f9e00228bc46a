use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::core::{FieldAccess, FieldOrigin, FromValue, MapperError, Record, Value};

/// Convert a result column name into the record member convention:
/// split on `_` and upper-case the first character of each segment.
///
/// `email_verified` becomes `EmailVerified`, `id` becomes `Id`.
#[must_use]
pub fn snake_to_upper_camel(column: &str) -> String {
    let mut out = String::with_capacity(column.len());
    for segment in column.split('_') {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// Scan one row into `dest`, mapping columns to members by name.
///
/// Every column is resolved before anything is written, so a missing or
/// read-only member leaves `dest` untouched.
pub fn scan_record<R: Record + ?Sized>(
    columns: &[String],
    values: Vec<Value>,
    dest: &mut R,
) -> Result<(), MapperError> {
    check_arity(values.len(), columns.len())?;

    let fields = columns
        .iter()
        .map(|column| {
            let field = snake_to_upper_camel(column);
            match dest.field_access(&field) {
                Some(FieldAccess::Writable) => Ok(field),
                Some(FieldAccess::ReadOnly) => Err(MapperError::FieldNotWritable {
                    column: column.clone(),
                    field,
                }),
                None => Err(MapperError::FieldNotFound {
                    field,
                    origin: FieldOrigin::Column {
                        column: column.clone(),
                    },
                }),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    for (field, value) in fields.iter().zip(values) {
        dest.set_field(field, value)?;
    }
    Ok(())
}

fn check_arity(columns: usize, expected: usize) -> Result<(), MapperError> {
    if columns == expected {
        Ok(())
    } else {
        Err(MapperError::ColumnCountMismatch { columns, expected })
    }
}

/// Scalar destinations: the row's columns in order, one target per column.
pub trait FromRow: Sized {
    fn from_row(columns: &[String], values: Vec<Value>) -> Result<Self, MapperError>;
}

fn single<T: FromValue>(columns: &[String], values: Vec<Value>) -> Result<T, MapperError> {
    check_arity(values.len(), 1)?;
    let target = columns.first().map_or("column 1", String::as_str);
    values
        .into_iter()
        .next()
        .ok_or(MapperError::ColumnCountMismatch { columns: 0, expected: 1 })
        .and_then(|value| T::from_value(value).map_err(|e| e.in_field(target)))
}

macro_rules! scalar_from_row {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromRow for $ty {
                fn from_row(columns: &[String], values: Vec<Value>) -> Result<Self, MapperError> {
                    single(columns, values)
                }
            }
        )*
    };
}

scalar_from_row!(
    Value,
    i64,
    i32,
    i16,
    i8,
    u32,
    u16,
    u8,
    f64,
    f32,
    bool,
    String,
    Decimal,
    NaiveDate,
    NaiveDateTime,
    DateTime<Utc>,
    Uuid,
    Vec<u8>,
);

impl<T: FromValue> FromRow for Option<T> {
    fn from_row(columns: &[String], values: Vec<Value>) -> Result<Self, MapperError> {
        single(columns, values)
    }
}

macro_rules! tuple_from_row {
    ($len:expr => $($name:ident),+) => {
        impl<$($name: FromValue),+> FromRow for ($($name,)+) {
            fn from_row(columns: &[String], values: Vec<Value>) -> Result<Self, MapperError> {
                check_arity(values.len(), $len)?;
                let mut cells = values.into_iter().enumerate();
                Ok(($({
                    let (index, value) = cells
                        .next()
                        .ok_or(MapperError::ColumnCountMismatch { columns: 0, expected: $len })?;
                    let target = columns
                        .get(index)
                        .cloned()
                        .unwrap_or_else(|| format!("column {}", index + 1));
                    <$name as FromValue>::from_value(value).map_err(|e| e.in_field(&target))?
                },)+))
            }
        }
    };
}

tuple_from_row!(1 => A);
tuple_from_row!(2 => A, B);
tuple_from_row!(3 => A, B, C);
tuple_from_row!(4 => A, B, C, D);
tuple_from_row!(5 => A, B, C, D, E);
tuple_from_row!(6 => A, B, C, D, E, F);
tuple_from_row!(7 => A, B, C, D, E, F, G);
tuple_from_row!(8 => A, B, C, D, E, F, G, H);
