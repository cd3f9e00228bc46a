use std::fmt;

use crate::core::{FieldOrigin, MapperError, Record, Statement, Value};

/// Invocation arguments of a named statement.
///
/// Either an already-ordered positional list, or one record whose members are
/// looked up by placeholder name.
pub enum Args<'a> {
    Positional(Vec<Value>),
    Record(&'a dyn Record),
}

impl fmt::Debug for Args<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positional(values) => f.debug_tuple("Positional").field(values).finish(),
            Self::Record(_) => f.write_str("Record(..)"),
        }
    }
}

impl From<()> for Args<'_> {
    fn from((): ()) -> Self {
        Self::Positional(Vec::new())
    }
}

impl From<Vec<Value>> for Args<'_> {
    fn from(values: Vec<Value>) -> Self {
        Self::Positional(values)
    }
}

impl<V: Into<Value>, const N: usize> From<[V; N]> for Args<'_> {
    fn from(values: [V; N]) -> Self {
        Self::Positional(values.into_iter().map(Into::into).collect())
    }
}

impl<'a, R: Record> From<&'a R> for Args<'a> {
    fn from(record: &'a R) -> Self {
        Self::Record(record)
    }
}

/// Build a positional argument list, converting each element into a [`Value`](crate::Value).
///
/// ```
/// use sqlmapper::{params, Value};
///
/// let args = params!["Lilei", 7, true];
/// assert_eq!(args[1], Value::Integer(7));
/// ```
#[macro_export]
macro_rules! params {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($value)),+]
    };
}

/// Produce the ordered driver parameters for `statement`.
pub fn bind(statement: &Statement, args: Args<'_>) -> Result<Vec<Value>, MapperError> {
    bind_placeholders(statement.id(), statement.placeholders(), args)
}

/// Produce the ordered driver parameters for the placeholder names `vars`.
///
/// Positional arguments pass through untouched, whatever their count; the
/// driver is left to reject a wrong arity. A record is read member by member
/// in placeholder order, and the first missing member fails the whole bind.
pub fn bind_placeholders(
    statement_id: &str,
    vars: &[String],
    args: Args<'_>,
) -> Result<Vec<Value>, MapperError> {
    match args {
        Args::Positional(values) => Ok(values),
        Args::Record(record) => vars
            .iter()
            .map(|name| {
                record.field(name).ok_or_else(|| MapperError::FieldNotFound {
                    field: name.clone(),
                    origin: FieldOrigin::Placeholder {
                        statement: statement_id.to_string(),
                    },
                })
            })
            .collect(),
    }
}
