use std::fmt;
use thiserror::Error;

use super::kind::StatementKind;

/// Error type produced by driver implementations. Passed through unchanged.
pub type DriverError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Where a field lookup originated: a template placeholder or a result column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOrigin {
    Placeholder { statement: String },
    Column { column: String },
}

impl fmt::Display for FieldOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Placeholder { statement } => write!(f, "placeholder of statement '{statement}'"),
            Self::Column { column } => write!(f, "column '{column}'"),
        }
    }
}

#[derive(Error, Debug)]
pub enum MapperError {
    #[error("Statement '{0}' not found")]
    StatementNotFound(String),
    #[error("Statement '{id}' is declared as {expected} but its text starts with [{prefix}]")]
    StatementKindMismatch {
        id: String,
        expected: StatementKind,
        prefix: String,
    },
    #[error("Unmatched '#{{' and '}}' in statement '{id}': {text}")]
    MalformedTemplate { id: String, text: String },
    #[error("Record has no field '{field}' for {origin}")]
    FieldNotFound { field: String, origin: FieldOrigin },
    #[error("Field '{field}' for column '{column}' is not writable")]
    FieldNotWritable { column: String, field: String },
    #[error("No rows in result set")]
    NoRows,
    #[error("Column count mismatch: row has {columns} columns, destination expects {expected}")]
    ColumnCountMismatch { columns: usize, expected: usize },
    #[error("Type mismatch for '{target}': expected {expected}, found {found}")]
    TypeMismatch {
        target: String,
        expected: &'static str,
        found: String,
    },
    #[error("Scan called without a current row")]
    NoCurrentRow,
    #[error("Rows already closed")]
    CursorClosed,
    #[error("Invalid statement document: {0}")]
    Document(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    #[error(transparent)]
    Driver(#[from] DriverError),
}

impl MapperError {
    /// True for the single-row fetch that matched nothing.
    #[must_use]
    pub const fn is_no_rows(&self) -> bool {
        matches!(self, Self::NoRows)
    }

    /// Name the record member a conversion failure happened in.
    #[must_use]
    pub fn in_field(self, field: &str) -> Self {
        match self {
            Self::TypeMismatch {
                expected, found, ..
            } => Self::TypeMismatch {
                target: field.to_string(),
                expected,
                found,
            },
            other => other,
        }
    }

    pub(crate) fn type_mismatch(
        target: impl Into<String>,
        expected: &'static str,
        found: &super::value::Value,
    ) -> Self {
        Self::TypeMismatch {
            target: target.into(),
            expected,
            found: found.type_name().to_string(),
        }
    }
}
