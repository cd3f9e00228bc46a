// sqlmapper - named SQL statement templates
// Declare statements once, bind arguments by name, scan rows into records

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::multiple_crate_versions)]

// Core types (errors, values, statements, record contract)
pub mod core;

// Statement template parser and declaration document loader
pub mod parser;

// Immutable statement table
pub mod registry;

// Driver, cursor and transaction collaborator traits
pub mod driver;

// Binder, row scanner and the Get/Select/Insert/Update/Delete facade
pub mod executor;

// SQL timing sink and tracing setup
pub mod logging;

// Layered configuration (file + environment)
pub mod config;

// Re-export commonly used types for convenience
pub use crate::core::{DriverError, FieldAccess, FieldOrigin, FromValue, MapperError, Record, Statement, StatementKind, Value};
pub use parser::{parse_document, parse_statement, Declaration};
pub use registry::Registry;
pub use driver::{Connection, Cursor, Driver, ExecResult, ResultRow, Transaction};
pub use executor::{Args, FromRow, Mapper, Row, Rows};
pub use logging::{SqlLogger, TracingSqlLogger};
pub use crate::config::MapperConfig;
