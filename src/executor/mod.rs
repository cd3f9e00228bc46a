//! Executor module - runs named statements
//!
//! Structure:
//! - binder: invocation arguments -> ordered driver parameters
//! - scanner: result columns -> record members / scalar targets
//! - rows: forward-only multi-row wrapper
//! - mapper: Get/Select/Insert/Update/Delete facade, transaction scopes
//! - display: parameter substitution for log lines only

pub mod binder;
pub mod scanner;
pub mod rows;
pub mod mapper;
pub mod display;

pub use binder::{bind, bind_placeholders, Args};
pub use scanner::{scan_record, snake_to_upper_camel, FromRow};
pub use rows::Rows;
pub use mapper::{Mapper, Row};
pub use display::render_sql;
