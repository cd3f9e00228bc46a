// Module declarations
pub mod error;
pub mod value;
pub mod kind;
pub mod statement;
pub mod record;

// Re-exports for convenience
pub use error::{DriverError, FieldOrigin, MapperError};
pub use value::{FromValue, Value};
pub use kind::StatementKind;
pub use statement::Statement;
pub use record::{FieldAccess, Record};
