//! Driver collaborator contract
//!
//! The mapper never talks to a database itself. It hands normalized SQL text
//! (with `?` markers) and an ordered parameter list to these traits, and reads
//! results back through [`Cursor`]. Errors returned here reach the caller as
//! `MapperError::Driver` without being rewrapped.

use crate::core::{DriverError, Value};

/// Outcome of an INSERT / UPDATE / DELETE.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecResult {
    pub rows_affected: u64,
    pub last_insert_id: Option<i64>,
}

impl ExecResult {
    #[must_use]
    pub const fn new(rows_affected: u64, last_insert_id: Option<i64>) -> Self {
        Self {
            rows_affected,
            last_insert_id,
        }
    }
}

/// One fetched row together with the column names of its result set.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub columns: Vec<String>,
    pub values: Vec<Value>,
}

/// Forward-only result set.
pub trait Cursor {
    /// Column names of the result set, in select-list order.
    fn columns(&self) -> &[String];

    /// Fetch the next row, `None` once exhausted.
    fn next_row(&mut self) -> Result<Option<Vec<Value>>, DriverError>;

    /// Release the resources behind the cursor.
    fn close(&mut self) -> Result<(), DriverError> {
        Ok(())
    }
}

/// Parameterized execution primitives, implemented by connections and
/// transaction scopes alike.
pub trait Driver {
    fn exec(&self, sql: &str, params: &[Value]) -> Result<ExecResult, DriverError>;

    fn query(&self, sql: &str, params: &[Value]) -> Result<Box<dyn Cursor + '_>, DriverError>;

    /// First row of a query, `None` when the query matched nothing.
    ///
    /// The default runs [`Driver::query`] and always closes the cursor.
    fn query_row(&self, sql: &str, params: &[Value]) -> Result<Option<ResultRow>, DriverError> {
        let mut cursor = self.query(sql, params)?;
        let fetched = cursor.next_row();
        let closed = cursor.close();

        let row = fetched?.map(|values| ResultRow {
            columns: cursor.columns().to_vec(),
            values,
        });
        closed?;
        Ok(row)
    }
}

/// A base connection that can open transaction scopes.
pub trait Connection: Driver {
    type Transaction: Transaction;

    fn begin(&self) -> Result<Self::Transaction, DriverError>;

    fn close(self) -> Result<(), DriverError>
    where
        Self: Sized,
    {
        Ok(())
    }
}

/// A transaction scope. Statements run through it share its atomicity.
pub trait Transaction: Driver {
    fn commit(self) -> Result<(), DriverError>;

    fn rollback(self) -> Result<(), DriverError>;
}
