use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use crate::config::MapperConfig;
use crate::core::{DriverError, MapperError, Record, Statement, Value};
use crate::driver::{Connection, Driver, ExecResult, ResultRow, Transaction};
use crate::logging::{SqlLogger, TracingSqlLogger};
use crate::registry::Registry;

use super::binder::{bind, Args};
use super::display::render_sql;
use super::rows::Rows;
use super::scanner::{scan_record, FromRow};

/// Runs named statements from a [`Registry`] against a driver.
///
/// `D` is either a base [`Connection`] or a [`Transaction`] scope opened with
/// [`Mapper::begin`]; both share the same registry and logger.
pub struct Mapper<D> {
    driver: D,
    registry: Arc<Registry>,
    logger: Option<Arc<dyn SqlLogger>>,
}

impl<D> Mapper<D> {
    pub fn new(driver: D, registry: impl Into<Arc<Registry>>) -> Self {
        Self {
            driver,
            registry: registry.into(),
            logger: None,
        }
    }

    /// Load statements from a `<sqlmap>` document held in memory.
    pub fn from_document(driver: D, document: &str) -> Result<Self, MapperError> {
        Ok(Self::new(driver, Registry::from_document(document)?))
    }

    /// Load statements from a `<sqlmap>` document on disk.
    pub fn from_file(driver: D, path: impl AsRef<Path>) -> Result<Self, MapperError> {
        Ok(Self::new(driver, Registry::from_file(path)?))
    }

    /// Load statements from the configured document and enable SQL logging
    /// when `log_sql` is set.
    pub fn from_config(driver: D, config: &MapperConfig) -> Result<Self, MapperError> {
        let path = config.statement_path()?;
        let mut mapper = Self::from_file(driver, path)?;
        if config.log_sql {
            mapper.set_logger(TracingSqlLogger);
        }
        Ok(mapper)
    }

    pub fn set_logger(&mut self, logger: impl SqlLogger + 'static) {
        self.logger = Some(Arc::new(logger));
    }

    #[must_use]
    pub fn with_logger(mut self, logger: impl SqlLogger + 'static) -> Self {
        self.set_logger(logger);
        self
    }

    pub fn clear_logger(&mut self) {
        self.logger = None;
    }

    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The underlying driver, for statements that are not in the registry.
    #[must_use]
    pub const fn driver(&self) -> &D {
        &self.driver
    }

    fn prepare(&self, id: &str, args: Args<'_>) -> Result<(&Statement, Vec<Value>), MapperError> {
        let statement = self.registry.get(id)?;
        let params = bind(statement, args)?;
        Ok((statement, params))
    }

    /// Run `call`, timing it and logging the rendered SQL when a logger is set.
    fn observe<T>(
        &self,
        statement: &Statement,
        params: &[Value],
        call: impl FnOnce() -> Result<T, DriverError>,
    ) -> Result<T, MapperError> {
        let Some(logger) = self.logger.as_deref() else {
            return call().map_err(MapperError::from);
        };

        let start = Instant::now();
        let result = call();
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        logger.log(elapsed_ms, &render_sql(statement.text(), params));

        result.map_err(MapperError::from)
    }
}

impl<D: Driver> Mapper<D> {
    /// Single-row fetch. Binding happens now; the query runs when the
    /// returned [`Row`] is scanned.
    pub fn get<'a>(&self, id: &str, args: impl Into<Args<'a>>) -> Row<'_, D> {
        Row {
            mapper: self,
            bound: self.prepare(id, args.into()),
        }
    }

    /// Multi-row fetch. Zero matching rows is an empty [`Rows`], not an error.
    pub fn select<'a>(&self, id: &str, args: impl Into<Args<'a>>) -> Result<Rows<'_>, MapperError> {
        let (statement, params) = self.prepare(id, args.into())?;
        let cursor = self.observe(statement, &params, || {
            self.driver.query(statement.text(), &params)
        })?;
        Ok(Rows::new(cursor))
    }

    pub fn insert<'a>(&self, id: &str, args: impl Into<Args<'a>>) -> Result<ExecResult, MapperError> {
        self.exec(id, args.into())
    }

    pub fn update<'a>(&self, id: &str, args: impl Into<Args<'a>>) -> Result<ExecResult, MapperError> {
        self.exec(id, args.into())
    }

    pub fn delete<'a>(&self, id: &str, args: impl Into<Args<'a>>) -> Result<ExecResult, MapperError> {
        self.exec(id, args.into())
    }

    fn exec(&self, id: &str, args: Args<'_>) -> Result<ExecResult, MapperError> {
        let (statement, params) = self.prepare(id, args)?;
        self.observe(statement, &params, || self.driver.exec(statement.text(), &params))
    }
}

impl<C: Connection> Mapper<C> {
    /// Open a transaction scope bound to the same registry and logger.
    pub fn begin(&self) -> Result<Mapper<C::Transaction>, MapperError> {
        let tx = self.driver.begin()?;
        tracing::debug!("transaction started");
        Ok(Mapper {
            driver: tx,
            registry: Arc::clone(&self.registry),
            logger: self.logger.clone(),
        })
    }

    /// Close the underlying connection.
    pub fn close(self) -> Result<(), MapperError> {
        Ok(self.driver.close()?)
    }
}

impl<T: Transaction> Mapper<T> {
    pub fn commit(self) -> Result<(), MapperError> {
        self.driver.commit()?;
        tracing::debug!("transaction committed");
        Ok(())
    }

    pub fn rollback(self) -> Result<(), MapperError> {
        self.driver.rollback()?;
        tracing::debug!("transaction rolled back");
        Ok(())
    }
}

impl<D: fmt::Debug> fmt::Debug for Mapper<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mapper")
            .field("driver", &self.driver)
            .field("statements", &self.registry.len())
            .field("logging", &self.logger.is_some())
            .finish()
    }
}

/// Pending single-row fetch returned by [`Mapper::get`].
pub struct Row<'m, D> {
    mapper: &'m Mapper<D>,
    bound: Result<(&'m Statement, Vec<Value>), MapperError>,
}

impl<D: Driver> Row<'_, D> {
    fn fetch(self) -> Result<ResultRow, MapperError> {
        let (statement, params) = self.bound?;
        let mapper = self.mapper;
        mapper
            .observe(statement, &params, || {
                mapper.driver.query_row(statement.text(), &params)
            })?
            .ok_or(MapperError::NoRows)
    }

    /// Scan the row into scalar targets, one per column.
    pub fn scan<T: FromRow>(self) -> Result<T, MapperError> {
        let row = self.fetch()?;
        T::from_row(&row.columns, row.values)
    }

    /// Scan the row into a record, mapping columns to members by name.
    pub fn scan_into<R: Record + ?Sized>(self, dest: &mut R) -> Result<(), MapperError> {
        let row = self.fetch()?;
        scan_record(&row.columns, row.values, dest)
    }
}
