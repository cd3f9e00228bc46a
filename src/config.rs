use ::config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::MapperError;

/// Prefix of environment overrides, e.g. `SQLMAPPER_LOG_SQL=true`.
pub const ENV_PREFIX: &str = "SQLMAPPER";

/// Mapper configuration
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct MapperConfig {
    /// `<sqlmap>` declaration document to load statements from.
    #[serde(default)]
    pub sqlmap_path: Option<PathBuf>,
    /// Log every executed statement with its timing.
    #[serde(default)]
    pub log_sql: bool,
}

impl MapperConfig {
    /// Load configuration with priority: ENV > config file > defaults
    pub fn load(file: Option<&Path>) -> Result<Self, MapperError> {
        let mut builder = Config::builder();

        if let Some(path) = file {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));

        Ok(builder.build()?.try_deserialize()?)
    }

    /// The configured declaration document path.
    pub fn statement_path(&self) -> Result<&Path, MapperError> {
        self.sqlmap_path
            .as_deref()
            .ok_or_else(|| ConfigError::NotFound("sqlmap_path".to_string()).into())
    }
}
