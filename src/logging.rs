use tracing_subscriber::EnvFilter;

/// Sink for per-statement timing lines.
///
/// Installed on a [`Mapper`](crate::Mapper); without one no timestamps are taken.
pub trait SqlLogger: Send + Sync {
    /// `sql` has the bound parameters substituted in for display.
    fn log(&self, elapsed_ms: f64, sql: &str);
}

impl<F> SqlLogger for F
where
    F: Fn(f64, &str) + Send + Sync,
{
    fn log(&self, elapsed_ms: f64, sql: &str) {
        self(elapsed_ms, sql);
    }
}

/// Emits one `tracing` event per statement on the `sqlmapper::sql` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSqlLogger;

impl SqlLogger for TracingSqlLogger {
    fn log(&self, elapsed_ms: f64, sql: &str) {
        tracing::info!(target: "sqlmapper::sql", elapsed_ms, "{}", format_line(elapsed_ms, sql));
    }
}

/// `[1.25ms] SELECT ...`
#[must_use]
pub fn format_line(elapsed_ms: f64, sql: &str) -> String {
    format!("[{elapsed_ms:.2}ms] {sql}")
}

/// Install a global fmt subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
