//! Structured Logger
//!
//! Wraps `tracing` with an env-controlled filter, an optional console layer,
//! and a daily-rolling NDJSON file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE_PREFIX: &str = "escapevel.log";

#[derive(Debug, Clone)]
pub struct LogOptions {
    pub dir: PathBuf,
    pub level: String,
    /// Off for the full-screen UI, where console output would corrupt the frame.
    pub console: bool,
}

/// Initialize the global logger. `RUST_LOG` takes precedence over `level`.
pub fn init_logger(options: &LogOptions) -> Result<()> {
    std::fs::create_dir_all(&options.dir)
        .with_context(|| format!("Failed to create log directory: {}", options.dir.display()))?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&options.level));

    // Writes NDJSON to `<dir>/escapevel.log.YYYY-MM-DD`
    let file_appender = RollingFileAppender::new(Rotation::DAILY, &options.dir, LOG_FILE_PREFIX);
    let file_layer = fmt::layer()
        .json()
        .with_writer(file_appender)
        .with_ansi(false);

    let console_layer = options.console.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_ansi(true)
    });

    // A second init (e.g. in tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();

    Ok(())
}
