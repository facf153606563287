//! Logging utilities for the Advisor front-end.
//!
//! Every crate logs through `tracing`; the binary calls [`init_from_config`] once at
//! start-up. Console output is always on, a daily rolling file is added when the
//! configuration names a log directory.

use advisor_config::LoggingConfig;
use std::str::FromStr;
use tracing::{error, info, warn, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// File name prefix of the rolling log files.
const LOG_FILE_PREFIX: &str = "advisor-web.log";

/// Initialize the tracing subscriber from the logging section of the configuration.
///
/// Returns the guard of the background file writer; keep it alive for the whole
/// process or buffered lines are lost on exit.
pub fn init_from_config(config: &LoggingConfig) -> Option<WorkerGuard> {
    let level = match Level::from_str(&config.level) {
        Ok(level) => level,
        Err(_) => {
            // Subscriber is not installed yet, so this goes to stderr.
            eprintln!("Unknown log level '{}', falling back to info", config.level);
            Level::INFO
        }
    };
    init_with_level(level, config.directory.as_deref())
}

/// Initialize the tracing subscriber with a specific log level.
///
/// `RUST_LOG` takes precedence when set. Otherwise the advisor crates log at `level`
/// and HTTP request tracing at `info`.
pub fn init_with_level(level: Level, directory: Option<&str>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("advisor={level},tower_http=info")));

    let (file_layer, guard) = match directory {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    // Use try_init to handle the case where a global default subscriber has already been set
    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(file_layer)
        .with(filter)
        .try_init();

    match result {
        Ok(()) => info!("Logging initialized at level: {}", level),
        Err(err) => warn!("Logging already initialized: {}", err),
    }

    guard
}

/// Log an error with context at the ERROR level.
pub fn log_error<E: std::fmt::Display>(error: E, context: &str) {
    error!("{}: {}", context, error);
}

