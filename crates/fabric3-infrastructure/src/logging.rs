//! Structured logging with tracing
//!
//! Installs the global subscriber: text or JSON on stdout, plus a daily
//! rolling file when `file_output` is set. `F3_LOG` overrides the
//! configured filter.

use std::ffi::OsStr;
use std::path::Path;

use fabric3_domain::{Error, Result};
use tracing::{Level, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

pub use crate::config::LoggingConfig;
use crate::constants::{DEFAULT_LOG_FILE_STEM, LOG_ENV_VAR};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Install the global subscriber
///
/// Fails if the level is invalid or a global subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let level = parse_log_level(&config.level)?;
    let filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(&config.level));

    let mut layers: Vec<BoxedLayer> = vec![stdout_layer(config.json_format)];
    if let Some(path) = &config.file_output {
        layers.push(file_layer(path, config.json_format));
    }

    Registry::default()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(|e| Error::configuration_with_source("Failed to initialize logging", e))?;

    info!(%level, json = config.json_format, "Logging initialized");
    Ok(())
}

fn stdout_layer(json: bool) -> BoxedLayer {
    let layer = fmt::layer().with_target(true).with_thread_names(true);
    if json { layer.json().boxed() } else { layer.boxed() }
}

fn file_layer(path: &Path, json: bool) -> BoxedLayer {
    let appender = tracing_appender::rolling::daily(
        path.parent().unwrap_or_else(|| Path::new(".")),
        path.file_stem()
            .unwrap_or_else(|| OsStr::new(DEFAULT_LOG_FILE_STEM)),
    );
    let layer = fmt::layer()
        .with_writer(appender)
        .with_ansi(false)
        .with_target(true);
    if json { layer.json().boxed() } else { layer.boxed() }
}

/// Parse a level name; `warning` is accepted for `warn`
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(Error::configuration(format!(
            "Invalid log level: {level}. Use trace, debug, info, warn, or error"
        ))),
    }
}

pub(crate) fn log_config_loaded(path: &Path, found: bool) {
    if found {
        info!(path = %path.display(), "Configuration loaded");
    } else {
        warn!(path = %path.display(), "Configuration file not found, using defaults");
    }
}
