//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the admin console. Console output goes to stderr so that rendered
//! tables on stdout stay clean.

use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};
use crate::config::LoggingConfig;
use crate::utils::errors::{AdminError, Result};

/// Initialize logging based on configuration.
///
/// The returned guard must be kept alive for the lifetime of the program,
/// otherwise buffered file output is lost.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = tracing_subscriber::EnvFilter::try_new(&config.level)
        .map_err(|e| AdminError::Config(format!("Invalid log filter '{}': {}", config.level, e)))?;

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file_layer, guard) = match config.file_path.as_deref() {
        Some(dir) if !dir.is_empty() => {
            let file_appender = tracing_appender::rolling::daily(dir, "ticketnow-admin.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .boxed();
            (Some(layer), Some(guard))
        }
        _ => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| AdminError::Config(format!("Logging already initialized: {}", e)))?;

    debug!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log a mutation performed through the console
pub fn log_admin_action(resource: &str, action: &str, target: Option<&str>, details: Option<&str>) {
    info!(
        resource = resource,
        action = action,
        target = target,
        details = details,
        "Admin action performed"
    );
}

/// Log a declined confirmation dialog
pub fn log_admin_cancelled(resource: &str, action: &str, target: Option<&str>) {
    debug!(
        resource = resource,
        action = action,
        target = target,
        "Admin action cancelled"
    );
}

/// Log API errors with context
pub fn log_api_error(api: &str, error: &str, context: Option<&str>) {
    error!(
        api = api,
        error = error,
        context = context,
        "API error occurred"
    );
}

/// Log a completed backend call
pub fn log_api_call(method: &str, url: &str, status: u16, duration_ms: u64) {
    if status < 400 {
        debug!(
            method = method,
            url = url,
            status = status,
            duration_ms = duration_ms,
            "API call completed"
        );
    } else {
        warn!(
            method = method,
            url = url,
            status = status,
            duration_ms = duration_ms,
            "API call returned an error status"
        );
    }
}
