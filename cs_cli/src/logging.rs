//! Structured logging configuration.
//!
//! The engine library logs through the `log` facade; those records are
//! forwarded into the tracing subscriber installed here.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize structured logging
///
/// Log levels come from `RUST_LOG` (default `info`). Output goes to stderr so
/// the JSON result on stdout stays machine-readable.
///
/// # Example
///
/// ```no_run
/// logging::init();
/// tracing::info!("Loading snapshot");
/// ```
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    // `init` also installs the `log` bridge
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::debug!("Structured logging initialized");
}

/// Log an engine run's duration
///
/// # Arguments
///
/// * `operation` - Engine operation name
/// * `duration_ms` - Duration in milliseconds
/// * `slow_ms` - Threshold above which the run is reported as slow
pub fn log_performance(operation: &str, duration_ms: u64, slow_ms: u64) {
    if duration_ms > slow_ms {
        tracing::warn!(
            operation = operation,
            duration_ms = duration_ms,
            "PERFORMANCE: Slow engine run"
        );
    } else {
        tracing::debug!(
            operation = operation,
            duration_ms = duration_ms,
            "Performance metric"
        );
    }
}
