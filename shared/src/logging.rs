//! Shared logging utilities for consistent tracing across the harness

use chrono::{DateTime, Utc};
use tracing::{error, info};

use crate::types::Stage;

/// Build the default filter directive for a base level
pub fn default_filter(log_level: Option<&str>) -> String {
    let base_level = log_level.unwrap_or("info");
    format!("solr_tester={base_level},shared={base_level},testcontainers=info,reqwest=warn,hyper=warn")
}

/// Initialize tracing subscriber with an optional log level.
///
/// `RUST_LOG` wins over the level when set. Safe to call more than once;
/// later calls are ignored so test binaries can initialise freely.
pub fn init_tracing_with_level(log_level: Option<&str>) {
    use tracing_subscriber::{EnvFilter, fmt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(log_level)));

    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .try_init();
}

/// Initialize tracing with the default `info` level
pub fn init_tracing() {
    init_tracing_with_level(None);
}

/// Get formatted timestamp for consistent logging
pub fn format_timestamp() -> String {
    let now: DateTime<Utc> = Utc::now();
    now.format("%H:%M:%S%.3f").to_string()
}

/// Macro for stage-aware info logging
#[macro_export]
macro_rules! stage_info {
    ($stage:expr, $($arg:tt)*) => {
        tracing::info!(
            stage = %$stage,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for stage-aware warning logging
#[macro_export]
macro_rules! stage_warn {
    ($stage:expr, $($arg:tt)*) => {
        tracing::warn!(
            stage = %$stage,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for stage-aware error logging
#[macro_export]
macro_rules! stage_error {
    ($stage:expr, $($arg:tt)*) => {
        tracing::error!(
            stage = %$stage,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for stage-aware debug logging
#[macro_export]
macro_rules! stage_debug {
    ($stage:expr, $($arg:tt)*) => {
        tracing::debug!(
            stage = %$stage,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Contextual logging helper for the start of a harness step
pub fn log_step(stage: Stage, details: &str) {
    info!(
        stage = %stage,
        timestamp = format_timestamp(),
        "📋 {}",
        details
    );
}

/// Contextual logging helper for error conditions
pub fn log_error(stage: Stage, context: &str, error: &dyn std::fmt::Display) {
    error!(
        stage = %stage,
        timestamp = format_timestamp(),
        error = %error,
        "❌ {} failed: {}",
        context,
        error
    );
}

/// Contextual logging helper for success conditions
pub fn log_success(stage: Stage, message: &str) {
    info!(
        stage = %stage,
        timestamp = format_timestamp(),
        "✅ {}",
        message
    );
}
