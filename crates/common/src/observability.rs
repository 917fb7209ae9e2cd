//! Tracing subscriber initialization.

use crate::config::ObservabilityConfig;
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Error)]
pub enum ObservabilityError {
    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },

    #[error("Tracing subscriber already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Install the global tracing subscriber.
///
/// Uses `config.log_level` as the `EnvFilter` directive and switches to the
/// JSON formatter when `config.json_logs` is set.
///
/// # Errors
///
/// Returns `ObservabilityError::InvalidFilter` for an unparseable directive and
/// `ObservabilityError::AlreadyInitialized` if a global subscriber exists.
pub fn init_tracing(config: &ObservabilityConfig) -> Result<(), ObservabilityError> {
    let filter =
        EnvFilter::try_new(&config.log_level).map_err(|e| ObservabilityError::InvalidFilter {
            filter: config.log_level.clone(),
            reason: e.to_string(),
        })?;

    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    result.map_err(|e| ObservabilityError::AlreadyInitialized(e.to_string()))
}
