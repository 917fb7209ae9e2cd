//! Logging configuration shared by the realm binary and tests.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Default filter directive when `RUST_LOG` is unset.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Observability configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// `EnvFilter` directive (e.g. `info` or `jira_realm=debug`)
    pub log_level: String,
    /// Enable JSON-formatted logs
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            json_logs: false,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlagError {
    #[error("{name} must be one of true/false/1/0/yes/no, got '{value}'")]
    Invalid { name: String, value: String },
}

impl ObservabilityConfig {
    /// Load from `RUST_LOG` and `LOG_JSON`.
    ///
    /// # Errors
    ///
    /// Returns `FlagError` if `LOG_JSON` is not a recognised boolean.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, FlagError> {
        let log_level = vars
            .get("RUST_LOG")
            .filter(|v| !v.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        let json_logs = match vars.get("LOG_JSON") {
            Some(value) => parse_bool_flag("LOG_JSON", value)?,
            None => false,
        };

        Ok(Self {
            log_level,
            json_logs,
        })
    }
}

/// Parse a boolean environment flag.
///
/// Accepts `true`/`false`, `1`/`0` and `yes`/`no`, case-insensitively.
///
/// # Errors
///
/// Returns `FlagError::Invalid` for any other value.
pub fn parse_bool_flag(name: &str, value: &str) -> Result<bool, FlagError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        _ => Err(FlagError::Invalid {
            name: name.to_string(),
            value: value.to_string(),
        }),
    }
}
