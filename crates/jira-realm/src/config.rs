//! Realm configuration.
//!
//! Configuration is loaded from environment variables. The technical user's
//! password is redacted in Debug output.

use crate::credentials::{Credentials, StaticCredentialStore};
use crate::validation::parse_base_url;
use common::config::parse_bool_flag;
use reqwest::Url;
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Credential ID used when the technical user comes from the environment.
pub const DEFAULT_CREDENTIALS_ID: &str = "jira-technical-user";

/// Realm configuration.
#[derive(Clone)]
pub struct RealmConfig {
    /// Jira base URL, always ending in `/`.
    pub base_url: Url,

    /// Request timeout in milliseconds.
    pub timeout_ms: u64,

    /// Credential store ID of the technical user, if group lookups are enabled.
    pub credentials_id: Option<String>,

    /// Technical user supplied directly through the environment.
    pub technical_user: Option<Credentials>,

    /// Skip TLS certificate validation for this realm's client only.
    pub insecure_tls: bool,
}

/// Custom Debug implementation that redacts the technical password.
impl fmt::Debug for RealmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RealmConfig")
            .field("base_url", &self.base_url.as_str())
            .field("timeout_ms", &self.timeout_ms)
            .field("credentials_id", &self.credentials_id)
            .field(
                "technical_user",
                &self.technical_user.as_ref().map(|c| c.username.as_str()),
            )
            .field("technical_password", &"[REDACTED]")
            .field("insecure_tls", &self.insecure_tls)
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid Jira URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid timeout configuration: {0}")]
    InvalidTimeout(String),

    #[error("Invalid flag: {0}")]
    InvalidFlag(String),

    #[error("Incomplete technical user credentials: {0}")]
    IncompleteCredentials(String),
}

impl RealmConfig {
    /// Build a configuration directly, with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if `base_url` is not an absolute
    /// http(s) URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url).map_err(ConfigError::InvalidUrl)?,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            credentials_id: None,
            technical_user: None,
            insecure_tls: false,
        })
    }

    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    #[must_use]
    pub fn with_credentials_id(mut self, credentials_id: impl Into<String>) -> Self {
        self.credentials_id = Some(credentials_id.into());
        self
    }

    #[must_use]
    pub fn with_insecure_tls(mut self, insecure_tls: bool) -> Self {
        self.insecure_tls = insecure_tls;
        self
    }

    /// Request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Credential store holding the environment-supplied technical user.
    pub fn static_credential_store(&self) -> StaticCredentialStore {
        match (&self.credentials_id, &self.technical_user) {
            (Some(id), Some(creds)) => StaticCredentialStore::new().with(id.clone(), creds.clone()),
            _ => StaticCredentialStore::new(),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let raw_url = vars
            .get("JIRA_URL")
            .ok_or_else(|| ConfigError::MissingEnvVar("JIRA_URL".to_string()))?;
        let base_url = parse_base_url(raw_url).map_err(ConfigError::InvalidUrl)?;

        let timeout_ms = if let Some(value_str) = vars.get("JIRA_TIMEOUT_MS") {
            let value: u64 = value_str.trim().parse().map_err(|e| {
                ConfigError::InvalidTimeout(format!(
                    "JIRA_TIMEOUT_MS must be a valid positive integer, got '{}': {}",
                    value_str, e
                ))
            })?;

            if value == 0 {
                return Err(ConfigError::InvalidTimeout(
                    "JIRA_TIMEOUT_MS must be greater than 0".to_string(),
                ));
            }

            value
        } else {
            DEFAULT_TIMEOUT_MS
        };

        let insecure_tls = match vars.get("JIRA_INSECURE_TLS") {
            Some(value) => parse_bool_flag("JIRA_INSECURE_TLS", value)
                .map_err(|e| ConfigError::InvalidFlag(e.to_string()))?,
            None => false,
        };

        let user = vars
            .get("JIRA_TECHNICAL_USER")
            .map(|s| s.trim())
            .filter(|s| !s.is_empty());
        let password = vars
            .get("JIRA_TECHNICAL_PASSWORD")
            .filter(|s| !s.is_empty());

        let technical_user = match (user, password) {
            (Some(user), Some(password)) => Some(Credentials::new(user, password.as_str())),
            (None, None) => None,
            (Some(_), None) => {
                return Err(ConfigError::IncompleteCredentials(
                    "JIRA_TECHNICAL_USER is set but JIRA_TECHNICAL_PASSWORD is not".to_string(),
                ))
            }
            (None, Some(_)) => {
                return Err(ConfigError::IncompleteCredentials(
                    "JIRA_TECHNICAL_PASSWORD is set but JIRA_TECHNICAL_USER is not".to_string(),
                ))
            }
        };

        let credentials_id = vars
            .get("JIRA_CREDENTIALS_ID")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .or_else(|| {
                technical_user
                    .as_ref()
                    .map(|_| DEFAULT_CREDENTIALS_ID.to_string())
            });

        Ok(Self {
            base_url,
            timeout_ms,
            credentials_id,
            technical_user,
            insecure_tls,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::credentials::CredentialStore;
    use common::secret::ExposeSecret;

    fn base_vars() -> HashMap<String, String> {
        HashMap::from([(
            "JIRA_URL".to_string(),
            " https://jira.example.com/jira ".to_string(),
        )])
    }

    #[test]
    fn test_from_vars_defaults() {
        let config = RealmConfig::from_vars(&base_vars()).unwrap();

        assert_eq!(config.base_url.as_str(), "https://jira.example.com/jira/");
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(config.timeout(), Duration::from_millis(DEFAULT_TIMEOUT_MS));
        assert!(config.credentials_id.is_none());
        assert!(config.technical_user.is_none());
        assert!(!config.insecure_tls);
        assert!(config.static_credential_store().is_empty());
    }

    #[test]
    fn test_missing_url() {
        let err = RealmConfig::from_vars(&HashMap::new()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref v) if v == "JIRA_URL"));
    }

    #[test]
    fn test_invalid_url() {
        let mut vars = base_vars();
        vars.insert("JIRA_URL".to_string(), "not a url".to_string());

        let err = RealmConfig::from_vars(&vars).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl(_)));
    }

    #[test]
    fn test_timeout_parsing() {
        let mut vars = base_vars();
        vars.insert("JIRA_TIMEOUT_MS".to_string(), "2500".to_string());
        assert_eq!(RealmConfig::from_vars(&vars).unwrap().timeout_ms, 2500);

        vars.insert("JIRA_TIMEOUT_MS".to_string(), "0".to_string());
        assert!(matches!(
            RealmConfig::from_vars(&vars).unwrap_err(),
            ConfigError::InvalidTimeout(_)
        ));

        vars.insert("JIRA_TIMEOUT_MS".to_string(), "ten".to_string());
        let err = RealmConfig::from_vars(&vars).unwrap_err();
        assert!(err.to_string().contains("ten"));
    }

    #[test]
    fn test_insecure_tls_flag() {
        let mut vars = base_vars();
        vars.insert("JIRA_INSECURE_TLS".to_string(), "true".to_string());
        assert!(RealmConfig::from_vars(&vars).unwrap().insecure_tls);

        vars.insert("JIRA_INSECURE_TLS".to_string(), "sometimes".to_string());
        assert!(matches!(
            RealmConfig::from_vars(&vars).unwrap_err(),
            ConfigError::InvalidFlag(_)
        ));
    }

    #[test]
    fn test_technical_user_defaults_credentials_id() {
        let mut vars = base_vars();
        vars.insert("JIRA_TECHNICAL_USER".to_string(), "jira-bot".to_string());
        vars.insert("JIRA_TECHNICAL_PASSWORD".to_string(), "bot-pw".to_string());

        let config = RealmConfig::from_vars(&vars).unwrap();
        assert_eq!(config.credentials_id.as_deref(), Some(DEFAULT_CREDENTIALS_ID));

        let store = config.static_credential_store();
        let creds = store.lookup(DEFAULT_CREDENTIALS_ID).unwrap();
        assert_eq!(creds.username, "jira-bot");
        assert_eq!(creds.password.expose_secret(), "bot-pw");
    }

    #[test]
    fn test_explicit_credentials_id_wins() {
        let mut vars = base_vars();
        vars.insert("JIRA_CREDENTIALS_ID".to_string(), "host-cred-42".to_string());

        let config = RealmConfig::from_vars(&vars).unwrap();
        assert_eq!(config.credentials_id.as_deref(), Some("host-cred-42"));
        assert!(config.technical_user.is_none());
    }

    #[test]
    fn test_incomplete_technical_user() {
        let mut vars = base_vars();
        vars.insert("JIRA_TECHNICAL_USER".to_string(), "jira-bot".to_string());
        assert!(matches!(
            RealmConfig::from_vars(&vars).unwrap_err(),
            ConfigError::IncompleteCredentials(_)
        ));

        let mut vars = base_vars();
        vars.insert("JIRA_TECHNICAL_PASSWORD".to_string(), "bot-pw".to_string());
        assert!(matches!(
            RealmConfig::from_vars(&vars).unwrap_err(),
            ConfigError::IncompleteCredentials(_)
        ));
    }

    #[test]
    fn test_debug_redacts_password() {
        let mut vars = base_vars();
        vars.insert("JIRA_TECHNICAL_USER".to_string(), "jira-bot".to_string());
        vars.insert(
            "JIRA_TECHNICAL_PASSWORD".to_string(),
            "super-secret-value".to_string(),
        );

        let config = RealmConfig::from_vars(&vars).unwrap();
        let debug_str = format!("{config:?}");
        assert!(debug_str.contains("[REDACTED]"));
        assert!(debug_str.contains("jira-bot"));
        assert!(!debug_str.contains("super-secret-value"));
    }

    #[test]
    fn test_builder() {
        let config = RealmConfig::new("https://jira.example.com")
            .unwrap()
            .with_timeout_ms(500)
            .with_credentials_id("svc")
            .with_insecure_tls(true);

        assert_eq!(config.timeout_ms, 500);
        assert_eq!(config.credentials_id.as_deref(), Some("svc"));
        assert!(config.insecure_tls);
    }
}
