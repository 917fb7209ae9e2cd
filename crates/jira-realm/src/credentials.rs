//! Caller credentials and the host credential store seam.

use common::secret::{ExposeSecret, SecretString};
use std::collections::HashMap;

/// Username/password pair forwarded to Jira as Basic auth.
///
/// Never persisted by this crate. `Debug` redacts the password.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// Both username and password are non-empty.
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.expose_secret().is_empty()
    }
}

/// Host-provided credential lookup by opaque ID.
///
/// The realm resolves its technical user through this on every lookup and
/// never keeps the result.
pub trait CredentialStore: Send + Sync {
    fn lookup(&self, credentials_id: &str) -> Option<Credentials>;
}

/// In-memory store for configuration-driven setups and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentialStore {
    entries: HashMap<String, Credentials>,
}

impl StaticCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, credentials_id: impl Into<String>, credentials: Credentials) -> Self {
        self.entries.insert(credentials_id.into(), credentials);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CredentialStore for StaticCredentialStore {
    fn lookup(&self, credentials_id: &str) -> Option<Credentials> {
        self.entries.get(credentials_id).cloned()
    }
}
