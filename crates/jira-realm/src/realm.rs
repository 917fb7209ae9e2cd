//! Security realm backed by Jira.
//!
//! The host wires a [`SecurityRealm`] trait object into its authentication
//! pipeline. [`JiraSecurityRealm`] answers:
//!
//! - `authenticate`: the user's own credentials are forwarded to Jira
//! - `lookup_user`: the technical user fetches another user's groups
//! - `lookup_group`: Jira groups are not resolved, always `None`
//!
//! The realm holds only immutable configuration and is safe to share across
//! any number of concurrent callers.

use crate::client::{JiraClient, LookupPath};
use crate::config::RealmConfig;
use crate::credentials::{CredentialStore, Credentials};
use crate::errors::AuthError;
use crate::models::{GroupDetails, UserDetails};
use crate::validation::FormValidation;
use async_trait::async_trait;
use common::secret::SecretString;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Name shown for this realm in the host's admin UI.
pub const DISPLAY_NAME: &str = "JIRA Authenticator";

/// Pluggable authentication provider.
#[async_trait]
pub trait SecurityRealm: Send + Sync {
    /// Verify a user's own credentials and return their details.
    async fn authenticate(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<UserDetails, AuthError>;

    /// Resolve a user without their password.
    async fn lookup_user(&self, username: &str) -> Result<UserDetails, AuthError>;

    /// Resolve a group by name.
    async fn lookup_group(&self, group_name: &str) -> Result<Option<GroupDetails>, AuthError>;
}

/// Realm that delegates to the Jira user REST endpoint.
pub struct JiraSecurityRealm {
    client: JiraClient,

    /// Credential store ID of the technical user.
    credentials_id: Option<String>,

    /// Host credential store, queried on every lookup.
    credential_store: Arc<dyn CredentialStore>,
}

impl std::fmt::Debug for JiraSecurityRealm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiraSecurityRealm")
            .field("client", &self.client)
            .field("credentials_id", &self.credentials_id)
            .finish_non_exhaustive()
    }
}

impl JiraSecurityRealm {
    /// Create a realm resolving technical credentials through `credential_store`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::ServiceError` if the HTTP client cannot be built.
    pub fn new(
        config: &RealmConfig,
        credential_store: Arc<dyn CredentialStore>,
    ) -> Result<Self, AuthError> {
        Ok(Self {
            client: JiraClient::new(config)?,
            credentials_id: config.credentials_id.clone(),
            credential_store,
        })
    }

    /// Create a realm whose technical user comes from `config` itself.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::ServiceError` if the HTTP client cannot be built.
    pub fn from_config(config: &RealmConfig) -> Result<Self, AuthError> {
        Self::new(config, Arc::new(config.static_credential_store()))
    }

    pub fn client(&self) -> &JiraClient {
        &self.client
    }

    fn technical_credentials(&self) -> Result<Credentials, AuthError> {
        let Some(id) = self.credentials_id.as_deref() else {
            return Err(AuthError::CredentialsMissing(
                "no technical user configured".to_string(),
            ));
        };

        self.credential_store.lookup(id).ok_or_else(|| {
            warn!(target: "jira_realm.realm", credentials_id = %id, "Technical user credentials not found");
            AuthError::CredentialsMissing(format!(
                "credentials '{id}' not found in credential store"
            ))
        })
    }

    /// Check that the technical user can reach Jira by looking itself up.
    #[instrument(skip(self))]
    pub async fn test_connection(&self) -> FormValidation {
        let result = match self.technical_credentials() {
            Ok(creds) => {
                self.client
                    .fetch_user(&creds, &creds.username, LookupPath::TechnicalUser)
                    .await
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(profile) => {
                info!(target: "jira_realm.realm", name = %profile.name, "Jira connection verified");
                FormValidation::Ok
            }
            Err(e) => {
                warn!(target: "jira_realm.realm", error = %e, "Jira connection test failed");
                FormValidation::Error(e.to_string())
            }
        }
    }
}

#[async_trait]
impl SecurityRealm for JiraSecurityRealm {
    #[instrument(skip(self, password), fields(username = %username))]
    async fn authenticate(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<UserDetails, AuthError> {
        debug!(target: "jira_realm.realm", "Authenticating user");

        let caller = Credentials {
            username: username.to_string(),
            password: password.clone(),
        };

        let profile = self
            .client
            .fetch_user(&caller, username, LookupPath::SelfAuthentication)
            .await?;

        info!(
            target: "jira_realm.realm",
            groups = profile.groups.len(),
            "User authenticated"
        );
        Ok(UserDetails::from(profile))
    }

    #[instrument(skip(self), fields(username = %username))]
    async fn lookup_user(&self, username: &str) -> Result<UserDetails, AuthError> {
        debug!(target: "jira_realm.realm", "Looking up user with technical user");

        let technical = self.technical_credentials()?;
        let profile = self
            .client
            .fetch_user(&technical, username, LookupPath::TechnicalUser)
            .await?;

        Ok(UserDetails::from(profile))
    }

    #[instrument(skip(self), fields(group_name = %group_name))]
    async fn lookup_group(&self, group_name: &str) -> Result<Option<GroupDetails>, AuthError> {
        debug!(target: "jira_realm.realm", "Group lookup is not resolved through Jira");
        Ok(None)
    }
}
