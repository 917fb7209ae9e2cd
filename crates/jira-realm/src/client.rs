//! Jira REST client for user lookups.
//!
//! Every call is one `GET {base}/rest/api/2/user/?username=..&expand=groups`
//! authenticated with HTTP Basic, followed by JSON parsing and error
//! classification. No retries and no caching.
//!
//! # Security
//!
//! - Passwords are held as `SecretString` and only exposed to build the
//!   Authorization header
//! - Response bodies are logged at trace level only
//! - Certificate validation can be disabled per client; it is never changed
//!   process-wide

use crate::config::RealmConfig;
use crate::credentials::Credentials;
use crate::errors::AuthError;
use crate::models::{JiraUserResponse, UserProfile};
use common::secret::ExposeSecret;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, error, instrument, trace, warn};

/// Path of the user resource, relative to the Jira base URL.
pub const USER_ENDPOINT_PATH: &str = "rest/api/2/user/";

const PARAM_KEY_USERNAME: &str = "username";
const PARAM_KEY_EXPAND: &str = "expand";
const PARAM_VAL_GROUPS: &str = "groups";

/// Which credentials a lookup was made with.
///
/// Decides how a 401/403 from Jira is classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupPath {
    /// The end user's own credentials, looking up themselves.
    SelfAuthentication,
    /// The technical user's credentials, looking up someone else's groups.
    TechnicalUser,
}

/// HTTP client for the Jira user endpoint.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct JiraClient {
    /// HTTP client with configured timeout and TLS mode.
    client: Client,

    /// Absolute URL of the user resource.
    user_endpoint: Url,

    /// Configured timeout, reported in timeout errors.
    timeout_ms: u64,
}

impl JiraClient {
    /// Create a client for the Jira instance in `config`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::ServiceError` if the HTTP client cannot be built.
    pub fn new(config: &RealmConfig) -> Result<Self, AuthError> {
        if config.insecure_tls {
            warn!(
                target: "jira_realm.client",
                base_url = %config.base_url,
                "TLS certificate validation is disabled for this Jira client"
            );
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.timeout())
            .danger_accept_invalid_certs(config.insecure_tls)
            .build()
            .map_err(|e| {
                error!(target: "jira_realm.client", error = %e, "Failed to build HTTP client");
                AuthError::ServiceError(format!("failed to build HTTP client: {e}"))
            })?;

        let user_endpoint = config.base_url.join(USER_ENDPOINT_PATH).map_err(|e| {
            error!(target: "jira_realm.client", error = %e, "Failed to build user endpoint URL");
            AuthError::ServiceError(format!("invalid Jira URL: {e}"))
        })?;

        Ok(Self {
            client,
            user_endpoint,
            timeout_ms: config.timeout_ms,
        })
    }

    pub fn user_endpoint(&self) -> &Url {
        &self.user_endpoint
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Fetch `target_username` with its groups, authenticating as `caller`.
    ///
    /// # Errors
    ///
    /// - `AuthError::CredentialsMissing` if the caller username or password is
    ///   empty; no request is sent
    /// - `AuthError::Timeout` on timeout or network failure
    /// - `AuthError::ResponseFormatError` if a 2xx body is not the expected JSON
    /// - `AuthError::InvalidCredentials` / `AuthError::UserNotFound` on 401/403,
    ///   depending on `path`
    /// - `AuthError::ServiceError` for any other status
    #[instrument(
        skip(self, caller),
        fields(caller = %caller.username, target = %target_username, path = ?path)
    )]
    pub async fn fetch_user(
        &self,
        caller: &Credentials,
        target_username: &str,
        path: LookupPath,
    ) -> Result<UserProfile, AuthError> {
        if !caller.is_complete() {
            debug!(target: "jira_realm.client", "Rejecting call without username and password");
            return Err(AuthError::CredentialsMissing(
                "no username and password provided".to_string(),
            ));
        }

        debug!(target: "jira_realm.client", url = %self.user_endpoint, "Requesting user from Jira");

        let response = self
            .client
            .get(self.user_endpoint.clone())
            .basic_auth(&caller.username, Some(caller.password.expose_secret()))
            .header(ACCEPT, "application/json")
            .query(&[
                (PARAM_KEY_USERNAME, target_username),
                (PARAM_KEY_EXPAND, PARAM_VAL_GROUPS),
            ])
            .send()
            .await
            .map_err(|e| self.classify_transport_error(&e))?;

        let status = response.status();

        if status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| self.classify_transport_error(&e))?;
            trace!(target: "jira_realm.client", body = %body, "Jira response body");

            let parsed: JiraUserResponse = serde_json::from_str(&body).map_err(|e| {
                warn!(target: "jira_realm.client", error = %e, "The answer from Jira is unexpected");
                AuthError::ResponseFormatError(format!("the answer from Jira is unexpected: {e}"))
            })?;

            let profile = UserProfile::from(parsed);
            debug!(
                target: "jira_realm.client",
                key = %profile.key,
                groups = profile.groups.len(),
                "User resolved"
            );
            Ok(profile)
        } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            debug!(target: "jira_realm.client", status = %status, "Jira rejected the request");
            Err(classify_rejection(status, caller, target_username, path))
        } else {
            let body = response.text().await.unwrap_or_else(|e| {
                trace!(target: "jira_realm.client", error = %e, "Failed to read error response body");
                String::new()
            });
            warn!(target: "jira_realm.client", status = %status, "Unexpected Jira response");
            trace!(target: "jira_realm.client", body = %body, "Unexpected Jira response body");
            Err(AuthError::ServiceError(format!(
                "response error: GET {} returned a response status of {}",
                self.user_endpoint, status
            )))
        }
    }

    fn classify_transport_error(&self, e: &reqwest::Error) -> AuthError {
        if e.is_timeout() {
            warn!(target: "jira_realm.client", timeout_ms = self.timeout_ms, "Jira request timed out");
            AuthError::Timeout(format!(
                "Timeout limit reached while contacting Jira: {}ms",
                self.timeout_ms
            ))
        } else if e.is_connect() || e.is_request() {
            warn!(target: "jira_realm.client", error = %e, "Jira is unreachable");
            AuthError::Timeout(format!(
                "Network failure while contacting Jira (timeout {}ms): {e}",
                self.timeout_ms
            ))
        } else if e.is_body() || e.is_decode() {
            warn!(target: "jira_realm.client", error = %e, "Failed to read Jira response");
            AuthError::ResponseFormatError(format!("the answer from Jira is unexpected: {e}"))
        } else {
            warn!(target: "jira_realm.client", error = %e, "Jira request failed");
            AuthError::ServiceError(format!("general error: {e}"))
        }
    }
}

/// 401/403 means bad credentials when the user speaks for themselves and
/// an unknown user when the technical user asks on their behalf.
fn classify_rejection(
    status: StatusCode,
    caller: &Credentials,
    target_username: &str,
    path: LookupPath,
) -> AuthError {
    let code = status.as_u16();
    match path {
        LookupPath::SelfAuthentication => AuthError::InvalidCredentials(format!(
            "User is not allowed (HTTP {code}): {}",
            caller.username
        )),
        LookupPath::TechnicalUser => AuthError::UserNotFound(format!(
            "User does not exist (HTTP {code}): {target_username}"
        )),
    }
}
