//! Mock Jira harness for realm tests
//!
//! Wraps a `wiremock::MockServer` that serves `/rest/api/2/user/` and builds
//! realms pointed at it.

use jira_realm::credentials::{Credentials, StaticCredentialStore};
use jira_realm::realm::JiraSecurityRealm;
use jira_realm::RealmConfig;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path served by the mock.
pub const USER_PATH: &str = "/rest/api/2/user/";

/// Timeout used by realms built from the harness.
pub const TEST_TIMEOUT_MS: u64 = 2_000;

/// Credential ID under which the harness stores the technical user.
pub const TEST_CREDENTIALS_ID: &str = "test-jira-bot";

/// Mock Jira instance.
///
/// # Example
/// ```rust,ignore
/// let jira = MockJira::start().await;
/// jira.mount_status(403).await;
///
/// let realm = jira.realm();
/// let err = realm.authenticate("alice", &"pw".into()).await.unwrap_err();
/// assert!(matches!(err, AuthError::InvalidCredentials(_)));
/// ```
pub struct MockJira {
    server: MockServer,
}

impl MockJira {
    /// Start a mock server on a random local port.
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn server(&self) -> &MockServer {
        &self.server
    }

    /// Config pointed at this mock with [`TEST_TIMEOUT_MS`].
    pub fn config(&self) -> RealmConfig {
        RealmConfig::new(&self.uri())
            .expect("mock server URI is a valid base URL")
            .with_timeout_ms(TEST_TIMEOUT_MS)
    }

    /// Realm without a technical user.
    pub fn realm(&self) -> JiraSecurityRealm {
        self.realm_from(&self.config())
    }

    /// Realm whose technical user is `username`/`password`.
    pub fn realm_with_technical_user(&self, username: &str, password: &str) -> JiraSecurityRealm {
        let config = self.config().with_credentials_id(TEST_CREDENTIALS_ID);
        let store = StaticCredentialStore::new()
            .with(TEST_CREDENTIALS_ID, Credentials::new(username, password));

        JiraSecurityRealm::new(&config, Arc::new(store)).expect("failed to build realm")
    }

    /// Realm built from an arbitrary config, technical user taken from it.
    pub fn realm_from(&self, config: &RealmConfig) -> JiraSecurityRealm {
        JiraSecurityRealm::from_config(config).expect("failed to build realm")
    }

    /// Serve `body` for lookups of `username`.
    pub async fn mount_user(&self, username: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(USER_PATH))
            .and(query_param("username", username))
            .and(query_param("expand", "groups"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Answer every request with a raw 200 body.
    pub async fn mount_raw_body(&self, body: &str) {
        Mock::given(method("GET"))
            .and(path(USER_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Answer every request with `status` and an empty body.
    pub async fn mount_status(&self, status: u16) {
        Mock::given(method("GET"))
            .and(path(USER_PATH))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Answer every request with `body` after `delay`.
    pub async fn mount_delayed(&self, delay: Duration, body: Value) {
        Mock::given(method("GET"))
            .and(path(USER_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(body).set_delay(delay))
            .mount(&self.server)
            .await;
    }

    /// Fail the test on drop if any request reaches the server.
    pub async fn expect_no_requests(&self) {
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&self.server)
            .await;
    }

    /// Number of requests received so far.
    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or(0)
    }

    /// Requests received so far.
    pub async fn requests(&self) -> Vec<wiremock::Request> {
        self.server.received_requests().await.unwrap_or_default()
    }
}
