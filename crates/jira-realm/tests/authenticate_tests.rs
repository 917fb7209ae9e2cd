//! Self-authentication integration tests.
//!
//! Exercises `SecurityRealm::authenticate` against a mocked Jira.

// Test code is allowed to use expect/unwrap for assertions
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use base64::{engine::general_purpose::STANDARD, Engine};
use common::secret::SecretString;
use jira_realm::models::AUTHENTICATED_AUTHORITY;
use jira_realm::{AuthError, AuthErrorKind, LookupPath, SecurityRealm};
use jira_test_utils::*;
use std::sync::Arc;
use std::time::Duration;

fn password(value: &str) -> SecretString {
    SecretString::from(value)
}

#[tokio::test]
async fn test_empty_username_fails_without_network_call() {
    let jira = MockJira::start().await;
    jira.expect_no_requests().await;

    let realm = jira.realm();
    let err = realm.authenticate("", &password("pw")).await.unwrap_err();

    assert_eq!(err.kind(), AuthErrorKind::CredentialsMissing);
    assert_eq!(jira.request_count().await, 0);
}

#[tokio::test]
async fn test_empty_password_fails_without_network_call() {
    let jira = MockJira::start().await;
    jira.expect_no_requests().await;

    let realm = jira.realm();
    let err = realm.authenticate("alice", &password("")).await.unwrap_err();

    assert_eq!(err.kind(), AuthErrorKind::CredentialsMissing);
    assert_eq!(jira.request_count().await, 0);
}

#[tokio::test]
async fn test_403_is_invalid_credentials() {
    let jira = MockJira::start().await;
    jira.mount_status(403).await;

    let realm = jira.realm();
    let err = realm
        .authenticate("alice", &password("wrong"))
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::InvalidCredentials(_)));
    assert!(err.to_string().contains("403"));
    assert!(err.to_string().contains("alice"));
    assert!(err.is_bad_credentials());
}

#[tokio::test]
async fn test_401_is_invalid_credentials() {
    let jira = MockJira::start().await;
    jira.mount_status(401).await;

    let realm = jira.realm();
    let err = realm
        .authenticate("alice", &password("wrong"))
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::InvalidCredentials(_)));
    assert!(err.to_string().contains("401"));
}

#[tokio::test]
async fn test_timeout_reports_configured_value() {
    let jira = MockJira::start().await;
    jira.mount_delayed(
        Duration::from_secs(3),
        user_body("alice", "alice@example.com", &[]),
    )
    .await;

    let config = jira.config().with_timeout_ms(200);
    let realm = jira.realm_from(&config);

    let err = realm
        .authenticate("alice", &password("pw"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), AuthErrorKind::Timeout);
    assert!(
        err.to_string().contains("200ms"),
        "timeout message should include the configured value: {err}"
    );
}

#[tokio::test]
async fn test_minimal_body_is_parsed() {
    let jira = MockJira::start().await;
    jira.mount_raw_body(minimal_user_body()).await;

    let realm = jira.realm();
    let profile = realm
        .client()
        .fetch_user(
            &jira_realm::Credentials::new("n", "pw"),
            "n",
            LookupPath::SelfAuthentication,
        )
        .await
        .unwrap();

    assert_eq!(profile.key, "k");
    assert_eq!(profile.name, "n");
    assert_eq!(profile.email, "e@x.com");
    assert_eq!(profile.group_names(), vec!["g1"]);

    let details = realm.authenticate("n", &password("pw")).await.unwrap();
    assert_eq!(details.username, "n");
    assert_eq!(details.authorities, vec!["g1", AUTHENTICATED_AUTHORITY]);
}

#[tokio::test]
async fn test_non_json_body_is_format_error() {
    let jira = MockJira::start().await;
    jira.mount_raw_body("<html><body>Jira is starting up</body></html>")
        .await;

    let realm = jira.realm();
    let err = realm
        .authenticate("alice", &password("pw"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), AuthErrorKind::ResponseFormatError);
}

#[tokio::test]
async fn test_server_error_is_service_error() {
    let jira = MockJira::start().await;
    jira.mount_status(500).await;

    let realm = jira.realm();
    let err = realm
        .authenticate("alice", &password("pw"))
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::ServiceError(_)));
    assert!(err.to_string().contains("500"));
    assert!(!err.is_bad_credentials());
}

#[tokio::test]
async fn test_not_found_is_service_error() {
    let jira = MockJira::start().await;
    jira.mount_status(404).await;

    let realm = jira.realm();
    let err = realm
        .authenticate("alice", &password("pw"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), AuthErrorKind::ServiceError);
    assert!(err.to_string().contains("404"));
}

#[tokio::test]
async fn test_forwards_user_credentials_as_basic_auth() {
    let jira = MockJira::start().await;
    jira.mount_user(
        "alice",
        user_body("alice", "alice@example.com", &["jira-users", "developers"]),
    )
    .await;

    let realm = jira.realm();
    let details = realm
        .authenticate("alice", &password("s3cret"))
        .await
        .unwrap();

    assert_eq!(
        details.authorities,
        vec!["jira-users", "developers", AUTHENTICATED_AUTHORITY]
    );

    let requests = jira.requests().await;
    assert_eq!(requests.len(), 1);

    let expected = format!("Basic {}", STANDARD.encode("alice:s3cret"));
    let auth = requests[0]
        .headers
        .get("authorization")
        .unwrap()
        .to_str()
        .unwrap();
    assert_eq!(auth, expected);

    let accept = requests[0].headers.get("accept").unwrap().to_str().unwrap();
    assert_eq!(accept, "application/json");
}

#[tokio::test]
async fn test_every_call_is_a_fresh_round_trip() {
    let jira = MockJira::start().await;
    jira.mount_user("alice", user_body("alice", "alice@example.com", &["dev"]))
        .await;

    let realm = jira.realm();
    for _ in 0..3 {
        realm.authenticate("alice", &password("pw")).await.unwrap();
    }

    assert_eq!(jira.request_count().await, 3);
}

#[tokio::test]
async fn test_concurrent_callers_are_independent() {
    let jira = MockJira::start().await;
    jira.mount_user("alice", user_body("alice", "alice@example.com", &["dev"]))
        .await;
    jira.mount_user("bob", user_body("bob", "bob@example.com", &["ops"]))
        .await;

    let realm: Arc<dyn SecurityRealm> = Arc::new(jira.realm());

    let mut handles = Vec::new();
    for i in 0..8 {
        let realm = Arc::clone(&realm);
        let user = if i % 2 == 0 { "alice" } else { "bob" };
        handles.push(tokio::spawn(async move {
            realm.authenticate(user, &SecretString::from("pw")).await
        }));
    }

    for (i, handle) in handles.into_iter().enumerate() {
        let details = handle.await.unwrap().unwrap();
        let expected_group = if i % 2 == 0 { "dev" } else { "ops" };
        assert!(details.has_authority(expected_group));
    }

    assert_eq!(jira.request_count().await, 8);
}
