//! # Jira Test Utilities
//!
//! Shared test utilities for the Jira realm.
//!
//! This crate provides:
//! - Mock Jira harness (`MockJira` over a wiremock server)
//! - JSON body fixtures for the user endpoint
//!
//! ## Usage
//!
//! ```rust,ignore
//! use jira_test_utils::*;
//!
//! #[tokio::test]
//! async fn test_example() {
//!     let jira = MockJira::start().await;
//!     jira.mount_user("alice", user_body("alice", "alice@example.com", &["dev"])).await;
//!
//!     let realm = jira.realm_with_technical_user("bot", "pw");
//!     let details = realm.lookup_user("alice").await.unwrap();
//!     assert!(details.has_authority("dev"));
//! }
//! ```

pub mod fixtures;
pub mod mock_jira;

// Re-export commonly used items
pub use fixtures::*;
pub use mock_jira::*;
