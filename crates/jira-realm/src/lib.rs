//! Jira Security Realm Library
//!
//! Authenticates users against a Jira instance and resolves their group
//! memberships through the Jira REST API:
//!
//! - Self-authentication: the user's own credentials are forwarded as Basic auth
//! - Group lookup: a technical user fetches another user's groups
//! - Failures are classified into a fixed set of [`errors::AuthError`] kinds
//!
//! # Architecture
//!
//! ```text
//! realm.rs (SecurityRealm) -> client.rs (JiraClient) -> models.rs
//! ```
//!
//! # Modules
//!
//! - `config` - Realm configuration from environment
//! - `credentials` - Caller credentials and the host credential store trait
//! - `client` - HTTP client for the Jira user endpoint
//! - `errors` - Authentication error taxonomy
//! - `models` - Wire and result types
//! - `realm` - `SecurityRealm` trait and the Jira implementation
//! - `validation` - Admin form checks

pub mod client;
pub mod config;
pub mod credentials;
pub mod errors;
pub mod models;
pub mod realm;
pub mod validation;

pub use client::{JiraClient, LookupPath};
pub use config::{ConfigError, RealmConfig};
pub use credentials::{CredentialStore, Credentials, StaticCredentialStore};
pub use errors::{AuthError, AuthErrorKind};
pub use models::{GroupDetails, GroupMembership, UserDetails, UserProfile};
pub use realm::{JiraSecurityRealm, SecurityRealm};
pub use validation::FormValidation;
