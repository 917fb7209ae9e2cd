//! Authentication error types.
//!
//! Every failure of a Jira call is classified into one of six kinds. The host
//! decides how to present them; this crate only guarantees the classification
//! is stable for a given transport/HTTP outcome.

use thiserror::Error;

/// Authentication error.
///
/// - `CredentialsMissing`: caller username or password empty, no request sent
/// - `Timeout`: network failure or timeout reaching Jira
/// - `ResponseFormatError`: 2xx response whose body is not the expected JSON
/// - `InvalidCredentials`: 401/403 on the self-authentication path
/// - `UserNotFound`: 401/403 on the technical-user lookup path
/// - `ServiceError`: any other non-2xx status or unexpected failure
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Credentials missing: {0}")]
    CredentialsMissing(String),

    #[error("{0}")]
    Timeout(String),

    #[error("Format error: {0}")]
    ResponseFormatError(String),

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Service error: {0}")]
    ServiceError(String),
}

/// Discriminant of [`AuthError`] without the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthErrorKind {
    CredentialsMissing,
    Timeout,
    ResponseFormatError,
    InvalidCredentials,
    UserNotFound,
    ServiceError,
}

impl AuthError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> AuthErrorKind {
        match self {
            AuthError::CredentialsMissing(_) => AuthErrorKind::CredentialsMissing,
            AuthError::Timeout(_) => AuthErrorKind::Timeout,
            AuthError::ResponseFormatError(_) => AuthErrorKind::ResponseFormatError,
            AuthError::InvalidCredentials(_) => AuthErrorKind::InvalidCredentials,
            AuthError::UserNotFound(_) => AuthErrorKind::UserNotFound,
            AuthError::ServiceError(_) => AuthErrorKind::ServiceError,
        }
    }

    /// True for the kinds a host reports as a failed login rather than an
    /// outage.
    pub fn is_bad_credentials(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidCredentials(_) | AuthError::UserNotFound(_)
        )
    }
}
