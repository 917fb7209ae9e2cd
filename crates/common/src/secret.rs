//! Secret types for protecting passwords from accidental logging.
//!
//! Re-exports the [`secrecy`] types used for every password that passes
//! through the realm: end-user passwords on the self-authentication path and
//! the technical user's password on the lookup path.
//!
//! `SecretString` implements `Debug` with redaction, so any struct deriving
//! `Debug` that holds one is safe to log via `{:?}` or tracing fields. The
//! value is zeroized on drop.
//!
//! # Example
//!
//! ```rust
//! use common::secret::{ExposeSecret, SecretString};
//!
//! #[derive(Debug)]
//! struct Login {
//!     username: String,
//!     password: SecretString,
//! }
//!
//! let login = Login {
//!     username: "alice".to_string(),
//!     password: SecretString::from("hunter2"),
//! };
//!
//! assert!(!format!("{login:?}").contains("hunter2"));
//! assert_eq!(login.password.expose_secret(), "hunter2");
//! ```

pub use secrecy::{ExposeSecret, SecretString};
