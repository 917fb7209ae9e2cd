//! Admin form validation for realm settings.
//!
//! Host-neutral results for the checks an admin UI runs while the Jira URL
//! and timeout are being entered.

use reqwest::Url;

/// Timeouts above this are accepted with a warning.
pub const TIMEOUT_WARNING_THRESHOLD_MS: u64 = 60_000;

/// Outcome of a form field check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValidation {
    Ok,
    Warning(String),
    Error(String),
}

impl FormValidation {
    pub fn is_error(&self) -> bool {
        matches!(self, FormValidation::Error(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            FormValidation::Ok => None,
            FormValidation::Warning(msg) | FormValidation::Error(msg) => Some(msg),
        }
    }
}

/// Parse a Jira base URL.
///
/// The value is trimmed and must be an absolute `http` or `https` URL with a
/// host. A trailing slash is added so relative joins keep any context path.
///
/// # Errors
///
/// Returns a human-readable reason when the URL is unusable.
pub fn parse_base_url(raw: &str) -> Result<Url, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("Jira URL must not be empty".to_string());
    }

    let mut url = Url::parse(trimmed).map_err(|e| format!("'{trimmed}' is not a valid URL: {e}"))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(format!(
            "Jira URL must use http or https, got '{}'",
            url.scheme()
        ));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(format!("Jira URL '{trimmed}' has no host"));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);

    Ok(url)
}

/// Check the Jira URL field.
pub fn check_url(url: &str) -> FormValidation {
    match parse_base_url(url) {
        Ok(_) => FormValidation::Ok,
        Err(reason) => FormValidation::Error(reason),
    }
}

/// Check the timeout field (milliseconds).
pub fn check_timeout(timeout_ms: u64) -> FormValidation {
    if timeout_ms == 0 {
        FormValidation::Error("Timeout must be greater than 0 ms".to_string())
    } else if timeout_ms > TIMEOUT_WARNING_THRESHOLD_MS {
        FormValidation::Warning(format!(
            "Timeout of {timeout_ms}ms is above {TIMEOUT_WARNING_THRESHOLD_MS}ms; logins will block that long when Jira is down"
        ))
    } else {
        FormValidation::Ok
    }
}
