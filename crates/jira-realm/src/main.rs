//! Jira Realm connection check
//!
//! Verifies the configured technical user can reach Jira and, when a
//! username is given as the first argument, prints that user's authorities.
//!
//! ```bash
//! JIRA_URL=https://jira.example.com \
//! JIRA_TECHNICAL_USER=jira-bot JIRA_TECHNICAL_PASSWORD=... \
//! jira-realm alice
//! ```

use anyhow::{bail, Context};
use common::config::ObservabilityConfig;
use common::observability::init_tracing;
use jira_realm::realm::{JiraSecurityRealm, SecurityRealm, DISPLAY_NAME};
use jira_realm::{FormValidation, RealmConfig};
use std::collections::HashMap;
use std::env;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let vars: HashMap<String, String> = env::vars().collect();

    let observability = ObservabilityConfig::from_vars(&vars)?;
    init_tracing(&observability)?;

    info!("Starting {} connection check", DISPLAY_NAME);

    let config = RealmConfig::from_vars(&vars).map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    info!(
        base_url = %config.base_url,
        timeout_ms = config.timeout_ms,
        insecure_tls = config.insecure_tls,
        "Configuration loaded successfully"
    );

    let realm = JiraSecurityRealm::from_config(&config).context("Failed to create realm")?;

    match realm.test_connection().await {
        FormValidation::Ok => info!("Jira connection verified"),
        FormValidation::Warning(msg) => warn!("Jira connection check warning: {}", msg),
        FormValidation::Error(msg) => bail!("Jira connection check failed: {msg}"),
    }

    if let Some(username) = env::args().nth(1) {
        let details = realm
            .lookup_user(&username)
            .await
            .with_context(|| format!("Failed to look up '{username}'"))?;

        println!("{}", details.username);
        for authority in &details.authorities {
            println!("  {authority}");
        }
    }

    Ok(())
}
