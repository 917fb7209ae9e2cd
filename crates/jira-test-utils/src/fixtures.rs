//! JSON bodies returned by the mock user endpoint.

use serde_json::{json, Value};

/// Base URL used in `self` links of generated bodies.
pub const FIXTURE_JIRA_URL: &str = "https://jira.example.com";

/// A full user body as Jira returns it with `expand=groups`.
pub fn user_body(name: &str, email: &str, groups: &[&str]) -> Value {
    let items: Vec<Value> = groups
        .iter()
        .map(|g| {
            json!({
                "name": g,
                "self": format!("{FIXTURE_JIRA_URL}/rest/api/2/group?groupname={g}")
            })
        })
        .collect();

    json!({
        "self": format!("{FIXTURE_JIRA_URL}/rest/api/2/user?username={name}"),
        "key": name,
        "name": name,
        "emailAddress": email,
        "displayName": name,
        "active": true,
        "groups": {
            "size": groups.len(),
            "items": items
        }
    })
}

/// The smallest body the realm accepts.
pub fn minimal_user_body() -> &'static str {
    r#"{"key":"k","name":"n","emailAddress":"e@x.com","groups":{"items":[{"name":"g1"}]}}"#
}
