//! Data models for Jira user responses and realm results.

use serde::{Deserialize, Serialize};

/// Authority granted to every successfully resolved user.
pub const AUTHENTICATED_AUTHORITY: &str = "authenticated";

/// Body of `GET /rest/api/2/user/?username=..&expand=groups`.
///
/// All fields are optional on the wire; absent or `null` values become
/// empty strings when converted into a [`UserProfile`].
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraUserResponse {
    #[serde(default)]
    pub key: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub email_address: Option<String>,

    #[serde(default)]
    pub groups: Option<JiraGroups>,
}

/// The expanded `groups` object.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct JiraGroups {
    /// Jira sends this as a number; older instances sent a string.
    #[serde(default)]
    pub size: Option<serde_json::Value>,

    #[serde(default)]
    pub items: Option<Vec<JiraGroupItem>>,
}

/// One entry of `groups.items`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct JiraGroupItem {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default, rename = "self")]
    pub self_link: Option<String>,
}

/// A group the user belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMembership {
    pub name: String,
    pub self_link: String,
}

/// User profile produced by one successful Jira call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub key: String,
    pub name: String,
    pub email: String,
    /// In response order.
    pub groups: Vec<GroupMembership>,
}

impl UserProfile {
    /// Group names in response order.
    pub fn group_names(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.name.as_str()).collect()
    }
}

impl From<JiraUserResponse> for UserProfile {
    fn from(response: JiraUserResponse) -> Self {
        let groups = response
            .groups
            .and_then(|g| g.items)
            .unwrap_or_default()
            .into_iter()
            .map(|item| GroupMembership {
                name: item.name.unwrap_or_default(),
                self_link: item.self_link.unwrap_or_default(),
            })
            .collect();

        Self {
            key: response.key.unwrap_or_default(),
            name: response.name.unwrap_or_default(),
            email: response.email_address.unwrap_or_default(),
            groups,
        }
    }
}

/// What the realm hands back to the host for a resolved user.
///
/// Account-state flags are always true: Jira is the only authority on
/// whether the account may log in, and a successful call means it may.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDetails {
    pub username: String,
    /// Group names followed by [`AUTHENTICATED_AUTHORITY`].
    pub authorities: Vec<String>,
}

impl UserDetails {
    pub fn is_account_non_expired(&self) -> bool {
        true
    }

    pub fn is_account_non_locked(&self) -> bool {
        true
    }

    pub fn is_credentials_non_expired(&self) -> bool {
        true
    }

    pub fn is_enabled(&self) -> bool {
        true
    }

    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.iter().any(|a| a == authority)
    }
}

impl From<UserProfile> for UserDetails {
    fn from(profile: UserProfile) -> Self {
        let mut authorities: Vec<String> =
            profile.groups.into_iter().map(|g| g.name).collect();
        authorities.push(AUTHENTICATED_AUTHORITY.to_string());

        Self {
            username: profile.name,
            authorities,
        }
    }
}

/// Details of a group known to the realm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupDetails {
    pub name: String,
}
