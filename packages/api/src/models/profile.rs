//! Collaborator profile rows from the `profiles` table.

use serde::{Deserialize, Serialize};

/// One profile per user, created lazily on first successful sign-up.
///
/// The id equals the auth user's id, so a repeated insert for the same user
/// hits the primary-key constraint — which the client treats as "already
/// done".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub id: String,
    pub full_name: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl Profile {
    pub const DEFAULT_ROLE: &'static str = "collaborator";

    pub fn new(id: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            full_name: full_name.into(),
            role: Self::DEFAULT_ROLE.to_string(),
            avatar_url: None,
        }
    }
}

fn default_role() -> String {
    Profile::DEFAULT_ROLE.to_string()
}
