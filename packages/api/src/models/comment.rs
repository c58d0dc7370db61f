//! Comment rows from the `comments` table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single comment on a cataloged work.
///
/// Append-only: rows are never updated or deleted by this client. The id
/// and `created_at` are assigned by the data store on insert. Reads embed
/// the author's profile row; writes leave it `None`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub id: i64,
    pub work_id: i64,
    pub user_id: String,
    pub body: String,
    #[serde(default = "default_kind")]
    pub kind: String,
    pub created_at: DateTime<Utc>,
    /// Embedded author profile from the `profiles` join.
    #[serde(default, rename = "profiles")]
    pub author: Option<CommentAuthor>,
}

/// The slice of the author's profile the feed displays.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommentAuthor {
    pub full_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl Comment {
    pub const DEFAULT_KIND: &'static str = "comment";

    /// Author display name, or the placeholder when the profile join came
    /// back empty.
    pub fn author_name(&self) -> &str {
        self.author
            .as_ref()
            .and_then(|author| author.full_name.as_deref())
            .unwrap_or("Usuario")
    }
}

fn default_kind() -> String {
    Comment::DEFAULT_KIND.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_a_joined_row() {
        let row = serde_json::json!({
            "id": 42,
            "work_id": 7,
            "user_id": "7e7f9fd1-9c3a-4a1e-8f57-2a4f2b1a9d10",
            "body": "La atribución a Lope es dudosa.",
            "kind": "validation",
            "created_at": "2024-05-12T18:45:00+00:00",
            "profiles": { "full_name": "Ana Pérez", "avatar_url": null }
        });

        let comment: Comment = serde_json::from_value(row).unwrap();
        assert_eq!(comment.id, 42);
        assert_eq!(comment.kind, "validation");
        assert_eq!(comment.author_name(), "Ana Pérez");
    }

    #[test]
    fn kind_defaults_and_author_falls_back() {
        let row = serde_json::json!({
            "id": 1,
            "work_id": 7,
            "user_id": "abc",
            "body": "hola",
            "created_at": "2024-05-12T18:45:00+00:00",
            "profiles": null
        });

        let comment: Comment = serde_json::from_value(row).unwrap();
        assert_eq!(comment.kind, Comment::DEFAULT_KIND);
        assert_eq!(comment.author_name(), "Usuario");
    }
}
