//! Catalog work rows from the `works` table.

use serde::{Deserialize, Serialize};

/// A cataloged theater work.
///
/// Owned by the curation side of the project; this client only reads the
/// table and hangs comments off the work's id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Work {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    /// Dramatic genre tag (`comedia`, `auto`, `zarzuela`, ...).
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub notes: Option<String>,
}
