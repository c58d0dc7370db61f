//! Error taxonomy for backend operations.

use thiserror::Error;

/// Everything a backend call can fail with.
///
/// Service errors carry the hosted service's own message so views can show
/// it to the user unchanged; the remaining variants are local and never
/// reach the network.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The request never produced a usable response.
    #[error("network error: {0}")]
    Network(String),

    /// The hosted service answered with an error payload.
    #[error("{message}")]
    Service {
        /// Data-store error code when the service reports one (e.g. `23505`).
        code: Option<String>,
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),

    /// Backend URL or project key missing from the environment.
    #[error("missing configuration: {0}")]
    Config(&'static str),

    /// A write was attempted without an active session.
    #[error("sign in to leave a comment")]
    NotSignedIn,

    /// The comment body was empty after trimming.
    #[error("write a comment first")]
    EmptyComment,
}

impl Error {
    /// Unique-constraint violation code reported by the data store.
    pub const UNIQUE_VIOLATION: &'static str = "23505";

    /// The duplicate-row conflict that profile creation treats as success.
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Error::Service { code: Some(code), .. } if code == Self::UNIQUE_VIOLATION)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network(err.to_string())
    }
}
