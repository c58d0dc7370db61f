//! User and session types issued by the hosted auth service.

use serde::{Deserialize, Serialize};

/// An authenticated user.
///
/// Owned and issued entirely by the auth service; the id is opaque (a UUID
/// string in practice) and is referenced, never copied, by profile and
/// comment rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub email: String,
}

/// An active session: the bearer token plus the user it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub access_token: String,
    pub user: User,
}

/// Result of a sign-up call.
///
/// The service withholds the session while the address still needs
/// out-of-band email confirmation.
#[derive(Debug, Clone, PartialEq)]
pub struct SignUp {
    pub user: User,
    pub session: Option<Session>,
}
