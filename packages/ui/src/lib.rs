//! This crate contains all shared UI for the workspace.

pub mod components;

mod auth;
pub use auth::{use_auth, use_catalog, AuthProvider, AuthState, LogoutButton};

mod comments;
pub use comments::CommentSection;

mod navbar;
pub use navbar::Navbar;
