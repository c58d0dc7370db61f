//! # api crate — client for the hosted catalog backend
//!
//! Everything the Corral frontend needs to talk to the hosted
//! backend-as-a-service: authentication, collaborator profiles, the per-work
//! comment feed, and read access to the works catalog. There is no custom
//! server in this project — the hosted project's auth endpoint and
//! auto-generated table REST interface are the only backend, reached with
//! the public project key that ships with the page.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`backend`] | The [`Backend`] wire adapter: [`HostedBackend`] over HTTPS, [`MemoryBackend`] for tests |
//! | [`catalog`](Catalog) | The facade the UI calls: session control, auth operations, profiles, comments, works |
//! | [`config`] | Hosted project URL + public key resolution |
//! | [`models`] | Row and session types |
//! | [`session`](AuthEvents) | The cancellable auth-event subscription |

pub mod backend;
mod catalog;
pub mod config;
mod error;
pub mod models;
mod session;

pub use backend::{Backend, Direction, HostedBackend, MemoryBackend, Query};
pub use catalog::{Catalog, HostedCatalog, RegisterOutcome, COMMENT_PAGE_SIZE};
pub use config::BackendConfig;
pub use error::Error;
pub use models::{Comment, CommentAuthor, Profile, Session, SignUp, User, Work};
pub use session::{AuthChange, AuthEvents};
