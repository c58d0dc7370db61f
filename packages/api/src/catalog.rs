//! The application-facing client facade.

use serde_json::json;
use tracing::{debug, error, warn};

use crate::backend::{Backend, Direction, HostedBackend, Query};
use crate::config::BackendConfig;
use crate::error::Error;
use crate::models::{Comment, Profile, User, Work};
use crate::session::{AuthChange, AuthEventBus, AuthEvents};

/// Newest comments fetched per work.
///
/// The feed used to be unbounded; the cap keeps one busy entry from
/// dragging the whole detail view.
pub const COMMENT_PAGE_SIZE: usize = 100;

/// Outcome of a registration attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum RegisterOutcome {
    /// The service opened a session right away.
    SignedIn(User),
    /// Account created; the confirmation email must be followed before
    /// signing in.
    PendingConfirmation,
}

/// Session control, auth operations, profiles, the comment feed, and
/// catalog reads — everything the views call.
///
/// Generic over the wire adapter so tests run against
/// [`MemoryBackend`](crate::backend::MemoryBackend); the app itself uses
/// [`HostedCatalog::hosted`]. Clones share the backend and the subscriber
/// list.
#[derive(Clone)]
pub struct Catalog<B: Backend> {
    backend: B,
    events: AuthEventBus,
}

/// The client the app runs on.
pub type HostedCatalog = Catalog<HostedBackend>;

impl HostedCatalog {
    /// Client for the configured hosted project.
    pub fn hosted(config: BackendConfig) -> Self {
        Self::new(HostedBackend::new(config))
    }
}

impl<B: Backend> Catalog<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            events: AuthEventBus::default(),
        }
    }

    /// Subscribe to sign-in/sign-out transitions.
    pub fn subscribe(&self) -> AuthEvents {
        self.events.subscribe()
    }

    // ---- session ---------------------------------------------------------

    /// The user of the active session, if any.
    ///
    /// A failed lookup is indistinguishable from "signed out": the UI starts
    /// from the signed-out panel either way.
    pub async fn check_session(&self) -> Option<User> {
        match self.backend.current_session().await {
            Ok(session) => session.map(|session| session.user),
            Err(err) => {
                debug!("session check failed: {err}");
                None
            }
        }
    }

    // ---- authentication --------------------------------------------------

    /// Password sign-in. Publishes the signed-in event on success.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<User, Error> {
        let session = self.backend.sign_in_with_password(email, password).await?;
        self.events.publish(AuthChange::SignedIn(session.user.clone()));
        Ok(session.user)
    }

    /// Create an account and its profile row.
    ///
    /// Profile creation is best-effort: its failure is logged and never
    /// fails the registration.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<RegisterOutcome, Error> {
        let signup = self
            .backend
            .sign_up(email, password, json!({ "full_name": full_name }))
            .await?;
        self.ensure_profile(&signup.user.id, full_name).await;
        match signup.session {
            Some(session) => {
                self.events.publish(AuthChange::SignedIn(session.user.clone()));
                Ok(RegisterOutcome::SignedIn(session.user))
            }
            None => Ok(RegisterOutcome::PendingConfirmation),
        }
    }

    /// Email a one-time sign-in link. No session exists until the link is
    /// followed.
    pub async fn request_magic_link(
        &self,
        email: &str,
        redirect_to: Option<&str>,
    ) -> Result<(), Error> {
        self.backend.send_magic_link(email, redirect_to).await
    }

    /// Drop the session. Remote invalidation failures are logged, not
    /// surfaced; the signed-out event fires regardless.
    pub async fn sign_out(&self) {
        if let Err(err) = self.backend.sign_out().await {
            warn!("sign-out: {err}");
        }
        self.events.publish(AuthChange::SignedOut);
    }

    // ---- profiles --------------------------------------------------------

    /// Insert the user's profile row if it does not exist yet.
    ///
    /// The duplicate-id conflict means an earlier attempt already succeeded
    /// and counts as success; other failures are logged and swallowed — the
    /// display name then falls back to the email.
    pub async fn ensure_profile(&self, user_id: &str, full_name: &str) {
        let profile = Profile::new(user_id, full_name);
        let row = json!({
            "id": profile.id,
            "full_name": profile.full_name,
            "role": profile.role,
        });
        match self.backend.insert("profiles", row).await {
            Ok(_) => {}
            Err(err) if err.is_unique_violation() => {}
            Err(err) => warn!("profile creation failed for {user_id}: {err}"),
        }
    }

    /// Display name for the user, if a profile row exists.
    pub async fn profile_name(&self, user_id: &str) -> Option<String> {
        let query = Query::table("profiles").select("*").eq("id", user_id).limit(1);
        match self.backend.select(&query).await {
            Ok(rows) => rows
                .into_iter()
                .next()
                .and_then(|row| serde_json::from_value::<Profile>(row).ok())
                .map(|profile| profile.full_name),
            Err(err) => {
                debug!("profile lookup failed for {user_id}: {err}");
                None
            }
        }
    }

    // ---- comment feed ----------------------------------------------------

    /// Newest-first comments for a work, joined with author profiles.
    ///
    /// Capped at [`COMMENT_PAGE_SIZE`]. Errors yield an empty feed — the
    /// detail view shows "no comments" rather than breaking.
    pub async fn comments(&self, work_id: i64) -> Vec<Comment> {
        let query = Query::table("comments")
            .select("*,profiles(full_name,avatar_url)")
            .eq("work_id", work_id)
            .order("created_at", Direction::Descending)
            .limit(COMMENT_PAGE_SIZE);
        match self.backend.select(&query).await {
            Ok(rows) => rows
                .into_iter()
                .filter_map(|row| match serde_json::from_value::<Comment>(row) {
                    Ok(comment) => Some(comment),
                    Err(err) => {
                        warn!("skipping malformed comment row: {err}");
                        None
                    }
                })
                .collect(),
            Err(err) => {
                error!("loading comments for work {work_id}: {err}");
                Vec::new()
            }
        }
    }

    /// Post a comment as the current user.
    ///
    /// Fails locally, without touching the backend, when nobody is signed
    /// in or the body is blank.
    pub async fn post_comment(
        &self,
        work_id: i64,
        body: &str,
        kind: &str,
    ) -> Result<Comment, Error> {
        let body = body.trim();
        if body.is_empty() {
            return Err(Error::EmptyComment);
        }
        let Some(user) = self.check_session().await else {
            return Err(Error::NotSignedIn);
        };
        let row = json!({
            "work_id": work_id,
            "user_id": user.id,
            "body": body,
            "kind": kind,
        });
        let created = self.backend.insert("comments", row).await?;
        serde_json::from_value(created).map_err(|err| Error::Decode(err.to_string()))
    }

    // ---- catalog ---------------------------------------------------------

    /// Every cataloged work, ordered by title.
    pub async fn works(&self) -> Vec<Work> {
        let query = Query::table("works")
            .select("*")
            .order("title", Direction::Ascending);
        match self.backend.select(&query).await {
            Ok(rows) => rows
                .into_iter()
                .filter_map(|row| serde_json::from_value(row).ok())
                .collect(),
            Err(err) => {
                error!("loading works: {err}");
                Vec::new()
            }
        }
    }

    /// One work by id, for the detail view.
    pub async fn work(&self, id: i64) -> Option<Work> {
        let query = Query::table("works").select("*").eq("id", id).limit(1);
        match self.backend.select(&query).await {
            Ok(rows) => rows
                .into_iter()
                .next()
                .and_then(|row| serde_json::from_value(row).ok()),
            Err(err) => {
                debug!("loading work {id}: {err}");
                None
            }
        }
    }
}
