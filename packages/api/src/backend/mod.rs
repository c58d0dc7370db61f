//! Wire-level adapter to the hosted backend.
//!
//! [`Backend`] is the seam between the [`Catalog`](crate::Catalog) facade
//! and the hosted service: [`HostedBackend`] speaks the real REST interface,
//! [`MemoryBackend`] keeps everything in process for tests. UI code never
//! touches this trait directly.

mod hosted;
mod memory;

pub use hosted::HostedBackend;
pub use memory::MemoryBackend;

use serde_json::Value;

use crate::error::Error;
use crate::models::{Session, SignUp};

/// Sort direction for [`Query::order`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// A read against one table of the hosted data store.
///
/// Covers the subset of the auto-generated REST interface this client uses:
/// column selection with one level of relation embedding, equality filters,
/// ordering, and a row limit.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub table: String,
    pub select: String,
    pub filters: Vec<(String, String)>,
    pub order: Option<(String, Direction)>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn table(name: &str) -> Self {
        Self {
            table: name.to_string(),
            select: "*".to_string(),
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    /// Columns to return, e.g. `"*,profiles(full_name,avatar_url)"`.
    pub fn select(mut self, columns: &str) -> Self {
        self.select = columns.to_string();
        self
    }

    /// Keep rows whose `column` equals `value`.
    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.filters.push((column.to_string(), value.to_string()));
        self
    }

    pub fn order(mut self, column: &str, direction: Direction) -> Self {
        self.order = Some((column.to_string(), direction));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Adapter to the hosted auth + data service.
///
/// Methods map one-to-one onto the service's endpoints. No retries, no
/// timeouts beyond what the HTTP stack provides. Implementations are cheap
/// to clone; clones share their state.
pub trait Backend: Clone {
    /// The active session, if any.
    async fn current_session(&self) -> Result<Option<Session>, Error>;

    /// Exchange email + password for a session.
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, Error>;

    /// Create an account. `metadata` is attached to the auth user.
    async fn sign_up(&self, email: &str, password: &str, metadata: Value) -> Result<SignUp, Error>;

    /// Email a one-time sign-in link.
    async fn send_magic_link(&self, email: &str, redirect_to: Option<&str>) -> Result<(), Error>;

    /// Invalidate and drop the active session.
    async fn sign_out(&self) -> Result<(), Error>;

    /// Read rows.
    async fn select(&self, query: &Query) -> Result<Vec<Value>, Error>;

    /// Insert one row, returning the stored representation (with the
    /// server-assigned id and timestamp).
    async fn insert(&self, table: &str, row: Value) -> Result<Value, Error>;
}
