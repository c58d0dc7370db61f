use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::DateTime;
use serde_json::{json, Value};

use super::{Backend, Direction, Query};
use crate::error::Error;
use crate::models::{Session, SignUp, User};

/// In-memory Backend for tests.
///
/// Emulates the slice of the hosted service the client relies on: password
/// accounts, table rows with assigned ids and strictly increasing creation
/// timestamps, the unique-id constraint on `profiles`, and the author embed
/// on comment reads.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    accounts: Vec<Account>,
    tables: HashMap<String, Vec<Value>>,
    session: Option<Session>,
    magic_links: Vec<String>,
    confirm_sign_ups: bool,
    next_row: i64,
}

struct Account {
    email: String,
    password: String,
    user: User,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-register a confirmed account that can sign in with `password`.
    pub fn with_account(self, email: &str, password: &str) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            let user = User {
                id: format!("user-{}", inner.accounts.len() + 1),
                email: email.to_string(),
            };
            inner.accounts.push(Account {
                email: email.to_string(),
                password: password.to_string(),
                user,
            });
        }
        self
    }

    /// Make `sign_up` open a session immediately instead of requiring email
    /// confirmation.
    pub fn confirm_sign_ups(self) -> Self {
        self.inner.lock().unwrap().confirm_sign_ups = true;
        self
    }

    /// Seed a row directly, bypassing auth (catalog fixtures).
    pub fn seed(&self, table: &str, row: Value) {
        let _ = self.insert_row(table, row);
    }

    /// Emails that requested a magic link, in request order.
    pub fn magic_link_requests(&self) -> Vec<String> {
        self.inner.lock().unwrap().magic_links.clone()
    }

    /// Rows currently stored in `table`.
    pub fn row_count(&self, table: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .tables
            .get(table)
            .map_or(0, Vec::len)
    }

    fn insert_row(&self, table: &str, mut row: Value) -> Result<Value, Error> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_row += 1;
        let row_number = inner.next_row;

        let Some(object) = row.as_object_mut() else {
            return Err(Error::Decode("row must be a JSON object".to_string()));
        };

        if table == "profiles" {
            // The profile id is the user id and doubles as the primary key.
            if let Some(id) = object.get("id").cloned() {
                let duplicate = inner
                    .tables
                    .get(table)
                    .is_some_and(|rows| rows.iter().any(|row| row.get("id") == Some(&id)));
                if duplicate {
                    return Err(Error::Service {
                        code: Some(Error::UNIQUE_VIOLATION.to_string()),
                        message: "duplicate key value violates unique constraint \"profiles_pkey\""
                            .to_string(),
                    });
                }
            }
        } else {
            object.insert("id".to_string(), json!(row_number));
        }

        if !object.contains_key("created_at") {
            let created_at =
                DateTime::from_timestamp(1_700_000_000 + row_number * 60, 0).unwrap_or_default();
            object.insert("created_at".to_string(), json!(created_at.to_rfc3339()));
        }

        inner
            .tables
            .entry(table.to_string())
            .or_default()
            .push(row.clone());
        Ok(row)
    }
}

impl Backend for MemoryBackend {
    async fn current_session(&self) -> Result<Option<Session>, Error> {
        Ok(self.inner.lock().unwrap().session.clone())
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, Error> {
        let mut inner = self.inner.lock().unwrap();
        let user = inner
            .accounts
            .iter()
            .find(|account| account.email == email && account.password == password)
            .map(|account| account.user.clone())
            .ok_or_else(|| Error::Service {
                code: None,
                message: "Invalid login credentials".to_string(),
            })?;
        let session = Session {
            access_token: format!("token-{}", user.id),
            user,
        };
        inner.session = Some(session.clone());
        Ok(session)
    }

    async fn sign_up(&self, email: &str, password: &str, _metadata: Value) -> Result<SignUp, Error> {
        let mut inner = self.inner.lock().unwrap();
        if inner.accounts.iter().any(|account| account.email == email) {
            return Err(Error::Service {
                code: None,
                message: "User already registered".to_string(),
            });
        }
        let user = User {
            id: format!("user-{}", inner.accounts.len() + 1),
            email: email.to_string(),
        };
        inner.accounts.push(Account {
            email: email.to_string(),
            password: password.to_string(),
            user: user.clone(),
        });
        if inner.confirm_sign_ups {
            let session = Session {
                access_token: format!("token-{}", user.id),
                user: user.clone(),
            };
            inner.session = Some(session.clone());
            Ok(SignUp {
                user,
                session: Some(session),
            })
        } else {
            Ok(SignUp {
                user,
                session: None,
            })
        }
    }

    async fn send_magic_link(&self, email: &str, _redirect_to: Option<&str>) -> Result<(), Error> {
        self.inner.lock().unwrap().magic_links.push(email.to_string());
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), Error> {
        self.inner.lock().unwrap().session = None;
        Ok(())
    }

    async fn select(&self, query: &Query) -> Result<Vec<Value>, Error> {
        let inner = self.inner.lock().unwrap();
        let mut rows: Vec<Value> = inner.tables.get(&query.table).cloned().unwrap_or_default();

        for (column, value) in &query.filters {
            rows.retain(|row| row.get(column).is_some_and(|cell| cell_matches(cell, value)));
        }

        if let Some((column, direction)) = &query.order {
            rows.sort_by(|a, b| compare_cells(a.get(column), b.get(column)));
            if *direction == Direction::Descending {
                rows.reverse();
            }
        }

        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }

        // The author embed the real REST layer produces for
        // `profiles(full_name,avatar_url)` selections.
        if query.table == "comments" && query.select.contains("profiles(") {
            let profiles = inner.tables.get("profiles").cloned().unwrap_or_default();
            for row in &mut rows {
                let user_id = row.get("user_id").cloned();
                let embed = user_id
                    .and_then(|id| {
                        profiles
                            .iter()
                            .find(|profile| profile.get("id") == Some(&id))
                    })
                    .map(|profile| {
                        json!({
                            "full_name": profile.get("full_name").cloned().unwrap_or(Value::Null),
                            "avatar_url": profile.get("avatar_url").cloned().unwrap_or(Value::Null),
                        })
                    })
                    .unwrap_or(Value::Null);
                if let Some(object) = row.as_object_mut() {
                    object.insert("profiles".to_string(), embed);
                }
            }
        }

        Ok(rows)
    }

    async fn insert(&self, table: &str, row: Value) -> Result<Value, Error> {
        self.insert_row(table, row)
    }
}

fn cell_matches(cell: &Value, filter: &str) -> bool {
    match cell {
        Value::String(s) => s == filter,
        Value::Number(n) => n.to_string() == filter,
        Value::Bool(b) => b.to_string() == filter,
        _ => false,
    }
}

fn compare_cells(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{AuthChange, Catalog, Comment, RegisterOutcome, COMMENT_PAGE_SIZE};

    fn catalog() -> Catalog<MemoryBackend> {
        Catalog::new(MemoryBackend::new().with_account("ana@example.com", "secreto"))
    }

    #[tokio::test]
    async fn sign_in_sets_the_session_and_publishes_the_event() {
        let catalog = catalog();
        let mut events = catalog.subscribe();
        assert!(catalog.check_session().await.is_none());

        let user = catalog.sign_in("ana@example.com", "secreto").await.unwrap();
        assert_eq!(user.email, "ana@example.com");
        assert_eq!(catalog.check_session().await, Some(user.clone()));
        assert_eq!(events.next().await, Some(AuthChange::SignedIn(user)));
    }

    #[tokio::test]
    async fn wrong_password_changes_nothing() {
        let catalog = catalog();
        let err = catalog.sign_in("ana@example.com", "nope").await.unwrap_err();
        assert!(matches!(err, Error::Service { .. }));
        assert!(catalog.check_session().await.is_none());
    }

    #[tokio::test]
    async fn sign_out_publishes_signed_out() {
        let catalog = catalog();
        catalog.sign_in("ana@example.com", "secreto").await.unwrap();

        let mut events = catalog.subscribe();
        catalog.sign_out().await;
        assert!(catalog.check_session().await.is_none());
        assert_eq!(events.next().await, Some(AuthChange::SignedOut));
    }

    #[tokio::test]
    async fn register_creates_the_profile_and_awaits_confirmation() {
        let backend = MemoryBackend::new();
        let catalog = Catalog::new(backend.clone());

        let outcome = catalog
            .register("nueva@example.com", "secreto", "Nueva Colaboradora")
            .await
            .unwrap();
        assert_eq!(outcome, RegisterOutcome::PendingConfirmation);
        // No session yet, but the profile row already exists.
        assert!(catalog.check_session().await.is_none());
        assert_eq!(backend.row_count("profiles"), 1);
    }

    #[tokio::test]
    async fn register_swallows_the_duplicate_profile_conflict() {
        let backend = MemoryBackend::new();
        backend.seed(
            "profiles",
            json!({ "id": "user-1", "full_name": "Ana", "role": "collaborator" }),
        );
        let catalog = Catalog::new(backend.clone());

        let outcome = catalog
            .register("ana@example.com", "secreto", "Ana")
            .await
            .unwrap();
        assert_eq!(outcome, RegisterOutcome::PendingConfirmation);
        assert_eq!(backend.row_count("profiles"), 1);
    }

    #[tokio::test]
    async fn register_signs_in_when_the_project_auto_confirms() {
        let backend = MemoryBackend::new().confirm_sign_ups();
        let catalog = Catalog::new(backend);
        let mut events = catalog.subscribe();

        let outcome = catalog
            .register("ana@example.com", "secreto", "Ana")
            .await
            .unwrap();
        let RegisterOutcome::SignedIn(user) = outcome else {
            panic!("expected an immediate session");
        };
        assert_eq!(events.next().await, Some(AuthChange::SignedIn(user)));
    }

    #[tokio::test]
    async fn magic_link_records_the_request() {
        let backend = MemoryBackend::new();
        let catalog = Catalog::new(backend.clone());

        catalog
            .request_magic_link("ana@example.com", Some("https://corral.example/"))
            .await
            .unwrap();
        assert_eq!(
            backend.magic_link_requests(),
            vec!["ana@example.com".to_string()]
        );
        assert!(catalog.check_session().await.is_none());
    }

    #[tokio::test]
    async fn comments_come_back_newest_first() {
        let catalog = catalog();
        catalog.sign_in("ana@example.com", "secreto").await.unwrap();
        for body in ["primero", "segundo", "tercero"] {
            catalog
                .post_comment(7, body, Comment::DEFAULT_KIND)
                .await
                .unwrap();
        }

        let feed = catalog.comments(7).await;
        let bodies: Vec<&str> = feed.iter().map(|comment| comment.body.as_str()).collect();
        assert_eq!(bodies, ["tercero", "segundo", "primero"]);
        assert!(feed[0].created_at > feed[2].created_at);
    }

    #[tokio::test]
    async fn comments_are_scoped_to_their_work() {
        let catalog = catalog();
        catalog.sign_in("ana@example.com", "secreto").await.unwrap();
        catalog
            .post_comment(1, "sobre la primera", Comment::DEFAULT_KIND)
            .await
            .unwrap();
        catalog
            .post_comment(2, "sobre la segunda", Comment::DEFAULT_KIND)
            .await
            .unwrap();

        let feed = catalog.comments(1).await;
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].body, "sobre la primera");
    }

    #[tokio::test]
    async fn an_empty_feed_is_empty_not_an_error() {
        let catalog = catalog();
        assert!(catalog.comments(99).await.is_empty());
    }

    #[tokio::test]
    async fn posting_signed_out_is_rejected_without_a_write() {
        let backend = MemoryBackend::new();
        let catalog = Catalog::new(backend.clone());

        let err = catalog
            .post_comment(7, "hola", Comment::DEFAULT_KIND)
            .await
            .unwrap_err();
        assert_eq!(err, Error::NotSignedIn);
        assert_eq!(backend.row_count("comments"), 0);
    }

    #[tokio::test]
    async fn blank_bodies_are_rejected_locally() {
        let backend = MemoryBackend::new().with_account("ana@example.com", "secreto");
        let catalog = Catalog::new(backend.clone());
        catalog.sign_in("ana@example.com", "secreto").await.unwrap();

        let err = catalog
            .post_comment(7, "   \n", Comment::DEFAULT_KIND)
            .await
            .unwrap_err();
        assert_eq!(err, Error::EmptyComment);
        assert_eq!(backend.row_count("comments"), 0);
    }

    #[tokio::test]
    async fn markup_in_bodies_round_trips_verbatim() {
        let catalog = catalog();
        catalog.sign_in("ana@example.com", "secreto").await.unwrap();

        let body = "<script>alert('x')</script> & <b>negrita</b>";
        catalog
            .post_comment(7, body, Comment::DEFAULT_KIND)
            .await
            .unwrap();

        // Stored and returned as-is; escaping is the renderer's job.
        let feed = catalog.comments(7).await;
        assert_eq!(feed[0].body, body);
    }

    #[tokio::test]
    async fn the_feed_joins_author_profiles() {
        let backend = MemoryBackend::new().with_account("ana@example.com", "secreto");
        backend.seed(
            "profiles",
            json!({ "id": "user-1", "full_name": "Ana Pérez", "role": "collaborator" }),
        );
        let catalog = Catalog::new(backend);
        catalog.sign_in("ana@example.com", "secreto").await.unwrap();
        catalog
            .post_comment(7, "hola", Comment::DEFAULT_KIND)
            .await
            .unwrap();

        let feed = catalog.comments(7).await;
        assert_eq!(feed[0].author_name(), "Ana Pérez");
    }

    #[tokio::test]
    async fn a_missing_profile_falls_back_to_the_placeholder() {
        let catalog = catalog();
        catalog.sign_in("ana@example.com", "secreto").await.unwrap();
        catalog
            .post_comment(7, "hola", Comment::DEFAULT_KIND)
            .await
            .unwrap();

        let feed = catalog.comments(7).await;
        assert_eq!(feed[0].author_name(), "Usuario");
    }

    #[tokio::test]
    async fn the_feed_caps_at_the_page_size_keeping_the_newest() {
        let catalog = catalog();
        catalog.sign_in("ana@example.com", "secreto").await.unwrap();
        for i in 0..COMMENT_PAGE_SIZE + 5 {
            catalog
                .post_comment(1, &format!("c{i}"), Comment::DEFAULT_KIND)
                .await
                .unwrap();
        }

        let feed = catalog.comments(1).await;
        assert_eq!(feed.len(), COMMENT_PAGE_SIZE);
        assert_eq!(feed[0].body, format!("c{}", COMMENT_PAGE_SIZE + 4));
    }

    #[tokio::test]
    async fn profile_name_is_none_without_a_row() {
        let catalog = catalog();
        assert_eq!(catalog.profile_name("user-1").await, None);
    }

    #[tokio::test]
    async fn works_list_ordered_by_title_and_look_up_by_id() {
        let backend = MemoryBackend::new();
        backend.seed(
            "works",
            json!({
                "title": "La vida es sueño",
                "author": "Calderón de la Barca",
                "kind": "comedia",
                "year": 1635,
            }),
        );
        backend.seed(
            "works",
            json!({
                "title": "Fuenteovejuna",
                "author": "Lope de Vega",
                "kind": "comedia",
                "year": 1619,
            }),
        );
        let catalog = Catalog::new(backend);

        let works = catalog.works().await;
        assert_eq!(works.len(), 2);
        assert_eq!(works[0].title, "Fuenteovejuna");

        let work = catalog.work(works[0].id).await.unwrap();
        assert_eq!(work.author.as_deref(), Some("Lope de Vega"));
        assert!(catalog.work(9_999).await.is_none());
    }

    #[tokio::test]
    async fn a_dropped_subscription_is_unregistered() {
        let catalog = catalog();
        let events = catalog.subscribe();
        drop(events);

        // Publishing to the dead subscriber must not disturb live ones.
        catalog.sign_in("ana@example.com", "secreto").await.unwrap();
        let mut events = catalog.subscribe();
        catalog.sign_out().await;
        assert_eq!(events.next().await, Some(AuthChange::SignedOut));
    }
}
