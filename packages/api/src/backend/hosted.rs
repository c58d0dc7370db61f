//! [`Backend`] implementation over the hosted service's REST interface.

use std::sync::{Arc, Mutex};

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::{json, Value};
use tracing::debug;

use super::{Backend, Direction, Query};
use crate::config::BackendConfig;
use crate::error::Error;
use crate::models::{Session, SignUp, User};

#[cfg(target_arch = "wasm32")]
const SESSION_STORAGE_KEY: &str = "corral.session";

/// Talks to the hosted project over HTTPS.
///
/// Auth endpoints live under `/auth/v1`, table queries under `/rest/v1`.
/// Every request carries the public project key; once signed in, the
/// session's bearer token replaces the key in the `Authorization` header.
/// The active session is persisted to browser storage so a page reload
/// restores it.
#[derive(Clone)]
pub struct HostedBackend {
    http: reqwest::Client,
    config: BackendConfig,
    session: Arc<Mutex<Option<Session>>>,
}

impl HostedBackend {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            session: Arc::new(Mutex::new(load_persisted_session())),
        }
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.config.url)
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.config.url)
    }

    fn headers(&self) -> HeaderMap {
        let token = self
            .session
            .lock()
            .unwrap()
            .as_ref()
            .map(|session| session.access_token.clone())
            .unwrap_or_else(|| self.config.anon_key.clone());
        self.headers_with_token(&token)
    }

    fn headers_with_token(&self, token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(&self.config.anon_key) {
            headers.insert("apikey", value);
        }
        if let Ok(value) = HeaderValue::from_str(&format!("Bearer {token}")) {
            headers.insert(AUTHORIZATION, value);
        }
        headers
    }

    fn store_session(&self, session: Option<Session>) {
        persist_session(session.as_ref());
        *self.session.lock().unwrap() = session;
    }

    /// Decode an error payload, falling back to the HTTP status.
    async fn service_error(response: reqwest::Response) -> Error {
        let status = response.status();
        let fallback = format!("request failed with status {status}");
        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<Value>(&body) {
            Ok(payload) => {
                let code = payload
                    .get("code")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                let message = ["message", "msg", "error_description"]
                    .iter()
                    .find_map(|key| payload.get(*key).and_then(Value::as_str))
                    .map(str::to_string)
                    .unwrap_or(fallback);
                Error::Service { code, message }
            }
            Err(_) => Error::Service {
                code: None,
                message: fallback,
            },
        }
    }
}

impl Backend for HostedBackend {
    async fn current_session(&self) -> Result<Option<Session>, Error> {
        Ok(self.session.lock().unwrap().clone())
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, Error> {
        let response = self
            .http
            .post(self.auth_url("token?grant_type=password"))
            .headers(self.headers())
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::service_error(response).await);
        }
        let session: Session = response
            .json()
            .await
            .map_err(|err| Error::Decode(err.to_string()))?;
        self.store_session(Some(session.clone()));
        Ok(session)
    }

    async fn sign_up(&self, email: &str, password: &str, metadata: Value) -> Result<SignUp, Error> {
        let response = self
            .http
            .post(self.auth_url("signup"))
            .headers(self.headers())
            .json(&json!({ "email": email, "password": password, "data": metadata }))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::service_error(response).await);
        }
        let body: Value = response
            .json()
            .await
            .map_err(|err| Error::Decode(err.to_string()))?;

        // Two response shapes: a full session when the project auto-confirms
        // addresses, or just the user while email confirmation is pending.
        if body.get("access_token").is_some() {
            let session: Session =
                serde_json::from_value(body).map_err(|err| Error::Decode(err.to_string()))?;
            self.store_session(Some(session.clone()));
            Ok(SignUp {
                user: session.user.clone(),
                session: Some(session),
            })
        } else {
            let user_value = body.get("user").cloned().unwrap_or(body);
            let user: User =
                serde_json::from_value(user_value).map_err(|err| Error::Decode(err.to_string()))?;
            Ok(SignUp {
                user,
                session: None,
            })
        }
    }

    async fn send_magic_link(&self, email: &str, redirect_to: Option<&str>) -> Result<(), Error> {
        let mut request = self
            .http
            .post(self.auth_url("otp"))
            .headers(self.headers())
            .json(&json!({ "email": email, "create_user": true }));
        if let Some(redirect) = redirect_to {
            request = request.query(&[("redirect_to", redirect)]);
        }
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(Self::service_error(response).await);
        }
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), Error> {
        let token = self
            .session
            .lock()
            .unwrap()
            .as_ref()
            .map(|session| session.access_token.clone());
        // The local session goes away first; remote invalidation is
        // best-effort on top.
        self.store_session(None);
        if let Some(token) = token {
            let response = self
                .http
                .post(self.auth_url("logout"))
                .headers(self.headers_with_token(&token))
                .send()
                .await?;
            if !response.status().is_success() {
                debug!("remote logout returned {}", response.status());
            }
        }
        Ok(())
    }

    async fn select(&self, query: &Query) -> Result<Vec<Value>, Error> {
        let mut params: Vec<(String, String)> =
            vec![("select".to_string(), query.select.clone())];
        for (column, value) in &query.filters {
            params.push((column.clone(), format!("eq.{value}")));
        }
        if let Some((column, direction)) = &query.order {
            let direction = match direction {
                Direction::Ascending => "asc",
                Direction::Descending => "desc",
            };
            params.push(("order".to_string(), format!("{column}.{direction}")));
        }
        if let Some(limit) = query.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }

        let response = self
            .http
            .get(self.rest_url(&query.table))
            .headers(self.headers())
            .query(&params)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::service_error(response).await);
        }
        response
            .json()
            .await
            .map_err(|err| Error::Decode(err.to_string()))
    }

    async fn insert(&self, table: &str, row: Value) -> Result<Value, Error> {
        let response = self
            .http
            .post(self.rest_url(table))
            .headers(self.headers())
            .header("Prefer", "return=representation")
            .json(&row)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::service_error(response).await);
        }
        let mut rows: Vec<Value> = response
            .json()
            .await
            .map_err(|err| Error::Decode(err.to_string()))?;
        if rows.is_empty() {
            return Err(Error::Decode("insert returned no rows".to_string()));
        }
        Ok(rows.remove(0))
    }
}

fn load_persisted_session() -> Option<Session> {
    #[cfg(target_arch = "wasm32")]
    {
        let storage = web_sys::window()?.local_storage().ok()??;
        let raw = storage.get_item(SESSION_STORAGE_KEY).ok()??;
        serde_json::from_str(&raw).ok()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

#[allow(unused_variables)]
fn persist_session(session: Option<&Session>) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten())
        else {
            return;
        };
        match session {
            Some(session) => {
                if let Ok(raw) = serde_json::to_string(session) {
                    let _ = storage.set_item(SESSION_STORAGE_KEY, &raw);
                }
            }
            None => {
                let _ = storage.remove_item(SESSION_STORAGE_KEY);
            }
        }
    }
}
