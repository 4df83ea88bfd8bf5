//! Shared connection handle for one Supabase project.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder};
use tokio::sync::RwLock;

use crate::auth::Session;
use crate::config::SupabaseConfig;
use crate::errors::{ApiError, ProviderError};

fn get_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .pool_idle_timeout(Duration::from_secs(90))
        .pool_max_idle_per_host(32)
        .build()
        .expect("Failed to create reqwest client")
}

/// Pre-configured handle to one Supabase project: pooled HTTP client,
/// project config, and the current-session slot.
///
/// Cheap to clone; clones share the connection pool and the session slot.
/// Safe to use from multiple tasks without external locking.
#[derive(Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    config: SupabaseConfig,
    session: Arc<RwLock<Option<Session>>>,
}

impl SupabaseClient {
    pub fn new(config: SupabaseConfig) -> Self {
        Self {
            http: get_client(),
            config,
            session: Arc::new(RwLock::new(None)),
        }
    }

    /// Whether the handle currently holds a session.
    pub async fn has_session(&self) -> bool {
        self.session.read().await.is_some()
    }

    pub(crate) fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.config.base_url())
    }

    pub(crate) fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.config.base_url())
    }

    /// Request builder for a GoTrue endpoint, with the `apikey` header and
    /// a bearer token (current session's access token, anon key otherwise).
    pub(crate) async fn auth_request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.auth_url(path);
        self.request(method, url).await
    }

    /// Request builder for a PostgREST table endpoint, same headers.
    pub(crate) async fn rest_request(&self, method: Method, table: &str) -> RequestBuilder {
        let url = self.rest_url(table);
        self.request(method, url).await
    }

    async fn request(&self, method: Method, url: String) -> RequestBuilder {
        let bearer = match self.access_token().await {
            Some(token) => token,
            None => self.config.anon_key().to_string(),
        };
        self.http
            .request(method, url)
            .header("apikey", self.config.anon_key())
            .bearer_auth(bearer)
    }

    pub(crate) async fn access_token(&self) -> Option<String> {
        self.session
            .read()
            .await
            .as_ref()
            .map(|s| s.access_token.clone())
    }

    pub(crate) async fn set_session(&self, session: Session) {
        *self.session.write().await = Some(session);
    }

    pub(crate) async fn clear_session(&self) {
        *self.session.write().await = None;
    }
}

/// Send a request and classify the outcome: reqwest-level failures become
/// `Transport`, non-success statuses become `Provider` with the body
/// carried unmodified, and a success yields the raw body for the caller
/// to deserialize.
pub(crate) async fn execute(request: RequestBuilder) -> Result<String, ApiError> {
    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    if status.is_success() {
        Ok(body)
    } else {
        Err(ApiError::Provider(ProviderError::from_response(
            status.as_u16(),
            &body,
        )))
    }
}
