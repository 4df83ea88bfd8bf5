use reqwest::Method;

use crate::auth::provider::AuthProvider;
use crate::auth::types::{Credentials, Session, User};
use crate::client::{SupabaseClient, execute};
use crate::errors::ApiError;

use async_trait::async_trait;

/// The real [`AuthProvider`] over the Supabase Auth (GoTrue) REST API.
pub struct GoTrue {
    client: SupabaseClient,
}

impl GoTrue {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

/// Sign-up returns a full session when auto-confirm is on and a bare user
/// object when email confirmation is pending. Both are accepted.
fn parse_signup_response(body: &str) -> Result<(User, Option<Session>), ApiError> {
    if let Ok(session) = serde_json::from_str::<Session>(body) {
        let user = session.user.clone();
        return Ok((user, Some(session)));
    }
    match serde_json::from_str::<User>(body) {
        Ok(user) => Ok((user, None)),
        Err(e) => Err(ApiError::Transport(format!(
            "Failed to deserialize signup response: {e}"
        ))),
    }
}

#[async_trait]
impl AuthProvider for GoTrue {
    async fn sign_up(&self, credentials: &Credentials) -> Result<User, ApiError> {
        tracing::debug!(email = %credentials.email, "dispatching signup request");
        let request = self.client.auth_request(Method::POST, "signup").await;
        let body = execute(request.json(credentials)).await?;

        let (user, session) = parse_signup_response(&body)?;
        if let Some(session) = session {
            self.client.set_session(session).await;
        }
        Ok(user)
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<User, ApiError> {
        tracing::debug!(email = %credentials.email, "dispatching password grant request");
        let request = self
            .client
            .auth_request(Method::POST, "token?grant_type=password")
            .await;
        let body = execute(request.json(credentials)).await?;

        let session: Session = serde_json::from_str(&body).map_err(|e| {
            ApiError::Transport(format!("Failed to deserialize token response: {e}"))
        })?;
        let user = session.user.clone();
        self.client.set_session(session).await;
        Ok(user)
    }

    async fn sign_out(&self) -> Result<(), ApiError> {
        if self.client.access_token().await.is_none() {
            tracing::debug!("sign-out with no active session, nothing to do");
            return Ok(());
        }

        tracing::debug!("dispatching logout request");
        let request = self.client.auth_request(Method::POST, "logout").await;
        let result = execute(request).await;

        // The handle must not retain a session the caller asked to
        // terminate, whatever the backend said.
        self.client.clear_session().await;

        result.map(|_| ())
    }

    async fn current_user(&self) -> Result<Option<User>, ApiError> {
        if self.client.access_token().await.is_none() {
            return Ok(None);
        }

        tracing::debug!("dispatching current user request");
        let request = self.client.auth_request(Method::GET, "user").await;
        let body = execute(request).await?;

        let user: User = serde_json::from_str(&body)
            .map_err(|e| ApiError::Transport(format!("Failed to deserialize user response: {e}")))?;
        Ok(Some(user))
    }
}
