use std::sync::Arc;

use crate::auth::gotrue::GoTrue;
use crate::auth::provider::AuthProvider;
use crate::auth::types::{Credentials, User};
use crate::client::SupabaseClient;
use crate::errors::ApiError;

/// The identity gateway: five stateless operations over an
/// [`AuthProvider`], each one round trip, each resolving to a normalized
/// result. Nothing here panics or leaks a provider-library error.
pub struct Auth {
    provider: Arc<dyn AuthProvider>,
}

impl Auth {
    /// Gateway over the real GoTrue API through the shared handle.
    pub fn new(client: SupabaseClient) -> Self {
        Self::with_provider(Arc::new(GoTrue::new(client)))
    }

    /// Gateway over an explicit provider. Tests use this to substitute a
    /// fake.
    pub fn with_provider(provider: Arc<dyn AuthProvider>) -> Self {
        Self { provider }
    }

    /// Register a new account.
    ///
    /// `Ok` carries the created (or pending-confirmation) user. `Err`
    /// carries the backend's rejection unmodified, or a transport fault.
    pub async fn sign_up(&self, credentials: &Credentials) -> Result<User, ApiError> {
        self.provider.sign_up(credentials).await
    }

    /// Verify credentials and establish a session.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<User, ApiError> {
        self.provider.sign_in(credentials).await
    }

    /// Terminate the current session. Error-only result shape; no user is
    /// ever returned. A no-op success when no session exists.
    pub async fn sign_out(&self) -> Result<(), ApiError> {
        self.provider.sign_out().await
    }

    /// User of the current session, or `None`.
    ///
    /// Collapses every failure (provider-reported, transport, no session)
    /// to `None`; callers cannot distinguish them from the return value.
    /// The discarded detail is emitted as a `warn` event.
    pub async fn current_user(&self) -> Option<User> {
        match self.provider.current_user().await {
            Ok(user) => user,
            Err(error) => {
                tracing::warn!(%error, "current user lookup failed");
                None
            }
        }
    }

    /// Whether an active session exists. Derived purely from
    /// [`current_user`](Self::current_user); no independent backend call.
    pub async fn is_authenticated(&self) -> bool {
        self.current_user().await.is_some()
    }
}
