use async_trait::async_trait;

use crate::auth::types::{Credentials, User};
use crate::errors::ApiError;

/// Seam over the external identity service.
///
/// The real implementation is [`GoTrue`](crate::GoTrue); tests substitute
/// their own to exercise the gateway without a network.
#[async_trait]
pub trait AuthProvider: Send + Sync + 'static {
    /// Register a new account. Returns the created user, which may still
    /// be pending email confirmation.
    async fn sign_up(&self, credentials: &Credentials) -> Result<User, ApiError>;

    /// Verify credentials and establish a session.
    async fn sign_in(&self, credentials: &Credentials) -> Result<User, ApiError>;

    /// Terminate the current session. A no-op success when none exists.
    async fn sign_out(&self) -> Result<(), ApiError>;

    /// User of the current session, `Ok(None)` when there is none.
    async fn current_user(&self) -> Result<Option<User>, ApiError>;
}
