//! Error types shared by the auth gateway and the todos store.

use thiserror::Error;

/// Error raised by any operation that reaches the Supabase backend.
///
/// Exactly two kinds exist: the backend explicitly rejected the request
/// (`Provider`), or the request never produced a usable response
/// (`Transport`). Every public operation in this crate resolves to one of
/// these; no reqwest or serde error type leaks to callers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The backend answered with a non-success status. The payload is
    /// carried exactly as the backend sent it.
    #[error("Provider error: {0}")]
    Provider(ProviderError),

    /// Network failure, timeout, or a success response whose body could
    /// not be understood.
    #[error("Transport error: {0}")]
    Transport(String),
}

/// An error the backend reported itself.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{status}: {message}")]
pub struct ProviderError {
    /// HTTP status of the rejecting response.
    pub status: u16,
    /// Machine-readable code when the backend supplied one
    /// (e.g. `weak_password`, `invalid_credentials`, `PGRST116`).
    pub code: Option<String>,
    /// Human-readable message, unmodified.
    pub message: String,
}

impl ProviderError {
    /// Build a `ProviderError` from a non-success response body.
    ///
    /// Understands the GoTrue error shapes
    /// (`{"code":422,"error_code":"...","msg":"..."}` and
    /// `{"error":"...","error_description":"..."}`) and the PostgREST
    /// shape (`{"code":"...","message":"..."}`). Anything else is kept
    /// verbatim as the message.
    pub fn from_response(status: u16, body: &str) -> Self {
        let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
            return Self::fallback(status, body);
        };

        // GoTrue, current shape: numeric "code" duplicates the HTTP
        // status; "error_code" is the stable identifier.
        if let Some(msg) = value.get("msg").and_then(|v| v.as_str()) {
            return Self {
                status,
                code: value
                    .get("error_code")
                    .and_then(|v| v.as_str())
                    .map(String::from),
                message: msg.to_string(),
            };
        }

        // PostgREST: string "code" plus "message".
        if let Some(msg) = value.get("message").and_then(|v| v.as_str()) {
            return Self {
                status,
                code: value.get("code").and_then(|v| v.as_str()).map(String::from),
                message: msg.to_string(),
            };
        }

        // GoTrue, OAuth-style shape.
        if let Some(desc) = value.get("error_description").and_then(|v| v.as_str()) {
            return Self {
                status,
                code: value
                    .get("error")
                    .and_then(|v| v.as_str())
                    .map(String::from),
                message: desc.to_string(),
            };
        }

        Self::fallback(status, body)
    }

    fn fallback(status: u16, body: &str) -> Self {
        let message = if body.trim().is_empty() {
            format!("HTTP {status}")
        } else {
            body.to_string()
        };
        Self {
            status,
            code: None,
            message,
        }
    }
}

/// Error raised while constructing [`SupabaseConfig`](crate::SupabaseConfig).
///
/// Raised only at construction time, before any request exists.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
