//! Connection settings for a Supabase project.

use url::Url;

use crate::errors::ConfigError;

const ENV_URL: &str = "SUPABASE_URL";
const ENV_ANON_KEY: &str = "SUPABASE_ANON_KEY";

/// Project base URL plus the publishable anon key.
///
/// Constructed explicitly or from the environment; no process-wide
/// statics, so tests can run against different projects side by side.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    url: Url,
    anon_key: String,
}

impl SupabaseConfig {
    /// Create a config from an explicit project URL and anon key.
    pub fn new(url: &str, anon_key: impl Into<String>) -> Result<Self, ConfigError> {
        let url = Url::parse(url).map_err(|e| ConfigError::InvalidUrl(format!("{url}: {e}")))?;
        Ok(Self {
            url,
            anon_key: anon_key.into(),
        })
    }

    /// Read `SUPABASE_URL` and `SUPABASE_ANON_KEY` from the environment.
    ///
    /// Loading `.env` files is the caller's business.
    pub fn from_env() -> Result<Self, ConfigError> {
        let url = std::env::var(ENV_URL).map_err(|_| ConfigError::MissingVar(ENV_URL))?;
        let anon_key =
            std::env::var(ENV_ANON_KEY).map_err(|_| ConfigError::MissingVar(ENV_ANON_KEY))?;
        Self::new(&url, anon_key)
    }

    /// Project base URL without a trailing slash.
    pub(crate) fn base_url(&self) -> String {
        self.url.as_str().trim_end_matches('/').to_string()
    }

    pub(crate) fn anon_key(&self) -> &str {
        &self.anon_key
    }
}
