use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_PARTICIPANTS_TABLE, DEFAULT_SET_CREDENTIAL_FN,
    DEFAULT_VERIFY_CREDENTIAL_FN,
};

use serde::Deserialize;

/// Connection settings for the hosted directory backend.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Project URL, e.g. `https://abc.supabase.co`
    pub url: String,
    /// Public (anon) API key sent with every request
    pub api_key: String,
    pub participants_table: String,
    /// Privileged procedure that stores a credential hash
    pub set_credential_fn: String,
    /// Privileged procedure that checks a PIN server-side
    pub verify_credential_fn: String,
    /// Per-request timeout in seconds (0 = none)
    pub request_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            participants_table: String::from(DEFAULT_PARTICIPANTS_TABLE),
            set_credential_fn: String::from(DEFAULT_SET_CREDENTIAL_FN),
            verify_credential_fn: String::from(DEFAULT_VERIFY_CREDENTIAL_FN),
            request_timeout_secs: 0,
        }
    }
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("url", &self.url)
            .field("api_key", &"<redacted>")
            .field("participants_table", &self.participants_table)
            .field("set_credential_fn", &self.set_credential_fn)
            .field("verify_credential_fn", &self.verify_credential_fn)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl BackendConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.url.trim().is_empty() {
            return Err(ConfigError::backend(
                "backend.url is required (set PORTAL_BACKEND_URL)",
            ));
        }

        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(ConfigError::backend(format!(
                "backend.url must start with http:// or https://, got {}",
                self.url
            )));
        }

        if self.api_key.trim().is_empty() {
            return Err(ConfigError::backend(
                "backend.api_key is required (set PORTAL_BACKEND_API_KEY)",
            ));
        }

        for (field, value) in [
            ("participants_table", &self.participants_table),
            ("set_credential_fn", &self.set_credential_fn),
            ("verify_credential_fn", &self.verify_credential_fn),
        ] {
            if value.is_empty() || !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(ConfigError::backend(format!(
                    "backend.{field} must be a non-empty identifier, got {value:?}"
                )));
            }
        }

        Ok(())
    }
}
