use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_BCRYPT_COST, DEFAULT_DEBOUNCE_MS,
    DEFAULT_SEARCH_LIMIT, MAX_BCRYPT_COST, MAX_DEBOUNCE_MS, MAX_SEARCH_LIMIT, MIN_BCRYPT_COST,
    MIN_SEARCH_LIMIT,
};

use std::str::FromStr;

use serde::Deserialize;

/// Where a submitted PIN is checked against the stored hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PinVerification {
    /// Fetch the hash and compare it in-process.
    #[default]
    Local,
    /// Ask the backend's verification procedure.
    Remote,
}

impl FromStr for PinVerification {
    type Err = ConfigError;

    #[track_caller]
    fn from_str(s: &str) -> ConfigErrorResult<Self> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "remote" => Ok(Self::Remote),
            _ => Err(ConfigError::auth(format!(
                "pin_verification must be 'local' or 'remote', got {s:?}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Maximum candidates returned by a name search
    pub search_limit: usize,
    /// bcrypt work factor for new PIN hashes
    pub bcrypt_cost: u32,
    /// Idle time before search-as-you-type issues a lookup
    pub debounce_ms: u64,
    pub pin_verification: PinVerification,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            search_limit: DEFAULT_SEARCH_LIMIT,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            pin_verification: PinVerification::default(),
        }
    }
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !(MIN_SEARCH_LIMIT..=MAX_SEARCH_LIMIT).contains(&self.search_limit) {
            return Err(ConfigError::auth(format!(
                "auth.search_limit must be {}-{}, got {}",
                MIN_SEARCH_LIMIT, MAX_SEARCH_LIMIT, self.search_limit
            )));
        }

        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.bcrypt_cost) {
            return Err(ConfigError::auth(format!(
                "auth.bcrypt_cost must be {}-{}, got {}",
                MIN_BCRYPT_COST, MAX_BCRYPT_COST, self.bcrypt_cost
            )));
        }

        if self.debounce_ms > MAX_DEBOUNCE_MS {
            return Err(ConfigError::auth(format!(
                "auth.debounce_ms must be <= {}, got {}",
                MAX_DEBOUNCE_MS, self.debounce_ms
            )));
        }

        Ok(())
    }
}
