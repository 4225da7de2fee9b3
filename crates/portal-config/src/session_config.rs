use crate::{ConfigError, ConfigErrorResult, DEFAULT_SESSION_DIR, DEFAULT_SESSION_KEY};

use std::path::Path;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Directory for persisted session state, relative to the config dir
    pub dir: String,
    /// Storage key holding the serialized session
    pub key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            dir: String::from(DEFAULT_SESSION_DIR),
            key: String::from(DEFAULT_SESSION_KEY),
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if Path::new(&self.dir).is_absolute() || self.dir.contains("..") {
            return Err(ConfigError::session(
                "session.dir must be relative and cannot contain '..'",
            ));
        }

        if self.key.is_empty()
            || self.key.contains('/')
            || self.key.contains('\\')
            || self.key.contains("..")
        {
            return Err(ConfigError::session(format!(
                "session.key must be a plain name without path separators, got {:?}",
                self.key
            )));
        }

        Ok(())
    }
}
