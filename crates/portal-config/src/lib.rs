mod auth_config;
mod backend_config;
mod config;
mod error;
mod log_level;
mod logging_config;
mod session_config;

#[cfg(test)]
mod tests;

pub use auth_config::{AuthConfig, PinVerification};
pub use backend_config::BackendConfig;
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use session_config::SessionConfig;

const CONFIG_DIR_ENV: &str = "PORTAL_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".portal";
const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_PARTICIPANTS_TABLE: &str = "participants";
const DEFAULT_SET_CREDENTIAL_FN: &str = "set_participant_password";
const DEFAULT_VERIFY_CREDENTIAL_FN: &str = "verify_participant_password";

const DEFAULT_SEARCH_LIMIT: usize = 50;
const MIN_SEARCH_LIMIT: usize = 1;
const MAX_SEARCH_LIMIT: usize = 1000;
const DEFAULT_BCRYPT_COST: u32 = 10;
const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;
const DEFAULT_DEBOUNCE_MS: u64 = 300;
const MAX_DEBOUNCE_MS: u64 = 5000;

const DEFAULT_SESSION_DIR: &str = "session";
const DEFAULT_SESSION_KEY: &str = "portal_session";

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
