use portal_auth::{AuthError, ErrorKind};
use portal_client::ClientError;
use portal_config::ConfigError;
use portal_session::SessionError;

use std::io::{self, Write};
use std::panic::Location;

use error_location::ErrorLocation;
use log::error;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Backend client error: {0}")]
    Client(#[from] ClientError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("{0}")]
    Auth(#[from] AuthError),

    #[error("Failed to initialize logger: {message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },

    #[error("Terminal I/O failed: {source} {location}")]
    Io {
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No participants match {fragment:?}")]
    NoCandidates { fragment: String },

    #[error("Cancelled")]
    Cancelled,
}

impl CliError {
    /// Message printed to the terminal on failure.
    pub fn user_message(&self) -> String {
        match self {
            Self::Auth(e) => e.user_message().to_string(),
            Self::Session(e) => e.recovery_hint().to_string(),
            Self::NoCandidates { fragment } => format!("No participants match \"{fragment}\"."),
            Self::Cancelled => String::from("Cancelled."),
            other => other.to_string(),
        }
    }

    /// Whether the full error belongs in the log, not just the user message.
    pub fn is_system_error(&self) -> bool {
        match self {
            Self::Auth(e) => matches!(e.kind(), ErrorKind::Transport | ErrorKind::Internal),
            Self::NoCandidates { .. } | Self::Cancelled | Self::Config(_) => false,
            _ => true,
        }
    }

    /// Reports a failed run: the user message always goes to `out`.
    ///
    /// System errors are also recorded in full, in the log when `logging` is
    /// up and on `out` otherwise.
    pub fn report<W: Write>(&self, logging: bool, out: &mut W) -> io::Result<()> {
        if self.is_system_error() {
            if logging {
                error!("{self}");
            } else {
                writeln!(out, "{self}")?;
            }
        }
        writeln!(out, "Error: {}", self.user_message())
    }

    /// Creates Logger error at caller location.
    #[track_caller]
    pub fn logger(message: impl Into<String>) -> Self {
        Self::Logger {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<std::io::Error> for CliError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
