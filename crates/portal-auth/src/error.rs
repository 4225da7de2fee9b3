use portal_client::ClientError;
use portal_session::SessionError;

use std::fmt;
use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Input problems caught before any remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationReason {
    EmptyName,
    EmptyPhone,
    MalformedPin,
    PinMismatch,
}

impl ValidationReason {
    pub fn message(&self) -> &'static str {
        match self {
            Self::EmptyName => "Please enter a name to search.",
            Self::EmptyPhone => "Please enter your phone number.",
            Self::MalformedPin => "The PIN must be exactly 4 digits.",
            Self::PinMismatch => "PIN values do not match.",
        }
    }
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Business-rule outcomes of a successful backend round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    PhoneMismatch,
    AlreadyRegistered,
    NotRegistered,
    IdentityNotFound,
    WrongPin,
}

impl RejectionReason {
    pub fn message(&self) -> &'static str {
        match self {
            Self::PhoneMismatch => "Phone number does not match.",
            Self::AlreadyRegistered => "Already registered. Please use login.",
            Self::NotRegistered => "Not registered yet. Please register first.",
            Self::IdentityNotFound => "No participant with that name was found.",
            Self::WrongPin => "Incorrect PIN.",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Remote call that failed in transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Search,
    LookupByName,
    LookupSelected,
    LookupByNameAndPhone,
    SetCredential,
    VerifyCredential,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Search => "search",
            Self::LookupByName => "lookup by name",
            Self::LookupSelected => "lookup of selected participant",
            Self::LookupByNameAndPhone => "lookup by name and phone",
            Self::SetCredential => "set credential",
            Self::VerifyCredential => "verify credential",
        })
    }
}

/// Coarse error taxonomy for presentation and logging decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    BusinessRule,
    Transport,
    Internal,
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Validation failed: {reason} {location}")]
    Validation {
        reason: ValidationReason,
        location: ErrorLocation,
    },

    #[error("Rejected: {reason} {location}")]
    Rejected {
        reason: RejectionReason,
        location: ErrorLocation,
    },

    #[error("Backend {operation} failed: {source} {location}")]
    Transport {
        operation: Operation,
        #[source]
        source: ClientError,
        location: ErrorLocation,
    },

    #[error("Session storage failed: {source} {location}")]
    Session {
        #[source]
        source: SessionError,
        location: ErrorLocation,
    },

    #[error("PIN hashing failed: {message} {location}")]
    Hashing {
        message: String,
        location: ErrorLocation,
    },

    #[error("Cannot {action} while {state} {location}")]
    InvalidTransition {
        state: &'static str,
        action: &'static str,
        location: ErrorLocation,
    },

    #[error("Discarded a response that no longer matches the flow {location}")]
    StaleResponse { location: ErrorLocation },
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Rejected { .. } => ErrorKind::BusinessRule,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Session { .. }
            | Self::Hashing { .. }
            | Self::InvalidTransition { .. }
            | Self::StaleResponse { .. } => ErrorKind::Internal,
        }
    }

    /// Whether repeating the same action may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { .. } | Self::Hashing { .. } => true,
            Self::Session { source, .. } => source.is_transient(),
            _ => false,
        }
    }

    /// Fixed message suitable for showing inline to the participant.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Validation { reason, .. } => reason.message(),
            Self::Rejected { reason, .. } => reason.message(),
            Self::Transport {
                operation: Operation::Search,
                ..
            } => "Search failed. Please try again.",
            Self::Transport { .. } | Self::Hashing { .. } => {
                "Something went wrong. Please try again."
            }
            Self::Session { source, .. } => source.recovery_hint(),
            Self::InvalidTransition { .. } | Self::StaleResponse { .. } => {
                "This step is no longer current. Please start over."
            }
        }
    }

    /// The validation reason, if this is a validation error.
    pub fn validation_reason(&self) -> Option<ValidationReason> {
        match self {
            Self::Validation { reason, .. } => Some(*reason),
            _ => None,
        }
    }

    /// The rejection reason, if this is a business-rule rejection.
    pub fn rejection_reason(&self) -> Option<RejectionReason> {
        match self {
            Self::Rejected { reason, .. } => Some(*reason),
            _ => None,
        }
    }

    /// Creates Validation error at caller location.
    #[track_caller]
    pub fn validation(reason: ValidationReason) -> Self {
        Self::Validation {
            reason,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates Rejected error at caller location.
    #[track_caller]
    pub fn rejected(reason: RejectionReason) -> Self {
        Self::Rejected {
            reason,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates Transport error at caller location.
    #[track_caller]
    pub fn transport(operation: Operation, source: ClientError) -> Self {
        Self::Transport {
            operation,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates Hashing error at caller location.
    #[track_caller]
    pub fn hashing(message: impl Into<String>) -> Self {
        Self::Hashing {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates InvalidTransition error at caller location.
    #[track_caller]
    pub fn invalid_transition(state: &'static str, action: &'static str) -> Self {
        Self::InvalidTransition {
            state,
            action,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates StaleResponse error at caller location.
    #[track_caller]
    pub fn stale() -> Self {
        Self::StaleResponse {
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<SessionError> for AuthError {
    #[track_caller]
    fn from(source: SessionError) -> Self {
        Self::Session {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
