//! Directory-style participant authentication: name search, explicit
//! selection, phone possession check, then PIN set or PIN verify.

pub mod candidate;
pub mod credential_gate;
pub mod error;
pub mod gate_state;
pub mod identity_resolver;
pub mod pin_manager;
pub mod search_debouncer;

#[cfg(test)]
mod tests;

pub use candidate::Candidate;
pub use credential_gate::CredentialGate;
pub use error::{AuthError, ErrorKind, Operation, RejectionReason, Result, ValidationReason};
pub use gate_state::GateState;
pub use identity_resolver::IdentityResolver;
pub use pin_manager::PinManager;
pub use search_debouncer::{SearchDebouncer, SearchOutcome};
