use crate::{
    AuthError, Candidate, GateState, IdentityResolver, PinManager, RejectionReason, Result,
};

use portal_core::{Identity, SessionUser};
use portal_session::SessionStore;

use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::{Mutex, MutexGuard};

struct GateInner {
    state: GateState,
    /// Bumped on every transition; remote responses carry the value they started with.
    generation: u64,
}

impl GateInner {
    fn transition(&mut self, next: GateState) {
        debug!("Gate: {} -> {}", self.state.name(), next.name());
        self.state = next;
        self.generation += 1;
    }
}

/// Drives one participant through selection, phone check, and PIN entry.
///
/// Every operation is legal in exactly one state; anything else is an
/// `InvalidTransition`. The state lock is released while a backend call is
/// in flight. If the flow moved on in the meantime (for example through
/// `start_over`) the response is discarded with `StaleResponse`.
pub struct CredentialGate {
    resolver: Arc<IdentityResolver>,
    pins: PinManager,
    sessions: Arc<SessionStore>,
    inner: Mutex<GateInner>,
}

impl CredentialGate {
    pub fn new(resolver: Arc<IdentityResolver>, pins: PinManager, sessions: Arc<SessionStore>) -> Self {
        Self {
            resolver,
            pins,
            sessions,
            inner: Mutex::new(GateInner {
                state: GateState::NoIdentitySelected,
                generation: 0,
            }),
        }
    }

    pub fn resolver(&self) -> &Arc<IdentityResolver> {
        &self.resolver
    }

    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    pub async fn state(&self) -> GateState {
        self.inner.lock().await.state.clone()
    }

    /// Abandons whatever step is in progress. Always allowed.
    pub async fn start_over(&self) {
        self.inner
            .lock()
            .await
            .transition(GateState::NoIdentitySelected);
    }

    /// Selects a candidate for first-time registration.
    pub async fn begin_registration(&self, candidate: Candidate) -> Result<GateState> {
        let mut inner = self.inner.lock().await;
        match &inner.state {
            GateState::NoIdentitySelected => {}
            other => return Err(AuthError::invalid_transition(other.name(), "begin registration")),
        }

        inner.transition(GateState::RegisteringPhoneCheck { candidate });
        Ok(inner.state.clone())
    }

    /// Proves possession of the phone number on file for the selected candidate.
    pub async fn submit_phone(&self, phone: &str) -> Result<GateState> {
        let (candidate, generation) = {
            let inner = self.inner.lock().await;
            match &inner.state {
                GateState::RegisteringPhoneCheck { candidate } => {
                    (candidate.clone(), inner.generation)
                }
                other => return Err(AuthError::invalid_transition(other.name(), "submit phone")),
            }
        };

        let found = self
            .resolver
            .find_by_name_and_phone(candidate.name(), phone)
            .await?;

        let mut inner = self.lock_current(generation).await?;
        match found {
            None => {
                debug!("Phone check failed for {:?}", candidate.name());
                Err(AuthError::rejected(RejectionReason::PhoneMismatch))
            }
            Some(identity) if identity.is_registered() => {
                debug!("Participant {} tried to register twice", identity.id);
                Err(AuthError::rejected(RejectionReason::AlreadyRegistered))
            }
            Some(identity) => {
                inner.transition(GateState::AwaitingPin {
                    identity,
                    is_new: true,
                });
                Ok(inner.state.clone())
            }
        }
    }

    /// Selects a candidate for a returning-participant login.
    pub async fn begin_login(&self, candidate: Candidate) -> Result<GateState> {
        let generation = {
            let inner = self.inner.lock().await;
            match &inner.state {
                GateState::NoIdentitySelected => inner.generation,
                other => return Err(AuthError::invalid_transition(other.name(), "begin login")),
            }
        };

        let found = self.resolver.find_selected(&candidate).await?;

        let mut inner = self.lock_current(generation).await?;
        let Some(identity) = found else {
            return Err(AuthError::rejected(RejectionReason::IdentityNotFound));
        };
        if !identity.is_registered() {
            return Err(AuthError::rejected(RejectionReason::NotRegistered));
        }

        inner.transition(GateState::AwaitingPin {
            identity,
            is_new: false,
        });
        Ok(inner.state.clone())
    }

    /// Sets the first PIN for a participant who passed the phone check.
    pub async fn set_pin(&self, pin: &str, confirmation: &str) -> Result<SessionUser> {
        let (identity, generation) = self.awaiting_pin(true, "set PIN").await?;

        let updated = self.pins.set(&identity, pin, confirmation).await?;

        let inner = self.lock_current(generation).await;
        if inner.is_err() {
            warn!("PIN for participant {} was stored but sign-in was abandoned", updated.id);
        }
        self.authenticate(inner?, &updated).await
    }

    /// Checks the PIN of a returning participant.
    pub async fn verify_pin(&self, pin: &str) -> Result<SessionUser> {
        let (identity, generation) = self.awaiting_pin(false, "verify PIN").await?;

        let matched = self.pins.verify(&identity, pin).await?;

        let inner = self.lock_current(generation).await?;
        if !matched {
            info!("Wrong PIN for participant {}", identity.id);
            return Err(AuthError::rejected(RejectionReason::WrongPin));
        }
        self.authenticate(inner, &identity).await
    }

    /// Ends the persisted session and resets the flow.
    pub async fn sign_out(&self) -> Result<()> {
        self.sessions.sign_out().await?;
        self.start_over().await;
        Ok(())
    }

    async fn awaiting_pin(&self, want_new: bool, action: &'static str) -> Result<(Identity, u64)> {
        let inner = self.inner.lock().await;
        match &inner.state {
            GateState::AwaitingPin { identity, is_new } if *is_new == want_new => {
                Ok((identity.clone(), inner.generation))
            }
            other => Err(AuthError::invalid_transition(other.name(), action)),
        }
    }

    async fn lock_current(&self, generation: u64) -> Result<MutexGuard<'_, GateInner>> {
        let inner = self.inner.lock().await;
        if inner.generation != generation {
            debug!(
                "Discarding response from generation {generation}, gate is at {}",
                inner.generation
            );
            return Err(AuthError::stale());
        }
        Ok(inner)
    }

    async fn authenticate(
        &self,
        mut inner: MutexGuard<'_, GateInner>,
        identity: &Identity,
    ) -> Result<SessionUser> {
        let session = self.sessions.sign_in(identity).await?;
        inner.transition(GateState::Authenticated {
            session: session.clone(),
        });
        Ok(session)
    }
}
