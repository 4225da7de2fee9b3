use crate::{AuthError, Operation, Result, ValidationReason};

use portal_client::DirectoryBackend;
use portal_config::{AuthConfig, PinVerification};
use portal_core::{Identity, Pin};

use std::sync::Arc;

use log::{debug, error, info, warn};

/// Sets and checks participant PINs.
///
/// PINs only ever leave this type as bcrypt hashes. Format problems are
/// reported before any remote call is made.
pub struct PinManager {
    backend: Arc<dyn DirectoryBackend>,
    cost: u32,
    verification: PinVerification,
}

impl PinManager {
    pub fn new(backend: Arc<dyn DirectoryBackend>, cost: u32, verification: PinVerification) -> Self {
        Self {
            backend,
            cost,
            verification,
        }
    }

    pub fn from_config(backend: Arc<dyn DirectoryBackend>, config: &AuthConfig) -> Self {
        Self::new(backend, config.bcrypt_cost, config.pin_verification)
    }

    /// Hashes a new PIN and stores it on the identity.
    ///
    /// Returns the identity as the backend reports it after the write.
    /// Calling this twice with the same PIN stores two different hashes.
    pub async fn set(&self, identity: &Identity, pin: &str, confirmation: &str) -> Result<Identity> {
        let pin = parse_pin(pin)?;
        if pin.as_str().as_bytes() != confirmation.as_bytes() {
            return Err(AuthError::validation(ValidationReason::PinMismatch));
        }

        let hash = self.hash(pin).await?;

        let updated = self
            .backend
            .set_credential_hash(identity.id, &hash)
            .await
            .map_err(|e| {
                error!("Storing PIN for participant {} failed: {e}", identity.id);
                AuthError::transport(Operation::SetCredential, e)
            })?;

        info!("PIN set for participant {}", updated.id);
        Ok(updated)
    }

    /// Checks a PIN for an identity. A wrong PIN is `Ok(false)`, not an error.
    pub async fn verify(&self, identity: &Identity, pin: &str) -> Result<bool> {
        let pin = parse_pin(pin)?;

        let matched = match self.verification {
            PinVerification::Local => self.verify_local(identity, pin).await?,
            PinVerification::Remote => self
                .backend
                .verify_credential(identity.id, pin.as_str())
                .await
                .map_err(|e| {
                    error!("Remote PIN check for participant {} failed: {e}", identity.id);
                    AuthError::transport(Operation::VerifyCredential, e)
                })?,
        };

        debug!(
            "PIN verification for participant {}: {}",
            identity.id,
            if matched { "match" } else { "no match" }
        );
        Ok(matched)
    }

    async fn verify_local(&self, identity: &Identity, pin: Pin) -> Result<bool> {
        let fresh = self
            .backend
            .get_identity_by_name_and_id(&identity.name, identity.id)
            .await
            .map_err(|e| {
                error!("Re-fetching participant {} for PIN check failed: {e}", identity.id);
                AuthError::transport(Operation::LookupSelected, e)
            })?;

        let Some(fresh) = fresh else {
            warn!("Participant {} vanished before PIN check", identity.id);
            return Ok(false);
        };
        let Some(hash) = fresh.credential_hash().map(str::to_string) else {
            return Ok(false);
        };

        let outcome = tokio::task::spawn_blocking(move || bcrypt::verify(pin.as_str(), &hash))
            .await
            .map_err(|e| AuthError::hashing(e.to_string()))?;

        match outcome {
            Ok(matched) => Ok(matched),
            Err(e) => {
                warn!("Stored hash for participant {} is unusable: {e}", identity.id);
                Ok(false)
            }
        }
    }

    async fn hash(&self, pin: Pin) -> Result<String> {
        let cost = self.cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(pin.as_str(), cost))
            .await
            .map_err(|e| AuthError::hashing(e.to_string()))?
            .map_err(|e| AuthError::hashing(e.to_string()))
    }
}

#[track_caller]
fn parse_pin(raw: &str) -> Result<Pin> {
    match Pin::parse(raw) {
        Ok(pin) => Ok(pin),
        Err(_) => Err(AuthError::validation(ValidationReason::MalformedPin)),
    }
}
