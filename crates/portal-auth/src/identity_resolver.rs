use crate::{AuthError, Candidate, Operation, Result, ValidationReason};

use portal_client::DirectoryBackend;
use portal_config::AuthConfig;
use portal_core::{Identity, normalize_phone};

use std::sync::Arc;

use log::{debug, error};

/// Turns free-text name fragments into candidates and resolves selected
/// names back to directory rows.
pub struct IdentityResolver {
    backend: Arc<dyn DirectoryBackend>,
    limit: usize,
}

impl IdentityResolver {
    pub fn new(backend: Arc<dyn DirectoryBackend>, limit: usize) -> Self {
        Self {
            backend,
            limit: limit.max(1),
        }
    }

    pub fn from_config(backend: Arc<dyn DirectoryBackend>, config: &AuthConfig) -> Self {
        Self::new(backend, config.search_limit)
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Case-insensitive substring search over participant names.
    ///
    /// A blank fragment is rejected without contacting the backend. Results
    /// are ordered by name, case-insensitively, and capped at the limit.
    pub async fn search(&self, fragment: &str) -> Result<Vec<Candidate>> {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            return Err(AuthError::validation(ValidationReason::EmptyName));
        }

        let rows = self
            .backend
            .search_by_name(fragment, self.limit)
            .await
            .map_err(|e| {
                error!("Name search for {fragment:?} failed: {e}");
                AuthError::transport(Operation::Search, e)
            })?;

        let needle = fragment.to_lowercase();
        let mut candidates: Vec<Candidate> = rows
            .into_iter()
            .filter(|identity| identity.name.to_lowercase().contains(&needle))
            .map(Candidate::new)
            .collect();
        candidates.sort_by_cached_key(|c| c.name().to_lowercase());
        candidates.truncate(self.limit);

        debug!(
            "Search {fragment:?} matched {} candidate(s)",
            candidates.len()
        );
        Ok(candidates)
    }

    /// Fresh directory row for an exact name, or `None` if nobody has it.
    pub async fn find_exact(&self, name: &str) -> Result<Option<Identity>> {
        self.backend
            .get_identity_by_exact_name(name)
            .await
            .map_err(|e| {
                error!("Lookup of {name:?} failed: {e}");
                AuthError::transport(Operation::LookupByName, e)
            })
    }

    /// Fresh directory row for a selected candidate.
    ///
    /// Matches on the candidate's id as well as its name, so a participant
    /// sharing the name can never stand in for the one that was picked.
    pub async fn find_selected(&self, candidate: &Candidate) -> Result<Option<Identity>> {
        let id = candidate.identity().id;
        self.backend
            .get_identity_by_name_and_id(candidate.name(), id)
            .await
            .map_err(|e| {
                error!("Lookup of selected participant {id} failed: {e}");
                AuthError::transport(Operation::LookupSelected, e)
            })
    }

    /// Directory row whose name and normalized phone both match.
    pub async fn find_by_name_and_phone(&self, name: &str, phone: &str) -> Result<Option<Identity>> {
        let normalized = normalize_phone(phone);
        if normalized.is_empty() {
            return Err(AuthError::validation(ValidationReason::EmptyPhone));
        }

        self.backend
            .get_identity_by_name_and_phone(name, &normalized)
            .await
            .map_err(|e| {
                error!("Name and phone lookup of {name:?} failed: {e}");
                AuthError::transport(Operation::LookupByNameAndPhone, e)
            })
    }
}
