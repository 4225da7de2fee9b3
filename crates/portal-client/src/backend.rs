use crate::ClientResult;

use portal_core::Identity;

use async_trait::async_trait;
use uuid::Uuid;

/// Remote operations the directory flow depends on.
///
/// Implementations perform no retries; every failure is returned to the
/// caller as-is.
#[async_trait]
pub trait DirectoryBackend: Send + Sync {
    /// Case-insensitive substring match on name, ordered by name, at most `limit` rows.
    async fn search_by_name(&self, fragment: &str, limit: usize) -> ClientResult<Vec<Identity>>;

    async fn get_identity_by_exact_name(&self, name: &str) -> ClientResult<Option<Identity>>;

    /// The row carrying both `name` and `identity_id`. Participants may share
    /// a name, so this is how a selected candidate is fetched again.
    async fn get_identity_by_name_and_id(
        &self,
        name: &str,
        identity_id: Uuid,
    ) -> ClientResult<Option<Identity>>;

    /// `normalized_phone` must already be normalized with `portal_core::normalize_phone`.
    async fn get_identity_by_name_and_phone(
        &self,
        name: &str,
        normalized_phone: &str,
    ) -> ClientResult<Option<Identity>>;

    /// Stores a credential hash through the privileged procedure and returns
    /// the row as it exists after the write.
    async fn set_credential_hash(&self, identity_id: Uuid, hash: &str) -> ClientResult<Identity>;

    /// Server-side PIN check through the privileged procedure.
    async fn verify_credential(&self, identity_id: Uuid, pin: &str) -> ClientResult<bool>;
}
