use crate::SessionResult;

/// Durable client-local key/value storage for session state.
///
/// Writes are synchronous and atomic per key; there is no cross-key
/// transaction and concurrent writers are last-write-wins.
pub trait SessionStorage: Send + Sync {
    /// Returns `None` when the key has never been written or was removed.
    fn read(&self, key: &str) -> SessionResult<Option<String>>;

    fn write(&self, key: &str, value: &str) -> SessionResult<()>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> SessionResult<()>;
}
