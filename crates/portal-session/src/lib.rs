pub mod error;
pub mod file_storage;
pub mod memory_storage;
pub mod session_event;
pub mod session_store;
pub mod storage;

#[cfg(test)]
mod tests;

pub use error::{Result as SessionResult, SessionError};
pub use file_storage::FileStorage;
pub use memory_storage::MemoryStorage;
pub use session_event::SessionEvent;
pub use session_store::SessionStore;
pub use storage::SessionStorage;

/// Buffered notifications per subscriber before the oldest are dropped
const EVENT_CHANNEL_CAPACITY: usize = 16;
