use crate::{EVENT_CHANNEL_CAPACITY, SessionEvent, SessionResult, SessionStorage};

use portal_core::{Identity, SessionUser};

use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::{RwLock, broadcast};

/// Owns the single persisted session and announces changes to it.
///
/// The persisted value is a cache of who signed in on this client; nothing
/// re-verifies it. `cached()` is the in-process view, `current_session()`
/// reconciles that view with storage.
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    key: String,
    current: RwLock<Option<SessionUser>>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionStore {
    /// Creates a store without reading storage. Call `current_session()` to load.
    pub fn new(storage: Arc<dyn SessionStorage>, key: impl Into<String>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Self {
            storage,
            key: key.into(),
            current: RwLock::new(None),
            events,
        }
    }

    /// Creates a store and loads whatever session storage already holds.
    pub async fn open(
        storage: Arc<dyn SessionStorage>,
        key: impl Into<String>,
    ) -> SessionResult<Self> {
        let store = Self::new(storage, key);
        store.current_session().await?;
        Ok(store)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Persists the authenticated participant and notifies subscribers.
    pub async fn sign_in(&self, identity: &Identity) -> SessionResult<SessionUser> {
        let user = SessionUser::from(identity);
        let json = serde_json::to_string(&user)?;

        self.storage.write(&self.key, &json)?;
        *self.current.write().await = Some(user.clone());

        info!("Signed in: {} ({})", user.name, user.id);
        self.publish(SessionEvent::SignedIn(user.clone()));

        Ok(user)
    }

    /// Removes the persisted session and notifies subscribers.
    pub async fn sign_out(&self) -> SessionResult<()> {
        self.storage.remove(&self.key)?;
        let previous = self.current.write().await.take();

        match previous {
            Some(user) => info!("Signed out: {} ({})", user.name, user.id),
            None => debug!("Sign-out with no active session"),
        }
        self.publish(SessionEvent::SignedOut);

        Ok(())
    }

    /// Reads the persisted session and reconciles the in-memory view with it.
    ///
    /// A stored value that fails to parse is deleted and treated as no
    /// session. When storage was changed by someone else (another process
    /// sharing the directory), subscribers are notified of the new state.
    pub async fn current_session(&self) -> SessionResult<Option<SessionUser>> {
        let stored = match self.storage.read(&self.key)? {
            None => None,
            Some(raw) => match serde_json::from_str::<SessionUser>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!("Discarding corrupt session under key {:?}: {e}", self.key);
                    if let Err(remove_err) = self.storage.remove(&self.key) {
                        warn!("Failed to remove corrupt session: {remove_err}");
                    }
                    None
                }
            },
        };

        let changed = {
            let mut current = self.current.write().await;
            let changed = *current != stored;
            *current = stored.clone();
            changed
        };

        if changed {
            debug!("Session reconciled from storage");
            self.publish(match &stored {
                Some(user) => SessionEvent::SignedIn(user.clone()),
                None => SessionEvent::SignedOut,
            });
        }

        Ok(stored)
    }

    /// In-memory session, without touching storage.
    pub async fn cached(&self) -> Option<SessionUser> {
        self.current.read().await.clone()
    }

    pub async fn is_signed_in(&self) -> bool {
        self.current.read().await.is_some()
    }

    /// Subscribe to sign-in/sign-out notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    fn publish(&self, event: SessionEvent) {
        // Zero receivers is not an error.
        match self.events.send(event) {
            Ok(receivers) => debug!("Session event delivered to {receivers} subscribers"),
            Err(_) => debug!("Session event had no subscribers"),
        }
    }
}
