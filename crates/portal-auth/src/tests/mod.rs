
use crate::{CredentialGate, IdentityResolver, PinManager};

use portal_client::{ClientError, ClientResult, DirectoryBackend};
use portal_config::PinVerification;
use portal_core::{Identity, normalize_phone};
use portal_session::{MemoryStorage, SessionStore};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::{Notify, oneshot};
use uuid::Uuid;

/// Lowest cost bcrypt accepts; keeps hashing fast in tests.
pub(crate) const TEST_COST: u32 = 4;

pub(crate) fn identity(name: &str, phone: Option<&str>) -> Identity {
    let mut identity = Identity::new(Uuid::new_v4(), name);
    identity.phone_number = phone.map(str::to_string);
    identity
}

pub(crate) fn registered(name: &str, phone: Option<&str>, pin: &str) -> Identity {
    let mut identity = identity(name, phone);
    identity.password_hash = Some(bcrypt::hash(pin, TEST_COST).unwrap());
    identity
}

struct Hold {
    entered: Arc<Notify>,
    release: oneshot::Receiver<()>,
}

/// In-memory directory with call recording, failure injection, and a hook
/// that parks the next call until the test releases it.
#[derive(Default)]
pub(crate) struct FakeDirectory {
    identities: Mutex<Vec<Identity>>,
    calls: Mutex<Vec<&'static str>>,
    search_rows: Mutex<Option<Vec<Identity>>>,
    failing: AtomicBool,
    hold: Mutex<Option<Hold>>,
}

impl FakeDirectory {
    pub(crate) fn with(identities: Vec<Identity>) -> Arc<Self> {
        let fake = Self::default();
        *fake.identities.lock().unwrap() = identities;
        Arc::new(fake)
    }

    pub(crate) fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub(crate) fn stored(&self, id: Uuid) -> Option<Identity> {
        self.identities
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.id == id)
            .cloned()
    }

    /// Rows returned verbatim by the next searches, bypassing filtering.
    pub(crate) fn set_search_rows(&self, rows: Vec<Identity>) {
        *self.search_rows.lock().unwrap() = Some(rows);
    }

    pub(crate) fn fail_calls(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Parks the next backend call. `entered` fires once the call is parked;
    /// sending on the returned sender lets it finish.
    pub(crate) fn hold_next_call(&self) -> (Arc<Notify>, oneshot::Sender<()>) {
        let entered = Arc::new(Notify::new());
        let (release_tx, release) = oneshot::channel();
        *self.hold.lock().unwrap() = Some(Hold {
            entered: entered.clone(),
            release,
        });
        (entered, release_tx)
    }

    async fn enter(&self, call: &'static str) -> ClientResult<()> {
        self.calls.lock().unwrap().push(call);

        let hold = self.hold.lock().unwrap().take();
        if let Some(hold) = hold {
            hold.entered.notify_one();
            let _ = hold.release.await;
        }

        if self.failing.load(Ordering::SeqCst) {
            return Err(ClientError::api_error(503, "PGRST000", "service unavailable"));
        }
        Ok(())
    }

    fn find(&self, predicate: impl Fn(&Identity) -> bool) -> Option<Identity> {
        self.identities
            .lock()
            .unwrap()
            .iter()
            .find(|i| predicate(i))
            .cloned()
    }
}

#[async_trait]
impl DirectoryBackend for FakeDirectory {
    async fn search_by_name(&self, fragment: &str, limit: usize) -> ClientResult<Vec<Identity>> {
        self.enter("search_by_name").await?;

        let rows = self.search_rows.lock().unwrap().clone();
        if let Some(rows) = rows {
            return Ok(rows);
        }

        let needle = fragment.to_lowercase();
        let mut rows: Vec<Identity> = self
            .identities
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        rows.truncate(limit);
        Ok(rows)
    }

    async fn get_identity_by_exact_name(&self, name: &str) -> ClientResult<Option<Identity>> {
        self.enter("get_identity_by_exact_name").await?;
        Ok(self.find(|i| i.name == name))
    }

    async fn get_identity_by_name_and_id(
        &self,
        name: &str,
        identity_id: Uuid,
    ) -> ClientResult<Option<Identity>> {
        self.enter("get_identity_by_name_and_id").await?;
        Ok(self.find(|i| i.name == name && i.id == identity_id))
    }

    async fn get_identity_by_name_and_phone(
        &self,
        name: &str,
        normalized_phone: &str,
    ) -> ClientResult<Option<Identity>> {
        self.enter("get_identity_by_name_and_phone").await?;
        Ok(self.find(|i| {
            i.name == name
                && i.phone_number
                    .as_deref()
                    .is_some_and(|p| normalize_phone(p) == normalized_phone)
        }))
    }

    async fn set_credential_hash(&self, identity_id: Uuid, hash: &str) -> ClientResult<Identity> {
        self.enter("set_credential_hash").await?;

        let mut identities = self.identities.lock().unwrap();
        let Some(identity) = identities.iter_mut().find(|i| i.id == identity_id) else {
            return Err(ClientError::unexpected("no participant row"));
        };
        identity.password_hash = Some(hash.to_string());
        Ok(identity.clone())
    }

    async fn verify_credential(&self, identity_id: Uuid, pin: &str) -> ClientResult<bool> {
        self.enter("verify_credential").await?;
        Ok(self
            .find(|i| i.id == identity_id)
            .and_then(|i| i.password_hash)
            .is_some_and(|hash| bcrypt::verify(pin, &hash).unwrap_or(false)))
    }
}

pub(crate) struct Harness {
    pub backend: Arc<FakeDirectory>,
    pub storage: Arc<MemoryStorage>,
    pub gate: Arc<CredentialGate>,
}

pub(crate) fn harness(identities: Vec<Identity>) -> Harness {
    let backend = FakeDirectory::with(identities);
    let storage = Arc::new(MemoryStorage::new());
    let sessions = Arc::new(SessionStore::new(storage.clone(), "portal_session"));
    let resolver = Arc::new(IdentityResolver::new(backend.clone(), 50));
    let pins = PinManager::new(backend.clone(), TEST_COST, PinVerification::Local);

    Harness {
        backend,
        storage,
        gate: Arc::new(CredentialGate::new(resolver, pins, sessions)),
    }
}
