
use crate::{App, Prompter};

use portal_auth::{Candidate, IdentityResolver};
use portal_client::{ClientError, ClientResult, DirectoryBackend};
use portal_config::Config;
use portal_core::{Identity, normalize_phone};
use portal_session::MemoryStorage;

use std::io::Cursor;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

pub(crate) fn participant(name: &str, phone: &str, pin: Option<&str>) -> Identity {
    let mut identity = Identity::new(Uuid::new_v4(), name);
    identity.phone_number = Some(phone.to_string());
    identity.school = Some("KAIST".to_string());
    identity.password_hash = pin.map(|p| bcrypt::hash(p, 4).unwrap());
    identity
}

/// Directory held in memory; enough behavior to drive the terminal flows.
pub(crate) struct InMemoryDirectory {
    rows: Mutex<Vec<Identity>>,
}

impl InMemoryDirectory {
    pub(crate) fn new(rows: Vec<Identity>) -> Arc<Self> {
        Arc::new(Self {
            rows: Mutex::new(rows),
        })
    }

    pub(crate) fn row(&self, id: Uuid) -> Option<Identity> {
        self.rows.lock().unwrap().iter().find(|r| r.id == id).cloned()
    }
}

#[async_trait]
impl DirectoryBackend for InMemoryDirectory {
    async fn search_by_name(&self, fragment: &str, limit: usize) -> ClientResult<Vec<Identity>> {
        let needle = fragment.to_lowercase();
        let mut rows: Vec<Identity> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        rows.truncate(limit);
        Ok(rows)
    }

    async fn get_identity_by_exact_name(&self, name: &str) -> ClientResult<Option<Identity>> {
        Ok(self.rows.lock().unwrap().iter().find(|r| r.name == name).cloned())
    }

    async fn get_identity_by_name_and_id(
        &self,
        name: &str,
        identity_id: Uuid,
    ) -> ClientResult<Option<Identity>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.name == name && r.id == identity_id)
            .cloned())
    }

    async fn get_identity_by_name_and_phone(
        &self,
        name: &str,
        normalized_phone: &str,
    ) -> ClientResult<Option<Identity>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| {
                r.name == name
                    && r.phone_number
                        .as_deref()
                        .is_some_and(|p| normalize_phone(p) == normalized_phone)
            })
            .cloned())
    }

    async fn set_credential_hash(&self, identity_id: Uuid, hash: &str) -> ClientResult<Identity> {
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|r| r.id == identity_id) else {
            return Err(ClientError::unexpected("no participant row"));
        };
        row.password_hash = Some(hash.to_string());
        Ok(row.clone())
    }

    async fn verify_credential(&self, _identity_id: Uuid, _pin: &str) -> ClientResult<bool> {
        Err(ClientError::unexpected("remote verification not configured"))
    }
}

/// Candidates for `names`, obtained the only way there is: a resolver search.
pub(crate) async fn candidates(fragment: &str, names: &[&str]) -> Vec<Candidate> {
    let rows = names
        .iter()
        .map(|name| participant(name, "010-0000-0000", None))
        .collect();
    IdentityResolver::new(InMemoryDirectory::new(rows), 50)
        .search(fragment)
        .await
        .unwrap()
}

pub(crate) fn test_config() -> Config {
    let mut config = Config::default();
    config.auth.bcrypt_cost = 4;
    config
}

pub(crate) async fn app(directory: Arc<InMemoryDirectory>) -> (App, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    let app = App::with_parts(&test_config(), directory, storage.clone())
        .await
        .unwrap();
    (app, storage)
}

/// Prompter fed from a script of lines, capturing what it prints.
pub(crate) fn scripted(lines: &[&str]) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
    let mut input = lines.join("\n");
    input.push('\n');
    Prompter::new(Cursor::new(input.into_bytes()), Vec::new())
}

pub(crate) fn printed(prompter: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
    String::from_utf8(prompter.into_output()).unwrap()
}
