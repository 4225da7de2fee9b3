use crate::{ClientError, ClientResult, DirectoryBackend};

use portal_config::BackendConfig;
use portal_core::{Identity, normalize_phone};

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::ACCEPT;
use reqwest::{Client as ReqwestClient, Method};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const REST_PREFIX: &str = "/rest/v1";

/// `DirectoryBackend` over a PostgREST-style HTTP API
pub struct RestBackend {
    pub base_url: String,
    pub participants_table: String,
    set_credential_fn: String,
    verify_credential_fn: String,
    api_key: String,
    client: ReqwestClient,
}

/// Error body returned by PostgREST on non-2xx responses
#[derive(Debug, Deserialize)]
struct PostgrestError {
    code: Option<String>,
    message: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

/// Procedures declared `RETURNS participants` answer with an object,
/// `RETURNS SETOF participants` with an array.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl RestBackend {
    /// Create a new backend client
    pub fn new(config: &BackendConfig) -> ClientResult<Self> {
        let mut builder = ReqwestClient::builder();
        if config.request_timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.request_timeout_secs));
        }

        Ok(Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            participants_table: config.participants_table.clone(),
            set_credential_fn: config.set_credential_fn.clone(),
            verify_credential_fn: config.verify_credential_fn.clone(),
            api_key: config.api_key.clone(),
            client: builder.build()?,
        })
    }

    /// Build a request carrying the API key headers
    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}{}", self.base_url, REST_PREFIX, path);

        self.client
            .request(method, &url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header(ACCEPT, "application/json")
    }

    fn table_path(&self) -> String {
        format!("/{}", self.participants_table)
    }

    fn rpc_path(function: &str) -> String {
        format!("/rpc/{function}")
    }

    /// Execute request, map error responses, and parse the body
    async fn execute<T: DeserializeOwned>(&self, req: reqwest::RequestBuilder) -> ClientResult<T> {
        let response = req.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Self::error_from_body(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(ClientError::from_json)
    }

    #[track_caller]
    fn error_from_body(status: u16, body: &str) -> ClientError {
        match serde_json::from_str::<PostgrestError>(body) {
            Ok(error) => {
                let mut message = error
                    .message
                    .unwrap_or_else(|| String::from("Unknown error"));
                if let Some(details) = error.details.filter(|d| !d.is_empty()) {
                    message = format!("{message} ({details})");
                }
                if let Some(hint) = error.hint.filter(|h| !h.is_empty()) {
                    message = format!("{message} [hint: {hint}]");
                }
                ClientError::api_error(
                    status,
                    error.code.unwrap_or_else(|| String::from("UNKNOWN")),
                    message,
                )
            }
            Err(_) => ClientError::api_error(status, "UNKNOWN", body.trim()),
        }
    }

    async fn select_by_name(
        &self,
        name: &str,
        id: Option<Uuid>,
        limit: Option<usize>,
    ) -> ClientResult<Vec<Identity>> {
        let mut query = vec![
            ("select", String::from("*")),
            ("name", format!("eq.{name}")),
            ("order", String::from("id.asc")),
        ];
        if let Some(id) = id {
            query.push(("id", format!("eq.{id}")));
        }
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }

        let req = self.request(Method::GET, &self.table_path()).query(&query);
        self.execute(req).await
    }
}

/// Escapes a user-supplied fragment for a PostgREST `ilike` pattern.
///
/// LIKE metacharacters are backslash-escaped and `*` (PostgREST's wildcard
/// alias) is dropped, so the fragment only ever matches literally.
pub(crate) fn escape_like(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for c in fragment.chars() {
        match c {
            '\\' | '%' | '_' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '*' => {}
            _ => escaped.push(c),
        }
    }
    escaped
}

#[async_trait]
impl DirectoryBackend for RestBackend {
    async fn search_by_name(&self, fragment: &str, limit: usize) -> ClientResult<Vec<Identity>> {
        debug!("Searching participants: fragment={fragment:?} limit={limit}");

        let query = [
            ("select", String::from("*")),
            ("name", format!("ilike.*{}*", escape_like(fragment))),
            ("order", String::from("name.asc")),
            ("limit", limit.to_string()),
        ];

        let req = self.request(Method::GET, &self.table_path()).query(&query);
        self.execute(req).await
    }

    async fn get_identity_by_exact_name(&self, name: &str) -> ClientResult<Option<Identity>> {
        debug!("Fetching participant by name: {name:?}");

        let rows = self.select_by_name(name, None, Some(1)).await?;
        Ok(rows.into_iter().next())
    }

    async fn get_identity_by_name_and_id(
        &self,
        name: &str,
        identity_id: Uuid,
    ) -> ClientResult<Option<Identity>> {
        debug!("Fetching participant {identity_id} by name: {name:?}");

        let rows = self.select_by_name(name, Some(identity_id), Some(1)).await?;
        Ok(rows.into_iter().find(|identity| identity.id == identity_id))
    }

    async fn get_identity_by_name_and_phone(
        &self,
        name: &str,
        normalized_phone: &str,
    ) -> ClientResult<Option<Identity>> {
        debug!("Fetching participant by name and phone: {name:?}");

        // Phones are stored free-form, so the match happens on this side.
        let rows = self.select_by_name(name, None, None).await?;
        Ok(rows.into_iter().find(|identity| {
            identity
                .phone_number
                .as_deref()
                .is_some_and(|stored| normalize_phone(stored) == normalized_phone)
        }))
    }

    async fn set_credential_hash(&self, identity_id: Uuid, hash: &str) -> ClientResult<Identity> {
        #[derive(Serialize)]
        struct SetCredentialRequest<'a> {
            p_participant_id: Uuid,
            p_password_hash: &'a str,
        }

        debug!("Storing credential for participant {identity_id}");

        let body = SetCredentialRequest {
            p_participant_id: identity_id,
            p_password_hash: hash,
        };
        let req = self
            .request(Method::POST, &Self::rpc_path(&self.set_credential_fn))
            .json(&body);

        match self.execute::<OneOrMany<Identity>>(req).await? {
            OneOrMany::One(identity) => Ok(identity),
            OneOrMany::Many(rows) => match rows.into_iter().next() {
                Some(identity) => Ok(identity),
                None => {
                    warn!("{} returned no row for {identity_id}", self.set_credential_fn);
                    Err(ClientError::unexpected(format!(
                        "{} returned no participant row",
                        self.set_credential_fn
                    )))
                }
            },
        }
    }

    async fn verify_credential(&self, identity_id: Uuid, pin: &str) -> ClientResult<bool> {
        #[derive(Serialize)]
        struct VerifyCredentialRequest<'a> {
            p_participant_id: Uuid,
            p_pin: &'a str,
        }

        debug!("Verifying credential for participant {identity_id}");

        let body = VerifyCredentialRequest {
            p_participant_id: identity_id,
            p_pin: pin,
        };
        let req = self
            .request(Method::POST, &Self::rpc_path(&self.verify_credential_fn))
            .json(&body);
        self.execute(req).await
    }
}
