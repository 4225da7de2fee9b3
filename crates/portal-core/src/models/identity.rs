use crate::models::flexible_string;

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A participant row as stored by the remote directory.
///
/// `id` and `name` are required; a row missing either fails to parse at the
/// client boundary. A missing or empty `password_hash` means the participant
/// has not registered a PIN yet.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub password_hash: Option<String>,
    #[serde(default)]
    pub school: Option<String>,
    #[serde(default)]
    pub major: Option<String>,
    #[serde(default, deserialize_with = "flexible_string::deserialize")]
    pub generation: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl Identity {
    /// Creates an identity with only the required fields set.
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            phone_number: None,
            password_hash: None,
            school: None,
            major: None,
            generation: None,
            gender: None,
            role: None,
        }
    }

    /// The stored credential hash, ignoring empty strings.
    pub fn credential_hash(&self) -> Option<&str> {
        self.password_hash.as_deref().filter(|h| !h.is_empty())
    }

    /// Whether a PIN has already been set for this participant.
    pub fn is_registered(&self) -> bool {
        self.credential_hash().is_some()
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("phone_number", &self.phone_number)
            .field(
                "password_hash",
                &self.credential_hash().map(|_| "<redacted>"),
            )
            .field("school", &self.school)
            .field("major", &self.major)
            .field("generation", &self.generation)
            .field("gender", &self.gender)
            .field("role", &self.role)
            .finish()
    }
}
