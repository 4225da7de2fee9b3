use crate::Identity;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The locally persisted view of an authenticated participant.
///
/// Has no credential field, so a session never carries the PIN hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl From<&Identity> for SessionUser {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id,
            name: identity.name.clone(),
            phone_number: identity.phone_number.clone(),
            school: identity.school.clone(),
            major: identity.major.clone(),
            generation: identity.generation.clone(),
            gender: identity.gender.clone(),
            role: identity.role.clone(),
        }
    }
}
