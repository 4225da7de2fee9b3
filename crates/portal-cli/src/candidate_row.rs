use portal_auth::Candidate;

use serde::Serialize;
use uuid::Uuid;

/// One `portal search` result.
///
/// Never carries the phone number; it is the proof of identity for
/// first-time registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateRow {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation: Option<String>,
    pub registered: bool,
}

impl From<&Candidate> for CandidateRow {
    fn from(candidate: &Candidate) -> Self {
        let identity = candidate.identity();
        Self {
            id: identity.id,
            name: identity.name.clone(),
            school: identity.school.clone(),
            major: identity.major.clone(),
            generation: identity.generation.clone(),
            registered: candidate.is_registered(),
        }
    }
}
