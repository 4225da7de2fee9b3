use portal_core::Identity;

/// A search result the participant may pick from.
///
/// Only the resolver creates candidates, so holding one means the identity
/// came out of a directory lookup rather than from free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    identity: Identity,
}

impl Candidate {
    pub(crate) fn new(identity: Identity) -> Self {
        Self { identity }
    }

    pub fn name(&self) -> &str {
        &self.identity.name
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn is_registered(&self) -> bool {
        self.identity.is_registered()
    }

    /// One-line label for pick lists: name plus whatever profile fields exist.
    pub fn summary(&self) -> String {
        let details: Vec<&str> = [
            self.identity.school.as_deref(),
            self.identity.major.as_deref(),
            self.identity.generation.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect();

        if details.is_empty() {
            self.identity.name.clone()
        } else {
            format!("{} ({})", self.identity.name, details.join(", "))
        }
    }
}
