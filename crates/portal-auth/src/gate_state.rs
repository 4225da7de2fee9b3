use crate::Candidate;

use portal_core::{Identity, SessionUser};

/// Where a participant is in the sign-in flow.
///
/// PIN operations need an identity, and only the `AwaitingPin` variant
/// carries one, so they cannot run before a participant was selected.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GateState {
    #[default]
    NoIdentitySelected,
    RegisteringPhoneCheck {
        candidate: Candidate,
    },
    AwaitingPin {
        identity: Identity,
        is_new: bool,
    },
    Authenticated {
        session: SessionUser,
    },
}

impl GateState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::NoIdentitySelected => "no identity selected",
            Self::RegisteringPhoneCheck { .. } => "checking phone",
            Self::AwaitingPin { is_new: true, .. } => "awaiting new PIN",
            Self::AwaitingPin { is_new: false, .. } => "awaiting PIN",
            Self::Authenticated { .. } => "authenticated",
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }
}
