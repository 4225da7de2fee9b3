
use portal_core::Identity;

use uuid::Uuid;

pub(crate) fn registered_identity() -> Identity {
    let mut identity = Identity::new(Uuid::new_v4(), "Kim Min-jun");
    identity.phone_number = Some("010-1111-2222".to_string());
    identity.password_hash = Some("$2b$10$abcdefghijklmnopqrstuv".to_string());
    identity.school = Some("KAIST".to_string());
    identity.major = Some("Physics".to_string());
    identity.generation = Some("12".to_string());
    identity.gender = Some("M".to_string());
    identity.role = Some("participant".to_string());
    identity
}
