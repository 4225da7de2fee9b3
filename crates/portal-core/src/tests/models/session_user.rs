use crate::{Identity, SessionUser};

use googletest::prelude::*;
use uuid::Uuid;

fn registered_identity() -> Identity {
    let mut identity = Identity::new(Uuid::new_v4(), "Kim Min-jun");
    identity.phone_number = Some("010-1111-2222".to_string());
    identity.password_hash = Some("$2b$10$hashhashhash".to_string());
    identity.school = Some("KAIST".to_string());
    identity.generation = Some("12".to_string());
    identity
}

#[test]
fn given_identity_when_converted_then_copies_descriptive_fields() {
    let identity = registered_identity();

    let user = SessionUser::from(&identity);

    assert_that!(user.id, eq(identity.id));
    assert_that!(user.name, eq(&identity.name));
    assert_that!(user.phone_number, eq(&identity.phone_number));
    assert_that!(user.school, eq(&identity.school));
    assert_that!(user.generation, eq(&identity.generation));
}

#[test]
fn given_registered_identity_when_serialized_then_no_credential_material() {
    let identity = registered_identity();

    let json = serde_json::to_string(&SessionUser::from(&identity)).unwrap();

    assert_that!(json, not(contains_substring("password_hash")));
    assert_that!(json, not(contains_substring("hashhashhash")));
}

#[test]
fn given_absent_optional_fields_when_serialized_then_omitted() {
    let identity = Identity::new(Uuid::new_v4(), "Park Soo");

    let json = serde_json::to_string(&SessionUser::from(&identity)).unwrap();

    assert_that!(json, not(contains_substring("major")));
    assert_that!(json, contains_substring("Park Soo"));
}
