use crate::Identity;

use googletest::prelude::*;
use uuid::Uuid;

#[test]
fn given_full_row_when_deserialized_then_all_fields_present() {
    let json = r#"{
        "id": "550e8400-e29b-41d4-a716-446655440000",
        "name": "Kim Min-jun",
        "phone_number": "010-1111-2222",
        "password_hash": "$2b$10$abcdefghijklmnopqrstuu",
        "school": "Seoul National University",
        "major": "Physics",
        "generation": "12",
        "gender": "M",
        "role": "participant",
        "created_at": "2024-01-01T00:00:00Z"
    }"#;

    let identity: Identity = serde_json::from_str(json).unwrap();

    assert_that!(identity.name, eq("Kim Min-jun"));
    assert_that!(identity.phone_number, some(eq("010-1111-2222")));
    assert_that!(identity.generation, some(eq("12")));
    assert!(identity.is_registered());
}

#[test]
fn given_numeric_generation_when_deserialized_then_stored_as_string() {
    let json = r#"{"id":"550e8400-e29b-41d4-a716-446655440000","name":"Lee Kim","generation":7}"#;

    let identity: Identity = serde_json::from_str(json).unwrap();

    assert_that!(identity.generation, some(eq("7")));
}

#[test]
fn given_missing_name_when_deserialized_then_error() {
    let json = r#"{"id":"550e8400-e29b-41d4-a716-446655440000"}"#;
    assert!(serde_json::from_str::<Identity>(json).is_err());
}

#[test]
fn given_null_or_empty_hash_when_checked_then_not_registered() {
    let mut identity = Identity::new(Uuid::new_v4(), "Park Soo");
    assert!(!identity.is_registered());

    identity.password_hash = Some(String::new());
    assert!(!identity.is_registered());
    assert_eq!(identity.credential_hash(), None);
}

#[test]
fn given_hash_when_debug_formatted_then_redacted() {
    let mut identity = Identity::new(Uuid::new_v4(), "Park Soo");
    identity.password_hash = Some("$2b$10$secretsecretsecret".to_string());

    let debug = format!("{identity:?}");

    assert_that!(debug, not(contains_substring("secretsecret")));
    assert_that!(debug, contains_substring("<redacted>"));
}
