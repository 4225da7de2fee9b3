use crate::{CoreError, Pin};

use googletest::prelude::*;

#[test]
fn given_four_ascii_digits_when_parsed_then_ok() {
    let pin = Pin::parse("0427").unwrap();
    assert_eq!(pin.as_str(), "0427");
}

#[test]
fn given_malformed_input_when_parsed_then_invalid_pin() {
    for raw in ["", "123", "12345", "12a4", "abcd", " 123", "1234 ", "12-4", "١٢٣٤"] {
        let result = Pin::parse(raw);
        assert!(
            matches!(result, Err(CoreError::InvalidPin { expected: 4, .. })),
            "{raw:?} should be rejected"
        );
    }
}

#[test]
fn given_pin_when_debug_formatted_then_digits_hidden() {
    let pin = Pin::parse("9876").unwrap();
    let debug = format!("{pin:?}");
    assert_that!(debug, not(contains_substring("9876")));
}
