use crate::{normalize_phone, phones_match};

use googletest::prelude::*;

#[test]
fn given_hyphenated_number_when_normalized_then_hyphens_removed() {
    assert_that!(normalize_phone("010-1234-5678"), eq("01012345678"));
}

#[test]
fn given_surrounding_whitespace_when_normalized_then_trimmed() {
    assert_that!(normalize_phone(" 01012345678 "), eq("01012345678"));
    assert_that!(normalize_phone("\t010-1234-5678\n"), eq("01012345678"));
}

#[test]
fn given_equivalent_forms_when_compared_then_all_match() {
    let forms = ["010-1234-5678", "01012345678", " 01012345678 ", " 010-1234-5678"];

    for a in forms {
        for b in forms {
            assert!(phones_match(a, b), "{a:?} should match {b:?}");
        }
    }
}

#[test]
fn given_inner_spaces_or_parentheses_when_normalized_then_kept() {
    assert_that!(normalize_phone("010 1234 5678"), eq("010 1234 5678"));
    assert_that!(normalize_phone("(010)1234-5678"), eq("(010)12345678"));
    assert!(!phones_match("010 1234 5678", "01012345678"));
}

#[test]
fn given_country_code_when_compared_then_does_not_match_local_form() {
    assert!(!phones_match("+82-10-1234-5678", "010-1234-5678"));
}

#[test]
fn given_different_numbers_when_compared_then_do_not_match() {
    assert!(!phones_match("010-1111-2222", "010-9999-9999"));
}
