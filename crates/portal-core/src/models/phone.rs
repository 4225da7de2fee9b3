/// Normalizes a phone number for comparison: removes hyphens, then trims
/// surrounding whitespace. Inner spaces, parentheses and country codes are
/// kept as-is.
pub fn normalize_phone(raw: &str) -> String {
    raw.replace('-', "").trim().to_string()
}

/// Whether two free-form phone numbers are equal after normalization.
pub fn phones_match(a: &str, b: &str) -> bool {
    normalize_phone(a) == normalize_phone(b)
}
