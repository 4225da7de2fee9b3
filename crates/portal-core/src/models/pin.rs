use crate::{CoreError, CoreResult};

use std::fmt;

pub const PIN_LENGTH: usize = 4;

/// A 4-digit numeric PIN that passed format validation.
#[derive(Clone, PartialEq, Eq)]
pub struct Pin(String);

impl Pin {
    /// Accepts exactly four ASCII digits. Surrounding whitespace is not trimmed.
    #[track_caller]
    pub fn parse(raw: &str) -> CoreResult<Self> {
        if raw.len() == PIN_LENGTH && raw.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(raw.to_string()))
        } else {
            Err(CoreError::invalid_pin(PIN_LENGTH))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pin(****)")
    }
}
