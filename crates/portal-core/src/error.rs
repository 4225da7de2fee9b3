use std::panic::Location;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("PIN must be exactly {expected} digits {location}")]
    InvalidPin {
        expected: usize,
        location: ErrorLocation,
    },
}

impl CoreError {
    /// Creates InvalidPin error at caller location.
    #[track_caller]
    pub fn invalid_pin(expected: usize) -> Self {
        Self::InvalidPin {
            expected,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = StdResult<T, CoreError>;
