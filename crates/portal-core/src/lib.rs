pub mod error;
pub mod models;

#[cfg(test)]
mod tests;

pub use error::{CoreError, Result as CoreResult};
pub use models::identity::Identity;
pub use models::phone::{normalize_phone, phones_match};
pub use models::pin::{PIN_LENGTH, Pin};
pub use models::session_user::SessionUser;
