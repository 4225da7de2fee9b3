pub mod identity;
pub mod phone;
pub mod pin;
pub mod session_user;

mod flexible_string;
