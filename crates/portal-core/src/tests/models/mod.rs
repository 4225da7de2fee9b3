mod identity;
mod phone;
mod pin;
mod session_user;
