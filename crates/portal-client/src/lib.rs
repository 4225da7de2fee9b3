//! portal-client
//!
//! Typed access to the hosted participant directory: the `DirectoryBackend`
//! seam consumed by the authentication flow and its REST implementation.

pub(crate) mod backend;
pub(crate) mod error;
pub(crate) mod rest_backend;


pub use backend::DirectoryBackend;
pub use error::{ClientError, Result as ClientResult};
pub use rest_backend::RestBackend;
