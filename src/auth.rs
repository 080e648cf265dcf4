//! Developer-token domain: identifiers, redacted secrets, and the ES256 credential issuer.

pub mod credential;
pub mod id;
pub mod secret;

pub use credential::*;
pub use id::*;
pub use secret::*;
