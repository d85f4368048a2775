//! Authentication and access control.
//!
//! Sessions are issued by the external identity provider and arrive as HS256
//! bearer tokens. Each request resolves its token into an explicit [`Session`]
//! carrying the caller's role and capabilities.

mod capability;
mod extractor;
mod session;

use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;

pub use capability::{Capability, capabilities_for};
pub use extractor::{IdentityAuth, SessionAuth};
pub use session::{Session, SessionClaims, verify_session_token};

/// Wrapper type for the bootstrap admin key.
/// Uses `SecretString` to prevent accidental logging and zeroize on drop.
#[derive(Clone)]
pub struct AdminKey(Option<SecretString>);

impl AdminKey {
    /// Create a new AdminKey from an optional string.
    pub fn new(key: Option<String>) -> Self {
        Self(key.map(SecretString::from))
    }

    /// Constant-time comparison with the stored key. Always false when no key is configured.
    pub fn verify(&self, provided: &str) -> bool {
        match &self.0 {
            Some(secret) => secret
                .expose_secret()
                .as_bytes()
                .ct_eq(provided.as_bytes())
                .into(),
            None => false,
        }
    }
}

impl std::fmt::Debug for AdminKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Some(_) => write!(f, "AdminKey([REDACTED])"),
            None => write!(f, "AdminKey(None)"),
        }
    }
}
