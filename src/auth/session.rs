//! Session token verification and the per-request session object.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::capability::{Capability, capabilities_for};
use crate::config::SessionSettings;
use crate::error::{AppError, AppResult};
use crate::models::{Profile, Role};

/// Claims of a session token issued by the identity provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Identity user id.
    pub sub: String,
    pub exp: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

impl SessionClaims {
    pub fn user_id(&self) -> Result<Uuid, String> {
        Uuid::parse_str(&self.sub).map_err(|_| "Session subject is not a valid user id".to_string())
    }
}

/// Verify a session JWT and return its claims.
pub fn verify_session_token(token: &str, settings: &SessionSettings) -> Result<SessionClaims, String> {
    let key = DecodingKey::from_secret(settings.jwt_secret.expose_secret().as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    if let Some(ref issuer) = settings.issuer {
        validation.set_issuer(&[issuer]);
    }
    validation.validate_aud = false;

    let token_data = decode::<SessionClaims>(token, &key, &validation)
        .map_err(|e| format!("Invalid session token: {}", e))?;

    Ok(token_data.claims)
}

/// Authenticated, approved caller.
#[derive(Debug, Clone)]
pub struct Session {
    /// None for the bootstrap admin key.
    pub user_id: Option<Uuid>,
    pub full_name: String,
    pub role: Role,
    pub capabilities: &'static [Capability],
}

impl Session {
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            user_id: Some(profile.user_id),
            full_name: profile.full_name.clone(),
            role: profile.role,
            capabilities: capabilities_for(profile.role),
        }
    }

    /// Session for the bootstrap admin key.
    pub fn bootstrap() -> Self {
        Self {
            user_id: None,
            full_name: "Admin (Bootstrap)".to_string(),
            role: Role::Superadmin,
            capabilities: capabilities_for(Role::Superadmin),
        }
    }

    pub fn can(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    /// Fail with 403 unless the session holds the capability.
    pub fn require(&self, capability: Capability) -> AppResult<()> {
        if self.can(capability) {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!(
                "{} cannot perform {}",
                self.role.display_name(),
                capability
            )))
        }
    }

    /// User id to attribute authored records to.
    pub fn author_id(&self) -> AppResult<Uuid> {
        self.user_id.ok_or_else(|| {
            AppError::Forbidden("The bootstrap key cannot author records".to_string())
        })
    }
}
