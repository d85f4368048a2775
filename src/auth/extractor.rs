//! Actix-web extractors resolving bearer tokens into sessions.
//!
//! # Security
//! - The bootstrap admin key is wrapped in `SecretString` as soon as it is read
//! - Tokens and keys are never logged
//! - Admin key comparison is constant-time

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::LocalBoxFuture;
use secrecy::{ExposeSecret, SecretString};
use uuid::Uuid;

use super::AdminKey;
use super::session::{Session, verify_session_token};
use crate::config::{ADMIN_KEY_HEADER, SessionSettings};
use crate::db::DbPool;
use crate::error::AppError;
use crate::models::ApprovalStatus;

/// Extract a secret header value, wrapping it in SecretString.
/// Returns None if the header is missing or invalid UTF-8.
fn extract_secret_header(req: &HttpRequest, header_name: &str) -> Option<SecretString> {
    req.headers()
        .get(header_name)
        .and_then(|v| v.to_str().ok())
        .map(|s| SecretString::from(s.to_string()))
}

fn extract_bearer(req: &HttpRequest) -> Option<SecretString> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| SecretString::from(t.trim().to_string()))
}

fn config_error() -> AppError {
    AppError::Internal("Session extractor is missing app data".to_string())
}

/// Verify the bearer token and return the identity user id.
fn identity_from_request(req: &HttpRequest) -> Result<Uuid, AppError> {
    let settings = req
        .app_data::<web::Data<SessionSettings>>()
        .ok_or_else(config_error)?;

    let token = extract_bearer(req).ok_or_else(|| {
        AppError::Unauthorized("Missing session. Provide an Authorization: Bearer header.".to_string())
    })?;

    let claims =
        verify_session_token(token.expose_secret(), settings).map_err(AppError::Unauthorized)?;
    claims.user_id().map_err(AppError::Unauthorized)
}

/// Verified identity without a profile check.
///
/// Used by registration and `/me`, which must work before approval.
pub struct IdentityAuth {
    pub user_id: Uuid,
}

impl FromRequest for IdentityAuth {
    type Error = AppError;
    type Future = std::future::Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        std::future::ready(identity_from_request(req).map(|user_id| IdentityAuth { user_id }))
    }
}

/// Extractor that requires an approved profile (or the bootstrap admin key).
///
/// ```ignore
/// async fn handler(auth: SessionAuth) -> AppResult<HttpResponse> {
///     auth.session.require(Capability::StudentSearch)?;
///     // ...
/// }
/// ```
pub struct SessionAuth {
    pub session: Session,
}

impl FromRequest for SessionAuth {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        // Bootstrap key first
        if let Some(provided) = extract_secret_header(req, ADMIN_KEY_HEADER) {
            let verified = req
                .app_data::<web::Data<AdminKey>>()
                .is_some_and(|key| key.verify(provided.expose_secret()));
            if verified {
                return Box::pin(async {
                    Ok(SessionAuth {
                        session: Session::bootstrap(),
                    })
                });
            }
            return Box::pin(async { Err(AppError::Unauthorized("Invalid admin key".to_string())) });
        }

        let pool = req.app_data::<web::Data<DbPool>>().cloned();
        let identity = identity_from_request(req);

        Box::pin(async move {
            let pool = pool.ok_or_else(config_error)?;
            let user_id = identity?;

            let profile = pool.get_profile_by_user_id(user_id).await?.ok_or_else(|| {
                AppError::Unauthorized("No profile registered for this account".to_string())
            })?;

            match profile.approval_status {
                ApprovalStatus::Approved => Ok(SessionAuth {
                    session: Session::from_profile(&profile),
                }),
                ApprovalStatus::Pending => Err(AppError::Forbidden(
                    "Account approval pending".to_string(),
                )),
                ApprovalStatus::Rejected => {
                    Err(AppError::Forbidden("Account was rejected".to_string()))
                }
            }
        })
    }
}
