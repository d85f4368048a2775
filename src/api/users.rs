//! Profile registration and user approval endpoints.

use actix_web::{HttpResponse, get, post, web};
use uuid::Uuid;

use crate::auth::{Capability, IdentityAuth, SessionAuth};
use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::{ApproveUserRequest, ProfileResponse, RegisterProfileRequest};
use crate::services::approvals;

/// Configure user routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(get_me)
        .service(register_profile)
        .service(list_pending_users)
        .service(approve_user)
        .service(reject_user);
}

/// The caller's profile, approval state and capabilities.
#[utoipa::path(
    get,
    path = "/api/v1/me",
    tag = "Users",
    responses(
        (status = 200, description = "Caller's profile", body = crate::models::MeResponse),
        (status = 401, description = "Missing or invalid session"),
        (status = 404, description = "No profile registered yet")
    ),
    security(("bearer_auth" = []))
)]
#[get("/me")]
pub async fn get_me(auth: IdentityAuth, pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let me = approvals::get_me(&pool, auth.user_id).await?;
    Ok(HttpResponse::Ok().json(me))
}

/// Register the caller after sign-up. Idempotent.
#[utoipa::path(
    post,
    path = "/api/v1/me/profile",
    tag = "Users",
    request_body = RegisterProfileRequest,
    responses(
        (status = 200, description = "Profile (pending until approved)", body = crate::models::MeResponse),
        (status = 400, description = "Full name missing")
    ),
    security(("bearer_auth" = []))
)]
#[post("/me/profile")]
pub async fn register_profile(
    auth: IdentityAuth,
    body: web::Json<RegisterProfileRequest>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let profile = approvals::register_profile(&pool, auth.user_id, &body.full_name).await?;
    Ok(HttpResponse::Ok().json(approvals::me_response(profile)))
}

/// Users awaiting approval, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/users/pending",
    tag = "Users",
    responses(
        (status = 200, description = "Pending users", body = Vec<ProfileResponse>),
        (status = 403, description = "User management not permitted")
    ),
    security(("bearer_auth" = []), ("admin_key" = []))
)]
#[get("/users/pending")]
pub async fn list_pending_users(
    auth: SessionAuth,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    auth.session.require(Capability::UserManagement)?;
    let pending: Vec<ProfileResponse> = pool
        .list_pending_profiles()
        .await?
        .into_iter()
        .map(ProfileResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(pending))
}

/// Approve a user, optionally granting a role.
#[utoipa::path(
    post,
    path = "/api/v1/users/{id}/approve",
    tag = "Users",
    params(("id" = Uuid, Path, description = "Profile ID")),
    request_body(content = ApproveUserRequest, description = "Optional role: teacher, admin or principal"),
    responses(
        (status = 200, description = "User approved", body = ProfileResponse),
        (status = 400, description = "Role cannot be granted"),
        (status = 404, description = "Profile not found")
    ),
    security(("bearer_auth" = []), ("admin_key" = []))
)]
#[post("/users/{id}/approve")]
pub async fn approve_user(
    auth: SessionAuth,
    path: web::Path<Uuid>,
    body: Option<web::Json<ApproveUserRequest>>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    auth.session.require(Capability::UserManagement)?;
    let request = body.map(web::Json::into_inner).unwrap_or_default();
    let profile = approvals::approve_user(&pool, path.into_inner(), request.role.as_deref()).await?;
    Ok(HttpResponse::Ok().json(ProfileResponse::from(profile)))
}

/// Reject a user.
#[utoipa::path(
    post,
    path = "/api/v1/users/{id}/reject",
    tag = "Users",
    params(("id" = Uuid, Path, description = "Profile ID")),
    responses(
        (status = 200, description = "User rejected", body = ProfileResponse),
        (status = 404, description = "Profile not found")
    ),
    security(("bearer_auth" = []), ("admin_key" = []))
)]
#[post("/users/{id}/reject")]
pub async fn reject_user(
    auth: SessionAuth,
    path: web::Path<Uuid>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    auth.session.require(Capability::UserManagement)?;
    let profile = approvals::reject_user(&pool, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ProfileResponse::from(profile)))
}
