//! Sign-up registration and user approvals.

use tracing::info;
use uuid::Uuid;

use crate::auth::capabilities_for;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{ApprovalStatus, MeResponse, Profile, ProfileResponse, Role};

/// Parse the role granted on approval. Superadmin cannot be granted here.
pub fn parse_grantable_role(role: Option<&str>) -> AppResult<Option<Role>> {
    let Some(raw) = role.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(None);
    };
    match Role::parse(raw) {
        Some(role @ (Role::Teacher | Role::Admin | Role::Principal)) => Ok(Some(role)),
        _ => Err(AppError::InvalidInput(format!(
            "Role must be one of teacher, admin, principal (got '{}')",
            raw
        ))),
    }
}

pub fn me_response(profile: Profile) -> MeResponse {
    let capabilities = if profile.is_approved() {
        capabilities_for(profile.role)
            .iter()
            .map(|c| c.as_str().to_string())
            .collect()
    } else {
        Vec::new()
    };
    MeResponse {
        role_display_name: profile.role.display_name(),
        capabilities,
        profile: ProfileResponse::from(profile),
    }
}

/// Create a pending teacher profile for the caller, or return the existing one.
pub async fn register_profile(pool: &DbPool, user_id: Uuid, full_name: &str) -> AppResult<Profile> {
    if let Some(existing) = pool.get_profile_by_user_id(user_id).await? {
        return Ok(existing);
    }

    let full_name = full_name.trim();
    if full_name.is_empty() {
        return Err(AppError::InvalidInput("Full name is required".to_string()));
    }

    let profile = pool
        .insert_profile_if_absent(user_id, full_name, Role::Teacher, ApprovalStatus::Pending)
        .await?;
    info!(profile_id = %profile.id, "Profile registered, awaiting approval");
    Ok(profile)
}

/// The caller's own profile.
pub async fn get_me(pool: &DbPool, user_id: Uuid) -> AppResult<MeResponse> {
    let profile = pool
        .get_profile_by_user_id(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile".to_string()))?;
    Ok(me_response(profile))
}

pub async fn approve_user(pool: &DbPool, profile_id: Uuid, role: Option<&str>) -> AppResult<Profile> {
    let role = parse_grantable_role(role)?;
    let profile = pool
        .update_profile_approval(profile_id, ApprovalStatus::Approved, role)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile".to_string()))?;
    info!(profile_id = %profile.id, role = %profile.role, "User approved");
    Ok(profile)
}

pub async fn reject_user(pool: &DbPool, profile_id: Uuid) -> AppResult<Profile> {
    let profile = pool
        .update_profile_approval(profile_id, ApprovalStatus::Rejected, None)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile".to_string()))?;
    info!(profile_id = %profile.id, "User rejected");
    Ok(profile)
}
