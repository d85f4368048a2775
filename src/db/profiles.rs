//! Database queries for staff profiles and approvals.

use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::entity::profile::{self, ActiveModel as ProfileActiveModel, Entity as ProfileEntity};
use crate::error::{AppError, AppResult};
use crate::models::{ApprovalStatus, Profile, Role};

use super::DbPool;

/// Convert a stored row into the typed profile.
///
/// Unrecognised role strings fall back to the least privileged role and
/// unrecognised approval states to pending.
fn model_to_profile(m: profile::Model) -> Profile {
    let role = Role::parse(&m.role).unwrap_or_else(|| {
        tracing::warn!(profile_id = %m.id, role = %m.role, "Unknown role in store, treating as teacher");
        Role::Teacher
    });
    let approval_status = ApprovalStatus::parse(&m.approval_status).unwrap_or_default();

    Profile {
        id: m.id,
        user_id: m.user_id,
        full_name: m.full_name,
        role,
        approval_status,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

impl DbPool {
    /// Insert a profile.
    pub async fn insert_profile(
        &self,
        user_id: Uuid,
        full_name: &str,
        role: Role,
        approval_status: ApprovalStatus,
    ) -> AppResult<Profile> {
        let now = Utc::now();
        let model = ProfileActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(user_id),
            full_name: Set(full_name.to_string()),
            role: Set(role.as_str().to_string()),
            approval_status: Set(approval_status.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert profile: {}", e)))?;

        Ok(model_to_profile(result))
    }

    /// Insert a profile unless one already exists for this identity subject.
    ///
    /// Returns the stored row either way; a concurrent insert for the same
    /// `user_id` is absorbed by the unique index instead of failing.
    pub async fn insert_profile_if_absent(
        &self,
        user_id: Uuid,
        full_name: &str,
        role: Role,
        approval_status: ApprovalStatus,
    ) -> AppResult<Profile> {
        let now = Utc::now();
        let model = ProfileActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(user_id),
            full_name: Set(full_name.to_string()),
            role: Set(role.as_str().to_string()),
            approval_status: Set(approval_status.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        ProfileEntity::insert(model)
            .on_conflict(
                OnConflict::column(profile::Column::UserId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert profile: {}", e)))?;

        self.get_profile_by_user_id(user_id)
            .await?
            .ok_or_else(|| AppError::Internal("Profile missing after insert".to_string()))
    }

    /// Get the profile belonging to an identity subject.
    pub async fn get_profile_by_user_id(&self, user_id: Uuid) -> AppResult<Option<Profile>> {
        let result = ProfileEntity::find()
            .filter(profile::Column::UserId.eq(user_id))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get profile: {}", e)))?;

        Ok(result.map(model_to_profile))
    }

    /// Role of a user, if they have a profile.
    pub async fn get_user_role(&self, user_id: Uuid) -> AppResult<Option<Role>> {
        Ok(self.get_profile_by_user_id(user_id).await?.map(|p| p.role))
    }

    /// Profiles for the given identity subjects (author name lookups).
    pub async fn get_profiles_by_user_ids(&self, user_ids: &[Uuid]) -> AppResult<Vec<Profile>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = ProfileEntity::find()
            .filter(profile::Column::UserId.is_in(user_ids.iter().copied()))
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get profiles: {}", e)))?;

        Ok(result.into_iter().map(model_to_profile).collect())
    }

    /// Profiles awaiting approval, newest first.
    pub async fn list_pending_profiles(&self) -> AppResult<Vec<Profile>> {
        let result = ProfileEntity::find()
            .filter(profile::Column::ApprovalStatus.eq(ApprovalStatus::Pending.as_str()))
            .order_by_desc(profile::Column::CreatedAt)
            .order_by_desc(profile::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list pending profiles: {}", e)))?;

        Ok(result.into_iter().map(model_to_profile).collect())
    }

    /// Approved profiles with the teacher role, ordered by name.
    pub async fn list_approved_teachers(&self) -> AppResult<Vec<Profile>> {
        let result = ProfileEntity::find()
            .filter(profile::Column::Role.eq(Role::Teacher.as_str()))
            .filter(profile::Column::ApprovalStatus.eq(ApprovalStatus::Approved.as_str()))
            .order_by_asc(profile::Column::FullName)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list teachers: {}", e)))?;

        Ok(result.into_iter().map(model_to_profile).collect())
    }

    /// Set the approval state and, optionally, the role of a profile.
    ///
    /// Returns None when no profile has this id.
    pub async fn update_profile_approval(
        &self,
        id: Uuid,
        approval_status: ApprovalStatus,
        role: Option<Role>,
    ) -> AppResult<Option<Profile>> {
        let Some(existing) = ProfileEntity::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get profile: {}", e)))?
        else {
            return Ok(None);
        };

        let mut model: ProfileActiveModel = existing.into();
        model.approval_status = Set(approval_status.as_str().to_string());
        if let Some(role) = role {
            model.role = Set(role.as_str().to_string());
        }
        model.updated_at = Set(Utc::now());

        let result = model
            .update(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to update profile: {}", e)))?;

        Ok(Some(model_to_profile(result)))
    }
}
