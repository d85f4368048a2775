//! Profile models: roles, approval state and the caller's own profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Closed set of staff roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Teacher,
    Admin,
    Principal,
    Superadmin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Teacher => "teacher",
            Self::Admin => "admin",
            Self::Principal => "principal",
            Self::Superadmin => "superadmin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "teacher" => Some(Self::Teacher),
            "admin" => Some(Self::Admin),
            "principal" => Some(Self::Principal),
            "superadmin" | "super_admin" => Some(Self::Superadmin),
            _ => None,
        }
    }

    /// Human-readable role name shown next to the user's avatar.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Teacher => "Teacher",
            Self::Admin => "Administrator",
            Self::Principal => "Principal",
            Self::Superadmin => "Super Admin",
        }
    }

    /// Admin-tier roles see every class; teachers only their assignments.
    pub fn sees_all_classes(&self) -> bool {
        !matches!(self, Self::Teacher)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sign-up approval state. Only approved profiles reach the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

impl std::fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Profile stored in database.
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub role: Role,
    pub approval_status: ApprovalStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    pub fn is_approved(&self) -> bool {
        self.approval_status == ApprovalStatus::Approved
    }
}

/// Profile as listed in the approvals queue.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub role: Role,
    pub approval_status: ApprovalStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Profile> for ProfileResponse {
    fn from(p: Profile) -> Self {
        Self {
            id: p.id,
            user_id: p.user_id,
            full_name: p.full_name,
            role: p.role,
            approval_status: p.approval_status,
            created_at: p.created_at,
        }
    }
}

/// Caller's own profile (returned by /me), available while pending.
#[derive(Debug, Serialize, ToSchema)]
pub struct MeResponse {
    pub profile: ProfileResponse,
    pub role_display_name: &'static str,
    /// Capabilities granted once approved; empty while pending or rejected.
    pub capabilities: Vec<String>,
}

/// Request to register the caller's profile after sign-up.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterProfileRequest {
    pub full_name: String,
}

/// Request body for approving a pending user.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ApproveUserRequest {
    /// Role to grant: teacher, admin or principal. Keeps the current role when omitted.
    #[serde(default)]
    pub role: Option<String>,
}

/// Approved teacher available for class assignment.
#[derive(Debug, Serialize, ToSchema)]
pub struct TeacherSummary {
    pub user_id: Uuid,
    pub full_name: String,
    pub role: Role,
}
