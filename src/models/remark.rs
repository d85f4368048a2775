//! Remark models and the predefined tag catalog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Tags offered by the remarks form. Other tags are accepted but not suggested.
pub const PREDEFINED_TAGS: [&str; 12] = [
    "Disciplined",
    "Needs Attention",
    "Active Participant",
    "Irregular Attendance",
    "Excellent Performance",
    "Improvement Needed",
    "Cooperative",
    "Creative",
    "Leadership Qualities",
    "Respectful",
    "Hardworking",
    "Punctual",
];

/// Lowest and highest star rating.
pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// Remark stored in database.
#[derive(Debug, Clone, PartialEq)]
pub struct Remark {
    pub id: Uuid,
    pub student_id: Uuid,
    pub teacher_id: Uuid,
    pub rating: i32,
    pub tags: Vec<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Remark with its author's display name.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RemarkView {
    pub id: Uuid,
    pub student_id: Uuid,
    pub teacher_id: Uuid,
    /// Author's full name; None when the author has no profile.
    pub teacher_name: Option<String>,
    pub rating: i32,
    pub tags: Vec<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request to submit a remark for a student.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitRemarkRequest {
    /// 1 to 5 stars; 0 means "not selected" and is rejected.
    pub rating: i32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Validated remark ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRemark {
    pub student_id: Uuid,
    pub teacher_id: Uuid,
    pub rating: i32,
    pub tags: Vec<String>,
    pub notes: Option<String>,
}

/// Predefined tag catalog response.
#[derive(Debug, Serialize, ToSchema)]
pub struct RemarkTagsResponse {
    pub tags: Vec<&'static str>,
}
