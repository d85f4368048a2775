//! Teacher-class-subject assignment models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::class::ClassLabel;

/// Assignment stored in database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeacherClassAssignment {
    pub id: Uuid,
    /// The teacher's `user_id`.
    pub teacher_id: Uuid,
    pub class_id: Uuid,
    pub subject_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Assignment with teacher, class and subject names resolved.
#[derive(Debug, Serialize, ToSchema)]
pub struct AssignmentView {
    pub id: Uuid,
    pub teacher_id: Uuid,
    pub teacher_name: Option<String>,
    pub class_id: Uuid,
    pub class: Option<ClassLabel>,
    pub subject_id: Option<Uuid>,
    pub subject_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Assign one teacher and subject to one or more classes.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAssignmentsRequest {
    pub teacher_id: Option<Uuid>,
    pub subject_id: Option<Uuid>,
    #[serde(default)]
    pub class_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateAssignmentsResponse {
    pub message: String,
    pub assignment_ids: Vec<Uuid>,
}

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ListAssignmentsQuery {
    pub teacher_id: Option<Uuid>,
}
