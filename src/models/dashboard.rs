//! Dashboard overview, class history and search response models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::class::ClassLabel;
use super::remark::RemarkView;
use super::student::StudentView;

/// Which dashboard layout the caller gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DashboardView {
    Teacher,
    Admin,
}

/// Per-class statistics card.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClassStats {
    pub id: Uuid,
    pub number: i32,
    pub section: String,
    pub student_count: usize,
    pub total_remarks: usize,
    /// Mean of the class's student averages; 0 for an empty class.
    pub average_rating: f64,
}

/// Remark count per class number (chart series).
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ClassRemarkCount {
    pub class_number: i32,
    pub count: usize,
}

/// Remark annotated with the student it is about.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecentRemark {
    #[serde(flatten)]
    pub remark: RemarkView,
    pub student_name: String,
    pub student_roll_number: String,
    pub class: ClassLabel,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardOverview {
    pub view: DashboardView,
    pub role_display_name: &'static str,
    pub total_students: usize,
    pub total_classes: usize,
    pub total_remarks: usize,
    /// Mean of student averages, one decimal place.
    pub average_rating: f64,
    pub class_stats: Vec<ClassStats>,
    pub remarks_by_class: Vec<ClassRemarkCount>,
    /// Latest remarks, newest first (8 for admins, 3 for teachers).
    pub recent_remarks: Vec<RecentRemark>,
}

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct DashboardQuery {
    /// Restrict recent remarks to one class.
    pub class_number: Option<i32>,
    pub section: Option<String>,
}

/// Remarks written by one author for a class.
#[derive(Debug, Serialize, ToSchema)]
pub struct TeacherRemarkGroup {
    pub teacher_name: String,
    pub remarks: Vec<RecentRemark>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClassRemarksHistory {
    pub class: ClassLabel,
    pub total_remarks: usize,
    /// All remarks of the class, newest first.
    pub remarks: Vec<RecentRemark>,
    /// Same remarks grouped by author, ordered by author name.
    pub by_teacher: Vec<TeacherRemarkGroup>,
}

/// Student search filters.
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct SearchQuery {
    /// Case-insensitive name substring.
    pub q: Option<String>,
    pub class_number: Option<i32>,
    pub section: Option<String>,
    /// Comma-separated tags; a student must carry all of them.
    pub tags: Option<String>,
}

impl SearchQuery {
    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SearchResponse {
    pub students: Vec<StudentView>,
    pub total: usize,
    /// Sorted union of tags used in the caller's visible remarks.
    pub available_tags: Vec<String>,
    pub generated_at: DateTime<Utc>,
}
