//! Student models.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::class::ClassLabel;
use super::remark::RemarkView;

/// Student stored in database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    pub roll_number: String,
    pub class_id: Uuid,
}

/// Student with its class label, remarks (newest first) and derived average.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StudentView {
    pub id: Uuid,
    pub name: String,
    pub roll_number: String,
    pub class_id: Uuid,
    pub class: ClassLabel,
    pub remarks: Vec<RemarkView>,
    /// Mean remark rating; 0 when the student has no remarks.
    pub average_rating: f64,
}

impl StudentView {
    /// Union of tags across all of this student's remarks.
    pub fn tag_set(&self) -> std::collections::BTreeSet<&str> {
        self.remarks
            .iter()
            .flat_map(|r| r.tags.iter().map(String::as_str))
            .collect()
    }
}

/// Student row in a class roster (marks entry).
#[derive(Debug, Serialize, ToSchema)]
pub struct RosterEntry {
    pub id: Uuid,
    pub name: String,
    pub roll_number: String,
}

/// Optional class filter for student listings.
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct StudentQuery {
    pub class_number: Option<i32>,
    pub section: Option<String>,
}
