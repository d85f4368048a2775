//! Class and subject models.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Class stored in database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Class {
    pub id: Uuid,
    pub number: i32,
    pub section: String,
    pub created_at: DateTime<Utc>,
}

impl Class {
    pub fn label(&self) -> ClassLabel {
        ClassLabel {
            number: self.number,
            section: self.section.clone(),
        }
    }
}

/// External `(number, section)` label of a class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, ToSchema)]
pub struct ClassLabel {
    pub number: i32,
    pub section: String,
}

impl ClassLabel {
    pub fn matches(&self, number: i32, section: &str) -> bool {
        self.number == number && self.section == section
    }
}

impl std::fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.number, self.section)
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Subject {
    pub id: Uuid,
    pub name: String,
}
