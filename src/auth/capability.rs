//! Role capability table, evaluated once per session.

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::Role;

/// What a session may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    DashboardView,
    UserManagement,
    TeacherAssignment,
    StudentSearch,
    TestManagement,
    RemarkSubmission,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DashboardView => "dashboard_view",
            Self::UserManagement => "user_management",
            Self::TeacherAssignment => "teacher_assignment",
            Self::StudentSearch => "student_search",
            Self::TestManagement => "test_management",
            Self::RemarkSubmission => "remark_submission",
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

const TEACHER: &[Capability] = &[
    Capability::DashboardView,
    Capability::TestManagement,
    Capability::RemarkSubmission,
];

const PRINCIPAL: &[Capability] = &[
    Capability::DashboardView,
    Capability::StudentSearch,
    Capability::TestManagement,
    Capability::RemarkSubmission,
];

const ADMIN: &[Capability] = &[
    Capability::DashboardView,
    Capability::UserManagement,
    Capability::TeacherAssignment,
    Capability::StudentSearch,
    Capability::TestManagement,
    Capability::RemarkSubmission,
];

/// Capabilities granted to a role.
pub fn capabilities_for(role: Role) -> &'static [Capability] {
    match role {
        Role::Teacher => TEACHER,
        Role::Principal => PRINCIPAL,
        Role::Admin | Role::Superadmin => ADMIN,
    }
}
