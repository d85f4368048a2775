//! Domain models for the school remarks server.
//!
//! Raw records mirror the store rows; `*View` types carry the derived fields the
//! dashboard renders (class labels, author names, average ratings).

pub mod assignment;
pub mod class;
pub mod dashboard;
pub mod profile;
pub mod remark;
pub mod student;

// Re-export commonly used types
pub use assignment::{
    AssignmentView, CreateAssignmentsRequest, CreateAssignmentsResponse, ListAssignmentsQuery,
    TeacherClassAssignment,
};
pub use class::{Class, ClassLabel, Subject};
pub use dashboard::{
    ClassRemarkCount, ClassRemarksHistory, ClassStats, DashboardOverview, DashboardQuery,
    DashboardView, RecentRemark, SearchQuery, SearchResponse, TeacherRemarkGroup,
};
pub use profile::{
    ApprovalStatus, ApproveUserRequest, MeResponse, Profile, ProfileResponse,
    RegisterProfileRequest, Role, TeacherSummary,
};
pub use remark::{PREDEFINED_TAGS, NewRemark, Remark, RemarkTagsResponse, RemarkView, SubmitRemarkRequest};
pub use school_test::{
    CreateTestRequest, MarksEntry, ResultStatus, SaveMarksRequest, SaveMarksResponse, SchoolTest,
    StudentResult, TestResult, TestResultsResponse, TestResultsSummary,
};
pub use student::{RosterEntry, Student, StudentQuery, StudentView};

/// Round to a fixed number of decimal places for display.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
