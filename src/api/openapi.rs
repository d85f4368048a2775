//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::{api, auth, error, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "School Remarks Server",
        version = "0.3.0",
        description = "API server for the school remarks dashboard: role-scoped class and student views, star-rated remarks, teacher assignments, tests and marks"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::health,
        api::health::ready,
        // Users
        api::users::get_me,
        api::users::register_profile,
        api::users::list_pending_users,
        api::users::approve_user,
        api::users::reject_user,
        // Dashboard
        api::dashboard::list_classes,
        api::dashboard::list_students,
        api::dashboard::dashboard_overview,
        api::dashboard::class_remarks,
        api::dashboard::search_students,
        api::dashboard::remark_tags,
        // Remarks
        api::remarks::submit_remark,
        // Assignments
        api::assignments::list_subjects,
        api::assignments::list_teachers,
        api::assignments::list_assignments,
        api::assignments::create_assignments,
        api::assignments::delete_assignment,
        // Tests
        api::assessments::create_test,
        api::assessments::list_class_tests,
        api::assessments::class_roster,
        api::assessments::save_marks,
        api::assessments::get_test_results,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            error::PartialFailureResponse,
            // Health
            api::health::HealthResponse,
            api::health::ReadyResponse,
            // Users
            models::Role,
            models::ApprovalStatus,
            models::ProfileResponse,
            models::MeResponse,
            models::RegisterProfileRequest,
            models::ApproveUserRequest,
            models::TeacherSummary,
            auth::Capability,
            // Dashboard
            models::Class,
            models::ClassLabel,
            models::Subject,
            models::StudentView,
            models::RemarkView,
            models::DashboardView,
            models::DashboardOverview,
            models::ClassStats,
            models::ClassRemarkCount,
            models::RecentRemark,
            models::ClassRemarksHistory,
            models::TeacherRemarkGroup,
            models::SearchResponse,
            models::RemarkTagsResponse,
            // Remarks
            models::SubmitRemarkRequest,
            // Assignments
            models::AssignmentView,
            models::CreateAssignmentsRequest,
            models::CreateAssignmentsResponse,
            // Tests
            models::SchoolTest,
            models::CreateTestRequest,
            models::MarksEntry,
            models::SaveMarksRequest,
            models::SaveMarksResponse,
            models::ResultStatus,
            models::StudentResult,
            models::TestResultsSummary,
            models::TestResultsResponse,
            models::RosterEntry,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Users", description = "Registration and user approvals"),
        (name = "Dashboard", description = "Role-scoped classes, students, overview and search"),
        (name = "Remarks", description = "Remark submission"),
        (name = "Assignments", description = "Teacher-class-subject assignments"),
        (name = "Tests", description = "Tests, marks entry and results")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Add session and bootstrap key security schemes.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
            components.add_security_scheme(
                "admin_key",
                utoipa::openapi::security::SecurityScheme::ApiKey(
                    utoipa::openapi::security::ApiKey::Header(
                        utoipa::openapi::security::ApiKeyValue::new(crate::config::ADMIN_KEY_HEADER),
                    ),
                ),
            );
        }
    }
}
