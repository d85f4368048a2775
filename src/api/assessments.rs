//! Test and marks endpoints.

use actix_web::{HttpResponse, get, post, put, web};
use uuid::Uuid;

use crate::auth::{Capability, SessionAuth};
use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::{CreateTestRequest, RosterEntry, SaveMarksRequest, SaveMarksResponse};
use crate::services::assessments;

/// Configure test routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(create_test)
        .service(list_class_tests)
        .service(class_roster)
        .service(save_marks)
        .service(get_test_results);
}

/// Create a test for a class.
#[utoipa::path(
    post,
    path = "/api/v1/tests",
    tag = "Tests",
    request_body = CreateTestRequest,
    responses(
        (status = 201, description = "Test created", body = crate::models::SchoolTest),
        (status = 400, description = "Invalid name or marks"),
        (status = 403, description = "Class is not assigned to you"),
        (status = 404, description = "Class or subject not found")
    ),
    security(("bearer_auth" = []))
)]
#[post("/tests")]
pub async fn create_test(
    auth: SessionAuth,
    body: web::Json<CreateTestRequest>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    auth.session.require(Capability::TestManagement)?;
    let test = assessments::create_test(&pool, &auth.session, &body).await?;
    Ok(HttpResponse::Created().json(test))
}

/// Tests of a class, most recent first.
#[utoipa::path(
    get,
    path = "/api/v1/classes/{class_id}/tests",
    tag = "Tests",
    params(("class_id" = Uuid, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Tests", body = Vec<crate::models::SchoolTest>),
        (status = 403, description = "Class is not assigned to you"),
        (status = 404, description = "Class not found")
    ),
    security(("bearer_auth" = []))
)]
#[get("/classes/{class_id}/tests")]
pub async fn list_class_tests(
    auth: SessionAuth,
    path: web::Path<Uuid>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    auth.session.require(Capability::TestManagement)?;
    let tests = assessments::list_tests(&pool, &auth.session, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(tests))
}

/// Students of a class by roll number, for marks entry.
#[utoipa::path(
    get,
    path = "/api/v1/classes/{class_id}/roster",
    tag = "Tests",
    params(("class_id" = Uuid, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Roster", body = Vec<RosterEntry>),
        (status = 403, description = "Class is not assigned to you"),
        (status = 404, description = "Class not found")
    ),
    security(("bearer_auth" = []))
)]
#[get("/classes/{class_id}/roster")]
pub async fn class_roster(
    auth: SessionAuth,
    path: web::Path<Uuid>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    auth.session.require(Capability::TestManagement)?;
    let roster: Vec<RosterEntry> = assessments::class_roster(&pool, &auth.session, path.into_inner())
        .await?
        .into_iter()
        .map(|s| RosterEntry {
            id: s.id,
            name: s.name,
            roll_number: s.roll_number,
        })
        .collect();
    Ok(HttpResponse::Ok().json(roster))
}

/// Save marks for a test. Re-saving a student's marks overwrites them.
#[utoipa::path(
    put,
    path = "/api/v1/tests/{id}/results",
    tag = "Tests",
    params(("id" = Uuid, Path, description = "Test ID")),
    request_body = SaveMarksRequest,
    responses(
        (status = 200, description = "Marks saved", body = SaveMarksResponse),
        (status = 400, description = "No marks, or marks outside 0..=total"),
        (status = 404, description = "Test not found")
    ),
    security(("bearer_auth" = []))
)]
#[put("/tests/{id}/results")]
pub async fn save_marks(
    auth: SessionAuth,
    path: web::Path<Uuid>,
    body: web::Json<SaveMarksRequest>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    auth.session.require(Capability::TestManagement)?;
    let saved = assessments::save_marks(&pool, &auth.session, path.into_inner(), &body.marks).await?;
    Ok(HttpResponse::Ok().json(SaveMarksResponse {
        message: "Marks saved successfully".to_string(),
        saved,
    }))
}

/// Results of a test with pass/fail status and summary.
#[utoipa::path(
    get,
    path = "/api/v1/tests/{id}/results",
    tag = "Tests",
    params(("id" = Uuid, Path, description = "Test ID")),
    responses(
        (status = 200, description = "Results", body = crate::models::TestResultsResponse),
        (status = 404, description = "Test not found")
    ),
    security(("bearer_auth" = []))
)]
#[get("/tests/{id}/results")]
pub async fn get_test_results(
    auth: SessionAuth,
    path: web::Path<Uuid>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    auth.session.require(Capability::TestManagement)?;
    let results = assessments::get_results(&pool, &auth.session, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(results))
}
