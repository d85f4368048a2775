//! Teacher assignment endpoints: subjects, teachers and assignment CRUD.

use actix_web::{HttpResponse, delete, get, post, web};
use uuid::Uuid;

use crate::auth::{Capability, SessionAuth};
use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::{CreateAssignmentsRequest, CreateAssignmentsResponse, ListAssignmentsQuery};
use crate::services::assignments;

/// Configure assignment routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_subjects)
        .service(list_teachers)
        .service(list_assignments)
        .service(create_assignments)
        .service(delete_assignment);
}

/// All subjects, by name.
#[utoipa::path(
    get,
    path = "/api/v1/subjects",
    tag = "Assignments",
    responses(
        (status = 200, description = "Subjects", body = Vec<crate::models::Subject>)
    ),
    security(("bearer_auth" = []))
)]
#[get("/subjects")]
pub async fn list_subjects(auth: SessionAuth, pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    auth.session.require(Capability::DashboardView)?;
    Ok(HttpResponse::Ok().json(pool.list_subjects().await?))
}

/// Approved teachers, by name.
#[utoipa::path(
    get,
    path = "/api/v1/teachers",
    tag = "Assignments",
    responses(
        (status = 200, description = "Approved teachers", body = Vec<crate::models::TeacherSummary>),
        (status = 403, description = "Teacher assignment not permitted")
    ),
    security(("bearer_auth" = []), ("admin_key" = []))
)]
#[get("/teachers")]
pub async fn list_teachers(auth: SessionAuth, pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    auth.session.require(Capability::TeacherAssignment)?;
    Ok(HttpResponse::Ok().json(assignments::list_teachers(&pool).await?))
}

/// Assignments with teacher, class and subject names.
#[utoipa::path(
    get,
    path = "/api/v1/assignments",
    tag = "Assignments",
    params(ListAssignmentsQuery),
    responses(
        (status = 200, description = "Assignments, newest first", body = Vec<crate::models::AssignmentView>),
        (status = 403, description = "Teacher assignment not permitted")
    ),
    security(("bearer_auth" = []), ("admin_key" = []))
)]
#[get("/assignments")]
pub async fn list_assignments(
    auth: SessionAuth,
    query: web::Query<ListAssignmentsQuery>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    auth.session.require(Capability::TeacherAssignment)?;
    let views = assignments::list_assignment_views(&pool, query.teacher_id).await?;
    Ok(HttpResponse::Ok().json(views))
}

/// Assign a teacher and subject to one or more classes.
///
/// Inserts run concurrently, one per class. When any fails the response is a
/// 500 listing succeeded and failed class ids; successful rows are kept.
#[utoipa::path(
    post,
    path = "/api/v1/assignments",
    tag = "Assignments",
    request_body = CreateAssignmentsRequest,
    responses(
        (status = 201, description = "Assignments created", body = CreateAssignmentsResponse),
        (status = 400, description = "Teacher, subject or classes missing"),
        (status = 404, description = "Teacher or subject not found"),
        (status = 500, description = "Some inserts failed", body = crate::error::PartialFailureResponse)
    ),
    security(("bearer_auth" = []), ("admin_key" = []))
)]
#[post("/assignments")]
pub async fn create_assignments(
    auth: SessionAuth,
    body: web::Json<CreateAssignmentsRequest>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    auth.session.require(Capability::TeacherAssignment)?;
    let created = assignments::create_assignments(&pool, &body).await?;

    Ok(HttpResponse::Created().json(CreateAssignmentsResponse {
        message: format!("Teacher assigned to {} class(es)", created.len()),
        assignment_ids: created.into_iter().map(|a| a.id).collect(),
    }))
}

/// Remove an assignment.
#[utoipa::path(
    delete,
    path = "/api/v1/assignments/{id}",
    tag = "Assignments",
    params(("id" = Uuid, Path, description = "Assignment ID")),
    responses(
        (status = 204, description = "Assignment removed"),
        (status = 404, description = "Assignment not found")
    ),
    security(("bearer_auth" = []), ("admin_key" = []))
)]
#[delete("/assignments/{id}")]
pub async fn delete_assignment(
    auth: SessionAuth,
    path: web::Path<Uuid>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    auth.session.require(Capability::TeacherAssignment)?;
    assignments::delete_assignment(&pool, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
