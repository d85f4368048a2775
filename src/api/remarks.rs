//! Remark submission endpoint.

use actix_web::{HttpResponse, post, web};
use uuid::Uuid;

use crate::auth::{Capability, SessionAuth};
use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::SubmitRemarkRequest;
use crate::services::remarks;

/// Configure remark routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(submit_remark);
}

/// Add a remark for a student.
///
/// POST /api/v1/students/{id}/remarks
/// Returns the student re-aggregated with the new remark.
#[utoipa::path(
    post,
    path = "/api/v1/students/{id}/remarks",
    tag = "Remarks",
    params(("id" = Uuid, Path, description = "Student ID")),
    request_body = SubmitRemarkRequest,
    responses(
        (status = 201, description = "Remark recorded", body = crate::models::StudentView),
        (status = 400, description = "Rating missing or out of range"),
        (status = 403, description = "Student is not in one of your classes"),
        (status = 404, description = "Student not found")
    ),
    security(("bearer_auth" = []))
)]
#[post("/students/{id}/remarks")]
pub async fn submit_remark(
    auth: SessionAuth,
    path: web::Path<Uuid>,
    body: web::Json<SubmitRemarkRequest>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    auth.session.require(Capability::RemarkSubmission)?;
    let student = remarks::submit_remark(&pool, &auth.session, path.into_inner(), &body).await?;
    Ok(HttpResponse::Created().json(student))
}
