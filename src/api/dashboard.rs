//! Role-scoped dashboard reads: classes, students, overview, history, search.

use actix_web::{HttpResponse, get, web};
use chrono::Utc;

use crate::auth::{Capability, SessionAuth};
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{
    DashboardQuery, PREDEFINED_TAGS, RemarkTagsResponse, SearchQuery, SearchResponse, StudentQuery,
};
use crate::services::overview::{self, ClassFilter};
use crate::services::{load_visible_set, search};

/// Configure dashboard routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_classes)
        .service(search_students)
        .service(list_students)
        .service(dashboard_overview)
        .service(class_remarks)
        .service(remark_tags);
}

/// Classes visible to the caller.
#[utoipa::path(
    get,
    path = "/api/v1/classes",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Accessible classes, by number then section", body = Vec<crate::models::Class>),
        (status = 401, description = "Missing or invalid session"),
        (status = 403, description = "Account not approved")
    ),
    security(("bearer_auth" = []))
)]
#[get("/classes")]
pub async fn list_classes(auth: SessionAuth, pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    auth.session.require(Capability::DashboardView)?;
    let classes = crate::services::aggregator::load_accessible_classes(&pool, &auth.session).await?;
    Ok(HttpResponse::Ok().json(classes))
}

/// Students visible to the caller, optionally for one class.
///
/// Asking for a class the caller cannot see yields an empty list.
#[utoipa::path(
    get,
    path = "/api/v1/students",
    tag = "Dashboard",
    params(StudentQuery),
    responses(
        (status = 200, description = "Students with remarks and average rating", body = Vec<crate::models::StudentView>),
        (status = 401, description = "Missing or invalid session"),
        (status = 403, description = "Account not approved")
    ),
    security(("bearer_auth" = []))
)]
#[get("/students")]
pub async fn list_students(
    auth: SessionAuth,
    query: web::Query<StudentQuery>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    auth.session.require(Capability::DashboardView)?;
    let visible = load_visible_set(&pool, &auth.session).await?;

    let section = query.section.as_deref().filter(|s| !s.trim().is_empty());
    let students: Vec<_> = visible
        .students
        .into_iter()
        .filter(|s| query.class_number.is_none_or(|n| s.class.number == n))
        .filter(|s| section.is_none_or(|sec| s.class.section == sec))
        .collect();

    Ok(HttpResponse::Ok().json(students))
}

/// Role-specific dashboard overview.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "Dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Dashboard overview", body = crate::models::DashboardOverview),
        (status = 401, description = "Missing or invalid session"),
        (status = 403, description = "Account not approved")
    ),
    security(("bearer_auth" = []))
)]
#[get("/dashboard")]
pub async fn dashboard_overview(
    auth: SessionAuth,
    query: web::Query<DashboardQuery>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    auth.session.require(Capability::DashboardView)?;
    let visible = load_visible_set(&pool, &auth.session).await?;

    let query = query.into_inner();
    let filter = ClassFilter {
        number: query.class_number,
        section: query.section.filter(|s| !s.trim().is_empty()),
    };
    let overview =
        overview::build_overview(auth.session.role, &visible.classes, &visible.students, &filter);

    Ok(HttpResponse::Ok().json(overview))
}

/// Remark history of one class, grouped by author.
#[utoipa::path(
    get,
    path = "/api/v1/classes/{number}/{section}/remarks",
    tag = "Dashboard",
    params(
        ("number" = i32, Path, description = "Class number"),
        ("section" = String, Path, description = "Class section")
    ),
    responses(
        (status = 200, description = "Class remark history", body = crate::models::ClassRemarksHistory),
        (status = 404, description = "Class not found or not accessible")
    ),
    security(("bearer_auth" = []))
)]
#[get("/classes/{number}/{section}/remarks")]
pub async fn class_remarks(
    auth: SessionAuth,
    path: web::Path<(i32, String)>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    auth.session.require(Capability::DashboardView)?;
    let (number, section) = path.into_inner();
    let visible = load_visible_set(&pool, &auth.session).await?;

    let class = visible
        .class_by_label(number, &section)
        .ok_or_else(|| AppError::NotFound(format!("Class {}-{}", number, section)))?;
    let history = overview::class_remarks_history(class, &visible.students);

    Ok(HttpResponse::Ok().json(history))
}

/// Search students by name, class and tags.
#[utoipa::path(
    get,
    path = "/api/v1/students/search",
    tag = "Dashboard",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching students", body = SearchResponse),
        (status = 403, description = "Role cannot search students")
    ),
    security(("bearer_auth" = []))
)]
#[get("/students/search")]
pub async fn search_students(
    auth: SessionAuth,
    query: web::Query<SearchQuery>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    auth.session.require(Capability::StudentSearch)?;
    let visible = load_visible_set(&pool, &auth.session).await?;

    let students = search::search_students(&visible.students, &query);
    Ok(HttpResponse::Ok().json(SearchResponse {
        total: students.len(),
        available_tags: search::tag_facet(&visible.students),
        students,
        generated_at: Utc::now(),
    }))
}

/// Predefined remark tags.
#[utoipa::path(
    get,
    path = "/api/v1/remark-tags",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Tag catalog", body = RemarkTagsResponse)
    ),
    security(("bearer_auth" = []))
)]
#[get("/remark-tags")]
pub async fn remark_tags(auth: SessionAuth) -> AppResult<HttpResponse> {
    auth.session.require(Capability::RemarkSubmission)?;
    Ok(HttpResponse::Ok().json(RemarkTagsResponse {
        tags: PREDEFINED_TAGS.to_vec(),
    }))
}
