//! Remark submission workflow.

use tracing::info;
use uuid::Uuid;

use super::aggregator::{load_accessible_classes, load_visible_set};
use crate::auth::Session;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::remark::{MAX_RATING, MIN_RATING};
use crate::models::{NewRemark, StudentView, SubmitRemarkRequest};

/// Trim tags, drop blanks and collapse duplicates, keeping first-seen order.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
        if !out.iter().any(|seen| seen == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

/// Validate a submission into a remark ready to be written.
pub fn validate_remark(
    student_id: Uuid,
    teacher_id: Uuid,
    request: &SubmitRemarkRequest,
) -> AppResult<NewRemark> {
    if request.rating == 0 {
        return Err(AppError::InvalidInput("Please select a rating".to_string()));
    }
    if !(MIN_RATING..=MAX_RATING).contains(&request.rating) {
        return Err(AppError::InvalidInput(format!(
            "Rating must be between {} and {}",
            MIN_RATING, MAX_RATING
        )));
    }

    let notes = request
        .notes
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string);

    Ok(NewRemark {
        student_id,
        teacher_id,
        rating: request.rating,
        tags: normalize_tags(&request.tags),
        notes,
    })
}

/// Record a remark and return the student re-aggregated from the store.
pub async fn submit_remark(
    pool: &DbPool,
    session: &Session,
    student_id: Uuid,
    request: &SubmitRemarkRequest,
) -> AppResult<StudentView> {
    let teacher_id = session.author_id()?;
    let remark = validate_remark(student_id, teacher_id, request)?;

    let student = pool
        .get_student_by_id(student_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Student".to_string()))?;

    let accessible = load_accessible_classes(pool, session).await?;
    if !accessible.iter().any(|c| c.id == student.class_id) {
        return Err(AppError::Forbidden(
            "You can only add remarks for students in your classes".to_string(),
        ));
    }

    let saved = pool.insert_remark(remark).await?;
    info!(
        remark_id = %saved.id,
        student_id = %student_id,
        rating = saved.rating,
        tags = saved.tags.len(),
        "Remark submitted"
    );

    load_visible_set(pool, session)
        .await?
        .students
        .into_iter()
        .find(|s| s.id == student_id)
        .ok_or_else(|| AppError::NotFound("Student".to_string()))
}
