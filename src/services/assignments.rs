//! Teacher-class-subject assignment workflow.
//!
//! A create request fans out into one insert per class, run concurrently. The
//! batch is best-effort: rows that were written stay written even when a
//! sibling insert fails, and the caller gets a partial-failure error naming
//! both sides.

use std::collections::HashMap;

use futures_util::future::join_all;
use tracing::{info, warn};
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{
    AssignmentView, CreateAssignmentsRequest, Role, TeacherClassAssignment, TeacherSummary,
};

/// Validated create request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentBatch {
    pub teacher_id: Uuid,
    pub subject_id: Uuid,
    /// Distinct, in request order.
    pub class_ids: Vec<Uuid>,
}

pub fn validate_assignment_request(request: &CreateAssignmentsRequest) -> AppResult<AssignmentBatch> {
    let teacher_id = request
        .teacher_id
        .ok_or_else(|| AppError::InvalidInput("Please select a teacher".to_string()))?;
    let subject_id = request
        .subject_id
        .ok_or_else(|| AppError::InvalidInput("Please select a subject".to_string()))?;

    let mut class_ids: Vec<Uuid> = Vec::with_capacity(request.class_ids.len());
    for id in &request.class_ids {
        if !class_ids.contains(id) {
            class_ids.push(*id);
        }
    }
    if class_ids.is_empty() {
        return Err(AppError::InvalidInput(
            "Please select at least one class".to_string(),
        ));
    }

    Ok(AssignmentBatch {
        teacher_id,
        subject_id,
        class_ids,
    })
}

/// Fold per-class insert outcomes into the batch result.
pub fn collect_batch_outcome<T>(outcomes: Vec<(Uuid, AppResult<T>)>) -> AppResult<Vec<T>> {
    let mut written = Vec::new();
    let mut succeeded = Vec::new();
    let mut failed = Vec::new();

    for (class_id, outcome) in outcomes {
        match outcome {
            Ok(value) => {
                succeeded.push(class_id);
                written.push(value);
            }
            Err(e) => {
                warn!(class_id = %class_id, error = %e, "Assignment insert failed");
                failed.push(class_id);
            }
        }
    }

    if failed.is_empty() {
        Ok(written)
    } else {
        Err(AppError::PartialFailure { succeeded, failed })
    }
}

/// Create one assignment per class.
pub async fn create_assignments(
    pool: &DbPool,
    request: &CreateAssignmentsRequest,
) -> AppResult<Vec<TeacherClassAssignment>> {
    let batch = validate_assignment_request(request)?;

    let teacher = pool
        .get_profile_by_user_id(batch.teacher_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Teacher".to_string()))?;
    if !teacher.is_approved() {
        return Err(AppError::InvalidInput(format!(
            "{} has not been approved yet",
            teacher.full_name
        )));
    }
    pool.get_subject_by_id(batch.subject_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Subject".to_string()))?;

    let (teacher_id, subject_id) = (batch.teacher_id, batch.subject_id);
    let inserts = batch.class_ids.iter().map(|&class_id| async move {
        let outcome = pool
            .insert_teacher_class(teacher_id, class_id, Some(subject_id))
            .await;
        (class_id, outcome)
    });
    let outcomes = join_all(inserts).await;

    let created = collect_batch_outcome(outcomes)?;
    info!(
        teacher_id = %teacher_id,
        subject_id = %subject_id,
        count = created.len(),
        "Teacher assigned to classes"
    );
    Ok(created)
}

/// Assignments enriched with teacher, class and subject names.
pub async fn list_assignment_views(
    pool: &DbPool,
    teacher_id: Option<Uuid>,
) -> AppResult<Vec<AssignmentView>> {
    let assignments = pool.list_teacher_classes(teacher_id).await?;

    let mut teacher_ids: Vec<Uuid> = assignments.iter().map(|a| a.teacher_id).collect();
    teacher_ids.sort();
    teacher_ids.dedup();
    let teachers: HashMap<Uuid, String> = pool
        .get_profiles_by_user_ids(&teacher_ids)
        .await?
        .into_iter()
        .map(|p| (p.user_id, p.full_name))
        .collect();
    let classes: HashMap<Uuid, _> = pool
        .list_classes()
        .await?
        .into_iter()
        .map(|c| (c.id, c.label()))
        .collect();
    let subjects: HashMap<Uuid, String> = pool
        .list_subjects()
        .await?
        .into_iter()
        .map(|s| (s.id, s.name))
        .collect();

    Ok(assignments
        .into_iter()
        .map(|a| AssignmentView {
            id: a.id,
            teacher_id: a.teacher_id,
            teacher_name: teachers.get(&a.teacher_id).cloned(),
            class_id: a.class_id,
            class: classes.get(&a.class_id).cloned(),
            subject_id: a.subject_id,
            subject_name: a.subject_id.and_then(|id| subjects.get(&id).cloned()),
            created_at: a.created_at,
        })
        .collect())
}

/// Delete an assignment; 404 when it does not exist.
pub async fn delete_assignment(pool: &DbPool, id: Uuid) -> AppResult<()> {
    if !pool.delete_teacher_class(id).await? {
        return Err(AppError::NotFound("Assignment".to_string()));
    }
    info!(assignment_id = %id, "Assignment deleted");
    Ok(())
}

/// Approved teachers available for assignment, by name.
pub async fn list_teachers(pool: &DbPool) -> AppResult<Vec<TeacherSummary>> {
    Ok(pool
        .list_approved_teachers()
        .await?
        .into_iter()
        .map(|p| TeacherSummary {
            user_id: p.user_id,
            full_name: p.full_name,
            role: Role::Teacher,
        })
        .collect())
}
