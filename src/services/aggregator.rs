//! Role-scoped aggregation of classes, students and remarks.
//!
//! The pure functions here project raw store records into the set a session may
//! see. Teachers see only the classes they are assigned to; every other role
//! sees all classes. When the assignment lookup fails the teacher sees nothing.

use std::collections::{HashMap, HashSet};

use tracing::warn;
use uuid::Uuid;

use crate::auth::Session;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Class, Remark, RemarkView, Role, Student, StudentView, TeacherClassAssignment};

/// Classes and students visible to one session.
#[derive(Debug, Clone, Default)]
pub struct VisibleSet {
    /// Sorted by number, then section.
    pub classes: Vec<Class>,
    pub students: Vec<StudentView>,
}

impl VisibleSet {
    pub fn class_by_label(&self, number: i32, section: &str) -> Option<&Class> {
        self.classes
            .iter()
            .find(|c| c.number == number && c.section == section)
    }
}

/// Classes a role may see.
///
/// `assignments` are matched against `user_id`; rows for other teachers are
/// ignored. Output is deduplicated and sorted by number, then section.
pub fn accessible_classes(
    role: Role,
    user_id: Option<Uuid>,
    all_classes: &[Class],
    assignments: &[TeacherClassAssignment],
) -> Vec<Class> {
    let mut classes: Vec<Class> = if role.sees_all_classes() {
        all_classes.to_vec()
    } else {
        let Some(user_id) = user_id else {
            return Vec::new();
        };
        let assigned: HashSet<Uuid> = assignments
            .iter()
            .filter(|a| a.teacher_id == user_id)
            .map(|a| a.class_id)
            .collect();
        all_classes
            .iter()
            .filter(|c| assigned.contains(&c.id))
            .cloned()
            .collect()
    };

    classes.sort_by(|a, b| a.number.cmp(&b.number).then_with(|| a.section.cmp(&b.section)));
    classes.dedup_by_key(|c| c.id);
    classes
}

/// Mean rating, or 0 when there are no remarks.
pub fn average_rating(remarks: &[RemarkView]) -> f64 {
    if remarks.is_empty() {
        return 0.0;
    }
    let sum: i64 = remarks.iter().map(|r| r.rating as i64).sum();
    sum as f64 / remarks.len() as f64
}

/// Join students with their class and remarks.
///
/// Students outside `classes` are dropped. Remarks are sorted newest first and
/// annotated with the author's name from `authors` (keyed by user id).
pub fn build_student_views(
    classes: &[Class],
    students: Vec<Student>,
    remarks: Vec<Remark>,
    authors: &HashMap<Uuid, String>,
) -> Vec<StudentView> {
    let class_by_id: HashMap<Uuid, &Class> = classes.iter().map(|c| (c.id, c)).collect();

    let mut remarks_by_student: HashMap<Uuid, Vec<RemarkView>> = HashMap::new();
    for remark in remarks {
        let view = RemarkView {
            id: remark.id,
            student_id: remark.student_id,
            teacher_id: remark.teacher_id,
            teacher_name: authors.get(&remark.teacher_id).cloned(),
            rating: remark.rating,
            tags: remark.tags,
            notes: remark.notes,
            created_at: remark.created_at,
        };
        remarks_by_student
            .entry(remark.student_id)
            .or_default()
            .push(view);
    }

    students
        .into_iter()
        .filter_map(|student| {
            let class = class_by_id.get(&student.class_id)?;
            let mut remarks = remarks_by_student.remove(&student.id).unwrap_or_default();
            remarks.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
            let average_rating = average_rating(&remarks);

            Some(StudentView {
                id: student.id,
                name: student.name,
                roll_number: student.roll_number,
                class_id: student.class_id,
                class: class.label(),
                remarks,
                average_rating,
            })
        })
        .collect()
}

/// Classes visible to the session, failing closed for teachers.
pub async fn load_accessible_classes(pool: &DbPool, session: &Session) -> AppResult<Vec<Class>> {
    let all_classes = pool.list_classes().await?;

    if session.role.sees_all_classes() {
        return Ok(accessible_classes(session.role, session.user_id, &all_classes, &[]));
    }

    let Some(user_id) = session.user_id else {
        return Ok(Vec::new());
    };

    let assignments = match pool.list_teacher_classes(Some(user_id)).await {
        Ok(rows) => rows,
        Err(e) => {
            warn!(user_id = %user_id, error = %e, "Assignment lookup failed, showing no classes");
            Vec::new()
        }
    };

    Ok(accessible_classes(
        session.role,
        Some(user_id),
        &all_classes,
        &assignments,
    ))
}

/// Fetch and aggregate everything the session may see.
pub async fn load_visible_set(pool: &DbPool, session: &Session) -> AppResult<VisibleSet> {
    let classes = load_accessible_classes(pool, session).await?;
    if classes.is_empty() {
        return Ok(VisibleSet::default());
    }

    let class_ids: Vec<Uuid> = classes.iter().map(|c| c.id).collect();
    let students = pool.get_students_by_class_ids(&class_ids).await?;
    let student_ids: Vec<Uuid> = students.iter().map(|s| s.id).collect();
    let remarks = pool.get_remarks_by_student_ids(&student_ids).await?;

    let mut author_ids: Vec<Uuid> = remarks.iter().map(|r| r.teacher_id).collect();
    author_ids.sort();
    author_ids.dedup();
    let authors: HashMap<Uuid, String> = pool
        .get_profiles_by_user_ids(&author_ids)
        .await?
        .into_iter()
        .map(|p| (p.user_id, p.full_name))
        .collect();

    let students = build_student_views(&classes, students, remarks, &authors);
    Ok(VisibleSet { classes, students })
}

/// Fail unless the class exists (404) and the session may see it (403).
pub async fn ensure_class_accessible(
    pool: &DbPool,
    session: &Session,
    class_id: Uuid,
) -> AppResult<Class> {
    let class = pool
        .get_class_by_id(class_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Class".to_string()))?;

    let accessible = load_accessible_classes(pool, session).await?;
    if !accessible.iter().any(|c| c.id == class_id) {
        return Err(AppError::Forbidden(format!(
            "Class {} is not assigned to you",
            class.label()
        )));
    }

    Ok(class)
}
