//! Database queries for teacher-class-subject assignments.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::entity::teacher_class::{
    self, ActiveModel as TeacherClassActiveModel, Entity as TeacherClassEntity,
};
use crate::error::{AppError, AppResult};
use crate::models::TeacherClassAssignment;

use super::DbPool;

fn model_to_assignment(m: teacher_class::Model) -> TeacherClassAssignment {
    TeacherClassAssignment {
        id: m.id,
        teacher_id: m.teacher_id,
        class_id: m.class_id,
        subject_id: m.subject_id,
        created_at: m.created_at,
    }
}

impl DbPool {
    /// Insert one assignment row.
    pub async fn insert_teacher_class(
        &self,
        teacher_id: Uuid,
        class_id: Uuid,
        subject_id: Option<Uuid>,
    ) -> AppResult<TeacherClassAssignment> {
        let model = TeacherClassActiveModel {
            id: Set(Uuid::now_v7()),
            teacher_id: Set(teacher_id),
            class_id: Set(class_id),
            subject_id: Set(subject_id),
            created_at: Set(Utc::now()),
        };

        let result = model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert assignment: {}", e)))?;

        Ok(model_to_assignment(result))
    }

    /// Assignments, newest first, optionally for one teacher.
    pub async fn list_teacher_classes(
        &self,
        teacher_id: Option<Uuid>,
    ) -> AppResult<Vec<TeacherClassAssignment>> {
        let mut select = TeacherClassEntity::find();

        if let Some(teacher_id) = teacher_id {
            select = select.filter(teacher_class::Column::TeacherId.eq(teacher_id));
        }

        let result = select
            .order_by_desc(teacher_class::Column::CreatedAt)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list assignments: {}", e)))?;

        Ok(result.into_iter().map(model_to_assignment).collect())
    }

    /// Delete an assignment. Returns false when it did not exist.
    pub async fn delete_teacher_class(&self, id: Uuid) -> AppResult<bool> {
        let result = TeacherClassEntity::delete_by_id(id)
            .exec(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete assignment: {}", e)))?;

        Ok(result.rows_affected > 0)
    }
}
