//! Database queries for students.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::entity::student::{self, ActiveModel as StudentActiveModel, Entity as StudentEntity};
use crate::error::{AppError, AppResult};
use crate::models::Student;

use super::DbPool;

fn model_to_student(m: student::Model) -> Student {
    Student {
        id: m.id,
        name: m.name,
        roll_number: m.roll_number,
        class_id: m.class_id,
    }
}

impl DbPool {
    /// Insert a student into a class.
    pub async fn insert_student(
        &self,
        class_id: Uuid,
        name: &str,
        roll_number: &str,
    ) -> AppResult<Student> {
        let model = StudentActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(name.to_string()),
            roll_number: Set(roll_number.to_string()),
            class_id: Set(class_id),
            created_at: Set(Utc::now()),
        };

        let result = model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert student: {}", e)))?;

        Ok(model_to_student(result))
    }

    /// Get a single student by ID.
    pub async fn get_student_by_id(&self, id: Uuid) -> AppResult<Option<Student>> {
        let result = StudentEntity::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get student: {}", e)))?;

        Ok(result.map(model_to_student))
    }

    /// Students of the given classes, ordered by name.
    pub async fn get_students_by_class_ids(&self, class_ids: &[Uuid]) -> AppResult<Vec<Student>> {
        if class_ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = StudentEntity::find()
            .filter(student::Column::ClassId.is_in(class_ids.iter().copied()))
            .order_by_asc(student::Column::Name)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get students: {}", e)))?;

        Ok(result.into_iter().map(model_to_student).collect())
    }

    /// Students of one class ordered by roll number (marks entry roster).
    pub async fn get_class_roster(&self, class_id: Uuid) -> AppResult<Vec<Student>> {
        let result = StudentEntity::find()
            .filter(student::Column::ClassId.eq(class_id))
            .order_by_asc(student::Column::RollNumber)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get class roster: {}", e)))?;

        Ok(result.into_iter().map(model_to_student).collect())
    }

    pub async fn get_students_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Student>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = StudentEntity::find()
            .filter(student::Column::Id.is_in(ids.iter().copied()))
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get students: {}", e)))?;

        Ok(result.into_iter().map(model_to_student).collect())
    }
}
