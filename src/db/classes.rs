//! Database queries for classes and subjects.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use crate::entity::class::{self, ActiveModel as ClassActiveModel, Entity as ClassEntity};
use crate::entity::subject::{self, ActiveModel as SubjectActiveModel, Entity as SubjectEntity};
use crate::error::{AppError, AppResult};
use crate::models::{Class, Subject};

use super::DbPool;

fn model_to_class(m: class::Model) -> Class {
    Class {
        id: m.id,
        number: m.number,
        section: m.section,
        created_at: m.created_at,
    }
}

fn model_to_subject(m: subject::Model) -> Subject {
    Subject {
        id: m.id,
        name: m.name,
    }
}

impl DbPool {
    /// Insert a class.
    pub async fn insert_class(&self, number: i32, section: &str) -> AppResult<Class> {
        let model = ClassActiveModel {
            id: Set(Uuid::now_v7()),
            number: Set(number),
            section: Set(section.to_string()),
            created_at: Set(Utc::now()),
        };

        let result = model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert class: {}", e)))?;

        Ok(model_to_class(result))
    }

    /// All classes, ordered by number then section.
    pub async fn list_classes(&self) -> AppResult<Vec<Class>> {
        let result = ClassEntity::find()
            .order_by_asc(class::Column::Number)
            .order_by_asc(class::Column::Section)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list classes: {}", e)))?;

        Ok(result.into_iter().map(model_to_class).collect())
    }

    /// Get a single class by ID.
    pub async fn get_class_by_id(&self, id: Uuid) -> AppResult<Option<Class>> {
        let result = ClassEntity::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get class: {}", e)))?;

        Ok(result.map(model_to_class))
    }

    /// Insert a subject.
    pub async fn insert_subject(&self, name: &str) -> AppResult<Subject> {
        let model = SubjectActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(name.to_string()),
            created_at: Set(Utc::now()),
        };

        let result = model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert subject: {}", e)))?;

        Ok(model_to_subject(result))
    }

    /// All subjects, ordered by name.
    pub async fn list_subjects(&self) -> AppResult<Vec<Subject>> {
        let result = SubjectEntity::find()
            .order_by_asc(subject::Column::Name)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list subjects: {}", e)))?;

        Ok(result.into_iter().map(model_to_subject).collect())
    }

    pub async fn get_subject_by_id(&self, id: Uuid) -> AppResult<Option<Subject>> {
        let result = SubjectEntity::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get subject: {}", e)))?;

        Ok(result.map(model_to_subject))
    }
}
