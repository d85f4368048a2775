//! Database queries for remarks.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::entity::remark::{self, ActiveModel as RemarkActiveModel, Entity as RemarkEntity};
use crate::error::{AppError, AppResult};
use crate::models::{NewRemark, Remark};

use super::DbPool;

fn model_to_remark(m: remark::Model) -> Remark {
    let tags = match serde_json::from_value::<Vec<String>>(m.tags) {
        Ok(tags) => tags,
        Err(e) => {
            tracing::warn!(remark_id = %m.id, error = %e, "Malformed remark tags, ignoring");
            Vec::new()
        }
    };

    Remark {
        id: m.id,
        student_id: m.student_id,
        teacher_id: m.teacher_id,
        rating: m.rating,
        tags,
        notes: m.notes,
        created_at: m.created_at,
    }
}

impl DbPool {
    /// Insert a validated remark.
    pub async fn insert_remark(&self, remark: NewRemark) -> AppResult<Remark> {
        let model = RemarkActiveModel {
            id: Set(Uuid::now_v7()),
            student_id: Set(remark.student_id),
            teacher_id: Set(remark.teacher_id),
            rating: Set(remark.rating),
            tags: Set(serde_json::to_value(&remark.tags)?),
            notes: Set(remark.notes),
            created_at: Set(Utc::now()),
        };

        let result = model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert remark: {}", e)))?;

        Ok(model_to_remark(result))
    }

    /// Remarks about the given students, newest first.
    pub async fn get_remarks_by_student_ids(&self, student_ids: &[Uuid]) -> AppResult<Vec<Remark>> {
        if student_ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = RemarkEntity::find()
            .filter(remark::Column::StudentId.is_in(student_ids.iter().copied()))
            .order_by_desc(remark::Column::CreatedAt)
            .order_by_desc(remark::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get remarks: {}", e)))?;

        Ok(result.into_iter().map(model_to_remark).collect())
    }
}
