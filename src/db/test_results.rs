//! Database queries for per-student test results.

use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::entity::test_result::{self, ActiveModel as TestResultActiveModel, Entity as TestResultEntity};
use crate::error::{AppError, AppResult};
use crate::models::{MarksEntry, TestResult};

use super::DbPool;

fn model_to_test_result(m: test_result::Model) -> TestResult {
    TestResult {
        test_id: m.test_id,
        student_id: m.student_id,
        marks_obtained: m.marks_obtained,
    }
}

impl DbPool {
    /// Upsert marks for one test in a single statement.
    ///
    /// Rows are keyed on `(test_id, student_id)`; existing rows keep their id and
    /// `created_at` and get the new marks.
    pub async fn upsert_test_results(&self, test_id: Uuid, marks: &[MarksEntry]) -> AppResult<()> {
        if marks.is_empty() {
            return Ok(());
        }

        let now = Utc::now();
        let models = marks.iter().map(|entry| TestResultActiveModel {
            id: Set(Uuid::now_v7()),
            test_id: Set(test_id),
            student_id: Set(entry.student_id),
            marks_obtained: Set(entry.marks_obtained),
            created_at: Set(now),
            updated_at: Set(now),
        });

        TestResultEntity::insert_many(models)
            .on_conflict(
                OnConflict::columns([test_result::Column::TestId, test_result::Column::StudentId])
                    .update_columns([
                        test_result::Column::MarksObtained,
                        test_result::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to save test results: {}", e)))?;

        Ok(())
    }

    /// All results recorded for a test.
    pub async fn get_test_results(&self, test_id: Uuid) -> AppResult<Vec<TestResult>> {
        let result = TestResultEntity::find()
            .filter(test_result::Column::TestId.eq(test_id))
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get test results: {}", e)))?;

        Ok(result.into_iter().map(model_to_test_result).collect())
    }
}
