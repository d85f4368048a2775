//! Migration: Create test_results table.
//!
//! The unique `(test_id, student_id)` index is the conflict target of the marks
//! upsert, so re-saving marks overwrites instead of duplicating.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TestResults::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TestResults::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TestResults::TestId).uuid().not_null())
                    .col(ColumnDef::new(TestResults::StudentId).uuid().not_null())
                    .col(ColumnDef::new(TestResults::MarksObtained).integer().not_null())
                    .col(
                        ColumnDef::new(TestResults::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TestResults::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_test_results_test_id")
                            .from(TestResults::Table, TestResults::TestId)
                            .to(Tests::Table, Tests::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_test_results_student_id")
                            .from(TestResults::Table, TestResults::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_test_results_test_student")
                    .table(TestResults::Table)
                    .col(TestResults::TestId)
                    .col(TestResults::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TestResults::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum TestResults {
    Table,
    Id,
    TestId,
    StudentId,
    MarksObtained,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Tests {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Students {
    Table,
    Id,
}
