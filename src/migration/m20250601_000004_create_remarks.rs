//! Migration: Create remarks table.
//!
//! Tags are a JSON array so the column is portable across backends.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Remarks::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Remarks::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Remarks::StudentId).uuid().not_null())
                    .col(ColumnDef::new(Remarks::TeacherId).uuid().not_null())
                    .col(
                        ColumnDef::new(Remarks::Rating)
                            .integer()
                            .not_null()
                            .check(Expr::col(Remarks::Rating).between(1, 5)),
                    )
                    .col(ColumnDef::new(Remarks::Tags).json().not_null())
                    .col(ColumnDef::new(Remarks::Notes).text())
                    .col(
                        ColumnDef::new(Remarks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_remarks_student_id")
                            .from(Remarks::Table, Remarks::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_remarks_student_id")
                    .table(Remarks::Table)
                    .col(Remarks::StudentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Remarks::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Remarks {
    Table,
    Id,
    StudentId,
    TeacherId,
    Rating,
    Tags,
    Notes,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Students {
    Table,
    Id,
}
