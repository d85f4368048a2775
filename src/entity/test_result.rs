//! Test result entity: one row per (test, student) pair.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "test_results")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub test_id: Uuid,
    pub student_id: Uuid,
    pub marks_obtained: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::school_test::Entity",
        from = "Column::TestId",
        to = "super::school_test::Column::Id",
        on_delete = "Cascade"
    )]
    SchoolTest,
}

impl Related<super::school_test::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SchoolTest.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
