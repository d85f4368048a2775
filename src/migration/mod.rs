//! SeaORM database migrations.
//!
//! Written against the backend-neutral schema builder so the same migrator
//! runs on PostgreSQL and on the in-memory SQLite used by the test suite.

pub use sea_orm_migration::prelude::*;

mod m20250601_000001_create_profiles;
mod m20250601_000002_create_classes_and_subjects;
mod m20250601_000003_create_students;
mod m20250601_000004_create_remarks;
mod m20250601_000005_create_teacher_classes;
mod m20250601_000007_create_test_results;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_profiles::Migration),
            Box::new(m20250601_000002_create_classes_and_subjects::Migration),
            Box::new(m20250601_000003_create_students::Migration),
            Box::new(m20250601_000004_create_remarks::Migration),
            Box::new(m20250601_000005_create_teacher_classes::Migration),
            Box::new(m20250601_000006_create_tests::Migration),
            Box::new(m20250601_000007_create_test_results::Migration),
        ]
    }
}
