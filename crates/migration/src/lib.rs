//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240901_000001_create_grade;
mod m20240901_000002_create_subject;
mod m20240901_000003_create_teacher;
mod m20240901_000004_create_class;
mod m20240901_000005_create_subject_teacher;
mod m20240901_000006_create_parent;
mod m20240901_000007_create_student;
mod m20240901_000008_create_lesson;
mod m20240901_000009_create_exam;
mod m20240901_000010_create_result;
mod m20240901_000011_create_attendance;
mod m20240901_000012_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240901_000001_create_grade::Migration),
            Box::new(m20240901_000002_create_subject::Migration),
            Box::new(m20240901_000003_create_teacher::Migration),
            Box::new(m20240901_000004_create_class::Migration),
            Box::new(m20240901_000005_create_subject_teacher::Migration),
            Box::new(m20240901_000006_create_parent::Migration),
            Box::new(m20240901_000007_create_student::Migration),
            Box::new(m20240901_000008_create_lesson::Migration),
            Box::new(m20240901_000009_create_exam::Migration),
            Box::new(m20240901_000010_create_result::Migration),
            Box::new(m20240901_000011_create_attendance::Migration),
            // Indexes should always be applied last
            Box::new(m20240901_000012_add_indexes::Migration),
        ]
    }
}
