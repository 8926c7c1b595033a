//! Create `result` table with FKs to `student` and `subject`.
//!
//! Uuid-keyed; delete endpoints treat the id as an opaque string.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ExamResult::Table)
                    .if_not_exists()
                    .col(uuid(ExamResult::Id).primary_key())
                    .col(string_len(ExamResult::StudentId, 64).not_null())
                    .col(integer(ExamResult::SubjectId).not_null())
                    .col(integer(ExamResult::Marks).not_null())
                    .col(string_len(ExamResult::Grade, 8).not_null())
                    .col(timestamp_with_time_zone(ExamResult::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_result_student")
                            .from(ExamResult::Table, ExamResult::StudentId)
                            .to(Student::Table, Student::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_result_subject")
                            .from(ExamResult::Table, ExamResult::SubjectId)
                            .to(Subject::Table, Subject::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ExamResult::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ExamResult {
    #[sea_orm(iden = "result")]
    Table,
    Id,
    StudentId,
    SubjectId,
    Marks,
    Grade,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Student { Table, Id }

#[derive(DeriveIden)]
enum Subject { Table, Id }
