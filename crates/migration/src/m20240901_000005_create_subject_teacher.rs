//! Create `subject_teacher` join table (composite primary key).
//!
//! Carries the replace-semantics assignment set between subjects and teachers.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SubjectTeacher::Table)
                    .if_not_exists()
                    .col(integer(SubjectTeacher::SubjectId).not_null())
                    .col(string_len(SubjectTeacher::TeacherId, 64).not_null())
                    .primary_key(
                        Index::create()
                            .col(SubjectTeacher::SubjectId)
                            .col(SubjectTeacher::TeacherId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subject_teacher_subject")
                            .from(SubjectTeacher::Table, SubjectTeacher::SubjectId)
                            .to(Subject::Table, Subject::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subject_teacher_teacher")
                            .from(SubjectTeacher::Table, SubjectTeacher::TeacherId)
                            .to(Teacher::Table, Teacher::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(SubjectTeacher::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum SubjectTeacher { Table, SubjectId, TeacherId }

#[derive(DeriveIden)]
enum Subject { Table, Id }

#[derive(DeriveIden)]
enum Teacher { Table, Id }
