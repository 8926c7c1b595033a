//! Create `lesson` table; its `teacher_id` is the owner consulted by the
//! exam authorization gate.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Lesson::Table)
                    .if_not_exists()
                    .col(pk_auto(Lesson::Id))
                    .col(string_len(Lesson::Name, 128).not_null())
                    .col(string_len(Lesson::Day, 16).not_null())
                    .col(integer(Lesson::SubjectId).not_null())
                    .col(integer(Lesson::ClassId).not_null())
                    .col(string_len(Lesson::TeacherId, 64).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lesson_subject")
                            .from(Lesson::Table, Lesson::SubjectId)
                            .to(Subject::Table, Subject::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lesson_class")
                            .from(Lesson::Table, Lesson::ClassId)
                            .to(Class::Table, Class::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lesson_teacher")
                            .from(Lesson::Table, Lesson::TeacherId)
                            .to(Teacher::Table, Teacher::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Lesson::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Lesson { Table, Id, Name, Day, SubjectId, ClassId, TeacherId }

#[derive(DeriveIden)]
enum Subject { Table, Id }

#[derive(DeriveIden)]
enum Class { Table, Id }

#[derive(DeriveIden)]
enum Teacher { Table, Id }
