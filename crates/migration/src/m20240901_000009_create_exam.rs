//! Create `exam` table with FK to `lesson`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Exam::Table)
                    .if_not_exists()
                    .col(pk_auto(Exam::Id))
                    .col(string_len(Exam::Title, 255).not_null())
                    .col(timestamp_with_time_zone(Exam::StartTime).not_null())
                    .col(timestamp_with_time_zone(Exam::EndTime).not_null())
                    .col(integer(Exam::LessonId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_exam_lesson")
                            .from(Exam::Table, Exam::LessonId)
                            .to(Lesson::Table, Lesson::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Exam::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Exam { Table, Id, Title, StartTime, EndTime, LessonId }

#[derive(DeriveIden)]
enum Lesson { Table, Id }
