//! Create `class` table with FKs to `grade` and `teacher` (supervisor).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Class::Table)
                    .if_not_exists()
                    .col(pk_auto(Class::Id))
                    .col(string_len(Class::Name, 128).unique_key().not_null())
                    .col(integer(Class::Capacity).not_null())
                    .col(ColumnDef::new(Class::SupervisorId).string_len(64).null())
                    .col(integer(Class::GradeId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_class_grade")
                            .from(Class::Table, Class::GradeId)
                            .to(Grade::Table, Grade::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_class_supervisor")
                            .from(Class::Table, Class::SupervisorId)
                            .to(Teacher::Table, Teacher::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Class::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Class { Table, Id, Name, Capacity, SupervisorId, GradeId }

#[derive(DeriveIden)]
enum Grade { Table, Id }

#[derive(DeriveIden)]
enum Teacher { Table, Id }
