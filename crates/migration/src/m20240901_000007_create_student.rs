//! Create `student` table with FKs to `grade`, `class`, `parent`.
//!
//! Class membership is capacity-checked at the service layer before insert.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Student::Table)
                    .if_not_exists()
                    .col(string_len(Student::Id, 64).primary_key())
                    .col(string_len(Student::Username, 128).unique_key().not_null())
                    .col(string_len(Student::Name, 128).not_null())
                    .col(string_len(Student::Surname, 128).not_null())
                    .col(ColumnDef::new(Student::Email).string_len(255).null())
                    .col(ColumnDef::new(Student::Phone).string_len(32).null())
                    .col(string_len(Student::Address, 255).not_null())
                    .col(ColumnDef::new(Student::Img).string_len(255).null())
                    .col(string_len(Student::BloodType, 8).not_null())
                    .col(string_len(Student::Sex, 16).not_null())
                    .col(date(Student::Birthday).not_null())
                    .col(integer(Student::GradeId).not_null())
                    .col(integer(Student::ClassId).not_null())
                    .col(string_len(Student::ParentId, 64).not_null())
                    .col(timestamp_with_time_zone(Student::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_grade")
                            .from(Student::Table, Student::GradeId)
                            .to(Grade::Table, Grade::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_class")
                            .from(Student::Table, Student::ClassId)
                            .to(Class::Table, Class::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_parent")
                            .from(Student::Table, Student::ParentId)
                            .to(Parent::Table, Parent::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Student::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Student { Table, Id, Username, Name, Surname, Email, Phone, Address, Img, BloodType, Sex, Birthday, GradeId, ClassId, ParentId, CreatedAt }

#[derive(DeriveIden)]
enum Grade { Table, Id }

#[derive(DeriveIden)]
enum Class { Table, Id }

#[derive(DeriveIden)]
enum Parent { Table, Id }
