//! Create `teacher` table.
//!
//! The primary key is the identity-provider account id (opaque string).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Teacher::Table)
                    .if_not_exists()
                    .col(string_len(Teacher::Id, 64).primary_key())
                    .col(string_len(Teacher::Username, 128).unique_key().not_null())
                    .col(string_len(Teacher::Name, 128).not_null())
                    .col(string_len(Teacher::Surname, 128).not_null())
                    // Contact fields are optional; define nullable columns explicitly
                    .col(ColumnDef::new(Teacher::Email).string_len(255).null())
                    .col(ColumnDef::new(Teacher::Phone).string_len(32).null())
                    .col(string_len(Teacher::Address, 255).not_null())
                    .col(ColumnDef::new(Teacher::Img).string_len(255).null())
                    .col(string_len(Teacher::BloodType, 8).not_null())
                    .col(string_len(Teacher::Sex, 16).not_null())
                    .col(date(Teacher::Birthday).not_null())
                    .col(timestamp_with_time_zone(Teacher::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Teacher::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Teacher { Table, Id, Username, Name, Surname, Email, Phone, Address, Img, BloodType, Sex, Birthday, CreatedAt }
