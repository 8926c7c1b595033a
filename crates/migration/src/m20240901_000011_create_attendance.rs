//! Create `attendance` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Attendance::Table)
                    .if_not_exists()
                    .col(pk_auto(Attendance::Id))
                    .col(string_len(Attendance::ClassName, 128).not_null())
                    .col(date(Attendance::Date).not_null())
                    .col(string_len(Attendance::Day, 16).not_null())
                    .col(integer(Attendance::Present).not_null())
                    .col(integer(Attendance::Total).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Attendance::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Attendance { Table, Id, ClassName, Date, Day, Present, Total }
