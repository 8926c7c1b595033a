//! Create `grade` table.
//!
//! Grade levels referenced by classes and students.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Grade::Table)
                    .if_not_exists()
                    .col(pk_auto(Grade::Id))
                    .col(integer(Grade::Level).unique_key().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Grade::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Grade { Table, Id, Level }
