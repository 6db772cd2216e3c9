//! Create `section` table.
//! One JSON document per section name; the name is uniquely indexed.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Section::Table)
                    .if_not_exists()
                    .col(uuid(Section::Id).primary_key())
                    .col(string_len(Section::Name, 64).not_null())
                    // nullable: a row without a value reads as absent
                    .col(json_null(Section::Value))
                    .col(timestamp_with_time_zone(Section::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Section::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uniq_section_name")
                    .table(Section::Table)
                    .col(Section::Name)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Section::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Section {
    Table,
    Id,
    Name,
    Value,
    CreatedAt,
    UpdatedAt,
}
