use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DiscordMember::Table)
                    .if_not_exists()
                    .col(string(DiscordMember::DiscordId).primary_key())
                    .col(date_null(DiscordMember::Birthday))
                    .col(boolean(DiscordMember::HasBirthYear).default(false))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DiscordMember::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum DiscordMember {
    Table,
    DiscordId,
    Birthday,
    HasBirthYear,
}
