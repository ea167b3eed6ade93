use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Films::Table)
                    .if_not_exists()
                    .col(pk_auto(Films::Id))
                    .col(string_len(Films::Title, 150))
                    .col(integer(Films::YearReleased))
                    .col(string(Films::Rating))
                    .col(integer(Films::Duration))
                    .col(string(Films::Genre))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_films_title")
                    .table(Films::Table)
                    .col(Films::Title)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_films_genre")
                    .table(Films::Table)
                    .col(Films::Genre)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Films::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Films {
    Table,
    Id,
    Title,
    YearReleased,
    Rating,
    Duration,
    Genre,
}
