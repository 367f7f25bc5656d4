use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_seasons_series_number")
                    .table(Seasons::Table)
                    .col(Seasons::SeriesId)
                    .col(Seasons::Number)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_episodes_season_slug")
                    .table(Episodes::Table)
                    .col(Episodes::SeasonId)
                    .col(Episodes::Slug)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Listing order for episodes within a season.
        manager
            .create_index(
                Index::create()
                    .name("idx_episodes_season_number")
                    .table(Episodes::Table)
                    .col(Episodes::SeasonId)
                    .col(Episodes::Number)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_episodes_season_number")
                    .table(Episodes::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_episodes_season_slug")
                    .table(Episodes::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_seasons_series_number")
                    .table(Seasons::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Seasons {
    Table,
    SeriesId,
    Number,
}

#[derive(DeriveIden)]
enum Episodes {
    Table,
    SeasonId,
    Slug,
    Number,
}
