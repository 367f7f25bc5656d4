use crate::domain::{EpisodeId, SeasonId, SeriesId};
use crate::models::{
    Episode, EpisodeDetail, EpisodeInput, MediaOwner, Season, SeasonInput, Series, SeriesFilter,
    SeriesInput,
};
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::series::SeriesDeletion;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");

        if !in_memory {
            let path_str = db_url.trim_start_matches("sqlite://").trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent()
                && !parent.as_os_str().is_empty()
            {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        // Every pooled connection to `:memory:` would open its own empty database.
        let (max_connections, min_connections) = if in_memory {
            (1, 1)
        } else {
            (max_connections, min_connections)
        };

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        if !in_memory {
            opt.idle_timeout(Duration::from_secs(300))
                .max_lifetime(Duration::from_secs(600));
        }

        let conn = Database::connect(opt).await?;

        conn.execute_unprepared("PRAGMA foreign_keys = ON").await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn series_repo(&self) -> repositories::series::SeriesRepository {
        repositories::series::SeriesRepository::new(self.conn.clone())
    }

    fn season_repo(&self) -> repositories::season::SeasonRepository {
        repositories::season::SeasonRepository::new(self.conn.clone())
    }

    fn episode_repo(&self) -> repositories::episode::EpisodeRepository {
        repositories::episode::EpisodeRepository::new(self.conn.clone())
    }

    // Series

    pub async fn add_series(&self, input: &SeriesInput) -> Result<Series> {
        self.series_repo().insert(input).await
    }

    pub async fn update_series(&self, id: SeriesId, input: &SeriesInput) -> Result<Option<Series>> {
        self.series_repo().update(id.value(), input).await
    }

    pub async fn set_series_cover(&self, id: SeriesId, path: &str) -> Result<()> {
        self.series_repo().set_cover(id.value(), path).await
    }

    pub async fn get_series(&self, id: SeriesId) -> Result<Option<Series>> {
        self.series_repo().get(id.value()).await
    }

    pub async fn get_series_by_slug(&self, slug: &str) -> Result<Option<Series>> {
        self.series_repo().get_by_slug(slug).await
    }

    pub async fn list_series(&self, filter: &SeriesFilter) -> Result<Vec<Series>> {
        self.series_repo().list(filter).await
    }

    pub async fn count_series(&self) -> Result<u64> {
        self.series_repo().count().await
    }

    pub async fn remove_series(&self, id: SeriesId) -> Result<Option<SeriesDeletion>> {
        self.series_repo().remove(id.value()).await
    }

    // Seasons

    pub async fn add_season(&self, input: &SeasonInput) -> Result<Season> {
        self.season_repo().insert(input).await
    }

    pub async fn update_season(&self, id: SeasonId, input: &SeasonInput) -> Result<Option<Season>> {
        self.season_repo().update(id.value(), input).await
    }

    pub async fn set_season_cover(&self, id: SeasonId, path: &str) -> Result<()> {
        self.season_repo().set_cover(id.value(), path).await
    }

    pub async fn get_season(&self, id: SeasonId) -> Result<Option<Season>> {
        self.season_repo().get(id.value()).await
    }

    pub async fn get_season_with_series(&self, id: SeasonId) -> Result<Option<(Season, Series)>> {
        self.season_repo().get_with_series(id.value()).await
    }

    pub async fn list_seasons(&self, series_id: SeriesId) -> Result<Vec<Season>> {
        self.season_repo().list_for_series(series_id.value()).await
    }

    pub async fn remove_season(&self, id: SeasonId) -> Result<Option<u64>> {
        self.season_repo().remove(id.value()).await
    }

    // Episodes

    pub async fn add_episode(&self, input: &EpisodeInput, video_path: &str) -> Result<Episode> {
        self.episode_repo().insert(input, video_path).await
    }

    pub async fn update_episode(
        &self,
        id: EpisodeId,
        input: &EpisodeInput,
    ) -> Result<Option<Episode>> {
        self.episode_repo().update(id.value(), input).await
    }

    pub async fn set_episode_video(&self, id: EpisodeId, path: &str) -> Result<()> {
        self.episode_repo().set_video(id.value(), path).await
    }

    pub async fn get_episode_detail(&self, id: EpisodeId) -> Result<Option<EpisodeDetail>> {
        self.episode_repo().get_detail(id.value()).await
    }

    pub async fn list_episodes(&self, season_id: SeasonId) -> Result<Vec<Episode>> {
        self.episode_repo().list_for_season(season_id.value()).await
    }

    pub async fn remove_episode(&self, id: EpisodeId) -> Result<bool> {
        self.episode_repo().remove(id.value()).await
    }

    // Media

    /// Every record whose media column holds `path`.
    pub async fn media_owners(&self, path: &str) -> Result<Vec<MediaOwner>> {
        let episodes = self.episode_repo().ids_with_video(path).await?;
        let seasons = self.season_repo().ids_with_cover(path).await?;
        let series = self.series_repo().ids_with_cover(path).await?;

        let owners = episodes
            .into_iter()
            .map(|id| MediaOwner::Episode(EpisodeId::new(id)))
            .chain(seasons.into_iter().map(|id| MediaOwner::Season(SeasonId::new(id))))
            .chain(series.into_iter().map(|id| MediaOwner::Series(SeriesId::new(id))))
            .collect();
        Ok(owners)
    }
}
