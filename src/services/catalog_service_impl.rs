//! `SeaORM` implementation of the [`CatalogService`] trait.

use crate::config::Config;
use crate::constants::limits::MAX_LIST_LIMIT;
use crate::db::Store;
use crate::domain::paths::{episode_video_path, season_cover_path, series_cover_path};
use crate::domain::{EpisodeId, SeasonId, SeriesId};
use crate::models::{
    Episode, EpisodeDetail, EpisodeInput, MediaOwner, Season, SeasonInput, Series, SeriesFilter,
    SeriesInput, Upload,
};
use crate::services::catalog_service::{CatalogError, CatalogService, DeletionSummary, Entity};
use crate::services::storage::MediaStorage;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

pub struct SeaOrmCatalogService {
    store: Store,
    media: Arc<MediaStorage>,
    config: Arc<RwLock<Config>>,
}

impl SeaOrmCatalogService {
    #[must_use]
    pub const fn new(store: Store, media: Arc<MediaStorage>, config: Arc<RwLock<Config>>) -> Self {
        Self {
            store,
            media,
            config,
        }
    }

    async fn season_label(&self) -> String {
        self.config.read().await.catalog.season_label.clone()
    }

    async fn require_series(&self, id: SeriesId) -> Result<Series, CatalogError> {
        self.store
            .get_series(id)
            .await?
            .ok_or_else(|| CatalogError::not_found(Entity::Series, id))
    }

    async fn require_season(&self, id: SeasonId) -> Result<(Season, Series), CatalogError> {
        self.store
            .get_season_with_series(id)
            .await?
            .ok_or_else(|| CatalogError::not_found(Entity::Season, id))
    }

    async fn require_episode(&self, id: EpisodeId) -> Result<EpisodeDetail, CatalogError> {
        self.store
            .get_episode_detail(id)
            .await?
            .ok_or_else(|| CatalogError::not_found(Entity::Episode, id))
    }

    /// Rejects a write to `path` when a record other than `writer` points at it.
    ///
    /// Paths are deterministic, and a record keeps its stored path when its
    /// slug or number changes, so a sibling created later can resolve to it.
    async fn ensure_path_free(
        &self,
        path: &str,
        writer: Option<MediaOwner>,
    ) -> Result<(), CatalogError> {
        let owners = self.store.media_owners(path).await?;
        let Some(owner) = owners.into_iter().find(|owner| Some(*owner) != writer) else {
            return Ok(());
        };

        warn!(path = %path, owner = %owner, "Rejected upload onto a stored file");
        metrics::counter!("catalog_conflicts_total", "reason" => "media_path").increment(1);
        Err(CatalogError::Conflict(format!("'{path}' already holds the media of {owner}")))
    }

    async fn store_file(
        &self,
        kind: &'static str,
        relative: &str,
        upload: Upload,
    ) -> Result<(), CatalogError> {
        let size = upload.size;
        self.media
            .save(relative, upload)
            .await
            .map_err(|e| CatalogError::Storage(format!("{e:#}")))?;

        metrics::counter!("catalog_media_stored_total", "kind" => kind).increment(1);
        metrics::counter!("catalog_media_stored_bytes_total", "kind" => kind).increment(size);
        Ok(())
    }
}

fn classify(err: &anyhow::Error, conflict: impl FnOnce() -> String) -> CatalogError {
    let classified = CatalogError::from_write(err, conflict);
    match &classified {
        CatalogError::Conflict(message) => {
            warn!("Rejected write: {message}");
            metrics::counter!("catalog_conflicts_total", "reason" => "unique_key").increment(1);
        }
        _ => error!(error = %format!("{err:#}"), "Catalog write failed"),
    }
    classified
}

fn record_cascade(summary: &DeletionSummary) {
    let deleted = [
        ("series", summary.series),
        ("season", summary.seasons),
        ("episode", summary.episodes),
    ];
    for (entity, rows) in deleted {
        metrics::counter!("catalog_deleted_rows_total", "entity" => entity).increment(rows);
    }
}

fn series_slug_taken(slug: &str) -> String {
    format!("a series with slug '{slug}' already exists")
}

fn season_number_taken(series_id: SeriesId, number: i32) -> String {
    format!("series {series_id} already has season {number}")
}

fn episode_slug_taken(season_id: SeasonId, slug: &str) -> String {
    format!("season {season_id} already has an episode with slug '{slug}'")
}

#[async_trait::async_trait]
impl CatalogService for SeaOrmCatalogService {
    async fn create_series(&self, mut input: SeriesInput) -> Result<Series, CatalogError> {
        input.normalize()?;

        self.store
            .add_series(&input)
            .await
            .map_err(|e| classify(&e, || series_slug_taken(&input.slug)))
    }

    async fn update_series(
        &self,
        id: SeriesId,
        mut input: SeriesInput,
    ) -> Result<Series, CatalogError> {
        input.normalize()?;

        self.store
            .update_series(id, &input)
            .await
            .map_err(|e| classify(&e, || series_slug_taken(&input.slug)))?
            .ok_or_else(|| CatalogError::not_found(Entity::Series, id))
    }

    async fn get_series(&self, id: SeriesId) -> Result<Series, CatalogError> {
        self.require_series(id).await
    }

    async fn get_series_by_slug(&self, slug: &str) -> Result<Series, CatalogError> {
        self.store
            .get_series_by_slug(slug)
            .await?
            .ok_or_else(|| CatalogError::not_found(Entity::Series, slug))
    }

    async fn list_series(&self, mut filter: SeriesFilter) -> Result<Vec<Series>, CatalogError> {
        filter.limit = filter.limit.map(|limit| limit.min(MAX_LIST_LIMIT));
        Ok(self.store.list_series(&filter).await?)
    }

    async fn delete_series(&self, id: SeriesId) -> Result<DeletionSummary, CatalogError> {
        let summary = self
            .store
            .remove_series(id)
            .await?
            .map(DeletionSummary::from)
            .ok_or_else(|| CatalogError::not_found(Entity::Series, id))?;

        record_cascade(&summary);
        Ok(summary)
    }

    async fn set_series_cover(&self, id: SeriesId, cover: Upload) -> Result<Series, CatalogError> {
        cover.validate("cover")?;
        let series = self.require_series(id).await?;

        let path = series_cover_path(&series.slug, &cover.filename);
        debug!(series_id = %id, path = %path, "Resolved series cover path");

        self.ensure_path_free(&path, Some(MediaOwner::Series(id))).await?;
        self.store_file("cover", &path, cover).await?;
        self.store.set_series_cover(id, &path).await?;

        self.require_series(id).await
    }

    async fn create_season(&self, mut input: SeasonInput) -> Result<Season, CatalogError> {
        input.normalize(&self.season_label().await)?;
        self.require_series(input.series_id).await?;

        self.store
            .add_season(&input)
            .await
            .map_err(|e| classify(&e, || season_number_taken(input.series_id, input.number)))
    }

    async fn update_season(
        &self,
        id: SeasonId,
        mut input: SeasonInput,
    ) -> Result<Season, CatalogError> {
        input.normalize(&self.season_label().await)?;

        let current = self
            .store
            .get_season(id)
            .await?
            .ok_or_else(|| CatalogError::not_found(Entity::Season, id))?;

        if current.series_id != input.series_id {
            self.require_series(input.series_id).await?;
            info!(
                season_id = %id,
                from = %current.series_id,
                to = %input.series_id,
                "Moving season to another series"
            );
        }

        self.store
            .update_season(id, &input)
            .await
            .map_err(|e| classify(&e, || season_number_taken(input.series_id, input.number)))?
            .ok_or_else(|| CatalogError::not_found(Entity::Season, id))
    }

    async fn get_season(&self, id: SeasonId) -> Result<Season, CatalogError> {
        self.store
            .get_season(id)
            .await?
            .ok_or_else(|| CatalogError::not_found(Entity::Season, id))
    }

    async fn list_seasons(&self, series_id: SeriesId) -> Result<Vec<Season>, CatalogError> {
        self.require_series(series_id).await?;
        Ok(self.store.list_seasons(series_id).await?)
    }

    async fn delete_season(&self, id: SeasonId) -> Result<DeletionSummary, CatalogError> {
        let episodes = self
            .store
            .remove_season(id)
            .await?
            .ok_or_else(|| CatalogError::not_found(Entity::Season, id))?;

        let summary = DeletionSummary {
            series: 0,
            seasons: 1,
            episodes,
        };
        record_cascade(&summary);
        Ok(summary)
    }

    async fn set_season_cover(&self, id: SeasonId, cover: Upload) -> Result<Season, CatalogError> {
        cover.validate("cover")?;
        let (season, series) = self.require_season(id).await?;

        let path = season_cover_path(&series.slug, season.number, &cover.filename);
        debug!(season_id = %id, path = %path, "Resolved season cover path");

        self.ensure_path_free(&path, Some(MediaOwner::Season(id))).await?;
        self.store_file("cover", &path, cover).await?;
        self.store.set_season_cover(id, &path).await?;

        self.get_season(id).await
    }

    async fn create_episode(
        &self,
        mut input: EpisodeInput,
        video: Upload,
    ) -> Result<EpisodeDetail, CatalogError> {
        video.validate("video")?;
        input.normalize()?;

        let (season, series) = self.require_season(input.season_id).await?;

        let path = episode_video_path(&series.slug, season.number, &input.slug, &video.filename);
        debug!(season_id = %season.id, path = %path, "Resolved episode video path");

        // Nothing is written until both the path and the row are known to be free.
        self.ensure_path_free(&path, None).await?;
        let episode = self
            .store
            .add_episode(&input, &path)
            .await
            .map_err(|e| classify(&e, || episode_slug_taken(input.season_id, &input.slug)))?;

        if let Err(err) = self.store_file("video", &path, video).await {
            // The path is unclaimed, so a truncated file here belongs to no one.
            if let Err(cleanup) = self.media.remove(&path).await {
                warn!(path = %path, error = %format!("{cleanup:#}"), "Failed to clean up partial upload");
            }
            if let Err(rollback) = self.store.remove_episode(episode.id).await {
                error!(
                    episode_id = %episode.id,
                    error = %format!("{rollback:#}"),
                    "Failed to roll back episode after storage error"
                );
            }
            return Err(err);
        }

        Ok(EpisodeDetail {
            episode,
            season,
            series,
        })
    }

    async fn update_episode(
        &self,
        id: EpisodeId,
        mut input: EpisodeInput,
    ) -> Result<EpisodeDetail, CatalogError> {
        input.normalize()?;
        self.require_season(input.season_id).await?;

        self.store
            .update_episode(id, &input)
            .await
            .map_err(|e| classify(&e, || episode_slug_taken(input.season_id, &input.slug)))?
            .ok_or_else(|| CatalogError::not_found(Entity::Episode, id))?;

        self.require_episode(id).await
    }

    async fn replace_episode_video(
        &self,
        id: EpisodeId,
        video: Upload,
    ) -> Result<EpisodeDetail, CatalogError> {
        video.validate("video")?;
        let mut detail = self.require_episode(id).await?;

        let path = detail.video_path_for(&video.filename);
        debug!(episode_id = %id, path = %path, "Resolved episode video path");

        self.ensure_path_free(&path, Some(MediaOwner::Episode(id))).await?;
        self.store_file("video", &path, video).await?;
        self.store.set_episode_video(id, &path).await?;

        detail.episode.video = path;
        Ok(detail)
    }

    async fn get_episode(&self, id: EpisodeId) -> Result<EpisodeDetail, CatalogError> {
        self.require_episode(id).await
    }

    async fn list_episodes(&self, season_id: SeasonId) -> Result<Vec<Episode>, CatalogError> {
        self.require_season(season_id).await?;
        Ok(self.store.list_episodes(season_id).await?)
    }

    async fn delete_episode(&self, id: EpisodeId) -> Result<(), CatalogError> {
        if self.store.remove_episode(id).await? {
            Ok(())
        } else {
            Err(CatalogError::not_found(Entity::Episode, id))
        }
    }

    async fn episode_series(&self, id: EpisodeId) -> Result<Series, CatalogError> {
        Ok(self.require_episode(id).await?.series)
    }
}
