//! Domain service for the series → season → episode catalog.
//!
//! Handlers and CLI commands go through [`CatalogService`] rather than the
//! store, so defaulting, validation and conflict classification happen in one
//! place.

use crate::db::SeriesDeletion;
use crate::domain::{EpisodeId, SeasonId, SeriesId};
use crate::models::{
    Episode, EpisodeDetail, EpisodeInput, Season, SeasonInput, Series, SeriesFilter, SeriesInput,
    Upload, ValidationError,
};
use sea_orm::{DbErr, SqlErr};
use std::fmt;
use thiserror::Error;

/// Kind of catalog record, used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Series,
    Season,
    Episode,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Series => "Series",
            Self::Season => "Season",
            Self::Episode => "Episode",
        })
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: Entity, id: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl CatalogError {
    pub fn not_found(entity: Entity, id: impl fmt::Display) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Classifies a repository failure, turning unique-index violations into
    /// [`CatalogError::Conflict`] with the given message.
    pub fn from_write(err: &anyhow::Error, conflict: impl FnOnce() -> String) -> Self {
        match err.downcast_ref::<DbErr>().and_then(DbErr::sql_err) {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::Conflict(conflict()),
            _ => Self::Database(format!("{err:#}")),
        }
    }
}

impl From<DbErr> for CatalogError {
    fn from(err: DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for CatalogError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

/// Rows removed by a cascading delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct DeletionSummary {
    pub series: u64,
    pub seasons: u64,
    pub episodes: u64,
}

impl From<SeriesDeletion> for DeletionSummary {
    fn from(deleted: SeriesDeletion) -> Self {
        Self {
            series: 1,
            seasons: deleted.seasons,
            episodes: deleted.episodes,
        }
    }
}

/// Catalog operations.
///
/// Every create and update takes the full record. Empty slugs and season
/// titles are filled in before the write, and unique-index violations surface
/// as [`CatalogError::Conflict`].
///
/// # Examples
///
/// ```rust,ignore
/// use series_catalog::models::SeriesInput;
/// use series_catalog::services::{CatalogError, CatalogService};
/// use std::sync::Arc;
///
/// async fn example(catalog: Arc<dyn CatalogService>) -> Result<(), CatalogError> {
///     let series = catalog.create_series(SeriesInput::new("Breaking Bad")).await?;
///     assert_eq!(series.slug, "breaking-bad");
///     Ok(())
/// }
/// ```
#[async_trait::async_trait]
pub trait CatalogService: Send + Sync {
    // Series

    /// # Errors
    ///
    /// - [`CatalogError::Validation`] if the title is missing or the slug is invalid
    /// - [`CatalogError::Conflict`] if another series already uses the slug
    async fn create_series(&self, input: SeriesInput) -> Result<Series, CatalogError>;

    /// Replaces every editable field; an empty slug is derived again from the title.
    async fn update_series(&self, id: SeriesId, input: SeriesInput)
    -> Result<Series, CatalogError>;

    async fn get_series(&self, id: SeriesId) -> Result<Series, CatalogError>;

    async fn get_series_by_slug(&self, slug: &str) -> Result<Series, CatalogError>;

    async fn list_series(&self, filter: SeriesFilter) -> Result<Vec<Series>, CatalogError>;

    /// Deletes the series together with its seasons and their episodes.
    async fn delete_series(&self, id: SeriesId) -> Result<DeletionSummary, CatalogError>;

    /// Stores the upload at `covers/{slug}.{ext}` and records the path.
    async fn set_series_cover(&self, id: SeriesId, cover: Upload)
    -> Result<Series, CatalogError>;

    // Seasons

    /// # Errors
    ///
    /// - [`CatalogError::NotFound`] if the parent series does not exist
    /// - [`CatalogError::Conflict`] if the series already has a season with this number
    async fn create_season(&self, input: SeasonInput) -> Result<Season, CatalogError>;

    /// Replaces every editable field. Changing `series_id` moves the season.
    async fn update_season(&self, id: SeasonId, input: SeasonInput)
    -> Result<Season, CatalogError>;

    async fn get_season(&self, id: SeasonId) -> Result<Season, CatalogError>;

    async fn list_seasons(&self, series_id: SeriesId) -> Result<Vec<Season>, CatalogError>;

    async fn delete_season(&self, id: SeasonId) -> Result<DeletionSummary, CatalogError>;

    async fn set_season_cover(&self, id: SeasonId, cover: Upload)
    -> Result<Season, CatalogError>;

    // Episodes

    /// Creates an episode and stores its video.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Validation`] if the video is missing, before anything is written
    /// - [`CatalogError::NotFound`] if the season does not exist
    /// - [`CatalogError::Conflict`] if the season already has an episode with this slug,
    ///   or another record's media is stored at the resolved path
    /// - [`CatalogError::Storage`] if the video could not be written
    async fn create_episode(
        &self,
        input: EpisodeInput,
        video: Upload,
    ) -> Result<EpisodeDetail, CatalogError>;

    /// Replaces every editable field and keeps the stored video.
    async fn update_episode(
        &self,
        id: EpisodeId,
        input: EpisodeInput,
    ) -> Result<EpisodeDetail, CatalogError>;

    /// Stores a new video at the path derived from the episode's current placement.
    /// Fails with [`CatalogError::Conflict`] when another record owns that path.
    async fn replace_episode_video(
        &self,
        id: EpisodeId,
        video: Upload,
    ) -> Result<EpisodeDetail, CatalogError>;

    async fn get_episode(&self, id: EpisodeId) -> Result<EpisodeDetail, CatalogError>;

    async fn list_episodes(&self, season_id: SeasonId) -> Result<Vec<Episode>, CatalogError>;

    async fn delete_episode(&self, id: EpisodeId) -> Result<(), CatalogError>;

    /// The series the episode belongs to through its season, looked up on every call.
    async fn episode_series(&self, id: EpisodeId) -> Result<Series, CatalogError>;
}
