use crate::entities::{episodes, seasons, series};
use crate::models::{Episode, EpisodeDetail, EpisodeInput};
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, Unchanged,
};
use tracing::info;

/// Repository for episode rows and the season/series lookups they hang off.
pub struct EpisodeRepository {
    conn: DatabaseConnection,
}

impl EpisodeRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn insert(&self, input: &EpisodeInput, video_path: &str) -> Result<Episode> {
        let active_model = episodes::ActiveModel {
            season_id: Set(input.season_id.value()),
            title: Set(input.title.clone()),
            slug: Set(input.slug.clone()),
            number: Set(input.number),
            description: Set(input.description.clone()),
            video: Set(video_path.to_string()),
            duration_secs: Set(input.duration_secs),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let model = active_model.insert(&self.conn).await?;
        info!(
            episode_id = model.id,
            season_id = model.season_id,
            slug = %model.slug,
            "Added episode: {}",
            model.title
        );
        Ok(model.into())
    }

    /// Replaces every editable column; the stored video path is kept.
    pub async fn update(&self, id: i32, input: &EpisodeInput) -> Result<Option<Episode>> {
        if episodes::Entity::find_by_id(id).one(&self.conn).await?.is_none() {
            return Ok(None);
        }

        let active_model = episodes::ActiveModel {
            id: Unchanged(id),
            season_id: Set(input.season_id.value()),
            title: Set(input.title.clone()),
            slug: Set(input.slug.clone()),
            number: Set(input.number),
            description: Set(input.description.clone()),
            duration_secs: Set(input.duration_secs),
            ..Default::default()
        };

        let model = active_model.update(&self.conn).await?;
        info!(
            episode_id = id,
            season_id = model.season_id,
            slug = %model.slug,
            "Updated episode: {}",
            model.title
        );
        Ok(Some(model.into()))
    }

    pub async fn set_video(&self, id: i32, path: &str) -> Result<()> {
        let active_model = episodes::ActiveModel {
            id: Unchanged(id),
            video: Set(path.to_string()),
            ..Default::default()
        };
        active_model.update(&self.conn).await?;

        info!(episode_id = id, path, "Stored episode video");
        Ok(())
    }

    pub async fn ids_with_video(&self, path: &str) -> Result<Vec<i32>> {
        let ids = episodes::Entity::find()
            .select_only()
            .column(episodes::Column::Id)
            .filter(episodes::Column::Video.eq(path))
            .into_tuple::<i32>()
            .all(&self.conn)
            .await?;
        Ok(ids)
    }

    /// Walks episode → season → series with fresh queries on every call.
    pub async fn get_detail(&self, id: i32) -> Result<Option<EpisodeDetail>> {
        let Some((episode, Some(season))) = episodes::Entity::find_by_id(id)
            .find_also_related(seasons::Entity)
            .one(&self.conn)
            .await?
        else {
            return Ok(None);
        };

        let Some(series) = series::Entity::find_by_id(season.series_id)
            .one(&self.conn)
            .await?
        else {
            return Ok(None);
        };

        Ok(Some(EpisodeDetail {
            episode: episode.into(),
            season: season.into(),
            series: series.into(),
        }))
    }

    pub async fn list_for_season(&self, season_id: i32) -> Result<Vec<Episode>> {
        let rows = episodes::Entity::find()
            .filter(episodes::Column::SeasonId.eq(season_id))
            .order_by_asc(episodes::Column::Number)
            .order_by_asc(episodes::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn remove(&self, id: i32) -> Result<bool> {
        let result = episodes::Entity::delete_by_id(id).exec(&self.conn).await?;

        let removed = result.rows_affected > 0;
        if removed {
            info!(episode_id = id, "Removed episode");
        }
        Ok(removed)
    }
}
