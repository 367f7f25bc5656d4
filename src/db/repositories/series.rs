use crate::entities::{episodes, seasons, series};
use crate::models::{Series, SeriesFilter, SeriesInput};
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait, Unchanged,
};
use tracing::info;

/// Rows removed by deleting one series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeriesDeletion {
    pub seasons: u64,
    pub episodes: u64,
}

pub struct SeriesRepository {
    conn: DatabaseConnection,
}

impl SeriesRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn insert(&self, input: &SeriesInput) -> Result<Series> {
        let now = chrono::Utc::now().to_rfc3339();

        let active_model = series::ActiveModel {
            title: Set(input.title.clone()),
            slug: Set(input.slug.clone()),
            description: Set(input.description.clone()),
            cover_image: Set(None),
            release_year: Set(input.release_year),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active_model.insert(&self.conn).await?;
        info!(series_id = model.id, slug = %model.slug, "Added series: {}", model.title);
        Ok(model.into())
    }

    /// Replaces every editable column; the cover and `created_at` are kept.
    pub async fn update(&self, id: i32, input: &SeriesInput) -> Result<Option<Series>> {
        if series::Entity::find_by_id(id).one(&self.conn).await?.is_none() {
            return Ok(None);
        }

        let active_model = series::ActiveModel {
            id: Unchanged(id),
            title: Set(input.title.clone()),
            slug: Set(input.slug.clone()),
            description: Set(input.description.clone()),
            release_year: Set(input.release_year),
            updated_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let model = active_model.update(&self.conn).await?;
        info!(series_id = id, slug = %model.slug, "Updated series: {}", model.title);
        Ok(Some(model.into()))
    }

    pub async fn set_cover(&self, id: i32, path: &str) -> Result<()> {
        let active_model = series::ActiveModel {
            id: Unchanged(id),
            cover_image: Set(Some(path.to_string())),
            updated_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };
        active_model.update(&self.conn).await?;

        info!(series_id = id, path, "Stored series cover");
        Ok(())
    }

    pub async fn get(&self, id: i32) -> Result<Option<Series>> {
        let result = series::Entity::find_by_id(id).one(&self.conn).await?;
        Ok(result.map(Into::into))
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Series>> {
        let result = series::Entity::find()
            .filter(series::Column::Slug.eq(slug))
            .one(&self.conn)
            .await?;
        Ok(result.map(Into::into))
    }

    /// Ids of the series whose cover is stored at `path`.
    pub async fn ids_with_cover(&self, path: &str) -> Result<Vec<i32>> {
        let ids = series::Entity::find()
            .select_only()
            .column(series::Column::Id)
            .filter(series::Column::CoverImage.eq(path))
            .into_tuple::<i32>()
            .all(&self.conn)
            .await?;
        Ok(ids)
    }

    pub async fn count(&self) -> Result<u64> {
        let count = series::Entity::find().count(&self.conn).await?;
        Ok(count)
    }

    /// Lists series ordered by title. Title search is case-insensitive for ASCII.
    pub async fn list(&self, filter: &SeriesFilter) -> Result<Vec<Series>> {
        let mut query = series::Entity::find();

        if let Some(search) = filter.search.as_deref().map(str::trim)
            && !search.is_empty()
        {
            query = query.filter(series::Column::Title.contains(search));
        }

        if let Some(year) = filter.release_year {
            query = query.filter(series::Column::ReleaseYear.eq(year));
        }

        if let Some(limit) = filter.limit {
            query = query.limit(limit);
        }

        let rows = query
            .order_by_asc(series::Column::Title)
            .order_by_asc(series::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Deletes the series with its seasons and their episodes in one transaction.
    ///
    /// Returns `None` when no series has this id.
    pub async fn remove(&self, id: i32) -> Result<Option<SeriesDeletion>> {
        let txn = self.conn.begin().await?;

        let season_ids: Vec<i32> = seasons::Entity::find()
            .select_only()
            .column(seasons::Column::Id)
            .filter(seasons::Column::SeriesId.eq(id))
            .into_tuple()
            .all(&txn)
            .await?;

        let episodes_removed = if season_ids.is_empty() {
            0
        } else {
            episodes::Entity::delete_many()
                .filter(episodes::Column::SeasonId.is_in(season_ids))
                .exec(&txn)
                .await?
                .rows_affected
        };

        let seasons_removed = seasons::Entity::delete_many()
            .filter(seasons::Column::SeriesId.eq(id))
            .exec(&txn)
            .await?
            .rows_affected;

        let result = series::Entity::delete_by_id(id).exec(&txn).await?;

        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(None);
        }

        txn.commit().await?;

        info!(
            series_id = id,
            seasons = seasons_removed,
            episodes = episodes_removed,
            "Removed series"
        );

        Ok(Some(SeriesDeletion {
            seasons: seasons_removed,
            episodes: episodes_removed,
        }))
    }
}
