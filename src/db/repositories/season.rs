use crate::entities::{episodes, seasons, series};
use crate::models::{Season, SeasonInput, Series};
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait, Unchanged,
};
use tracing::info;

pub struct SeasonRepository {
    conn: DatabaseConnection,
}

impl SeasonRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn insert(&self, input: &SeasonInput) -> Result<Season> {
        let active_model = seasons::ActiveModel {
            series_id: Set(input.series_id.value()),
            number: Set(input.number),
            title: Set(input.title.clone()),
            description: Set(input.description.clone()),
            cover_image: Set(None),
            release_year: Set(input.release_year),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let model = active_model.insert(&self.conn).await?;
        info!(
            season_id = model.id,
            series_id = model.series_id,
            number = model.number,
            "Added season: {}",
            model.title
        );
        Ok(model.into())
    }

    /// Replaces every editable column, including the owning series.
    pub async fn update(&self, id: i32, input: &SeasonInput) -> Result<Option<Season>> {
        if seasons::Entity::find_by_id(id).one(&self.conn).await?.is_none() {
            return Ok(None);
        }

        let active_model = seasons::ActiveModel {
            id: Unchanged(id),
            series_id: Set(input.series_id.value()),
            number: Set(input.number),
            title: Set(input.title.clone()),
            description: Set(input.description.clone()),
            release_year: Set(input.release_year),
            ..Default::default()
        };

        let model = active_model.update(&self.conn).await?;
        info!(
            season_id = id,
            series_id = model.series_id,
            number = model.number,
            "Updated season: {}",
            model.title
        );
        Ok(Some(model.into()))
    }

    pub async fn set_cover(&self, id: i32, path: &str) -> Result<()> {
        let active_model = seasons::ActiveModel {
            id: Unchanged(id),
            cover_image: Set(Some(path.to_string())),
            ..Default::default()
        };
        active_model.update(&self.conn).await?;

        info!(season_id = id, path, "Stored season cover");
        Ok(())
    }

    pub async fn get(&self, id: i32) -> Result<Option<Season>> {
        let result = seasons::Entity::find_by_id(id).one(&self.conn).await?;
        Ok(result.map(Into::into))
    }

    pub async fn ids_with_cover(&self, path: &str) -> Result<Vec<i32>> {
        let ids = seasons::Entity::find()
            .select_only()
            .column(seasons::Column::Id)
            .filter(seasons::Column::CoverImage.eq(path))
            .into_tuple::<i32>()
            .all(&self.conn)
            .await?;
        Ok(ids)
    }

    /// Loads a season with the series it currently belongs to.
    pub async fn get_with_series(&self, id: i32) -> Result<Option<(Season, Series)>> {
        let result = seasons::Entity::find_by_id(id)
            .find_also_related(series::Entity)
            .one(&self.conn)
            .await?;

        Ok(match result {
            Some((season, Some(series))) => Some((season.into(), series.into())),
            _ => None,
        })
    }

    pub async fn list_for_series(&self, series_id: i32) -> Result<Vec<Season>> {
        let rows = seasons::Entity::find()
            .filter(seasons::Column::SeriesId.eq(series_id))
            .order_by_asc(seasons::Column::Number)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Deletes the season and its episodes in one transaction.
    ///
    /// Returns the number of episodes removed, or `None` when no season has this id.
    pub async fn remove(&self, id: i32) -> Result<Option<u64>> {
        let txn = self.conn.begin().await?;

        let episodes_removed = episodes::Entity::delete_many()
            .filter(episodes::Column::SeasonId.eq(id))
            .exec(&txn)
            .await?
            .rows_affected;

        let result = seasons::Entity::delete_by_id(id).exec(&txn).await?;

        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(None);
        }

        txn.commit().await?;

        info!(season_id = id, episodes = episodes_removed, "Removed season");
        Ok(Some(episodes_removed))
    }
}
