use axum::{
    Json,
    extract::{Multipart, Path, State},
};
use std::sync::Arc;

use super::multipart::MultipartForm;
use super::validation::validate_id;
use super::{
    ApiError, ApiResponse, AppState, CreateSeasonRequest, SeasonDetailDto, UpdateSeasonRequest,
};
use crate::domain::{SeasonId, SeriesId};
use crate::models::Season;
use crate::services::DeletionSummary;

pub async fn list_seasons(
    State(state): State<Arc<AppState>>,
    Path(series_id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<Season>>>, ApiError> {
    let series_id = SeriesId::new(validate_id("series", series_id)?);
    let seasons = state.catalog().list_seasons(series_id).await?;
    Ok(Json(ApiResponse::success(seasons)))
}

/// `POST /api/series/{id}/seasons`. A blank title becomes "{label} {number}".
pub async fn create_season(
    State(state): State<Arc<AppState>>,
    Path(series_id): Path<i32>,
    Json(req): Json<CreateSeasonRequest>,
) -> Result<Json<ApiResponse<Season>>, ApiError> {
    let series_id = SeriesId::new(validate_id("series", series_id)?);
    let season = state
        .catalog()
        .create_season(req.into_input(series_id))
        .await?;
    Ok(Json(ApiResponse::success(season)))
}

pub async fn get_season(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<SeasonDetailDto>>, ApiError> {
    let id = SeasonId::new(validate_id("season", id)?);

    let season = state.catalog().get_season(id).await?;
    let episodes = state.catalog().list_episodes(id).await?;

    Ok(Json(ApiResponse::success(SeasonDetailDto { season, episodes })))
}

pub async fn update_season(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateSeasonRequest>,
) -> Result<Json<ApiResponse<Season>>, ApiError> {
    let id = SeasonId::new(validate_id("season", id)?);
    let season = state.catalog().update_season(id, req.into()).await?;
    Ok(Json(ApiResponse::success(season)))
}

pub async fn delete_season(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<DeletionSummary>>, ApiError> {
    let id = SeasonId::new(validate_id("season", id)?);
    let deleted = state.catalog().delete_season(id).await?;
    Ok(Json(ApiResponse::success(deleted)))
}

pub async fn upload_cover(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<Season>>, ApiError> {
    let id = SeasonId::new(validate_id("season", id)?);
    let mut form = MultipartForm::read(multipart, &state.shared.media).await?;

    let season = state
        .catalog()
        .set_season_cover(id, form.take_file("file"))
        .await?;
    Ok(Json(ApiResponse::success(season)))
}
