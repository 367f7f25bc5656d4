use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
};
use std::sync::Arc;

use super::multipart::MultipartForm;
use super::validation::{validate_id, validate_limit, validate_slug_param};
use super::{ApiError, ApiResponse, AppState, SeriesDetailDto, SeriesQuery};
use crate::constants::limits::DEFAULT_LIST_LIMIT;
use crate::domain::SeriesId;
use crate::models::{Series, SeriesInput};
use crate::services::DeletionSummary;

/// `GET /api/series?search=&year=&limit=`
pub async fn list_series(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SeriesQuery>,
) -> Result<Json<ApiResponse<Vec<Series>>>, ApiError> {
    let limit = validate_limit(query.limit.unwrap_or(DEFAULT_LIST_LIMIT))?;
    let series = state.catalog().list_series(query.into_filter(limit)).await?;
    Ok(Json(ApiResponse::success(series)))
}

pub async fn create_series(
    State(state): State<Arc<AppState>>,
    Json(input): Json<SeriesInput>,
) -> Result<Json<ApiResponse<Series>>, ApiError> {
    let series = state.catalog().create_series(input).await?;
    Ok(Json(ApiResponse::success(series)))
}

/// `GET /api/series/{id}`, with its seasons in order.
pub async fn get_series(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<SeriesDetailDto>>, ApiError> {
    let id = SeriesId::new(validate_id("series", id)?);

    let series = state.catalog().get_series(id).await?;
    let seasons = state.catalog().list_seasons(id).await?;

    Ok(Json(ApiResponse::success(SeriesDetailDto { series, seasons })))
}

pub async fn get_series_by_slug(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<Series>>, ApiError> {
    let slug = validate_slug_param(&slug)?;
    let series = state.catalog().get_series_by_slug(slug).await?;
    Ok(Json(ApiResponse::success(series)))
}

pub async fn update_series(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(input): Json<SeriesInput>,
) -> Result<Json<ApiResponse<Series>>, ApiError> {
    let id = SeriesId::new(validate_id("series", id)?);
    let series = state.catalog().update_series(id, input).await?;
    Ok(Json(ApiResponse::success(series)))
}

pub async fn delete_series(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<DeletionSummary>>, ApiError> {
    let id = SeriesId::new(validate_id("series", id)?);
    let deleted = state.catalog().delete_series(id).await?;
    Ok(Json(ApiResponse::success(deleted)))
}

/// `PUT /api/series/{id}/cover`, multipart with a `file` part.
pub async fn upload_cover(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<Series>>, ApiError> {
    let id = SeriesId::new(validate_id("series", id)?);
    let mut form = MultipartForm::read(multipart, &state.shared.media).await?;

    let series = state
        .catalog()
        .set_series_cover(id, form.take_file("file"))
        .await?;
    Ok(Json(ApiResponse::success(series)))
}
