use axum::{
    Json,
    extract::{Multipart, Path, State},
};
use std::sync::Arc;

use super::multipart::MultipartForm;
use super::validation::validate_id;
use super::{ApiError, ApiResponse, AppState, EpisodeDto, UpdateEpisodeRequest};
use crate::domain::{EpisodeId, SeasonId};
use crate::models::{Episode, EpisodeInput, Series};

pub async fn list_episodes(
    State(state): State<Arc<AppState>>,
    Path(season_id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<Episode>>>, ApiError> {
    let season_id = SeasonId::new(validate_id("season", season_id)?);
    let episodes = state.catalog().list_episodes(season_id).await?;
    Ok(Json(ApiResponse::success(episodes)))
}

/// `POST /api/seasons/{id}/episodes`
///
/// Multipart body with text fields `title`, `slug`, `number`, `description`,
/// `duration_secs` and a `video` file part. The video is required.
pub async fn create_episode(
    State(state): State<Arc<AppState>>,
    Path(season_id): Path<i32>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<EpisodeDto>>, ApiError> {
    let season_id = SeasonId::new(validate_id("season", season_id)?);
    let mut form = MultipartForm::read(multipart, &state.shared.media).await?;

    let input = EpisodeInput {
        season_id,
        title: form.text("title"),
        slug: form.text("slug"),
        number: form.required_number("number")?,
        description: form.text("description"),
        duration_secs: form.optional_number("duration_secs")?,
    };
    let video = form.take_file("video");

    let detail = state.catalog().create_episode(input, video).await?;
    Ok(Json(ApiResponse::success(detail.into())))
}

pub async fn get_episode(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<EpisodeDto>>, ApiError> {
    let id = EpisodeId::new(validate_id("episode", id)?);
    let detail = state.catalog().get_episode(id).await?;
    Ok(Json(ApiResponse::success(detail.into())))
}

pub async fn update_episode(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateEpisodeRequest>,
) -> Result<Json<ApiResponse<EpisodeDto>>, ApiError> {
    let id = EpisodeId::new(validate_id("episode", id)?);
    let detail = state.catalog().update_episode(id, req.into()).await?;
    Ok(Json(ApiResponse::success(detail.into())))
}

pub async fn delete_episode(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let id = EpisodeId::new(validate_id("episode", id)?);
    state.catalog().delete_episode(id).await?;
    Ok(Json(ApiResponse::success(())))
}

/// `GET /api/episodes/{id}/series`
pub async fn get_episode_series(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Series>>, ApiError> {
    let id = EpisodeId::new(validate_id("episode", id)?);
    let series = state.catalog().episode_series(id).await?;
    Ok(Json(ApiResponse::success(series)))
}

/// `PUT /api/episodes/{id}/video`, multipart with a `video` part.
pub async fn replace_video(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<EpisodeDto>>, ApiError> {
    let id = EpisodeId::new(validate_id("episode", id)?);
    let mut form = MultipartForm::read(multipart, &state.shared.media).await?;

    let detail = state
        .catalog()
        .replace_episode_video(id, form.take_file("video"))
        .await?;
    Ok(Json(ApiResponse::success(detail.into())))
}
