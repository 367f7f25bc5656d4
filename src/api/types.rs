use serde::{Deserialize, Serialize};

use crate::domain::{SeasonId, SeriesId};
use crate::models::{
    Episode, EpisodeDetail, EpisodeInput, Season, SeasonInput, Series, SeriesFilter,
};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct SeriesQuery {
    pub search: Option<String>,
    pub year: Option<i32>,
    pub limit: Option<u64>,
}

impl SeriesQuery {
    #[must_use]
    pub fn into_filter(self, limit: u64) -> SeriesFilter {
        SeriesFilter {
            search: self.search,
            release_year: self.year,
            limit: Some(limit),
        }
    }
}

/// Body of `POST /api/series/{id}/seasons`; the series comes from the path.
#[derive(Debug, Deserialize)]
pub struct CreateSeasonRequest {
    pub number: i32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub release_year: Option<i32>,
}

impl CreateSeasonRequest {
    #[must_use]
    pub fn into_input(self, series_id: SeriesId) -> SeasonInput {
        SeasonInput {
            series_id,
            number: self.number,
            title: self.title,
            description: self.description,
            release_year: self.release_year,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateSeasonRequest {
    pub series_id: SeriesId,
    pub number: i32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub release_year: Option<i32>,
}

impl From<UpdateSeasonRequest> for SeasonInput {
    fn from(req: UpdateSeasonRequest) -> Self {
        Self {
            series_id: req.series_id,
            number: req.number,
            title: req.title,
            description: req.description,
            release_year: req.release_year,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateEpisodeRequest {
    pub season_id: SeasonId,
    pub title: String,
    #[serde(default)]
    pub slug: String,
    pub number: i32,
    #[serde(default)]
    pub description: String,
    pub duration_secs: Option<i64>,
}

impl From<UpdateEpisodeRequest> for EpisodeInput {
    fn from(req: UpdateEpisodeRequest) -> Self {
        Self {
            season_id: req.season_id,
            title: req.title,
            slug: req.slug,
            number: req.number,
            description: req.description,
            duration_secs: req.duration_secs,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SeriesDetailDto {
    #[serde(flatten)]
    pub series: Series,
    pub seasons: Vec<Season>,
}

#[derive(Debug, Serialize)]
pub struct SeasonDetailDto {
    #[serde(flatten)]
    pub season: Season,
    pub episodes: Vec<Episode>,
}

/// An episode with its placement, public URL and display name.
#[derive(Debug, Serialize)]
pub struct EpisodeDto {
    #[serde(flatten)]
    pub episode: Episode,
    pub season: Season,
    pub series: Series,
    pub url: String,
    pub display_name: String,
}

impl From<EpisodeDetail> for EpisodeDto {
    fn from(detail: EpisodeDetail) -> Self {
        let url = detail.url();
        let display_name = detail.to_string();
        Self {
            episode: detail.episode,
            season: detail.season,
            series: detail.series,
            url,
            display_name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub version: String,
    pub uptime: u64,
    pub database: bool,
    pub series_count: u64,
    pub media_root: String,
}
