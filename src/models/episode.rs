use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use super::{Season, Series, ValidationError, positive, required_text, resolve_slug};
use crate::domain::paths::episode_video_path;
use crate::domain::{EpisodeId, SeasonId};
use crate::entities::episodes;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub id: EpisodeId,
    pub season_id: SeasonId,
    pub title: String,
    pub slug: String,
    pub number: i32,
    pub description: String,
    /// Path relative to the media root.
    pub video: String,
    pub duration_secs: Option<i64>,
    pub created_at: String,
}

impl Episode {
    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        self.duration_secs
            .and_then(|secs| u64::try_from(secs).ok())
            .map(Duration::from_secs)
    }
}

impl From<episodes::Model> for Episode {
    fn from(model: episodes::Model) -> Self {
        Self {
            id: EpisodeId::new(model.id),
            season_id: SeasonId::new(model.season_id),
            title: model.title,
            slug: model.slug,
            number: model.number,
            description: model.description,
            video: model.video,
            duration_secs: model.duration_secs,
            created_at: model.created_at,
        }
    }
}

/// Full record submitted when creating or replacing an episode.
///
/// The video file travels separately since an update keeps the stored one.
#[derive(Debug, Clone, Default)]
pub struct EpisodeInput {
    pub season_id: SeasonId,
    pub title: String,
    /// Left blank to derive it from `title`.
    pub slug: String,
    pub number: i32,
    pub description: String,
    pub duration_secs: Option<i64>,
}

impl EpisodeInput {
    #[must_use]
    pub fn new(season_id: SeasonId, number: i32, title: impl Into<String>) -> Self {
        Self {
            season_id,
            number,
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn normalize(&mut self) -> Result<(), ValidationError> {
        self.title = required_text("title", &self.title)?;
        self.slug = resolve_slug(&self.slug, &self.title)?;
        self.number = positive("number", self.number)?;

        if let Some(secs) = self.duration_secs
            && secs < 0
        {
            return Err(ValidationError::Negative {
                field: "duration_secs",
                value: secs,
            });
        }

        Ok(())
    }
}

/// An episode together with the season and series it currently belongs to.
///
/// Always assembled from a fresh lookup, so `series` follows the season if it
/// has been moved to another series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeDetail {
    pub episode: Episode,
    pub season: Season,
    pub series: Series,
}

impl EpisodeDetail {
    #[must_use]
    pub const fn series(&self) -> &Series {
        &self.series
    }

    #[must_use]
    pub fn url(&self) -> String {
        episode_url(&self.series.slug, self.season.number, &self.episode.slug)
    }

    /// Where a newly uploaded video for this episode would be stored.
    #[must_use]
    pub fn video_path_for(&self, filename: &str) -> String {
        episode_video_path(
            &self.series.slug,
            self.season.number,
            &self.episode.slug,
            filename,
        )
    }
}

impl fmt::Display for EpisodeDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} S{}E{} - {}",
            self.series.title, self.season.number, self.episode.number, self.episode.title
        )
    }
}

#[must_use]
pub fn episode_url(series_slug: &str, season_number: i32, episode_slug: &str) -> String {
    format!("/series/{series_slug}/season-{season_number}/{episode_slug}/")
}
