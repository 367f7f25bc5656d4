use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ValidationError, bounded_text, positive, positive_opt};
use crate::domain::{SeasonId, SeriesId};
use crate::entities::seasons;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    pub id: SeasonId,
    pub series_id: SeriesId,
    pub number: i32,
    pub title: String,
    pub description: String,
    pub cover_image: Option<String>,
    pub release_year: Option<i32>,
    pub created_at: String,
}

impl From<seasons::Model> for Season {
    fn from(model: seasons::Model) -> Self {
        Self {
            id: SeasonId::new(model.id),
            series_id: SeriesId::new(model.series_id),
            number: model.number,
            title: model.title,
            description: model.description,
            cover_image: model.cover_image,
            release_year: model.release_year,
            created_at: model.created_at,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

/// Full record submitted when creating or replacing a season.
///
/// Replacing a season with a different `series_id` moves it, and every
/// episode under it, to that series.
#[derive(Debug, Clone, Default)]
pub struct SeasonInput {
    pub series_id: SeriesId,
    pub number: i32,
    /// Left blank to get "{label} {number}".
    pub title: String,
    pub description: String,
    pub release_year: Option<i32>,
}

impl SeasonInput {
    #[must_use]
    pub fn new(series_id: SeriesId, number: i32) -> Self {
        Self {
            series_id,
            number,
            ..Self::default()
        }
    }

    pub fn normalize(&mut self, season_label: &str) -> Result<(), ValidationError> {
        self.number = positive("number", self.number)?;
        self.release_year = positive_opt("release_year", self.release_year)?;

        let title = self.title.trim();
        self.title = if title.is_empty() {
            default_title(season_label, self.number)
        } else {
            bounded_text("title", title)?
        };

        Ok(())
    }
}

#[must_use]
pub fn default_title(season_label: &str, number: i32) -> String {
    format!("{} {number}", season_label.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_title_gets_default() {
        let mut input = SeasonInput::new(SeriesId::new(1), 1);
        input.normalize("Season").unwrap();
        assert_eq!(input.title, "Season 1");
    }

    #[test]
    fn test_default_title_uses_localized_label() {
        let mut input = SeasonInput {
            title: "   ".to_string(),
            ..SeasonInput::new(SeriesId::new(1), 3)
        };
        input.normalize("Сезон").unwrap();
        assert_eq!(input.title, "Сезон 3");
    }

    #[test]
    fn test_explicit_title_is_kept() {
        let mut input = SeasonInput {
            title: "The Final Season".to_string(),
            ..SeasonInput::new(SeriesId::new(1), 5)
        };
        input.normalize("Season").unwrap();
        assert_eq!(input.title, "The Final Season");
    }

    #[test]
    fn test_number_must_be_positive() {
        let mut input = SeasonInput::new(SeriesId::new(1), 0);
        assert!(matches!(
            input.normalize("Season"),
            Err(ValidationError::NotPositive { field: "number", .. })
        ));
    }
}
