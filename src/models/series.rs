use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ValidationError, positive_opt, required_text, resolve_slug};
use crate::domain::SeriesId;
use crate::entities::series;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    pub id: SeriesId,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub cover_image: Option<String>,
    pub release_year: Option<i32>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<series::Model> for Series {
    fn from(model: series::Model) -> Self {
        Self {
            id: SeriesId::new(model.id),
            title: model.title,
            slug: model.slug,
            description: model.description,
            cover_image: model.cover_image,
            release_year: model.release_year,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

/// Full record submitted when creating or replacing a series.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeriesInput {
    pub title: String,
    /// Left blank to derive it from `title`.
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub release_year: Option<i32>,
}

impl SeriesInput {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn normalize(&mut self) -> Result<(), ValidationError> {
        self.title = required_text("title", &self.title)?;
        self.slug = resolve_slug(&self.slug, &self.title)?;
        self.release_year = positive_opt("release_year", self.release_year)?;
        Ok(())
    }
}

/// Listing options, mirroring the admin's search box and year filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeriesFilter {
    /// Case-insensitive substring match on the title.
    pub search: Option<String>,
    pub release_year: Option<i32>,
    pub limit: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_derives_slug() {
        let mut input = SeriesInput::new("Breaking Bad");
        input.normalize().unwrap();
        assert_eq!(input.slug, "breaking-bad");
    }

    #[test]
    fn test_normalize_keeps_explicit_slug() {
        let mut input = SeriesInput {
            title: "Breaking Bad".to_string(),
            slug: "bb".to_string(),
            ..SeriesInput::default()
        };
        input.normalize().unwrap();
        assert_eq!(input.slug, "bb");
    }

    #[test]
    fn test_normalize_trims_title() {
        let mut input = SeriesInput::new("  The Wire ");
        input.normalize().unwrap();
        assert_eq!(input.title, "The Wire");
        assert_eq!(input.slug, "the-wire");
    }

    #[test]
    fn test_normalize_rejects_missing_title_and_bad_year() {
        assert_eq!(
            SeriesInput::new("").normalize(),
            Err(ValidationError::Required("title"))
        );

        let mut input = SeriesInput {
            release_year: Some(0),
            ..SeriesInput::new("Dark")
        };
        assert!(matches!(
            input.normalize(),
            Err(ValidationError::NotPositive { field: "release_year", .. })
        ));
    }

    #[test]
    fn test_input_deserializes_with_defaults() {
        let input: SeriesInput = serde_json::from_str(r#"{"title": "Dark"}"#).unwrap();
        assert!(input.slug.is_empty());
        assert!(input.description.is_empty());
        assert_eq!(input.release_year, None);
    }
}
