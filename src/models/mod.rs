//! Catalog records and the inputs that create or replace them.
//!
//! Every input type has a `normalize` step that fills defaulted fields
//! (slugs, season titles) and enforces field-level rules. The service layer
//! runs it before every write, so stored rows always satisfy these rules.

pub mod episode;
pub mod season;
pub mod series;
pub mod upload;

pub use episode::{Episode, EpisodeDetail, EpisodeInput};
pub use season::{Season, SeasonInput};
pub use series::{Series, SeriesFilter, SeriesInput};
pub use upload::{MediaOwner, StagedFile, Upload, UploadContent};

use thiserror::Error;

use crate::constants::MAX_TITLE_LENGTH;
use crate::domain::slug::{is_valid_slug, slugify};

/// Field-level rejection raised before anything is written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("{field} must be a positive integer, got {value}")]
    NotPositive { field: &'static str, value: i64 },

    #[error("{field} cannot be negative, got {value}")]
    Negative { field: &'static str, value: i64 },

    #[error("'{0}' is not a valid slug: use letters, numbers, underscores or hyphens")]
    InvalidSlug(String),

    #[error("cannot derive a slug from title '{0}', provide one explicitly")]
    UnderivableSlug(String),

    #[error("{0} upload is empty")]
    EmptyUpload(&'static str),
}

fn required_text(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required(field));
    }
    bounded_text(field, trimmed)
}

fn bounded_text(field: &'static str, value: &str) -> Result<String, ValidationError> {
    if value.chars().count() > MAX_TITLE_LENGTH {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_TITLE_LENGTH,
        });
    }
    Ok(value.to_string())
}

fn positive(field: &'static str, value: i32) -> Result<i32, ValidationError> {
    if value <= 0 {
        return Err(ValidationError::NotPositive {
            field,
            value: i64::from(value),
        });
    }
    Ok(value)
}

fn positive_opt(field: &'static str, value: Option<i32>) -> Result<Option<i32>, ValidationError> {
    value.map(|v| positive(field, v)).transpose()
}

/// Keeps an explicit slug (validated) or derives one from `title`.
fn resolve_slug(slug: &str, title: &str) -> Result<String, ValidationError> {
    let explicit = slug.trim();

    if !explicit.is_empty() {
        if !is_valid_slug(explicit) {
            return Err(ValidationError::InvalidSlug(explicit.to_string()));
        }
        return bounded_text("slug", explicit);
    }

    let mut derived = slugify(title);
    if derived.len() > MAX_TITLE_LENGTH {
        // slugify output is ASCII, byte length equals char count
        derived.truncate(MAX_TITLE_LENGTH);
        derived = derived.trim_end_matches(['-', '_']).to_string();
    }

    if derived.is_empty() {
        return Err(ValidationError::UnderivableSlug(title.to_string()));
    }

    Ok(derived)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_slug_prefers_explicit_value() {
        assert_eq!(resolve_slug("custom-slug", "Title").unwrap(), "custom-slug");
        assert_eq!(resolve_slug("  padded ", "Title").unwrap(), "padded");
    }

    #[test]
    fn test_resolve_slug_derives_when_blank() {
        assert_eq!(resolve_slug("", "Breaking Bad").unwrap(), "breaking-bad");
        assert_eq!(resolve_slug("   ", "Pilot").unwrap(), "pilot");
    }

    #[test]
    fn test_resolve_slug_rejects_bad_input() {
        assert_eq!(
            resolve_slug("not a slug", "Title"),
            Err(ValidationError::InvalidSlug("not a slug".to_string()))
        );
        assert!(matches!(
            resolve_slug("", "東京"),
            Err(ValidationError::UnderivableSlug(_))
        ));
    }

    #[test]
    fn test_derived_slug_is_truncated() {
        let title = "щ".repeat(MAX_TITLE_LENGTH);
        let slug = resolve_slug("", &title).unwrap();
        assert_eq!(slug.len(), MAX_TITLE_LENGTH);
        assert!(slug.starts_with("shchshch"));
    }

    #[test]
    fn test_text_bounds() {
        assert_eq!(
            required_text("title", "   "),
            Err(ValidationError::Required("title"))
        );
        assert!(required_text("title", &"x".repeat(MAX_TITLE_LENGTH)).is_ok());
        assert!(matches!(
            required_text("title", &"x".repeat(MAX_TITLE_LENGTH + 1)),
            Err(ValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn test_positive_numbers() {
        assert_eq!(positive("number", 1), Ok(1));
        assert!(positive("number", 0).is_err());
        assert_eq!(positive_opt("release_year", None), Ok(None));
        assert!(positive_opt("release_year", Some(-2008)).is_err());
    }
}
