//! Storage locations for uploaded media, relative to the configured media root.
//!
//! Every function here is a pure function of the owning entities' identity at
//! upload time and the original filename. Only the suffix of the uploaded
//! file's base name is kept, verbatim.

use std::path::Path;

use crate::constants::media::{COVERS_DIR, SERIES_DIR};

/// `series/{series_slug}/season_{season_number}/{episode_slug}.{ext}`
#[must_use]
pub fn episode_video_path(
    series_slug: &str,
    season_number: i32,
    episode_slug: &str,
    filename: &str,
) -> String {
    with_extension(
        format!("{SERIES_DIR}/{series_slug}/season_{season_number}/{episode_slug}"),
        filename,
    )
}

/// `covers/{series_slug}.{ext}`
#[must_use]
pub fn series_cover_path(series_slug: &str, filename: &str) -> String {
    with_extension(format!("{COVERS_DIR}/{series_slug}"), filename)
}

/// `covers/{series_slug}/season_{season_number}.{ext}`
#[must_use]
pub fn season_cover_path(series_slug: &str, season_number: i32, filename: &str) -> String {
    with_extension(
        format!("{COVERS_DIR}/{series_slug}/season_{season_number}"),
        filename,
    )
}

/// Suffix after the last `.` of the upload's base name, if it has one.
#[must_use]
pub fn upload_extension(filename: &str) -> Option<&str> {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    Path::new(base)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
}

fn with_extension(stem: String, filename: &str) -> String {
    match upload_extension(filename) {
        Some(ext) => format!("{stem}.{ext}"),
        None => stem,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_episode_video_path() {
        assert_eq!(
            episode_video_path("breaking-bad", 1, "pilot", "pilot.mp4"),
            "series/breaking-bad/season_1/pilot.mp4"
        );
    }

    #[test]
    fn test_extension_is_kept_verbatim() {
        assert_eq!(
            episode_video_path("the-wire", 3, "time-after-time", "RAW_CAPTURE.MKV"),
            "series/the-wire/season_3/time-after-time.MKV"
        );
        assert_eq!(
            series_cover_path("the-wire", "poster.final.JPeG"),
            "covers/the-wire.JPeG"
        );
    }

    #[test]
    fn test_cover_paths() {
        assert_eq!(
            series_cover_path("breaking-bad", "cover.png"),
            "covers/breaking-bad.png"
        );
        assert_eq!(
            season_cover_path("breaking-bad", 2, "s2.webp"),
            "covers/breaking-bad/season_2.webp"
        );
    }

    #[test]
    fn test_directories_in_upload_name_are_ignored() {
        assert_eq!(upload_extension("C:\\Users\\me\\clip.avi"), Some("avi"));
        assert_eq!(upload_extension("uploads/v1.2/clip"), None);
        assert_eq!(
            series_cover_path("dark", "../../etc/passwd"),
            "covers/dark"
        );
    }

    #[test]
    fn test_missing_extension() {
        assert_eq!(upload_extension("video"), None);
        assert_eq!(upload_extension(".hidden"), None);
        assert_eq!(upload_extension("clip."), None);
        assert_eq!(
            episode_video_path("dark", 1, "secrets", "clip."),
            "series/dark/season_1/secrets"
        );
        assert_eq!(
            episode_video_path("dark", 1, "secrets", "video"),
            "series/dark/season_1/secrets"
        );
    }
}
