use std::fmt;
use std::path::{Path, PathBuf};

use super::ValidationError;
use crate::domain::{EpisodeId, SeasonId, SeriesId};

/// A file received from a caller, not yet written to media storage.
#[derive(Debug)]
pub struct Upload {
    /// Name the file had on the caller's side; only its extension is kept.
    pub filename: String,
    pub size: u64,
    pub content: UploadContent,
}

/// Where the bytes of an [`Upload`] currently live.
#[derive(Debug)]
pub enum UploadContent {
    Bytes(Vec<u8>),
    /// Streamed to a staging file under the media root, moved into place on save.
    Staged(StagedFile),
    /// A file on local disk, copied into place on save.
    Local(PathBuf),
}

impl Upload {
    #[must_use]
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let bytes = bytes.into();
        Self {
            filename: filename.into(),
            size: bytes.len() as u64,
            content: UploadContent::Bytes(bytes),
        }
    }

    #[must_use]
    pub fn staged(filename: impl Into<String>, file: StagedFile, size: u64) -> Self {
        Self {
            filename: filename.into(),
            size,
            content: UploadContent::Staged(file),
        }
    }

    #[must_use]
    pub fn local(filename: impl Into<String>, path: PathBuf, size: u64) -> Self {
        Self {
            filename: filename.into(),
            size,
            content: UploadContent::Local(path),
        }
    }

    /// Placeholder for a file part the caller never sent.
    #[must_use]
    pub fn missing() -> Self {
        Self::new(String::new(), Vec::<u8>::new())
    }

    pub fn validate(&self, field: &'static str) -> Result<(), ValidationError> {
        if self.filename.trim().is_empty() {
            return Err(ValidationError::Required(field));
        }
        if self.size == 0 {
            return Err(ValidationError::EmptyUpload(field));
        }
        Ok(())
    }
}

/// A temporary file owned by an upload. It is deleted on drop unless it was
/// moved into the media tree first.
#[derive(Debug)]
pub struct StagedFile {
    path: PathBuf,
}

impl StagedFile {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        // Already renamed into place in the common case.
        let _ = std::fs::remove_file(&self.path);
    }
}

/// The record whose column points at a stored media file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaOwner {
    Series(SeriesId),
    Season(SeasonId),
    Episode(EpisodeId),
}

impl fmt::Display for MediaOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Series(id) => write!(f, "series {id}"),
            Self::Season(id) => write!(f, "season {id}"),
            Self::Episode(id) => write!(f, "episode {id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert!(Upload::new("pilot.mp4", vec![0u8; 4]).validate("video").is_ok());
        assert_eq!(
            Upload::new("", vec![1u8]).validate("video"),
            Err(ValidationError::Required("video"))
        );
        assert_eq!(
            Upload::new("pilot.mp4", Vec::<u8>::new()).validate("video"),
            Err(ValidationError::EmptyUpload("video"))
        );
        assert_eq!(
            Upload::missing().validate("video"),
            Err(ValidationError::Required("video"))
        );
    }

    #[test]
    fn test_size_comes_from_source() {
        let upload = Upload::local("pilot.mkv", PathBuf::from("/tmp/pilot.mkv"), 0);
        assert_eq!(
            upload.validate("video"),
            Err(ValidationError::EmptyUpload("video"))
        );
    }

    #[test]
    fn test_staged_file_is_removed_on_drop() {
        let path = std::env::temp_dir().join(format!("staged-{}.part", uuid::Uuid::new_v4()));
        std::fs::write(&path, b"partial").unwrap();

        let upload = Upload::staged("ep.mp4", StagedFile::new(path.clone()), 7);
        assert!(path.exists());
        drop(upload);
        assert!(!path.exists());
    }

    #[test]
    fn test_owner_display() {
        assert_eq!(MediaOwner::Episode(EpisodeId::new(4)).to_string(), "episode 4");
        assert_eq!(MediaOwner::Series(SeriesId::new(1)).to_string(), "series 1");
    }
}
