use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

use crate::constants::media::STAGING_DIR;
use crate::models::{StagedFile, Upload, UploadContent};

/// Writes uploaded files under the media root.
///
/// Paths handed in are relative (see [`crate::domain::paths`]); a file already
/// at the same path is overwritten. Callers make sure no other record owns it.
pub struct MediaStorage {
    root: PathBuf,
}

impl MediaStorage {
    #[must_use]
    pub const fn new(root: PathBuf) -> Self {
        Self { root }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn resolve(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Opens a fresh staging file for an incoming upload part.
    pub async fn create_staged(&self) -> Result<(StagedFile, fs::File)> {
        let dir = self.root.join(STAGING_DIR);
        fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("Failed to create {}", dir.display()))?;

        let path = dir.join(format!("{}.part", uuid::Uuid::new_v4()));
        let file = fs::File::create(&path)
            .await
            .with_context(|| format!("Failed to create staging file {}", path.display()))?;

        Ok((StagedFile::new(path), file))
    }

    /// Moves the upload to `relative`, consuming it.
    pub async fn save(&self, relative: &str, upload: Upload) -> Result<PathBuf> {
        let file_path = self.resolve(relative);

        if let Some(parent) = file_path.parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let written = match upload.content {
            UploadContent::Bytes(bytes) => fs::write(&file_path, bytes).await,
            UploadContent::Staged(staged) => fs::rename(staged.path(), &file_path).await,
            UploadContent::Local(source) => fs::copy(&source, &file_path).await.map(|_| ()),
        };
        written.with_context(|| format!("Failed to write media to {}", file_path.display()))?;

        info!(path = %file_path.display(), bytes = upload.size, "Stored media file");
        Ok(file_path)
    }

    /// Removes a stored file. A file that is already gone is not an error.
    pub async fn remove(&self, relative: &str) -> Result<()> {
        let file_path = self.resolve(relative);

        match fs::remove_file(&file_path).await {
            Ok(()) => {
                debug!(path = %file_path.display(), "Removed media file");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to remove media at {}", file_path.display())),
        }
    }
}
