use anyhow::Context;
use axum::extract::Multipart;
use axum::extract::multipart::Field;
use std::collections::HashMap;
use tokio::io::AsyncWriteExt;

use super::ApiError;
use super::validation::parse_number_field;
use crate::models::Upload;
use crate::services::MediaStorage;

/// A parsed multipart body: text fields by name, and file parts by name.
///
/// File parts are streamed chunk by chunk into staging files under the media
/// root; only text fields are held in memory.
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: HashMap<String, Upload>,
}

impl MultipartForm {
    pub async fn read(mut multipart: Multipart, media: &MediaStorage) -> Result<Self, ApiError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if let Some(filename) = field.file_name().map(str::to_string) {
                let upload = stage_file(field, filename, media).await?;
                form.files.insert(name, upload);
            } else {
                let text = field.text().await?;
                form.fields.insert(name, text);
            }
        }

        Ok(form)
    }

    #[must_use]
    pub fn text(&self, name: &str) -> String {
        self.fields.get(name).cloned().unwrap_or_default()
    }

    pub fn required_number<T: std::str::FromStr>(&self, name: &str) -> Result<T, ApiError> {
        let value = self
            .fields
            .get(name)
            .ok_or_else(|| ApiError::validation(format!("Field '{name}' is required")))?;
        parse_number_field(name, value)
    }

    pub fn optional_number<T: std::str::FromStr>(&self, name: &str) -> Result<Option<T>, ApiError> {
        match self.fields.get(name).map(|v| v.trim()) {
            None | Some("") => Ok(None),
            Some(value) => parse_number_field(name, value).map(Some),
        }
    }

    /// Takes the named file part. A missing part yields an empty upload, which
    /// the catalog rejects as a validation error.
    pub fn take_file(&mut self, name: &str) -> Upload {
        self.files.remove(name).unwrap_or_else(Upload::missing)
    }
}

async fn stage_file(
    mut field: Field<'_>,
    filename: String,
    media: &MediaStorage,
) -> Result<Upload, ApiError> {
    let (staged, mut file) = media.create_staged().await?;
    let mut size = 0u64;

    while let Some(chunk) = field.chunk().await? {
        file.write_all(&chunk)
            .await
            .with_context(|| format!("Failed to stage upload '{filename}'"))?;
        size += chunk.len() as u64;
    }

    file.flush()
        .await
        .with_context(|| format!("Failed to stage upload '{filename}'"))?;

    Ok(Upload::staged(filename, staged, size))
}
