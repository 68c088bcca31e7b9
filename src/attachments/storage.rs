/**
 * Media Storage
 *
 * Local blob store backing message attachments and profile pictures.
 * Stored names are prefixed with a UUID so colliding upload names never
 * overwrite each other; the returned ref stays relative to the media
 * root and is the only thing persisted in the database.
 */
use std::path::{Component, Path, PathBuf};

use tokio::fs;
use uuid::Uuid;

use crate::error::ApiError;

/// Subdirectory for message attachments.
pub const UPLOADS_DIR: &str = "uploads";
/// Subdirectory for profile pictures.
pub const PROFILE_PICS_DIR: &str = "profile_pics";

#[derive(Clone, Debug)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Media root directory, served read-only under `/media/`.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist uploaded bytes and return the media-relative ref.
    ///
    /// The original file name is reduced to its base name before use, so
    /// a hostile `filename` in the multipart field cannot place the file
    /// outside the store.
    pub async fn save(
        &self,
        subdir: &str,
        original_name: &str,
        data: &[u8],
    ) -> Result<String, ApiError> {
        let base_name = Path::new(original_name)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("file");

        let stored_name = format!("{}_{}", Uuid::new_v4(), base_name);
        let dir = self.root.join(subdir);
        fs::create_dir_all(&dir).await?;
        fs::write(dir.join(&stored_name), data).await?;

        let file_ref = format!("{subdir}/{stored_name}");
        tracing::debug!(%file_ref, size_bytes = data.len(), "stored media file");
        Ok(file_ref)
    }

    /// Resolve a stored ref to an absolute path.
    ///
    /// Refs are opaque to callers but still validated here: anything
    /// absolute or containing a parent-directory component is rejected.
    pub fn resolve(&self, file_ref: &str) -> Result<PathBuf, ApiError> {
        let rel = Path::new(file_ref);
        let escapes = rel.is_absolute()
            || rel
                .components()
                .any(|c| !matches!(c, Component::Normal(_)));
        if escapes {
            return Err(ApiError::validation("Invalid file reference."));
        }

        Ok(self.root.join(rel))
    }
}

/// File name presented to the client on download: the base name of the
/// stored ref.
pub fn download_name(file_ref: &str) -> &str {
    Path::new(file_ref)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(file_ref)
}
