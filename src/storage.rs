//! Blob storage for submission images
//!
//! Blobs are content addressed: the stored name is the SHA-256 of the bytes
//! plus an extension derived from the content type, so uploading the same
//! image twice yields the same URL.

use std::path::PathBuf;

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::{
    constants::ALLOWED_IMAGE_TYPES,
    error::{AppError, AppResult},
    utils::validation::validate_blob_name,
};

/// A stored blob and its content type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Storage backend for uploaded files
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store bytes and return the blob name
    async fn put(&self, bytes: Vec<u8>, content_type: &str) -> AppResult<String>;

    /// Load a blob by name
    async fn get(&self, name: &str) -> AppResult<Blob>;
}

/// Extension a content type is stored under, if the type is accepted
pub fn extension_for(content_type: &str) -> Option<&'static str> {
    ALLOWED_IMAGE_TYPES
        .iter()
        .find(|(ct, _)| ct.eq_ignore_ascii_case(content_type))
        .map(|(_, ext)| *ext)
}

/// Content type for a stored extension
pub fn content_type_for(extension: &str) -> Option<&'static str> {
    ALLOWED_IMAGE_TYPES
        .iter()
        .find(|(_, ext)| *ext == extension)
        .map(|(ct, _)| *ct)
}

/// Content-addressed blob name
pub fn blob_name(bytes: &[u8], extension: &str) -> String {
    let digest = Sha256::digest(bytes);
    format!("{}.{}", hex::encode(digest), extension)
}

/// Blob store backed by a local directory
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(&self, bytes: Vec<u8>, content_type: &str) -> AppResult<String> {
        let extension = extension_for(content_type).ok_or_else(|| {
            AppError::Validation(format!("Unsupported content type: {}", content_type))
        })?;
        let name = blob_name(&bytes, extension);
        let path = self.root.join(&name);

        if tokio::fs::try_exists(&path).await? {
            debug!(blob = %name, "Blob already stored");
            return Ok(name);
        }

        tokio::fs::create_dir_all(&self.root).await?;

        // Write under a temporary name first so readers never see a partial file
        let tmp = self.root.join(format!(".{}.{}", name, uuid::Uuid::new_v4()));
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &path).await?;

        debug!(blob = %name, size = bytes.len(), "Blob stored");
        Ok(name)
    }

    async fn get(&self, name: &str) -> AppResult<Blob> {
        validate_blob_name(name).map_err(|e| AppError::NotFound(e.to_string()))?;

        let extension = name.rsplit('.').next().unwrap_or_default();
        let content_type = content_type_for(extension)
            .ok_or_else(|| AppError::NotFound("Unknown blob type".to_string()))?;
        let bytes = tokio::fs::read(self.root.join(name)).await?;

        Ok(Blob {
            bytes,
            content_type: content_type.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_lookup() {
        assert_eq!(extension_for("image/png"), Some("png"));
        assert_eq!(extension_for("IMAGE/JPEG"), Some("jpg"));
        assert_eq!(extension_for("application/pdf"), None);
        assert_eq!(content_type_for("webp"), Some("image/webp"));
    }

    #[test]
    fn test_blob_name_is_content_addressed() {
        let a = blob_name(b"hello", "png");
        let b = blob_name(b"hello", "png");
        let c = blob_name(b"world", "png");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.ends_with(".png"));
        assert_eq!(a.len(), 64 + 4);
    }

    #[tokio::test]
    async fn test_local_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path().join("uploads"));

        let name = store.put(b"\x89PNG fake".to_vec(), "image/png").await.unwrap();
        let again = store.put(b"\x89PNG fake".to_vec(), "image/png").await.unwrap();
        assert_eq!(name, again);

        let blob = store.get(&name).await.unwrap();
        assert_eq!(blob.bytes, b"\x89PNG fake");
        assert_eq!(blob.content_type, "image/png");
    }

    #[tokio::test]
    async fn test_local_store_rejects_bad_names_and_types() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path());

        assert!(matches!(
            store.put(b"x".to_vec(), "text/html").await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            store.get("../../etc/passwd").await,
            Err(AppError::NotFound(_))
        ));

        let missing = blob_name(b"never stored", "gif");
        assert!(matches!(store.get(&missing).await, Err(AppError::NotFound(_))));
    }
}
