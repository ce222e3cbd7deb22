//! Upload service for workproof images

use tracing::info;

use crate::{
    constants::API_BASE_PATH,
    error::{AppError, AppResult},
    storage::{Blob, BlobStore, extension_for},
};

/// Upload service for business logic
pub struct UploadService;

impl UploadService {
    /// Store an image and return its public URL
    pub async fn upload_image(
        blobs: &dyn BlobStore,
        api_url: &str,
        max_bytes: usize,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> AppResult<String> {
        if bytes.is_empty() {
            return Err(AppError::Validation("Uploaded file is empty".to_string()));
        }
        if bytes.len() > max_bytes {
            return Err(AppError::Validation(format!(
                "File exceeds the {} byte limit",
                max_bytes
            )));
        }
        if extension_for(content_type).is_none() {
            return Err(AppError::Validation(format!(
                "Unsupported content type: {}",
                content_type
            )));
        }

        let size = bytes.len();
        let name = blobs.put(bytes, content_type).await?;
        info!(blob = %name, size, "Image uploaded");

        Ok(blob_url(api_url, &name))
    }

    pub async fn fetch(blobs: &dyn BlobStore, name: &str) -> AppResult<Blob> {
        blobs.get(name).await
    }
}

/// Public URL a stored blob is served from
pub fn blob_url(api_url: &str, name: &str) -> String {
    format!("{}{}/uploads/{}", api_url.trim_end_matches('/'), API_BASE_PATH, name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MockBlobStore;

    #[tokio::test]
    async fn test_upload_returns_public_url() {
        let mut store = MockBlobStore::new();
        store
            .expect_put()
            .withf(|bytes, ct| bytes.as_slice() == b"img" && ct == "image/png")
            .times(1)
            .returning(|_, _| Ok("abc.png".to_string()));

        let url = tokio_test::assert_ok!(
            UploadService::upload_image(&store, "https://api.example/", 10, b"img".to_vec(), "image/png")
                .await
        );
        assert_eq!(url, "https://api.example/api/v1/uploads/abc.png");
    }

    #[tokio::test]
    async fn test_rejected_uploads_never_reach_the_store() {
        let mut store = MockBlobStore::new();
        store.expect_put().never();

        let empty = UploadService::upload_image(&store, "http://a", 10, vec![], "image/png").await;
        assert!(matches!(empty, Err(AppError::Validation(_))));

        let big = UploadService::upload_image(&store, "http://a", 2, vec![0; 3], "image/png").await;
        assert!(matches!(big, Err(AppError::Validation(_))));

        let html = UploadService::upload_image(&store, "http://a", 10, vec![1], "text/html").await;
        assert!(matches!(html, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_fetch_passes_through() {
        let mut store = MockBlobStore::new();
        store.expect_get().returning(|_| {
            Ok(Blob {
                bytes: vec![1, 2],
                content_type: "image/gif".into(),
            })
        });

        let blob = tokio_test::assert_ok!(UploadService::fetch(&store, "x.gif").await);
        assert_eq!(blob.content_type, "image/gif");
    }
}
