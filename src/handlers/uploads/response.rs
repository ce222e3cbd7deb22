//! Upload response DTOs

use serde::Serialize;

/// Where a stored image can be fetched
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}
