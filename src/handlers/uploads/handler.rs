//! Upload handler implementations

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::{
    error::{AppError, AppResult},
    middleware::auth::AuthenticatedUser,
    services::UploadService,
    state::AppState,
};

use super::response::UploadResponse;

/// Store an image from the multipart field `file`
pub async fn upload_image(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<UploadResponse>)> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field
            .content_type()
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation("File content type is required".to_string()))?;
        let bytes = field.bytes().await?;

        tracing::debug!(account = %auth_user.account, size = bytes.len(), "Receiving upload");

        let storage = &state.config().storage;
        let url = UploadService::upload_image(
            state.blobs(),
            &state.config().server.api_url,
            storage.max_upload_bytes,
            bytes.to_vec(),
            &content_type,
        )
        .await?;

        return Ok((StatusCode::CREATED, Json(UploadResponse { url })));
    }

    Err(AppError::Validation("Multipart field `file` is required".to_string()))
}

/// Serve a stored image
pub async fn get_upload(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Response> {
    let blob = UploadService::fetch(state.blobs(), &name).await?;

    Ok((
        [
            (header::CONTENT_TYPE, blob.content_type),
            (
                header::CACHE_CONTROL,
                "public, max-age=31536000, immutable".to_string(),
            ),
        ],
        blob.bytes,
    )
        .into_response())
}
