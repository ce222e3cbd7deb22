//! Image upload handlers

mod handler;
pub mod response;

pub use handler::*;
pub use response::*;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::state::AppState;

/// Upload routes
pub fn routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            // Room for multipart framing around the file itself
            post(handler::upload_image).layer(DefaultBodyLimit::max(max_upload_bytes + 64 * 1024)),
        )
        .route("/{name}", get(handler::get_upload))
}
