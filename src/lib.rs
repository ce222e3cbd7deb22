//! Guildboard - community dashboard backend
//!
//! Members of a room (a DAO instance) complete challenges, submit
//! workproofs, have them verified by room admins and earn XP. This crate is
//! the HTTP API behind the dashboard.
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Business logic and the membership/role gate
//! - **Repositories**: Database access
//! - **Models**: Domain records and the verification state model

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

use std::time::Duration;

use axum::{Router, middleware as axum_middleware};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::constants::{API_BASE_PATH, REQUEST_TIMEOUT_SECS};

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;

/// Build the application router.
///
/// Rate limiting is left to the caller because it needs the peer address,
/// which only exists when served with `into_make_service_with_connect_info`.
pub fn create_router(state: AppState) -> Router {
    let max_upload_bytes = state.config().storage.max_upload_bytes;

    let api = handlers::routes(max_upload_bytes).layer(axum_middleware::from_fn_with_state(
        state.clone(),
        middleware::optional_auth_middleware,
    ));

    Router::new()
        .nest(API_BASE_PATH, api)
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
