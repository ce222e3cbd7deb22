//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod auth;
pub mod challenges;
pub mod health;
pub mod rooms;
pub mod uploads;
pub mod users;
pub mod workproofs;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
pub fn routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .nest("/auth", auth::routes())
        .nest(
            "/rooms",
            rooms::routes()
                .merge(challenges::room_routes())
                .merge(users::room_routes()),
        )
        .nest(
            "/challenges",
            challenges::routes().merge(workproofs::challenge_routes()),
        )
        .nest("/workproofs", workproofs::routes())
        .nest("/users", users::routes())
        .nest("/uploads", uploads::routes(max_upload_bytes))
}
