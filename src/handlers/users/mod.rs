//! Profile and reward handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::state::AppState;

/// User routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/me", patch(handler::update_profile))
        .route("/{account}", get(handler::get_profile))
        .route("/{account}/rewards", get(handler::get_rewards))
}

/// Room-scoped user routes, nested under `/rooms`
pub fn room_routes() -> Router<AppState> {
    Router::new().route("/{room_id}/leaderboard", get(handler::room_leaderboard))
}
