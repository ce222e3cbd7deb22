//! Challenge handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    Router,
    routing::{get, put},
};

use crate::state::AppState;

/// Challenge routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/{challenge_id}",
            get(handler::get_challenge).patch(handler::update_challenge),
        )
        .route("/{challenge_id}/status", put(handler::set_challenge_status))
}

/// Room-scoped challenge routes, nested under `/rooms`
pub fn room_routes() -> Router<AppState> {
    Router::new().route(
        "/{room_id}/challenges",
        get(handler::list_challenges).post(handler::create_challenge),
    )
}
