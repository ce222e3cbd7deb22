//! Room handlers: rooms, KPI widgets, members and invites

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::state::AppState;

/// Room routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handler::create_room))
        .route("/{room_id}", get(handler::get_room))
        .route("/{room_id}/kpis/{slot}", patch(handler::update_kpi))
        .route(
            "/{room_id}/members",
            get(handler::list_members).post(handler::grant_membership),
        )
        .route("/{room_id}/membership", get(handler::get_membership))
        .route("/{room_id}/invites", post(handler::create_invite))
}
