//! Workproof handlers: submissions, verification and CSV export

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Workproof routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/{workproof_id}", get(handler::get_workproof))
        .route(
            "/{workproof_id}/verifications",
            post(handler::verify_workproof),
        )
}

/// Challenge-scoped workproof routes, nested under `/challenges`
pub fn challenge_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/{challenge_id}/workproofs",
            get(handler::list_workproofs).post(handler::submit_workproof),
        )
        .route(
            "/{challenge_id}/workproofs/export",
            get(handler::export_workproofs),
        )
}
