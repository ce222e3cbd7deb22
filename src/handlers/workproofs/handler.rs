//! Workproof handler implementations

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    middleware::auth::AuthenticatedUser,
    services::WorkproofService,
    state::AppState,
};

use super::{
    request::{ListWorkproofsQuery, SubmitWorkproofRequest, VerifyWorkproofRequest},
    response::{WorkproofResponse, WorkproofsListResponse},
};

/// Submit a workproof (room members only)
pub async fn submit_workproof(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(challenge_id): Path<Uuid>,
    Json(payload): Json<SubmitWorkproofRequest>,
) -> AppResult<(StatusCode, Json<WorkproofResponse>)> {
    payload.validate()?;

    let workproof = WorkproofService::submit_workproof(
        state.db(),
        &auth_user.account,
        &challenge_id,
        &payload.description,
        payload.image_url.as_deref(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(workproof.into())))
}

/// List workproofs of a challenge, newest first
pub async fn list_workproofs(
    State(state): State<AppState>,
    Path(challenge_id): Path<Uuid>,
    Query(query): Query<ListWorkproofsQuery>,
) -> AppResult<Json<WorkproofsListResponse>> {
    let workproofs: Vec<WorkproofResponse> =
        WorkproofService::list_workproofs(state.db(), &challenge_id, query.status)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

    Ok(Json(WorkproofsListResponse {
        total: workproofs.len(),
        workproofs,
    }))
}

/// Get a workproof
pub async fn get_workproof(
    State(state): State<AppState>,
    Path(workproof_id): Path<Uuid>,
) -> AppResult<Json<WorkproofResponse>> {
    let workproof = WorkproofService::get_workproof(state.db(), &workproof_id).await?;
    Ok(Json(workproof.into()))
}

/// Accept or reject another member's workproof (room members only)
pub async fn verify_workproof(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(workproof_id): Path<Uuid>,
    Json(payload): Json<VerifyWorkproofRequest>,
) -> AppResult<Json<WorkproofResponse>> {
    payload.validate()?;

    let workproof = WorkproofService::verify_workproof(
        state.db(),
        &auth_user.account,
        &workproof_id,
        payload.accepted,
        payload.reason.as_deref(),
    )
    .await?;

    Ok(Json(workproof.into()))
}

/// Download a challenge's workproofs as CSV (room admins only)
pub async fn export_workproofs(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(challenge_id): Path<Uuid>,
) -> AppResult<Response> {
    let export = WorkproofService::export_csv(state.db(), &auth_user.account, &challenge_id).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export.filename),
            ),
        ],
        export.body,
    )
        .into_response())
}
