//! Challenge handler implementations

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    middleware::auth::{AuthenticatedUser, OptionalAuth},
    services::ChallengeService,
    state::AppState,
};

use super::{
    request::{
        CreateChallengeRequest, ListChallengesQuery, SetChallengeStatusRequest,
        UpdateChallengeRequest,
    },
    response::{ChallengeDetailResponse, ChallengeResponse, ChallengesListResponse},
};

/// Create a challenge in a room (admin only)
pub async fn create_challenge(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(room_id): Path<Uuid>,
    Json(payload): Json<CreateChallengeRequest>,
) -> AppResult<(StatusCode, Json<ChallengeResponse>)> {
    payload.validate()?;

    let challenge = ChallengeService::create_challenge(
        state.db(),
        &auth_user.account,
        &room_id,
        &payload.title,
        &payload.description,
        payload.weight,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(challenge.into())))
}

/// List challenges of a room
pub async fn list_challenges(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
    Query(query): Query<ListChallengesQuery>,
) -> AppResult<Json<ChallengesListResponse>> {
    let challenges: Vec<ChallengeResponse> =
        ChallengeService::list_challenges(state.db(), &room_id, query.status)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

    Ok(Json(ChallengesListResponse {
        total: challenges.len(),
        challenges,
    }))
}

/// Challenge detail
pub async fn get_challenge(
    State(state): State<AppState>,
    auth: OptionalAuth,
    Path(challenge_id): Path<Uuid>,
) -> AppResult<Json<ChallengeDetailResponse>> {
    let detail = ChallengeService::get_challenge(state.db(), auth.account(), &challenge_id).await?;
    Ok(Json(detail.into()))
}

/// Edit title and description (admin only)
pub async fn update_challenge(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(challenge_id): Path<Uuid>,
    Json(payload): Json<UpdateChallengeRequest>,
) -> AppResult<Json<ChallengeResponse>> {
    payload.validate()?;

    let challenge = ChallengeService::update_challenge(
        state.db(),
        &auth_user.account,
        &challenge_id,
        &payload.title,
        &payload.description,
    )
    .await?;

    Ok(Json(challenge.into()))
}

/// Open or close a challenge (admin only)
pub async fn set_challenge_status(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(challenge_id): Path<Uuid>,
    Json(payload): Json<SetChallengeStatusRequest>,
) -> AppResult<Json<ChallengeResponse>> {
    let challenge = ChallengeService::set_challenge_status(
        state.db(),
        &auth_user.account,
        &challenge_id,
        payload.status,
    )
    .await?;

    Ok(Json(challenge.into()))
}
