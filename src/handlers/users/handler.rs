//! User handler implementations

use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    middleware::auth::AuthenticatedUser,
    services::UserService,
    state::AppState,
    utils::normalize_account,
};

use super::{
    request::UpdateProfileRequest,
    response::{LeaderboardResponse, ProfileResponse, RewardsResponse},
};

/// Get a public profile
pub async fn get_profile(
    State(state): State<AppState>,
    Path(account): Path<String>,
) -> AppResult<Json<ProfileResponse>> {
    let account = parse_account(&account)?;
    let user = UserService::get_profile(state.db(), &account).await?;
    Ok(Json(user.into()))
}

/// Update the caller's own profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> AppResult<Json<ProfileResponse>> {
    payload.validate()?;

    let user = UserService::update_profile(
        state.db(),
        &auth_user.account,
        payload.name.as_deref(),
        payload.discord_handle.as_deref(),
    )
    .await?;

    Ok(Json(user.into()))
}

/// Submission count and verified XP of an account
pub async fn get_rewards(
    State(state): State<AppState>,
    Path(account): Path<String>,
) -> AppResult<Json<RewardsResponse>> {
    let account = parse_account(&account)?;
    let rewards = UserService::get_rewards(state.db(), &account).await?;
    Ok(Json(RewardsResponse::new(account, rewards)))
}

/// Room leaderboard by verified XP
pub async fn room_leaderboard(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
) -> AppResult<Json<LeaderboardResponse>> {
    let entries = UserService::room_leaderboard(state.db(), &room_id).await?;
    Ok(Json(entries.into()))
}

fn parse_account(raw: &str) -> AppResult<String> {
    normalize_account(raw).map_err(|e| AppError::Validation(e.to_string()))
}
