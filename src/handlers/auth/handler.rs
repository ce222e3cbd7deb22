//! Authentication handler implementations

use axum::{Json, extract::State};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    middleware::auth::AuthenticatedUser,
    services::{AuthService, auth_service::SessionTokens},
    state::AppState,
    utils::normalize_account,
};

use super::{
    request::{LogoutRequest, NonceRequest, RefreshTokenRequest, VerifySignatureRequest},
    response::{AuthResponse, CurrentUserResponse, LogoutResponse, NonceResponse, UserResponse},
};

/// Issue a sign-in nonce
pub async fn request_nonce(
    State(state): State<AppState>,
    Json(payload): Json<NonceRequest>,
) -> AppResult<Json<NonceResponse>> {
    payload.validate()?;
    let account = normalize_account(&payload.account)
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let challenge = AuthService::issue_nonce(state.redis(), state.config(), &account).await?;

    Ok(Json(NonceResponse {
        nonce: challenge.nonce,
        message: challenge.message,
        expires_in: challenge.expires_in,
    }))
}

/// Exchange a signed nonce for a session
pub async fn verify_signature(
    State(state): State<AppState>,
    Json(payload): Json<VerifySignatureRequest>,
) -> AppResult<Json<AuthResponse>> {
    payload.validate()?;
    let account = normalize_account(&payload.account)
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let (user, tokens) = AuthService::verify_signature(
        state.db(),
        state.redis(),
        state.config(),
        &account,
        &payload.signature,
    )
    .await?;

    Ok(Json(auth_response(user.into(), tokens)))
}

/// Refresh access token
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(payload): Json<RefreshTokenRequest>,
) -> AppResult<Json<AuthResponse>> {
    let (user, tokens) = AuthService::refresh_token(
        state.db(),
        state.redis(),
        state.config(),
        &payload.refresh_token,
    )
    .await?;

    Ok(Json(auth_response(user.into(), tokens)))
}

/// Logout (invalidate refresh tokens)
pub async fn logout(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    payload: Option<Json<LogoutRequest>>,
) -> AppResult<Json<LogoutResponse>> {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();

    AuthService::logout(
        state.redis(),
        &auth_user.account,
        payload.refresh_token.as_deref(),
        payload.all_sessions.unwrap_or(false),
    )
    .await?;

    Ok(Json(LogoutResponse {
        message: "Logged out successfully".to_string(),
    }))
}

/// Get current authenticated user
pub async fn get_current_user(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<CurrentUserResponse>> {
    let user = AuthService::get_user(state.db(), &auth_user.account)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(CurrentUserResponse { user: user.into() }))
}

fn auth_response(user: UserResponse, tokens: SessionTokens) -> AuthResponse {
    AuthResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        token_type: "Bearer".to_string(),
        expires_in: tokens.expires_in,
        user,
    }
}
