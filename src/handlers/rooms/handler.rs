//! Room handler implementations

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    middleware::auth::{AuthenticatedUser, OptionalAuth},
    services::RoomService,
    state::AppState,
};

use super::{
    request::{CreateRoomRequest, GrantMembershipRequest, UpdateKpiRequest},
    response::{
        CreateRoomResponse, GrantMembershipResponse, InviteResponse, MemberResponse,
        MembersListResponse, MembershipResponse, RoomResponse,
    },
};

/// Create a room; the caller becomes its admin
pub async fn create_room(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<CreateRoomRequest>,
) -> AppResult<(StatusCode, Json<CreateRoomResponse>)> {
    payload.validate()?;

    let (room, membership) = RoomService::create_room(
        state.db(),
        &auth_user.account,
        &payload.name,
        payload.description.as_deref(),
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateRoomResponse {
            membership: MembershipResponse::from(&membership),
            room: room.into(),
        }),
    ))
}

/// Get a room with its KPI widgets
pub async fn get_room(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
) -> AppResult<Json<RoomResponse>> {
    let room = RoomService::get_room(state.db(), &room_id).await?;
    Ok(Json(room.into()))
}

/// Update one KPI widget (admin only)
pub async fn update_kpi(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path((room_id, slot)): Path<(Uuid, u8)>,
    Json(payload): Json<UpdateKpiRequest>,
) -> AppResult<Json<RoomResponse>> {
    payload.validate()?;

    let room = RoomService::update_kpi(
        state.db(),
        &auth_user.account,
        &room_id,
        slot,
        payload.into(),
    )
    .await?;

    Ok(Json(room.into()))
}

/// List room members
pub async fn list_members(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
) -> AppResult<Json<MembersListResponse>> {
    let members: Vec<MemberResponse> = RoomService::list_members(state.db(), &room_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(MembersListResponse {
        total: members.len(),
        members,
    }))
}

/// The caller's membership; anonymous callers get the stranger view
pub async fn get_membership(
    State(state): State<AppState>,
    auth: OptionalAuth,
    Path(room_id): Path<Uuid>,
) -> AppResult<Json<MembershipResponse>> {
    let view = RoomService::get_membership(state.db(), auth.account(), &room_id).await?;
    Ok(Json(view.into()))
}

/// Add a member or change their roles (admin only)
pub async fn grant_membership(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(room_id): Path<Uuid>,
    Json(payload): Json<GrantMembershipRequest>,
) -> AppResult<Json<GrantMembershipResponse>> {
    payload.validate()?;

    let membership = RoomService::grant_membership(
        state.db(),
        &auth_user.account,
        &room_id,
        &payload.account,
        &payload.roles,
    )
    .await?;

    Ok(Json(membership.into()))
}

/// Create an invite link (admin only)
pub async fn create_invite(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(room_id): Path<Uuid>,
) -> AppResult<(StatusCode, Json<InviteResponse>)> {
    let (invite, link) = RoomService::create_invite(
        state.db(),
        &state.config().server.public_url,
        &auth_user.account,
        &room_id,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(InviteResponse::new(invite, link))))
}
