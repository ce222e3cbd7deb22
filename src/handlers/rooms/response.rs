//! Room response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    db::repositories::MemberWithProfile,
    models::{Invite, Kpis, Membership, Room, kpis_with_defaults, short_account},
    services::room_service::MembershipView,
};

/// Room with every KPI slot filled in
#[derive(Debug, Serialize)]
pub struct RoomResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub kpis: Kpis,
    pub created_at: DateTime<Utc>,
}

impl From<Room> for RoomResponse {
    fn from(room: Room) -> Self {
        Self {
            kpis: kpis_with_defaults(&room.kpis.0),
            id: room.id,
            name: room.name,
            description: room.description,
            created_at: room.created_at,
        }
    }
}

/// Viewer's standing in a room
#[derive(Debug, Serialize)]
pub struct MembershipResponse {
    pub is_member: bool,
    pub is_admin: bool,
    pub roles: Vec<String>,
}

impl From<MembershipView> for MembershipResponse {
    fn from(view: MembershipView) -> Self {
        Self {
            is_member: view.is_member,
            is_admin: view.is_admin,
            roles: view.roles,
        }
    }
}

impl From<&Membership> for MembershipResponse {
    fn from(membership: &Membership) -> Self {
        MembershipView::from(Some(membership)).into()
    }
}

/// Newly created room and the creator's membership
#[derive(Debug, Serialize)]
pub struct CreateRoomResponse {
    pub room: RoomResponse,
    pub membership: MembershipResponse,
}

/// Room member with profile name
#[derive(Debug, Serialize)]
pub struct MemberResponse {
    pub account: String,
    pub name: Option<String>,
    pub display_name: String,
    pub roles: Vec<String>,
    pub is_admin: bool,
    pub joined_at: DateTime<Utc>,
}

impl From<MemberWithProfile> for MemberResponse {
    fn from(m: MemberWithProfile) -> Self {
        let display_name = m
            .name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| short_account(&m.account));
        let is_admin = m.roles.iter().any(|r| r == crate::constants::roles::ADMIN);
        Self {
            account: m.account,
            name: m.name,
            display_name,
            roles: m.roles,
            is_admin,
            joined_at: m.created_at,
        }
    }
}

/// Room members, newest first
#[derive(Debug, Serialize)]
pub struct MembersListResponse {
    pub members: Vec<MemberResponse>,
    pub total: usize,
}

/// Membership as stored after a grant
#[derive(Debug, Serialize)]
pub struct GrantMembershipResponse {
    pub account: String,
    pub room_id: Uuid,
    pub roles: Vec<String>,
}

impl From<Membership> for GrantMembershipResponse {
    fn from(m: Membership) -> Self {
        Self {
            account: m.account,
            room_id: m.room_id,
            roles: m.roles,
        }
    }
}

/// Invite with its join link
#[derive(Debug, Serialize)]
pub struct InviteResponse {
    pub id: Uuid,
    pub room_id: Uuid,
    pub link: String,
    pub created_at: DateTime<Utc>,
}

impl InviteResponse {
    pub fn new(invite: Invite, link: String) -> Self {
        Self {
            id: invite.id,
            room_id: invite.room_id,
            link,
            created_at: invite.created_at,
        }
    }
}
