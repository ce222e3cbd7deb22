//! Challenge response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{models::{Challenge, ChallengeStatus}, services::challenge_service::ChallengeDetail};

/// Challenge response
#[derive(Debug, Serialize)]
pub struct ChallengeResponse {
    pub id: Uuid,
    pub room_id: Uuid,
    pub title: String,
    pub description: String,
    pub weight: i32,
    pub status: ChallengeStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Challenge> for ChallengeResponse {
    fn from(c: Challenge) -> Self {
        Self {
            id: c.id,
            room_id: c.room_id,
            title: c.title,
            description: c.description,
            weight: c.weight,
            status: c.status,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Challenge detail with submission aggregates
#[derive(Debug, Serialize)]
pub struct ChallengeDetailResponse {
    #[serde(flatten)]
    pub challenge: ChallengeResponse,
    pub submission_count: i64,
    pub submitter_count: i64,
    /// True when the viewer is a room admin and someone else's work is pending
    pub has_work_to_verify: bool,
}

impl From<ChallengeDetail> for ChallengeDetailResponse {
    fn from(detail: ChallengeDetail) -> Self {
        Self {
            challenge: detail.challenge.into(),
            submission_count: detail.counts.submission_count,
            submitter_count: detail.counts.submitter_count,
            has_work_to_verify: detail.has_work_to_verify,
        }
    }
}

/// Challenges of a room
#[derive(Debug, Serialize)]
pub struct ChallengesListResponse {
    pub challenges: Vec<ChallengeResponse>,
    pub total: usize,
}
