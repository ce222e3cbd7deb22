//! Workproof response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{VerificationStatus, Verifications, Workproof};

/// Workproof with its derived status
#[derive(Debug, Serialize)]
pub struct WorkproofResponse {
    pub id: Uuid,
    pub author: String,
    pub room_id: Uuid,
    pub challenge_id: Uuid,
    pub description: String,
    pub image_urls: Vec<String>,
    pub weight: i32,
    pub status: VerificationStatus,
    pub verifications: Verifications,
    pub created_at: DateTime<Utc>,
}

impl From<Workproof> for WorkproofResponse {
    fn from(w: Workproof) -> Self {
        Self {
            status: w.status(),
            id: w.id,
            author: w.author,
            room_id: w.room_id,
            challenge_id: w.challenge_id,
            description: w.description,
            image_urls: w.image_urls,
            weight: w.weight,
            verifications: w.verifications.0,
            created_at: w.created_at,
        }
    }
}

/// Workproofs of a challenge
#[derive(Debug, Serialize)]
pub struct WorkproofsListResponse {
    pub workproofs: Vec<WorkproofResponse>,
    pub total: usize,
}
