//! Challenge request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::models::ChallengeStatus;

/// Create challenge request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateChallengeRequest {
    #[validate(length(min = 1, max = 256))]
    pub title: String,

    #[validate(length(min = 1, max = 65535))]
    pub description: String,

    /// XP granted for each verified workproof
    #[validate(range(min = 0, max = 1_000_000))]
    pub weight: i32,
}

/// Edit challenge request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateChallengeRequest {
    #[validate(length(min = 1, max = 256))]
    pub title: String,

    #[validate(length(min = 1, max = 65535))]
    pub description: String,
}

/// Open or close a challenge
#[derive(Debug, Deserialize)]
pub struct SetChallengeStatusRequest {
    pub status: ChallengeStatus,
}

/// List challenges query parameters
#[derive(Debug, Deserialize)]
pub struct ListChallengesQuery {
    pub status: Option<ChallengeStatus>,
}
