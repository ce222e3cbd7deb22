//! Challenge model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::constants::challenge_status;

/// Challenge database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Challenge {
    pub id: Uuid,
    pub room_id: Uuid,
    pub title: String,
    pub description: String,
    pub weight: i32,
    pub status: ChallengeStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Challenge {
    /// Closed challenges accept no new submissions
    pub fn is_open(&self) -> bool {
        self.status == ChallengeStatus::Open
    }
}

/// Challenge status enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "challenge_status", rename_all = "lowercase")]
pub enum ChallengeStatus {
    Open,
    Closed,
}

impl ChallengeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => challenge_status::OPEN,
            Self::Closed => challenge_status::CLOSED,
        }
    }
}

impl std::fmt::Display for ChallengeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn challenge(status: ChallengeStatus) -> Challenge {
        Challenge {
            id: Uuid::new_v4(),
            room_id: Uuid::new_v4(),
            title: "Write docs".into(),
            description: "Document the API".into(),
            weight: 10,
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_only_open_challenges_take_submissions() {
        assert!(challenge(ChallengeStatus::Open).is_open());
        assert!(!challenge(ChallengeStatus::Closed).is_open());
    }

    #[test]
    fn test_status_wire_form() {
        let json = serde_json::to_value(challenge(ChallengeStatus::Closed)).unwrap();
        assert_eq!(json["status"], "closed");
        assert_eq!(
            serde_json::from_str::<ChallengeStatus>(r#""open""#).unwrap(),
            ChallengeStatus::Open
        );
    }
}
