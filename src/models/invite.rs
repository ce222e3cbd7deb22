//! Invite model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Invite database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Invite {
    pub id: Uuid,
    pub room_id: Uuid,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl Invite {
    /// Join link embedding the invite id
    pub fn link(&self, public_url: &str) -> String {
        format!(
            "{}/dao/{}/join?inviteCode={}",
            public_url.trim_end_matches('/'),
            self.room_id,
            self.id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_format() {
        let invite = Invite {
            id: Uuid::nil(),
            room_id: Uuid::nil(),
            created_by: "a".into(),
            created_at: Utc::now(),
        };
        assert_eq!(
            invite.link("https://guild.example/"),
            "https://guild.example/dao/00000000-0000-0000-0000-000000000000/join?inviteCode=00000000-0000-0000-0000-000000000000"
        );
    }
}
