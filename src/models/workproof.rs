//! Workproof model and the verification state model
//!
//! A workproof's status is never stored. It is derived from the
//! `verifications` map every time a workproof is read, so the vote
//! history is the single source of truth.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};
use uuid::Uuid;

/// A single peer vote on a workproof
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    pub accepted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Verification {
    pub fn accept() -> Self {
        Self {
            accepted: true,
            reason: None,
            created_at: None,
        }
    }

    pub fn reject(reason: impl Into<String>) -> Self {
        Self {
            accepted: false,
            reason: Some(reason.into()),
            created_at: None,
        }
    }
}

/// Votes keyed by verifier account. Key uniqueness means one vote per verifier.
pub type Verifications = BTreeMap<String, Verification>;

/// Workproof database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Workproof {
    pub id: Uuid,
    pub author: String,
    pub room_id: Uuid,
    pub challenge_id: Uuid,
    pub description: String,
    pub image_urls: Vec<String>,
    pub weight: i32,
    pub verifications: Json<Verifications>,
    pub created_at: DateTime<Utc>,
}

impl Workproof {
    /// Derived verification status
    pub fn status(&self) -> VerificationStatus {
        VerificationStatus::derive(&self.verifications.0)
    }

    /// First attached image, if any
    pub fn image_url(&self) -> Option<&str> {
        self.image_urls.first().map(String::as_str)
    }

    pub fn is_authored_by(&self, account: &str) -> bool {
        self.author == account
    }
}

/// Tri-state status derived from the votes cast on a workproof
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Pending,
    Verified,
    Reverted,
}

impl VerificationStatus {
    /// Derive the status from a set of votes.
    ///
    /// No votes is `Pending`. A single rejection reverts the workproof
    /// regardless of how many acceptances it also has. Otherwise it is
    /// `Verified`. Only the vote values matter, never their order.
    pub fn derive<'a, I>(verifications: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a Verification)>,
    {
        let mut any = false;
        for (_, verification) in verifications {
            if !verification.accepted {
                return Self::Reverted;
            }
            any = true;
        }

        if any { Self::Verified } else { Self::Pending }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Reverted => "reverted",
        }
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether an admin viewing a challenge has something to verify.
///
/// True iff some workproof written by someone other than `viewer` is still
/// pending.
pub fn has_work_to_verify(workproofs: &[Workproof], viewer: &str) -> bool {
    workproofs
        .iter()
        .any(|w| !w.is_authored_by(viewer) && w.status() == VerificationStatus::Pending)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn votes(entries: &[(&str, Verification)]) -> Verifications {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn workproof(author: &str, verifications: Verifications) -> Workproof {
        Workproof {
            id: Uuid::new_v4(),
            author: author.to_string(),
            room_id: Uuid::new_v4(),
            challenge_id: Uuid::new_v4(),
            description: "did the thing".to_string(),
            image_urls: vec![],
            weight: 10,
            verifications: Json(verifications),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_is_pending() {
        assert_eq!(
            VerificationStatus::derive(&Verifications::new()),
            VerificationStatus::Pending
        );
    }

    #[test]
    fn test_single_accept_is_verified() {
        let v = votes(&[("v1", Verification::accept())]);
        assert_eq!(VerificationStatus::derive(&v), VerificationStatus::Verified);
    }

    #[test]
    fn test_one_rejection_reverts() {
        let v = votes(&[
            ("v1", Verification::accept()),
            ("v2", Verification::reject("low effort")),
        ]);
        assert_eq!(VerificationStatus::derive(&v), VerificationStatus::Reverted);
    }

    #[test]
    fn test_rejection_wins_over_many_accepts() {
        let mut v: Verifications = (0..25)
            .map(|i| (format!("v{i:02}"), Verification::accept()))
            .collect();
        v.insert("zz".to_string(), Verification::reject("copied"));
        assert_eq!(VerificationStatus::derive(&v), VerificationStatus::Reverted);
    }

    #[test]
    fn test_order_independent() {
        let entries = [
            ("a".to_string(), Verification::accept()),
            ("b".to_string(), Verification::reject("no")),
            ("c".to_string(), Verification::accept()),
        ];
        let forward = VerificationStatus::derive(entries.iter().map(|(k, v)| (k, v)));
        let backward = VerificationStatus::derive(entries.iter().rev().map(|(k, v)| (k, v)));
        assert_eq!(forward, backward);
        assert_eq!(forward, VerificationStatus::Reverted);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&VerificationStatus::Reverted).unwrap(),
            "\"reverted\""
        );
        assert_eq!(
            serde_json::from_str::<VerificationStatus>(r#""verified""#).unwrap(),
            VerificationStatus::Verified
        );
        assert!(serde_json::from_str::<VerificationStatus>(r#""approved""#).is_err());
    }

    #[test]
    fn test_verification_json_shape() {
        let parsed: Verifications =
            serde_json::from_str(r#"{"0xa":{"accepted":false,"reason":"blurry"}}"#).unwrap();
        assert_eq!(parsed["0xa"], Verification::reject("blurry"));
    }

    #[test]
    fn test_has_work_to_verify_ignores_own_work() {
        let mine = workproof("alice", Verifications::new());
        assert!(!has_work_to_verify(std::slice::from_ref(&mine), "alice"));
        assert!(has_work_to_verify(&[mine], "bob"));
    }

    #[test]
    fn test_has_work_to_verify_ignores_decided_work() {
        let verified = workproof("bob", votes(&[("carol", Verification::accept())]));
        let reverted = workproof("bob", votes(&[("carol", Verification::reject("no"))]));
        assert!(!has_work_to_verify(&[verified.clone(), reverted], "alice"));

        let pending = workproof("dave", Verifications::new());
        assert!(has_work_to_verify(&[verified, pending], "alice"));
    }

    #[test]
    fn test_has_work_to_verify_empty() {
        assert!(!has_work_to_verify(&[], "alice"));
    }
}
