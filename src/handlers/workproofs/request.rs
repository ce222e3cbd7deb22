//! Workproof request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::models::VerificationStatus;

/// Submit workproof request
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitWorkproofRequest {
    #[validate(length(min = 1, max = 65535))]
    pub description: String,

    /// URL returned by the upload endpoint
    #[validate(url, length(max = 2048))]
    pub image_url: Option<String>,
}

/// A verifier's vote
#[derive(Debug, Deserialize, Validate)]
pub struct VerifyWorkproofRequest {
    pub accepted: bool,

    /// Optional note shown next to the vote
    #[validate(length(max = 2048))]
    pub reason: Option<String>,
}

/// List workproofs query parameters
#[derive(Debug, Deserialize)]
pub struct ListWorkproofsQuery {
    pub status: Option<VerificationStatus>,
}
