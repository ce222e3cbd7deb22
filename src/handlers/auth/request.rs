//! Authentication request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::utils::validation::validate_account;

/// Sign-in nonce request
#[derive(Debug, Deserialize, Validate)]
pub struct NonceRequest {
    /// Hex-encoded Ed25519 public key
    #[validate(custom(function = "validate_account"))]
    pub account: String,
}

/// Signed challenge
#[derive(Debug, Deserialize, Validate)]
pub struct VerifySignatureRequest {
    #[validate(custom(function = "validate_account"))]
    pub account: String,

    /// Hex-encoded 64-byte signature over the sign-in message
    #[validate(length(min = 128, max = 130))]
    pub signature: String,
}

/// Refresh token request
#[derive(Debug, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Logout request
#[derive(Debug, Default, Deserialize)]
pub struct LogoutRequest {
    pub refresh_token: Option<String>,
    pub all_sessions: Option<bool>,
}
