//! User request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::utils::validation::validate_discord_handle;

/// Update own profile request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(max = 64))]
    pub name: Option<String>,

    #[validate(length(max = 64), custom(function = "validate_discord_handle"))]
    pub discord_handle: Option<String>,
}
