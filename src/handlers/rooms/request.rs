//! Room request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::{
    models::{ChangeType, Kpi},
    utils::validation::validate_account,
};

/// Create room request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRoomRequest {
    #[validate(length(min = 1, max = 128))]
    pub name: String,

    #[validate(length(max = 4096))]
    pub description: Option<String>,
}

/// Partial update of one KPI widget; omitted fields are kept
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateKpiRequest {
    #[validate(length(max = 64))]
    pub name: Option<String>,

    #[validate(length(max = 64))]
    pub indicator: Option<String>,

    #[validate(length(max = 64))]
    pub change: Option<String>,

    pub change_type: Option<ChangeType>,
}

impl From<UpdateKpiRequest> for Kpi {
    fn from(req: UpdateKpiRequest) -> Self {
        Kpi {
            name: req.name,
            indicator: req.indicator,
            change: req.change,
            change_type: req.change_type,
        }
    }
}

/// Add a member or replace their roles
#[derive(Debug, Deserialize, Validate)]
pub struct GrantMembershipRequest {
    #[validate(custom(function = "validate_account"))]
    pub account: String,

    /// `member` is always added
    #[serde(default)]
    #[validate(length(max = 8))]
    pub roles: Vec<String>,
}
