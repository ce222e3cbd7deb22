//! Room model
//!
//! A room is the tenant boundary (one DAO instance). Challenges, members and
//! KPI widgets all hang off a room.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};
use uuid::Uuid;

use crate::constants::KPI_SLOTS;

/// Room database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Room {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub kpis: Json<Kpis>,
    pub created_at: DateTime<Utc>,
}

/// KPI widgets keyed by slot ("0", "1", "2")
pub type Kpis = BTreeMap<String, Kpi>;

/// A single dashboard metric
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kpi {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indicator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_type: Option<ChangeType>,
}

/// Direction of a KPI change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Increase,
    Decrease,
}

/// Parse a KPI slot id, accepting only the fixed widget slots
pub fn kpi_slot(slot: u8) -> Option<String> {
    (slot < KPI_SLOTS).then(|| slot.to_string())
}

/// Every slot, with empty metrics filled in for slots never set
pub fn kpis_with_defaults(kpis: &Kpis) -> Kpis {
    (0..KPI_SLOTS)
        .map(|slot| {
            let key = slot.to_string();
            let kpi = kpis.get(&key).cloned().unwrap_or_default();
            (key, kpi)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kpi_slot_bounds() {
        assert_eq!(kpi_slot(0).as_deref(), Some("0"));
        assert_eq!(kpi_slot(2).as_deref(), Some("2"));
        assert_eq!(kpi_slot(3), None);
    }

    #[test]
    fn test_patch_omits_unset_fields() {
        let patch = Kpi {
            indicator: Some("42".into()),
            change_type: Some(ChangeType::Increase),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            serde_json::json!({ "indicator": "42", "change_type": "increase" })
        );
    }

    #[test]
    fn test_defaults_fill_every_slot() {
        let mut kpis = Kpis::new();
        kpis.insert(
            "1".into(),
            Kpi {
                name: Some("Treasury".into()),
                ..Default::default()
            },
        );
        let filled = kpis_with_defaults(&kpis);
        assert_eq!(filled.len(), 3);
        assert_eq!(filled["0"], Kpi::default());
        assert_eq!(filled["1"].name.as_deref(), Some("Treasury"));
    }
}
