use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::MaintenanceStatus;

/// Maintenance issue reported against a unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRequest {
    pub id: i64,
    pub unit_id: Option<i64>,
    pub description: Option<String>,
    pub status: MaintenanceStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewMaintenanceRequest {
    pub id: Option<i64>,
    pub unit_id: Option<i64>,
    pub description: Option<String>,
    /// `None` leaves the column default (`open`)
    pub status: Option<MaintenanceStatus>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Contact record kept per unit for lookup independent of any lease
///
/// `unit_identifier` duplicates the unit's display number so a lookup does
/// not need the unit row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub id: i64,
    pub unit_id: Option<i64>,
    pub unit_identifier: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewEmergencyContact {
    pub id: Option<i64>,
    pub unit_id: Option<i64>,
    pub unit_identifier: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
}
