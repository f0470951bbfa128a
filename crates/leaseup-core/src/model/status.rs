//! Closed status vocabularies
//!
//! The schema stores statuses as free text. These enums are the only values
//! the repository writes and the only values it accepts when reading back.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::LeaseUpError;

/// Occupancy of a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitStatus {
    #[default]
    Vacant,
    Occupied,
}

impl UnitStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitStatus::Vacant => "vacant",
            UnitStatus::Occupied => "occupied",
        }
    }
}

impl FromStr for UnitStatus {
    type Err = LeaseUpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vacant" => Ok(UnitStatus::Vacant),
            "occupied" => Ok(UnitStatus::Occupied),
            other => Err(LeaseUpError::InvalidStatus {
                field: "unit",
                value: other.to_string(),
            }),
        }
    }
}

/// Review state of a tenant's lease application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaseRequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl LeaseRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaseRequestStatus::Pending => "pending",
            LeaseRequestStatus::Approved => "approved",
            LeaseRequestStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for LeaseRequestStatus {
    type Err = LeaseUpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(LeaseRequestStatus::Pending),
            "approved" => Ok(LeaseRequestStatus::Approved),
            "rejected" => Ok(LeaseRequestStatus::Rejected),
            other => Err(LeaseUpError::InvalidStatus {
                field: "lease_request",
                value: other.to_string(),
            }),
        }
    }
}

/// Progress of a maintenance request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    #[default]
    Open,
    InProgress,
    Closed,
}

impl MaintenanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaintenanceStatus::Open => "open",
            MaintenanceStatus::InProgress => "in_progress",
            MaintenanceStatus::Closed => "closed",
        }
    }
}

impl FromStr for MaintenanceStatus {
    type Err = LeaseUpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(MaintenanceStatus::Open),
            "in_progress" => Ok(MaintenanceStatus::InProgress),
            "closed" => Ok(MaintenanceStatus::Closed),
            other => Err(LeaseUpError::InvalidStatus {
                field: "maintenance_request",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for UnitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for LeaseRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for MaintenanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
