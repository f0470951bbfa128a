use serde::{Deserialize, Serialize};

use super::{require_text, UnitStatus};
use crate::errors::LeaseUpError;

/// Rental property (building or complex)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProperty {
    pub id: Option<i64>,
    pub name: String,
    pub address: Option<String>,
}

impl NewProperty {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            address: None,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn validate(&self) -> Result<(), LeaseUpError> {
        require_text("name", &self.name)
    }
}

/// Rentable sub-space of a property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: i64,
    pub number: String,
    pub status: UnitStatus,
    pub property_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewUnit {
    pub id: Option<i64>,
    pub number: String,
    /// `None` leaves the column default (`vacant`)
    pub status: Option<UnitStatus>,
    pub property_id: Option<i64>,
}

impl NewUnit {
    pub fn new(number: impl Into<String>, property_id: Option<i64>) -> Self {
        Self {
            id: None,
            number: number.into(),
            status: None,
            property_id,
        }
    }

    pub fn validate(&self) -> Result<(), LeaseUpError> {
        require_text("number", &self.number)
    }
}
