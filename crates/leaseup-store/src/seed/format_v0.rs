//! Seed Format v0 schema
//!
//! Defines the YAML structure for seed import. Each section lists rows of
//! one table with explicit ids; references name ids of parent rows. Every
//! section may be omitted.

use chrono::{DateTime, NaiveDate, Utc};
use leaseup_core::model::{LeaseRequestStatus, MaintenanceStatus, UnitStatus};
use serde::{Deserialize, Serialize};

/// Top-level seed file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedV0 {
    /// Schema version (must be 0 for this format)
    pub schema_version: u32,

    /// Fixture metadata
    #[serde(default)]
    pub fixture: Option<SeedFixture>,

    #[serde(default)]
    pub admin_users: Vec<SeedAdminUser>,
    #[serde(default)]
    pub tenant_users: Vec<SeedTenantUser>,
    #[serde(default)]
    pub properties: Vec<SeedProperty>,
    #[serde(default)]
    pub units: Vec<SeedUnit>,
    #[serde(default)]
    pub tenants: Vec<SeedTenant>,
    #[serde(default)]
    pub lease_requests: Vec<SeedLeaseRequest>,
    #[serde(default)]
    pub leases: Vec<SeedLease>,
    #[serde(default)]
    pub payments: Vec<SeedPayment>,
    #[serde(default)]
    pub maintenance_requests: Vec<SeedMaintenanceRequest>,
    #[serde(default)]
    pub emergency_contacts: Vec<SeedEmergencyContact>,
}

impl SeedV0 {
    /// Fixture name, when the seed declares one
    pub fn fixture_name(&self) -> Option<&str> {
        self.fixture.as_ref().map(|f| f.name.as_str())
    }

    /// Number of rows the seed will insert
    pub fn row_count(&self) -> usize {
        self.admin_users.len()
            + self.tenant_users.len()
            + self.properties.len()
            + self.units.len()
            + self.tenants.len()
            + self.lease_requests.len()
            + self.leases.len()
            + self.payments.len()
            + self.maintenance_requests.len()
            + self.emergency_contacts.len()
    }
}

/// Fixture metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedFixture {
    pub name: String,
}

/// Admin account; the password is hashed at import time
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedAdminUser {
    pub id: i64,
    pub username: String,
    pub password: String,
}

/// Tenant self-service account; the password is hashed at import time
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedTenantUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedProperty {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedUnit {
    pub id: i64,
    /// Property id
    #[serde(default)]
    pub property: Option<i64>,
    pub number: String,
    #[serde(default)]
    pub status: Option<UnitStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedTenant {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedLeaseRequest {
    pub id: i64,
    #[serde(default)]
    pub unit: Option<i64>,
    #[serde(default)]
    pub tenant_user: Option<i64>,
    #[serde(default)]
    pub tenant: Option<i64>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub monthly_rent: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: Option<LeaseRequestStatus>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedLease {
    pub id: i64,
    #[serde(default)]
    pub unit: Option<i64>,
    #[serde(default)]
    pub tenant: Option<i64>,
    /// Originating lease request id
    #[serde(default)]
    pub lease_request: Option<i64>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Omitted rent is stored as 0
    #[serde(default)]
    pub monthly_rent: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedPayment {
    pub id: i64,
    #[serde(default)]
    pub lease: Option<i64>,
    pub amount: f64,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedMaintenanceRequest {
    pub id: i64,
    #[serde(default)]
    pub unit: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<MaintenanceStatus>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedEmergencyContact {
    pub id: i64,
    #[serde(default)]
    pub unit: Option<i64>,
    #[serde(default)]
    pub unit_identifier: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_seed() {
        let yaml = r#"
schema_version: 0
fixture:
  name: minimal
properties:
  - id: 1
    name: Greenfield Heights
"#;

        let seed: SeedV0 = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(seed.schema_version, 0);
        assert_eq!(seed.fixture_name(), Some("minimal"));
        assert_eq!(seed.properties.len(), 1);
        assert!(seed.units.is_empty());
        assert_eq!(seed.row_count(), 1);
    }

    #[test]
    fn test_typed_fields() {
        let yaml = r#"
schema_version: 0
units:
  - id: 1
    number: Room 1
    status: occupied
leases:
  - id: 1
    unit: 1
    start_date: 2025-01-01
    end_date: 2025-12-31
    monthly_rent: 5000
maintenance_requests:
  - id: 1
    status: in_progress
    created_at: 2025-02-03T08:30:00Z
"#;

        let seed: SeedV0 = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(seed.units[0].status, Some(UnitStatus::Occupied));
        assert_eq!(
            seed.leases[0].start_date,
            NaiveDate::from_ymd_opt(2025, 1, 1)
        );
        assert_eq!(seed.leases[0].monthly_rent, Some(5000.0));
        assert_eq!(
            seed.maintenance_requests[0].status,
            Some(MaintenanceStatus::InProgress)
        );
    }

    #[test]
    fn test_unknown_status_rejected_by_deserialization() {
        let yaml = r#"
schema_version: 0
maintenance_requests:
  - id: 1
    status: completed
"#;
        assert!(serde_yaml::from_str::<SeedV0>(yaml).is_err());
    }
}
