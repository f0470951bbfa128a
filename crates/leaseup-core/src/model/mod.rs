//! Row models for the LeaseUp tables
//!
//! Each table has a row type (as read back from the store) and a `New*` type
//! used for inserts. `New*` types carry an optional explicit id and leave
//! defaulted columns optional so the database default applies when omitted.

pub mod account;
pub mod property;
pub mod status;
pub mod tenancy;
pub mod upkeep;

pub use account::{AdminUser, NewAdminUser, NewTenantUser, TenantUser};
pub use property::{NewProperty, NewUnit, Property, Unit};
pub use status::{LeaseRequestStatus, MaintenanceStatus, UnitStatus};
pub use tenancy::{Lease, LeaseRequest, NewLease, NewLeaseRequest, NewPayment, NewTenant, Payment, Tenant};
pub use upkeep::{EmergencyContact, MaintenanceRequest, NewEmergencyContact, NewMaintenanceRequest};

use chrono::NaiveDate;

use crate::errors::LeaseUpError;

/// Reject empty or whitespace-only required text
pub fn require_text(field: &'static str, value: &str) -> Result<(), LeaseUpError> {
    if value.trim().is_empty() {
        return Err(LeaseUpError::EmptyField { field });
    }
    Ok(())
}

/// Reject a date range whose end precedes its start
///
/// Open-ended ranges (either bound missing) are accepted.
pub fn validate_date_range(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<(), LeaseUpError> {
    if let (Some(start), Some(end)) = (start, end) {
        if end < start {
            return Err(LeaseUpError::InvalidDateRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
    }
    Ok(())
}

/// Reject negative or non-finite money values
pub fn validate_amount(field: &'static str, value: f64) -> Result<(), LeaseUpError> {
    if !value.is_finite() || value < 0.0 {
        return Err(LeaseUpError::InvalidAmount { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_range_validation() {
        assert!(validate_date_range(Some(date(2025, 1, 1)), Some(date(2025, 12, 31))).is_ok());
        assert!(validate_date_range(Some(date(2025, 1, 1)), Some(date(2025, 1, 1))).is_ok());
        assert!(validate_date_range(None, Some(date(2025, 1, 1))).is_ok());

        let err = validate_date_range(Some(date(2025, 2, 1)), Some(date(2025, 1, 1))).unwrap_err();
        assert_eq!(
            err,
            LeaseUpError::InvalidDateRange {
                start: "2025-02-01".to_string(),
                end: "2025-01-01".to_string()
            }
        );
    }

    #[test]
    fn test_amount_validation() {
        assert!(validate_amount("amount", 0.0).is_ok());
        assert!(validate_amount("amount", 6500.0).is_ok());
        assert!(validate_amount("amount", -1.0).is_err());
        assert!(validate_amount("amount", f64::NAN).is_err());
        assert!(validate_amount("amount", f64::INFINITY).is_err());
    }

    #[test]
    fn test_require_text() {
        assert!(require_text("name", "Greenfield Heights").is_ok());
        assert_eq!(
            require_text("name", "   "),
            Err(LeaseUpError::EmptyField { field: "name" })
        );
    }
}
