use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{require_text, validate_amount, validate_date_range, LeaseRequestStatus};
use crate::errors::LeaseUpError;

/// Tenancy record bound by leases
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTenant {
    pub id: Option<i64>,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl NewTenant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            phone: None,
            email: None,
        }
    }

    pub fn validate(&self) -> Result<(), LeaseUpError> {
        require_text("name", &self.name)
    }
}

/// Tenant-submitted application for a unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaseRequest {
    pub id: i64,
    pub unit_id: Option<i64>,
    pub tenant_user_id: Option<i64>,
    pub tenant_id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub monthly_rent: Option<f64>,
    pub notes: Option<String>,
    pub status: LeaseRequestStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewLeaseRequest {
    pub id: Option<i64>,
    pub unit_id: Option<i64>,
    pub tenant_user_id: Option<i64>,
    pub tenant_id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub monthly_rent: Option<f64>,
    pub notes: Option<String>,
    /// `None` leaves the column default (`pending`)
    pub status: Option<LeaseRequestStatus>,
    pub created_at: Option<DateTime<Utc>>,
}

impl NewLeaseRequest {
    pub fn validate(&self) -> Result<(), LeaseUpError> {
        validate_date_range(self.start_date, self.end_date)?;
        if let Some(rent) = self.monthly_rent {
            validate_amount("monthly_rent", rent)?;
        }
        Ok(())
    }
}

/// Tenancy agreement binding one unit and one tenant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lease {
    pub id: i64,
    pub unit_id: Option<i64>,
    pub tenant_id: Option<i64>,
    /// Originating application; at most one lease per request
    pub lease_request_id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub monthly_rent: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewLease {
    pub id: Option<i64>,
    pub unit_id: Option<i64>,
    pub tenant_id: Option<i64>,
    pub lease_request_id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub monthly_rent: f64,
}

impl NewLease {
    pub fn validate(&self) -> Result<(), LeaseUpError> {
        validate_date_range(self.start_date, self.end_date)?;
        validate_amount("monthly_rent", self.monthly_rent)
    }
}

impl Lease {
    pub fn validate(&self) -> Result<(), LeaseUpError> {
        validate_date_range(self.start_date, self.end_date)?;
        validate_amount("monthly_rent", self.monthly_rent)
    }
}

/// Rent payment against a lease
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub lease_id: Option<i64>,
    pub amount: f64,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPayment {
    pub id: Option<i64>,
    pub lease_id: Option<i64>,
    pub amount: f64,
    /// Defaults to the insert time when `None`
    pub date: Option<DateTime<Utc>>,
}

impl NewPayment {
    pub fn new(lease_id: i64, amount: f64) -> Self {
        Self {
            id: None,
            lease_id: Some(lease_id),
            amount,
            date: None,
        }
    }

    pub fn validate(&self) -> Result<(), LeaseUpError> {
        validate_amount("amount", self.amount)?;
        if self.amount == 0.0 {
            return Err(LeaseUpError::InvalidAmount {
                field: "amount",
                value: self.amount,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lease_rejects_inverted_dates() {
        let lease = NewLease {
            start_date: NaiveDate::from_ymd_opt(2025, 6, 1),
            end_date: NaiveDate::from_ymd_opt(2025, 5, 31),
            monthly_rent: 5000.0,
            ..Default::default()
        };
        assert!(matches!(
            lease.validate(),
            Err(LeaseUpError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn test_payment_must_be_positive() {
        assert!(NewPayment::new(1, 5000.0).validate().is_ok());
        assert!(NewPayment::new(1, 0.0).validate().is_err());
        assert!(NewPayment::new(1, -10.0).validate().is_err());
    }

    #[test]
    fn test_lease_request_rent_optional() {
        let request = NewLeaseRequest {
            unit_id: Some(2),
            tenant_user_id: Some(1),
            ..Default::default()
        };
        assert!(request.validate().is_ok());

        let request = NewLeaseRequest {
            monthly_rent: Some(-1.0),
            ..Default::default()
        };
        assert!(request.validate().is_err());
    }
}
