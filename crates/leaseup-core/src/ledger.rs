//! Lease ledger computations
//!
//! Pure functions over lease and payment rows. Rent accrues once per started
//! calendar month since the lease start; day-of-month is ignored.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::model::{Lease, Payment};

/// Leases ending within this many days count as expiring
pub const DEFAULT_EXPIRY_WINDOW_DAYS: i64 = 30;

/// Expected rent, payments received and outstanding balance of one lease
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaseBalance {
    pub lease_id: i64,
    pub unit_id: Option<i64>,
    pub tenant_id: Option<i64>,
    pub months: u32,
    pub expected: f64,
    pub paid: f64,
    pub balance: f64,
}

/// Whole calendar months between `start` and `as_of`, never negative
pub fn months_elapsed(start: NaiveDate, as_of: NaiveDate) -> u32 {
    let months =
        (as_of.year() - start.year()) * 12 + (as_of.month() as i32 - start.month() as i32);
    months.max(0) as u32
}

/// Compute the balance of `lease` as of a date
///
/// Only payments whose `lease_id` matches are counted, so the full payment
/// list may be passed. Returns `None` for leases without a start date.
pub fn lease_balance(lease: &Lease, payments: &[Payment], as_of: NaiveDate) -> Option<LeaseBalance> {
    let start = lease.start_date?;
    let months = months_elapsed(start, as_of);
    let expected = f64::from(months) * lease.monthly_rent;
    let paid: f64 = payments
        .iter()
        .filter(|p| p.lease_id == Some(lease.id))
        .map(|p| p.amount)
        .sum();

    Some(LeaseBalance {
        lease_id: lease.id,
        unit_id: lease.unit_id,
        tenant_id: lease.tenant_id,
        months,
        expected,
        paid,
        balance: expected - paid,
    })
}

/// Days from `as_of` until the lease ends (negative once it has ended)
pub fn days_remaining(lease: &Lease, as_of: NaiveDate) -> Option<i64> {
    lease.end_date.map(|end| (end - as_of).num_days())
}

/// Whether the lease ends within `window_days` of `as_of`
///
/// Leases that already ended count as expiring; open-ended leases never do.
pub fn is_expiring(lease: &Lease, as_of: NaiveDate, window_days: i64) -> bool {
    days_remaining(lease, as_of).is_some_and(|days| days <= window_days)
}
