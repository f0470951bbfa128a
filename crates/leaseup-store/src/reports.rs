//! Read-only reports
//!
//! Dashboard figures over the stored rows: lease balances, leases close to
//! their end date and vacant units with their asking rent.

#![allow(clippy::result_large_err)]

use crate::errors::Result;
use crate::repo::{query_all, unit_from_row, SqliteRepo};
use chrono::NaiveDate;
use leaseup_core::ledger::{self, LeaseBalance};
use leaseup_core::model::{Lease, Unit};
use leaseup_core::{log_op_end, log_op_error, log_op_start};
use rusqlite::Connection;
use serde::Serialize;

/// Property name reported for units without a property row
pub const UNKNOWN_PROPERTY: &str = "Unknown";

/// A lease ending within the report window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpiringLease {
    pub lease: Lease,
    /// Negative once the lease has ended
    pub days_remaining: i64,
}

/// A vacant unit with the rent of its most recent lease
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvailableUnit {
    pub unit: Unit,
    pub property_name: String,
    /// 0 when the unit was never leased
    pub monthly_rent: f64,
}

/// Expected rent, payments and balance of every lease with a start date
pub fn lease_balances(conn: &Connection, as_of: NaiveDate) -> Result<Vec<LeaseBalance>> {
    log_op_start!("report_lease_balances", as_of = %as_of);
    let start = std::time::Instant::now();

    let result = compute_balances(conn, as_of);

    finish("report_lease_balances", result, start)
}

fn compute_balances(conn: &Connection, as_of: NaiveDate) -> Result<Vec<LeaseBalance>> {
    let leases = SqliteRepo::list_leases(conn)?;
    let payments = SqliteRepo::list_payments(conn)?;
    Ok(leases
        .iter()
        .filter_map(|lease| ledger::lease_balance(lease, &payments, as_of))
        .collect())
}

/// Leases ending within `window_days` of `as_of`, soonest first
///
/// Leases that already ended are included.
pub fn expiring_leases(
    conn: &Connection,
    as_of: NaiveDate,
    window_days: i64,
) -> Result<Vec<ExpiringLease>> {
    log_op_start!("report_expiring_leases", as_of = %as_of, window_days = window_days);
    let start = std::time::Instant::now();

    let result = SqliteRepo::list_leases(conn).map(|leases| {
        let mut expiring: Vec<ExpiringLease> = leases
            .into_iter()
            .filter(|lease| ledger::is_expiring(lease, as_of, window_days))
            .filter_map(|lease| {
                let days_remaining = ledger::days_remaining(&lease, as_of)?;
                Some(ExpiringLease {
                    lease,
                    days_remaining,
                })
            })
            .collect();
        expiring.sort_by_key(|e| (e.days_remaining, e.lease.id));
        expiring
    });

    finish("report_expiring_leases", result, start)
}

/// Vacant units with their property name and latest lease rent
pub fn available_units(conn: &Connection) -> Result<Vec<AvailableUnit>> {
    log_op_start!("report_available_units");
    let start = std::time::Instant::now();

    let result = query_all(
        conn,
        "SELECT u.id AS id, u.number AS number, u.status AS status,
                u.property_id AS property_id,
                COALESCE(p.name, ?1) AS property_name,
                COALESCE(
                    (SELECT l.monthly_rent FROM lease l
                     WHERE l.unit_id = u.id ORDER BY l.id DESC LIMIT 1),
                    0
                ) AS monthly_rent
         FROM unit u
         LEFT JOIN property p ON p.id = u.property_id
         WHERE u.status = 'vacant'
         ORDER BY u.id",
        [UNKNOWN_PROPERTY],
        "report_available_units",
        |row| {
            Ok(AvailableUnit {
                unit: unit_from_row(row)?,
                property_name: row.get("property_name")?,
                monthly_rent: row.get("monthly_rent")?,
            })
        },
    );

    finish("report_available_units", result, start)
}

fn finish<T>(op: &'static str, result: Result<Vec<T>>, start: std::time::Instant) -> Result<Vec<T>> {
    match result {
        Ok(rows) => {
            log_op_end!(
                op,
                duration_ms = start.elapsed().as_millis() as u64,
                rows = rows.len() as u64
            );
            Ok(rows)
        }
        Err(e) => {
            log_op_error!(op, e.clone(), duration_ms = start.elapsed().as_millis() as u64);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations;
    use leaseup_core::model::{NewLease, NewUnit};

    #[test]
    fn test_unit_without_property_or_lease() {
        let mut conn = crate::db::open_in_memory().unwrap();
        migrations::apply_migrations(&mut conn).unwrap();
        let unit_id = SqliteRepo::insert_unit(&conn, &NewUnit::new("Loft", None)).unwrap();

        let units = available_units(&conn).unwrap();
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].unit.id, unit_id);
        assert_eq!(units[0].property_name, UNKNOWN_PROPERTY);
        assert_eq!(units[0].monthly_rent, 0.0);

        SqliteRepo::insert_lease(
            &conn,
            &NewLease {
                unit_id: Some(unit_id),
                monthly_rent: 4200.0,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(available_units(&conn).unwrap()[0].monthly_rent, 4200.0);
    }
}
