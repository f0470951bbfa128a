//! Seed parser with validation
//!
//! Parses YAML and validates schema version, id and account uniqueness,
//! referential integrity, date ranges, amounts and passwords. Nothing is
//! written until a seed passes every check.

#![allow(clippy::result_large_err)]

use crate::errors::{db_err, seed_validation, Result};
use crate::seed::format_v0::SeedV0;
use leaseup_core::credentials::validate_password;
use leaseup_core::model::{require_text, validate_amount, validate_date_range};
use rusqlite::{Connection, OptionalExtension};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Parse a seed file from a path
pub fn parse_seed_file(path: &Path) -> Result<SeedV0> {
    parse_seed_file_with_db(path, None)
}

/// Parse a seed file from a path with optional database context for cross-seed validation
pub fn parse_seed_file_with_db(path: &Path, conn: Option<&Connection>) -> Result<SeedV0> {
    let content = fs::read_to_string(path)
        .map_err(|e| seed_validation(&format!("Failed to read seed file {}: {}", path.display(), e)))?;

    parse_seed_str_with_db(&content, conn)
}

/// Parse a seed from a string
pub fn parse_seed_str(content: &str) -> Result<SeedV0> {
    parse_seed_str_with_db(content, None)
}

/// Parse a seed from a string with optional database context for cross-seed validation
///
/// With a connection, references may also name rows already in the database.
pub fn parse_seed_str_with_db(content: &str, conn: Option<&Connection>) -> Result<SeedV0> {
    let seed: SeedV0 = serde_yaml::from_str(content)
        .map_err(|e| seed_validation(&format!("YAML parse error: {}", e)))?;

    validate_seed(&seed, conn)?;

    Ok(seed)
}

/// Ids declared by one seed section, checked for duplicates
fn section_ids<I>(section: &str, ids: I) -> Result<HashSet<i64>>
where
    I: IntoIterator<Item = i64>,
{
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(seed_validation(&format!(
                "Duplicate id {} in {}",
                id, section
            )));
        }
    }
    Ok(seen)
}

/// Reject a value seen twice within the seed
fn unique_values<'a, I>(what: &str, values: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for value in values {
        if !seen.insert(value) {
            return Err(seed_validation(&format!("Duplicate {} {:?}", what, value)));
        }
    }
    Ok(())
}

/// A reference resolvable against the seed and, optionally, the database
struct References<'c> {
    conn: Option<&'c Connection>,
}

impl References<'_> {
    fn check(
        &self,
        owner: &str,
        owner_id: i64,
        target_table: &str,
        declared: &HashSet<i64>,
        reference: Option<i64>,
    ) -> Result<()> {
        let Some(id) = reference else {
            return Ok(());
        };
        if declared.contains(&id) {
            return Ok(());
        }
        if let Some(conn) = self.conn {
            let exists = conn
                .query_row(
                    &format!("SELECT 1 FROM {} WHERE id = ?1", target_table),
                    [id],
                    |_| Ok(()),
                )
                .optional()
                .map_err(db_err("seed_parse"))?
                .is_some();
            if exists {
                return Ok(());
            }
        }
        Err(seed_validation(&format!(
            "{} {} references non-existent {} {}",
            owner, owner_id, target_table, id
        )))
    }
}

/// Validate a parsed seed
fn validate_seed(seed: &SeedV0, conn: Option<&Connection>) -> Result<()> {
    if seed.schema_version != 0 {
        return Err(seed_validation(&format!(
            "Unsupported schema_version: {}. Expected 0",
            seed.schema_version
        )));
    }

    // Ids are unique per section
    section_ids("admin_users", seed.admin_users.iter().map(|r| r.id))?;
    let tenant_users = section_ids("tenant_users", seed.tenant_users.iter().map(|r| r.id))?;
    let properties = section_ids("properties", seed.properties.iter().map(|r| r.id))?;
    let units = section_ids("units", seed.units.iter().map(|r| r.id))?;
    let tenants = section_ids("tenants", seed.tenants.iter().map(|r| r.id))?;
    let lease_requests =
        section_ids("lease_requests", seed.lease_requests.iter().map(|r| r.id))?;
    let leases = section_ids("leases", seed.leases.iter().map(|r| r.id))?;
    section_ids("payments", seed.payments.iter().map(|r| r.id))?;
    section_ids(
        "maintenance_requests",
        seed.maintenance_requests.iter().map(|r| r.id),
    )?;
    section_ids(
        "emergency_contacts",
        seed.emergency_contacts.iter().map(|r| r.id),
    )?;

    // Account uniqueness within the seed
    unique_values(
        "admin username",
        seed.admin_users.iter().map(|u| u.username.as_str()),
    )?;
    unique_values(
        "tenant username",
        seed.tenant_users.iter().map(|u| u.username.as_str()),
    )?;
    unique_values(
        "tenant email",
        seed.tenant_users.iter().map(|u| u.email.as_str()),
    )?;

    // Row contents
    let row_err = |section: &str, id: i64, e: leaseup_core::errors::LeaseUpError| {
        seed_validation(&format!("{} {}: {}", section, id, e))
    };

    for user in &seed.admin_users {
        require_text("username", &user.username).map_err(|e| row_err("admin_users", user.id, e))?;
        validate_password(&user.password).map_err(|e| row_err("admin_users", user.id, e))?;
    }
    for user in &seed.tenant_users {
        require_text("username", &user.username)
            .and_then(|_| require_text("email", &user.email))
            .and_then(|_| validate_password(&user.password))
            .map_err(|e| row_err("tenant_users", user.id, e))?;
    }
    for property in &seed.properties {
        require_text("name", &property.name).map_err(|e| row_err("properties", property.id, e))?;
    }
    for unit in &seed.units {
        require_text("number", &unit.number).map_err(|e| row_err("units", unit.id, e))?;
    }
    for tenant in &seed.tenants {
        require_text("name", &tenant.name).map_err(|e| row_err("tenants", tenant.id, e))?;
    }
    for request in &seed.lease_requests {
        validate_date_range(request.start_date, request.end_date)
            .and_then(|_| match request.monthly_rent {
                Some(rent) => validate_amount("monthly_rent", rent),
                None => Ok(()),
            })
            .map_err(|e| row_err("lease_requests", request.id, e))?;
    }
    for lease in &seed.leases {
        validate_date_range(lease.start_date, lease.end_date)
            .and_then(|_| validate_amount("monthly_rent", lease.monthly_rent.unwrap_or(0.0)))
            .map_err(|e| row_err("leases", lease.id, e))?;
    }
    for payment in &seed.payments {
        validate_amount("amount", payment.amount).map_err(|e| row_err("payments", payment.id, e))?;
        if payment.amount == 0.0 {
            return Err(seed_validation(&format!(
                "payments {}: amount must be positive",
                payment.id
            )));
        }
    }

    // Referential integrity
    let refs = References { conn };
    for unit in &seed.units {
        refs.check("unit", unit.id, "property", &properties, unit.property)?;
    }
    for request in &seed.lease_requests {
        refs.check("lease_request", request.id, "unit", &units, request.unit)?;
        refs.check(
            "lease_request",
            request.id,
            "tenant_user",
            &tenant_users,
            request.tenant_user,
        )?;
        refs.check("lease_request", request.id, "tenant", &tenants, request.tenant)?;
    }
    let mut linked_requests = HashSet::new();
    for lease in &seed.leases {
        refs.check("lease", lease.id, "unit", &units, lease.unit)?;
        refs.check("lease", lease.id, "tenant", &tenants, lease.tenant)?;
        refs.check(
            "lease",
            lease.id,
            "lease_request",
            &lease_requests,
            lease.lease_request,
        )?;
        if let Some(request_id) = lease.lease_request {
            if !linked_requests.insert(request_id) {
                return Err(seed_validation(&format!(
                    "lease_request {} is linked to more than one lease",
                    request_id
                )));
            }
        }
    }
    for payment in &seed.payments {
        refs.check("payment", payment.id, "lease", &leases, payment.lease)?;
    }
    for request in &seed.maintenance_requests {
        refs.check("maintenance_request", request.id, "unit", &units, request.unit)?;
    }
    for contact in &seed.emergency_contacts {
        refs.check("emergency_contact", contact.id, "unit", &units, contact.unit)?;
    }

    Ok(())
}
