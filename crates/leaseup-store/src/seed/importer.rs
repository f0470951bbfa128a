//! Seed importer orchestration
//!
//! Imports a validated seed inside one transaction, inserting sections in
//! dependency order through the repository. Any failure rolls the whole
//! seed back, so a re-run of an applied seed fails with `Conflict` and
//! leaves the store unchanged.

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, io_error, Result};
use crate::repo::SqliteRepo;
use crate::seed::format_v0::SeedV0;
use crate::seed::{compute_seed_digest, parse_seed_file_with_db, parse_seed_str_with_db};
use leaseup_core::credentials::hash_password;
use leaseup_core::model::{
    NewAdminUser, NewEmergencyContact, NewLease, NewLeaseRequest, NewMaintenanceRequest,
    NewPayment, NewProperty, NewTenant, NewTenantUser, NewUnit,
};
use leaseup_core::{log_op_end, log_op_error, log_op_start};
use rusqlite::Connection;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Built-in demo fixture
pub const DEMO_SEED: &str = include_str!("../../seeds/demo.yaml");

/// Outcome of one seed import
#[derive(Debug, Clone, Serialize)]
pub struct SeedImportSummary {
    /// Correlation id of this import run
    pub run_id: String,
    pub fixture: Option<String>,
    pub digest: String,
    /// Rows inserted per table, in dependency order
    pub rows: Vec<(&'static str, usize)>,
}

impl SeedImportSummary {
    /// Total rows inserted
    pub fn total_rows(&self) -> usize {
        self.rows.iter().map(|(_, n)| n).sum()
    }
}

/// Import a seed file into the database
///
/// This is the main entry point for seed import. It:
/// 1. Parses and validates the seed YAML (references may name existing rows)
/// 2. Computes the seed digest
/// 3. Hashes account passwords
/// 4. Inserts every section within a single transaction
///
/// Returns the import summary on success
pub fn import_seed(path: &Path, conn: &mut Connection) -> Result<SeedImportSummary> {
    let run_id = uuid::Uuid::now_v7().to_string();
    log_op_start!("seed_import", run_id = %run_id, path = %path.display());
    let start = std::time::Instant::now();

    let result = parse_seed_file_with_db(path, Some(&*conn))
        .and_then(|seed| apply_seed(&seed, conn, run_id.clone()));

    finish("seed_import", result, start)
}

/// Import a seed held in memory
pub fn import_seed_str(content: &str, conn: &mut Connection) -> Result<SeedImportSummary> {
    let run_id = uuid::Uuid::now_v7().to_string();
    log_op_start!("seed_import", run_id = %run_id);
    let start = std::time::Instant::now();

    let result = parse_seed_str_with_db(content, Some(&*conn))
        .and_then(|seed| apply_seed(&seed, conn, run_id.clone()));

    finish("seed_import", result, start)
}

/// Import the built-in demo fixture
pub fn import_demo_seed(conn: &mut Connection) -> Result<SeedImportSummary> {
    import_seed_str(DEMO_SEED, conn)
}

/// Import every `*.yaml` / `*.yml` file of a directory, in file-name order
///
/// Each file is its own transaction; the first failure stops the run and
/// earlier files stay applied.
pub fn import_seed_dir(dir: &Path, conn: &mut Connection) -> Result<Vec<SeedImportSummary>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(|e| io_error("seed_import_dir", e))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext == "yaml" || ext == "yml")
        })
        .collect();
    paths.sort();

    paths
        .iter()
        .map(|path| import_seed(path, conn))
        .collect()
}

fn finish(
    op: &'static str,
    result: Result<SeedImportSummary>,
    start: std::time::Instant,
) -> Result<SeedImportSummary> {
    match result {
        Ok(summary) => {
            log_op_end!(
                op,
                duration_ms = start.elapsed().as_millis() as u64,
                run_id = %summary.run_id,
                digest = %summary.digest,
                rows = summary.total_rows() as u64
            );
            Ok(summary)
        }
        Err(e) => {
            log_op_error!(
                op,
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            Err(e)
        }
    }
}

/// Insert a validated seed in dependency order inside one transaction
fn apply_seed(seed: &SeedV0, conn: &mut Connection, run_id: String) -> Result<SeedImportSummary> {
    let digest = compute_seed_digest(seed)?;

    let tx = conn.transaction().map_err(from_rusqlite)?;

    for user in &seed.admin_users {
        let mut row = NewAdminUser::new(user.username.clone(), hash_password(&user.password)?);
        row.id = Some(user.id);
        SqliteRepo::insert_admin_user(&tx, &row)?;
    }

    for user in &seed.tenant_users {
        let mut row = NewTenantUser::new(
            user.username.clone(),
            user.email.clone(),
            hash_password(&user.password)?,
        );
        row.id = Some(user.id);
        row.phone = user.phone.clone();
        row.created_at = user.created_at;
        SqliteRepo::insert_tenant_user(&tx, &row)?;
    }

    for property in &seed.properties {
        SqliteRepo::insert_property(
            &tx,
            &NewProperty {
                id: Some(property.id),
                name: property.name.clone(),
                address: property.address.clone(),
            },
        )?;
    }

    for unit in &seed.units {
        SqliteRepo::insert_unit(
            &tx,
            &NewUnit {
                id: Some(unit.id),
                number: unit.number.clone(),
                status: unit.status,
                property_id: unit.property,
            },
        )?;
    }

    for tenant in &seed.tenants {
        SqliteRepo::insert_tenant(
            &tx,
            &NewTenant {
                id: Some(tenant.id),
                name: tenant.name.clone(),
                phone: tenant.phone.clone(),
                email: tenant.email.clone(),
            },
        )?;
    }

    for request in &seed.lease_requests {
        SqliteRepo::insert_lease_request(
            &tx,
            &NewLeaseRequest {
                id: Some(request.id),
                unit_id: request.unit,
                tenant_user_id: request.tenant_user,
                tenant_id: request.tenant,
                start_date: request.start_date,
                end_date: request.end_date,
                monthly_rent: request.monthly_rent,
                notes: request.notes.clone(),
                status: request.status,
                created_at: request.created_at,
            },
        )?;
    }

    for lease in &seed.leases {
        SqliteRepo::insert_lease(
            &tx,
            &NewLease {
                id: Some(lease.id),
                unit_id: lease.unit,
                tenant_id: lease.tenant,
                lease_request_id: lease.lease_request,
                start_date: lease.start_date,
                end_date: lease.end_date,
                monthly_rent: lease.monthly_rent.unwrap_or(0.0),
            },
        )?;
    }

    for payment in &seed.payments {
        SqliteRepo::insert_payment(
            &tx,
            &NewPayment {
                id: Some(payment.id),
                lease_id: payment.lease,
                amount: payment.amount,
                date: payment.date,
            },
        )?;
    }

    for request in &seed.maintenance_requests {
        SqliteRepo::insert_maintenance_request(
            &tx,
            &NewMaintenanceRequest {
                id: Some(request.id),
                unit_id: request.unit,
                description: request.description.clone(),
                status: request.status,
                created_at: request.created_at,
            },
        )?;
    }

    for contact in &seed.emergency_contacts {
        SqliteRepo::insert_emergency_contact(
            &tx,
            &NewEmergencyContact {
                id: Some(contact.id),
                unit_id: contact.unit,
                unit_identifier: contact.unit_identifier.clone(),
                name: contact.name.clone(),
                phone: contact.phone.clone(),
            },
        )?;
    }

    tx.commit().map_err(from_rusqlite)?;

    Ok(SeedImportSummary {
        run_id,
        fixture: seed.fixture_name().map(str::to_string),
        digest,
        rows: vec![
            ("user", seed.admin_users.len()),
            ("tenant_user", seed.tenant_users.len()),
            ("property", seed.properties.len()),
            ("unit", seed.units.len()),
            ("tenant", seed.tenants.len()),
            ("lease_request", seed.lease_requests.len()),
            ("lease", seed.leases.len()),
            ("payment", seed.payments.len()),
            ("maintenance_request", seed.maintenance_requests.len()),
            ("emergency_contact", seed.emergency_contacts.len()),
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{migrations, schema};
    use leaseup_core::errors::ExErrorKind;

    fn setup_test_db() -> Connection {
        let mut conn = crate::db::open_in_memory().unwrap();
        migrations::apply_migrations(&mut conn).unwrap();
        conn
    }

    #[test]
    fn test_import_demo_seed() {
        let mut conn = setup_test_db();
        let summary = import_demo_seed(&mut conn).unwrap();

        assert_eq!(summary.fixture.as_deref(), Some("demo"));
        assert_eq!(summary.digest.len(), 64);
        assert_eq!(summary.total_rows(), 18);
        assert_eq!(schema::row_count(&conn, "property").unwrap(), 4);
    }

    #[test]
    fn test_failed_import_rolls_back() {
        let mut conn = setup_test_db();
        // Property 2 already exists, so the second insert of the next seed
        // hits the primary key after property 1 was written.
        import_seed_str(
            "schema_version: 0\nproperties:\n  - { id: 2, name: Existing }\n",
            &mut conn,
        )
        .unwrap();

        let err = import_seed_str(
            "schema_version: 0\nproperties:\n  - { id: 1, name: New }\n  - { id: 2, name: Clash }\n",
            &mut conn,
        )
        .unwrap_err();

        assert_eq!(err.kind(), ExErrorKind::Conflict);
        assert_eq!(schema::row_count(&conn, "property").unwrap(), 1);
    }
}
