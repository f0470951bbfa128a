//! Tenants, lease requests, leases and payments

use super::{expect_row, query_all, status_column, Insert, SqliteRepo};
use crate::errors::{db_err, not_found, Result};
use leaseup_core::model::{
    require_text, Lease, LeaseRequest, LeaseRequestStatus, NewLease, NewLeaseRequest, NewPayment,
    NewTenant, Payment, Tenant,
};
use rusqlite::{Connection, OptionalExtension, Row};

const LEASE_REQUEST_COLUMNS: &str = "id, unit_id, tenant_user_id, tenant_id, start_date, end_date, \
     monthly_rent, notes, status, created_at";
const LEASE_COLUMNS: &str =
    "id, unit_id, tenant_id, lease_request_id, start_date, end_date, monthly_rent";
const PAYMENT_COLUMNS: &str = "id, lease_id, amount, date";

fn tenant_from_row(row: &Row<'_>) -> rusqlite::Result<Tenant> {
    Ok(Tenant {
        id: row.get("id")?,
        name: row.get("name")?,
        phone: row.get("phone")?,
        email: row.get("email")?,
    })
}

fn lease_request_from_row(row: &Row<'_>) -> rusqlite::Result<LeaseRequest> {
    Ok(LeaseRequest {
        id: row.get("id")?,
        unit_id: row.get("unit_id")?,
        tenant_user_id: row.get("tenant_user_id")?,
        tenant_id: row.get("tenant_id")?,
        start_date: row.get("start_date")?,
        end_date: row.get("end_date")?,
        monthly_rent: row.get("monthly_rent")?,
        notes: row.get("notes")?,
        status: status_column(row, "status")?,
        created_at: row.get("created_at")?,
    })
}

fn lease_from_row(row: &Row<'_>) -> rusqlite::Result<Lease> {
    Ok(Lease {
        id: row.get("id")?,
        unit_id: row.get("unit_id")?,
        tenant_id: row.get("tenant_id")?,
        lease_request_id: row.get("lease_request_id")?,
        start_date: row.get("start_date")?,
        end_date: row.get("end_date")?,
        monthly_rent: row.get("monthly_rent")?,
    })
}

fn payment_from_row(row: &Row<'_>) -> rusqlite::Result<Payment> {
    Ok(Payment {
        id: row.get("id")?,
        lease_id: row.get("lease_id")?,
        amount: row.get("amount")?,
        date: row.get("date")?,
    })
}

impl SqliteRepo {
    // ===== Tenants =====

    /// Insert a tenant and return its id
    pub fn insert_tenant(conn: &Connection, tenant: &NewTenant) -> Result<i64> {
        tenant.validate()?;
        Insert::into_table("tenant")
            .value_opt("id", &tenant.id)
            .value("name", &tenant.name)
            .value_opt("phone", &tenant.phone)
            .value_opt("email", &tenant.email)
            .execute(conn, "insert_tenant")
    }

    /// Get a tenant by id
    pub fn get_tenant(conn: &Connection, id: i64) -> Result<Tenant> {
        conn.query_row(
            "SELECT id, name, phone, email FROM tenant WHERE id = ?1",
            [id],
            tenant_from_row,
        )
        .optional()
        .map_err(db_err("get_tenant"))?
        .ok_or_else(|| not_found("get_tenant", "tenant", id))
    }

    /// Find the first tenant registered with an email
    ///
    /// Tenant emails are not unique; the lowest id wins.
    pub fn find_tenant_by_email(conn: &Connection, email: &str) -> Result<Option<Tenant>> {
        conn.query_row(
            "SELECT id, name, phone, email FROM tenant WHERE email = ?1 ORDER BY id LIMIT 1",
            [email],
            tenant_from_row,
        )
        .optional()
        .map_err(db_err("find_tenant_by_email"))
    }

    /// List tenants ordered by id
    pub fn list_tenants(conn: &Connection) -> Result<Vec<Tenant>> {
        query_all(
            conn,
            "SELECT id, name, phone, email FROM tenant ORDER BY id",
            [],
            "list_tenants",
            tenant_from_row,
        )
    }

    /// Overwrite a tenant's name and contact details
    pub fn update_tenant(conn: &Connection, tenant: &Tenant) -> Result<()> {
        require_text("name", &tenant.name)?;
        let affected = conn
            .execute(
                "UPDATE tenant SET name = ?1, phone = ?2, email = ?3 WHERE id = ?4",
                rusqlite::params![tenant.name, tenant.phone, tenant.email, tenant.id],
            )
            .map_err(db_err("update_tenant"))?;
        expect_row(affected, "update_tenant", "tenant", tenant.id)
    }

    /// Delete a tenant
    pub fn delete_tenant(conn: &Connection, id: i64) -> Result<()> {
        let affected = conn
            .execute("DELETE FROM tenant WHERE id = ?1", [id])
            .map_err(db_err("delete_tenant"))?;
        expect_row(affected, "delete_tenant", "tenant", id)
    }

    // ===== Lease requests =====

    /// Insert a lease request and return its id
    ///
    /// An omitted status takes the column default (`pending`).
    pub fn insert_lease_request(conn: &Connection, request: &NewLeaseRequest) -> Result<i64> {
        request.validate()?;
        let status = request.status.map(|s| s.as_str());
        Insert::into_table("lease_request")
            .value_opt("id", &request.id)
            .value_opt("unit_id", &request.unit_id)
            .value_opt("tenant_user_id", &request.tenant_user_id)
            .value_opt("tenant_id", &request.tenant_id)
            .value_opt("start_date", &request.start_date)
            .value_opt("end_date", &request.end_date)
            .value_opt("monthly_rent", &request.monthly_rent)
            .value_opt("notes", &request.notes)
            .value_opt("status", &status)
            .value_opt("created_at", &request.created_at)
            .execute(conn, "insert_lease_request")
    }

    /// Get a lease request by id
    pub fn get_lease_request(conn: &Connection, id: i64) -> Result<LeaseRequest> {
        conn.query_row(
            &format!(
                "SELECT {} FROM lease_request WHERE id = ?1",
                LEASE_REQUEST_COLUMNS
            ),
            [id],
            lease_request_from_row,
        )
        .optional()
        .map_err(db_err("get_lease_request"))?
        .ok_or_else(|| not_found("get_lease_request", "lease_request", id))
    }

    /// List lease requests newest first
    ///
    /// `exclude` drops one status from the listing (the review queue hides
    /// rejected requests).
    pub fn list_lease_requests(
        conn: &Connection,
        exclude: Option<LeaseRequestStatus>,
    ) -> Result<Vec<LeaseRequest>> {
        let excluded = exclude.map(|s| s.as_str());
        query_all(
            conn,
            &format!(
                "SELECT {} FROM lease_request
                 WHERE ?1 IS NULL OR status != ?1
                 ORDER BY created_at DESC, id DESC",
                LEASE_REQUEST_COLUMNS
            ),
            [excluded],
            "list_lease_requests",
            lease_request_from_row,
        )
    }

    /// List the lease requests filed by a tenant user, newest first
    pub fn list_lease_requests_for_tenant_user(
        conn: &Connection,
        tenant_user_id: i64,
    ) -> Result<Vec<LeaseRequest>> {
        query_all(
            conn,
            &format!(
                "SELECT {} FROM lease_request WHERE tenant_user_id = ?1
                 ORDER BY created_at DESC, id DESC",
                LEASE_REQUEST_COLUMNS
            ),
            [tenant_user_id],
            "list_lease_requests_for_tenant_user",
            lease_request_from_row,
        )
    }

    /// Set a lease request's review status
    ///
    /// Only the status column changes; no lease, tenant or unit is touched.
    pub fn set_lease_request_status(
        conn: &Connection,
        id: i64,
        status: LeaseRequestStatus,
    ) -> Result<()> {
        let affected = conn
            .execute(
                "UPDATE lease_request SET status = ?1 WHERE id = ?2",
                rusqlite::params![status.as_str(), id],
            )
            .map_err(db_err("set_lease_request_status"))?;
        expect_row(affected, "set_lease_request_status", "lease_request", id)
    }

    /// Delete every lease request with the given status
    ///
    /// Returns the number of rows removed.
    pub fn purge_lease_requests(conn: &Connection, status: LeaseRequestStatus) -> Result<usize> {
        conn.execute(
            "DELETE FROM lease_request WHERE status = ?1",
            [status.as_str()],
        )
        .map_err(db_err("purge_lease_requests"))
    }

    // ===== Leases =====

    /// Insert a lease and return its id
    ///
    /// A second lease for the same lease request fails with `Conflict`.
    pub fn insert_lease(conn: &Connection, lease: &NewLease) -> Result<i64> {
        lease.validate()?;
        Insert::into_table("lease")
            .value_opt("id", &lease.id)
            .value_opt("unit_id", &lease.unit_id)
            .value_opt("tenant_id", &lease.tenant_id)
            .value_opt("lease_request_id", &lease.lease_request_id)
            .value_opt("start_date", &lease.start_date)
            .value_opt("end_date", &lease.end_date)
            .value("monthly_rent", &lease.monthly_rent)
            .execute(conn, "insert_lease")
    }

    /// Get a lease by id
    pub fn get_lease(conn: &Connection, id: i64) -> Result<Lease> {
        conn.query_row(
            &format!("SELECT {} FROM lease WHERE id = ?1", LEASE_COLUMNS),
            [id],
            lease_from_row,
        )
        .optional()
        .map_err(db_err("get_lease"))?
        .ok_or_else(|| not_found("get_lease", "lease", id))
    }

    /// Find the lease created from a lease request, if any
    pub fn find_lease_by_request(conn: &Connection, lease_request_id: i64) -> Result<Option<Lease>> {
        conn.query_row(
            &format!(
                "SELECT {} FROM lease WHERE lease_request_id = ?1",
                LEASE_COLUMNS
            ),
            [lease_request_id],
            lease_from_row,
        )
        .optional()
        .map_err(db_err("find_lease_by_request"))
    }

    /// List leases ordered by id
    pub fn list_leases(conn: &Connection) -> Result<Vec<Lease>> {
        query_all(
            conn,
            &format!("SELECT {} FROM lease ORDER BY id", LEASE_COLUMNS),
            [],
            "list_leases",
            lease_from_row,
        )
    }

    /// List the leases of a unit, latest first
    pub fn list_leases_for_unit(conn: &Connection, unit_id: i64) -> Result<Vec<Lease>> {
        query_all(
            conn,
            &format!(
                "SELECT {} FROM lease WHERE unit_id = ?1 ORDER BY id DESC",
                LEASE_COLUMNS
            ),
            [unit_id],
            "list_leases_for_unit",
            lease_from_row,
        )
    }

    /// Overwrite every column of a lease
    pub fn update_lease(conn: &Connection, lease: &Lease) -> Result<()> {
        lease.validate()?;
        let affected = conn
            .execute(
                "UPDATE lease SET unit_id = ?1, tenant_id = ?2, lease_request_id = ?3,
                     start_date = ?4, end_date = ?5, monthly_rent = ?6
                 WHERE id = ?7",
                rusqlite::params![
                    lease.unit_id,
                    lease.tenant_id,
                    lease.lease_request_id,
                    lease.start_date,
                    lease.end_date,
                    lease.monthly_rent,
                    lease.id,
                ],
            )
            .map_err(db_err("update_lease"))?;
        expect_row(affected, "update_lease", "lease", lease.id)
    }

    /// Delete a lease
    ///
    /// Fails with `InvalidReference` while payments still point at it.
    pub fn delete_lease(conn: &Connection, id: i64) -> Result<()> {
        let affected = conn
            .execute("DELETE FROM lease WHERE id = ?1", [id])
            .map_err(db_err("delete_lease"))?;
        expect_row(affected, "delete_lease", "lease", id)
    }

    // ===== Payments =====

    /// Record a payment and return its id
    ///
    /// An omitted date takes the insert time.
    pub fn insert_payment(conn: &Connection, payment: &NewPayment) -> Result<i64> {
        payment.validate()?;
        Insert::into_table("payment")
            .value_opt("id", &payment.id)
            .value_opt("lease_id", &payment.lease_id)
            .value("amount", &payment.amount)
            .value_opt("date", &payment.date)
            .execute(conn, "insert_payment")
    }

    /// List payments newest first
    pub fn list_payments(conn: &Connection) -> Result<Vec<Payment>> {
        query_all(
            conn,
            &format!(
                "SELECT {} FROM payment ORDER BY date DESC, id DESC",
                PAYMENT_COLUMNS
            ),
            [],
            "list_payments",
            payment_from_row,
        )
    }

    /// List the payments made against a lease, newest first
    pub fn list_payments_for_lease(conn: &Connection, lease_id: i64) -> Result<Vec<Payment>> {
        query_all(
            conn,
            &format!(
                "SELECT {} FROM payment WHERE lease_id = ?1 ORDER BY date DESC, id DESC",
                PAYMENT_COLUMNS
            ),
            [lease_id],
            "list_payments_for_lease",
            payment_from_row,
        )
    }
}
