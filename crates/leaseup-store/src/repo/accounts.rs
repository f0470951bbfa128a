//! Admin and tenant user accounts

use super::{expect_row, query_all, Insert, SqliteRepo};
use crate::errors::{db_err, not_found, Result};
use leaseup_core::model::{AdminUser, NewAdminUser, NewTenantUser, TenantUser};
use rusqlite::{Connection, OptionalExtension, Row};

const ADMIN_COLUMNS: &str = "id, username, password_hash";
const TENANT_USER_COLUMNS: &str = "id, username, email, password_hash, phone, created_at";

fn admin_from_row(row: &Row<'_>) -> rusqlite::Result<AdminUser> {
    Ok(AdminUser {
        id: row.get("id")?,
        username: row.get("username")?,
        password_hash: row.get("password_hash")?,
    })
}

fn tenant_user_from_row(row: &Row<'_>) -> rusqlite::Result<TenantUser> {
    Ok(TenantUser {
        id: row.get("id")?,
        username: row.get("username")?,
        email: row.get("email")?,
        password_hash: row.get("password_hash")?,
        phone: row.get("phone")?,
        created_at: row.get("created_at")?,
    })
}

impl SqliteRepo {
    /// Insert an admin user and return its id
    ///
    /// A duplicate username fails with `Conflict`.
    pub fn insert_admin_user(conn: &Connection, user: &NewAdminUser) -> Result<i64> {
        user.validate()?;
        Insert::into_table("user")
            .value_opt("id", &user.id)
            .value("username", &user.username)
            .value("password_hash", &user.password_hash)
            .execute(conn, "insert_admin_user")
    }

    /// Get an admin user by id
    pub fn get_admin_user(conn: &Connection, id: i64) -> Result<AdminUser> {
        conn.query_row(
            &format!("SELECT {} FROM user WHERE id = ?1", ADMIN_COLUMNS),
            [id],
            admin_from_row,
        )
        .optional()
        .map_err(db_err("get_admin_user"))?
        .ok_or_else(|| not_found("get_admin_user", "user", id))
    }

    /// Find an admin user by username
    pub fn find_admin_by_username(conn: &Connection, username: &str) -> Result<Option<AdminUser>> {
        conn.query_row(
            &format!("SELECT {} FROM user WHERE username = ?1", ADMIN_COLUMNS),
            [username],
            admin_from_row,
        )
        .optional()
        .map_err(db_err("find_admin_by_username"))
    }

    /// Replace an admin user's password hash
    pub fn update_admin_password_hash(conn: &Connection, id: i64, password_hash: &str) -> Result<()> {
        let affected = conn
            .execute(
                "UPDATE user SET password_hash = ?1 WHERE id = ?2",
                rusqlite::params![password_hash, id],
            )
            .map_err(db_err("update_admin_password_hash"))?;
        expect_row(affected, "update_admin_password_hash", "user", id)
    }

    /// Insert a tenant user and return its id
    ///
    /// Usernames and emails are unique; a duplicate of either fails with
    /// `Conflict`.
    pub fn insert_tenant_user(conn: &Connection, user: &NewTenantUser) -> Result<i64> {
        user.validate()?;
        Insert::into_table("tenant_user")
            .value_opt("id", &user.id)
            .value("username", &user.username)
            .value("email", &user.email)
            .value("password_hash", &user.password_hash)
            .value_opt("phone", &user.phone)
            .value_opt("created_at", &user.created_at)
            .execute(conn, "insert_tenant_user")
    }

    /// Get a tenant user by id
    pub fn get_tenant_user(conn: &Connection, id: i64) -> Result<TenantUser> {
        conn.query_row(
            &format!("SELECT {} FROM tenant_user WHERE id = ?1", TENANT_USER_COLUMNS),
            [id],
            tenant_user_from_row,
        )
        .optional()
        .map_err(db_err("get_tenant_user"))?
        .ok_or_else(|| not_found("get_tenant_user", "tenant_user", id))
    }

    /// Find a tenant user by username
    pub fn find_tenant_user_by_username(
        conn: &Connection,
        username: &str,
    ) -> Result<Option<TenantUser>> {
        conn.query_row(
            &format!(
                "SELECT {} FROM tenant_user WHERE username = ?1",
                TENANT_USER_COLUMNS
            ),
            [username],
            tenant_user_from_row,
        )
        .optional()
        .map_err(db_err("find_tenant_user_by_username"))
    }

    /// Find a tenant user by email
    pub fn find_tenant_user_by_email(conn: &Connection, email: &str) -> Result<Option<TenantUser>> {
        conn.query_row(
            &format!("SELECT {} FROM tenant_user WHERE email = ?1", TENANT_USER_COLUMNS),
            [email],
            tenant_user_from_row,
        )
        .optional()
        .map_err(db_err("find_tenant_user_by_email"))
    }

    /// List tenant users ordered by id
    pub fn list_tenant_users(conn: &Connection) -> Result<Vec<TenantUser>> {
        query_all(
            conn,
            &format!("SELECT {} FROM tenant_user ORDER BY id", TENANT_USER_COLUMNS),
            [],
            "list_tenant_users",
            tenant_user_from_row,
        )
    }
}
