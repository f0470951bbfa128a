//! Maintenance requests and emergency contacts

use super::{expect_row, query_all, status_column, Insert, SqliteRepo};
use crate::errors::{db_err, not_found, Result};
use leaseup_core::model::{
    EmergencyContact, MaintenanceRequest, MaintenanceStatus, NewEmergencyContact,
    NewMaintenanceRequest,
};
use rusqlite::{Connection, OptionalExtension, Row};

const MAINTENANCE_COLUMNS: &str = "id, unit_id, description, status, created_at";
const CONTACT_COLUMNS: &str = "id, unit_id, unit_identifier, name, phone";

fn maintenance_from_row(row: &Row<'_>) -> rusqlite::Result<MaintenanceRequest> {
    Ok(MaintenanceRequest {
        id: row.get("id")?,
        unit_id: row.get("unit_id")?,
        description: row.get("description")?,
        status: status_column(row, "status")?,
        created_at: row.get("created_at")?,
    })
}

fn contact_from_row(row: &Row<'_>) -> rusqlite::Result<EmergencyContact> {
    Ok(EmergencyContact {
        id: row.get("id")?,
        unit_id: row.get("unit_id")?,
        unit_identifier: row.get("unit_identifier")?,
        name: row.get("name")?,
        phone: row.get("phone")?,
    })
}

impl SqliteRepo {
    // ===== Maintenance requests =====

    /// Insert a maintenance request and return its id
    ///
    /// An omitted status takes the column default (`open`).
    pub fn insert_maintenance_request(
        conn: &Connection,
        request: &NewMaintenanceRequest,
    ) -> Result<i64> {
        let status = request.status.map(|s| s.as_str());
        Insert::into_table("maintenance_request")
            .value_opt("id", &request.id)
            .value_opt("unit_id", &request.unit_id)
            .value_opt("description", &request.description)
            .value_opt("status", &status)
            .value_opt("created_at", &request.created_at)
            .execute(conn, "insert_maintenance_request")
    }

    /// Get a maintenance request by id
    pub fn get_maintenance_request(conn: &Connection, id: i64) -> Result<MaintenanceRequest> {
        conn.query_row(
            &format!(
                "SELECT {} FROM maintenance_request WHERE id = ?1",
                MAINTENANCE_COLUMNS
            ),
            [id],
            maintenance_from_row,
        )
        .optional()
        .map_err(db_err("get_maintenance_request"))?
        .ok_or_else(|| not_found("get_maintenance_request", "maintenance_request", id))
    }

    /// List maintenance requests newest first
    pub fn list_maintenance_requests(conn: &Connection) -> Result<Vec<MaintenanceRequest>> {
        query_all(
            conn,
            &format!(
                "SELECT {} FROM maintenance_request ORDER BY created_at DESC, id DESC",
                MAINTENANCE_COLUMNS
            ),
            [],
            "list_maintenance_requests",
            maintenance_from_row,
        )
    }

    /// Set a maintenance request's progress
    pub fn set_maintenance_status(
        conn: &Connection,
        id: i64,
        status: MaintenanceStatus,
    ) -> Result<()> {
        let affected = conn
            .execute(
                "UPDATE maintenance_request SET status = ?1 WHERE id = ?2",
                rusqlite::params![status.as_str(), id],
            )
            .map_err(db_err("set_maintenance_status"))?;
        expect_row(affected, "set_maintenance_status", "maintenance_request", id)
    }

    /// Overwrite a maintenance request's unit, description and status
    pub fn update_maintenance_request(conn: &Connection, request: &MaintenanceRequest) -> Result<()> {
        let affected = conn
            .execute(
                "UPDATE maintenance_request SET unit_id = ?1, description = ?2, status = ?3
                 WHERE id = ?4",
                rusqlite::params![
                    request.unit_id,
                    request.description,
                    request.status.as_str(),
                    request.id,
                ],
            )
            .map_err(db_err("update_maintenance_request"))?;
        expect_row(
            affected,
            "update_maintenance_request",
            "maintenance_request",
            request.id,
        )
    }

    /// Delete a maintenance request
    pub fn delete_maintenance_request(conn: &Connection, id: i64) -> Result<()> {
        let affected = conn
            .execute("DELETE FROM maintenance_request WHERE id = ?1", [id])
            .map_err(db_err("delete_maintenance_request"))?;
        expect_row(affected, "delete_maintenance_request", "maintenance_request", id)
    }

    // ===== Emergency contacts =====

    /// Insert an emergency contact and return its id
    pub fn insert_emergency_contact(conn: &Connection, contact: &NewEmergencyContact) -> Result<i64> {
        Insert::into_table("emergency_contact")
            .value_opt("id", &contact.id)
            .value_opt("unit_id", &contact.unit_id)
            .value_opt("unit_identifier", &contact.unit_identifier)
            .value_opt("name", &contact.name)
            .value_opt("phone", &contact.phone)
            .execute(conn, "insert_emergency_contact")
    }

    /// Get an emergency contact by id
    pub fn get_emergency_contact(conn: &Connection, id: i64) -> Result<EmergencyContact> {
        conn.query_row(
            &format!("SELECT {} FROM emergency_contact WHERE id = ?1", CONTACT_COLUMNS),
            [id],
            contact_from_row,
        )
        .optional()
        .map_err(db_err("get_emergency_contact"))?
        .ok_or_else(|| not_found("get_emergency_contact", "emergency_contact", id))
    }

    /// List emergency contacts ordered by id
    pub fn list_emergency_contacts(conn: &Connection) -> Result<Vec<EmergencyContact>> {
        query_all(
            conn,
            &format!("SELECT {} FROM emergency_contact ORDER BY id", CONTACT_COLUMNS),
            [],
            "list_emergency_contacts",
            contact_from_row,
        )
    }

    /// Search emergency contacts by substring of unit identifier, name or phone
    ///
    /// Matching follows SQLite `LIKE` (case-insensitive for ASCII). An empty
    /// query matches every contact with at least one of those columns set.
    pub fn search_emergency_contacts(conn: &Connection, query: &str) -> Result<Vec<EmergencyContact>> {
        let pattern = format!("%{}%", escape_like(query));
        query_all(
            conn,
            &format!(
                "SELECT {} FROM emergency_contact
                 WHERE unit_identifier LIKE ?1 ESCAPE '\\'
                    OR name LIKE ?1 ESCAPE '\\'
                    OR phone LIKE ?1 ESCAPE '\\'
                 ORDER BY id",
                CONTACT_COLUMNS
            ),
            [pattern],
            "search_emergency_contacts",
            contact_from_row,
        )
    }

    /// Overwrite every column of an emergency contact
    pub fn update_emergency_contact(conn: &Connection, contact: &EmergencyContact) -> Result<()> {
        let affected = conn
            .execute(
                "UPDATE emergency_contact SET unit_id = ?1, unit_identifier = ?2, name = ?3, phone = ?4
                 WHERE id = ?5",
                rusqlite::params![
                    contact.unit_id,
                    contact.unit_identifier,
                    contact.name,
                    contact.phone,
                    contact.id,
                ],
            )
            .map_err(db_err("update_emergency_contact"))?;
        expect_row(affected, "update_emergency_contact", "emergency_contact", contact.id)
    }

    /// Delete an emergency contact
    pub fn delete_emergency_contact(conn: &Connection, id: i64) -> Result<()> {
        let affected = conn
            .execute("DELETE FROM emergency_contact WHERE id = ?1", [id])
            .map_err(db_err("delete_emergency_contact"))?;
        expect_row(affected, "delete_emergency_contact", "emergency_contact", id)
    }
}

/// Escape `LIKE` wildcards so the query is matched literally
fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("Room 1"), "Room 1");
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
    }
}
