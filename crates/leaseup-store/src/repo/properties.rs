//! Properties and their units

use super::{expect_row, query_all, status_column, Insert, SqliteRepo};
use crate::errors::{db_err, not_found, Result};
use leaseup_core::model::{NewProperty, NewUnit, Property, Unit, UnitStatus};
use rusqlite::{Connection, OptionalExtension, Row};

const UNIT_COLUMNS: &str = "id, number, status, property_id";

fn property_from_row(row: &Row<'_>) -> rusqlite::Result<Property> {
    Ok(Property {
        id: row.get("id")?,
        name: row.get("name")?,
        address: row.get("address")?,
    })
}

pub(crate) fn unit_from_row(row: &Row<'_>) -> rusqlite::Result<Unit> {
    Ok(Unit {
        id: row.get("id")?,
        number: row.get("number")?,
        status: status_column(row, "status")?,
        property_id: row.get("property_id")?,
    })
}

impl SqliteRepo {
    /// Insert a property and return its id
    pub fn insert_property(conn: &Connection, property: &NewProperty) -> Result<i64> {
        property.validate()?;
        Insert::into_table("property")
            .value_opt("id", &property.id)
            .value("name", &property.name)
            .value_opt("address", &property.address)
            .execute(conn, "insert_property")
    }

    /// Get a property by id
    pub fn get_property(conn: &Connection, id: i64) -> Result<Property> {
        conn.query_row(
            "SELECT id, name, address FROM property WHERE id = ?1",
            [id],
            property_from_row,
        )
        .optional()
        .map_err(db_err("get_property"))?
        .ok_or_else(|| not_found("get_property", "property", id))
    }

    /// List properties ordered by id
    pub fn list_properties(conn: &Connection) -> Result<Vec<Property>> {
        query_all(
            conn,
            "SELECT id, name, address FROM property ORDER BY id",
            [],
            "list_properties",
            property_from_row,
        )
    }

    /// Overwrite a property's name and address
    pub fn update_property(conn: &Connection, property: &Property) -> Result<()> {
        NewProperty {
            id: Some(property.id),
            name: property.name.clone(),
            address: property.address.clone(),
        }
        .validate()?;

        let affected = conn
            .execute(
                "UPDATE property SET name = ?1, address = ?2 WHERE id = ?3",
                rusqlite::params![property.name, property.address, property.id],
            )
            .map_err(db_err("update_property"))?;
        expect_row(affected, "update_property", "property", property.id)
    }

    /// Delete a property
    ///
    /// Fails with `InvalidReference` while units still point at it.
    pub fn delete_property(conn: &Connection, id: i64) -> Result<()> {
        let affected = conn
            .execute("DELETE FROM property WHERE id = ?1", [id])
            .map_err(db_err("delete_property"))?;
        expect_row(affected, "delete_property", "property", id)
    }

    /// Insert a unit and return its id
    ///
    /// An omitted status takes the column default (`vacant`).
    pub fn insert_unit(conn: &Connection, unit: &NewUnit) -> Result<i64> {
        unit.validate()?;
        let status = unit.status.map(|s| s.as_str());
        Insert::into_table("unit")
            .value_opt("id", &unit.id)
            .value("number", &unit.number)
            .value_opt("status", &status)
            .value_opt("property_id", &unit.property_id)
            .execute(conn, "insert_unit")
    }

    /// Get a unit by id
    pub fn get_unit(conn: &Connection, id: i64) -> Result<Unit> {
        conn.query_row(
            &format!("SELECT {} FROM unit WHERE id = ?1", UNIT_COLUMNS),
            [id],
            unit_from_row,
        )
        .optional()
        .map_err(db_err("get_unit"))?
        .ok_or_else(|| not_found("get_unit", "unit", id))
    }

    /// List units ordered by id
    pub fn list_units(conn: &Connection) -> Result<Vec<Unit>> {
        query_all(
            conn,
            &format!("SELECT {} FROM unit ORDER BY id", UNIT_COLUMNS),
            [],
            "list_units",
            unit_from_row,
        )
    }

    /// List the units belonging to a property
    pub fn list_units_by_property(conn: &Connection, property_id: i64) -> Result<Vec<Unit>> {
        query_all(
            conn,
            &format!(
                "SELECT {} FROM unit WHERE property_id = ?1 ORDER BY id",
                UNIT_COLUMNS
            ),
            [property_id],
            "list_units_by_property",
            unit_from_row,
        )
    }

    /// List units with the given occupancy
    pub fn list_units_by_status(conn: &Connection, status: UnitStatus) -> Result<Vec<Unit>> {
        query_all(
            conn,
            &format!("SELECT {} FROM unit WHERE status = ?1 ORDER BY id", UNIT_COLUMNS),
            [status.as_str()],
            "list_units_by_status",
            unit_from_row,
        )
    }

    /// Set a unit's occupancy
    ///
    /// Nothing else changes status; lease creation and approval never touch it.
    pub fn set_unit_status(conn: &Connection, id: i64, status: UnitStatus) -> Result<()> {
        let affected = conn
            .execute(
                "UPDATE unit SET status = ?1 WHERE id = ?2",
                rusqlite::params![status.as_str(), id],
            )
            .map_err(db_err("set_unit_status"))?;
        expect_row(affected, "set_unit_status", "unit", id)
    }

    /// Overwrite a unit's number, status and property
    pub fn update_unit(conn: &Connection, unit: &Unit) -> Result<()> {
        NewUnit::new(unit.number.clone(), unit.property_id).validate()?;

        let affected = conn
            .execute(
                "UPDATE unit SET number = ?1, status = ?2, property_id = ?3 WHERE id = ?4",
                rusqlite::params![unit.number, unit.status.as_str(), unit.property_id, unit.id],
            )
            .map_err(db_err("update_unit"))?;
        expect_row(affected, "update_unit", "unit", unit.id)
    }

    /// Delete a unit
    pub fn delete_unit(conn: &Connection, id: i64) -> Result<()> {
        let affected = conn
            .execute("DELETE FROM unit WHERE id = ?1", [id])
            .map_err(db_err("delete_unit"))?;
        expect_row(affected, "delete_unit", "unit", id)
    }
}
