//! Schema introspection
//!
//! Table inventory and row counts, used by `db status` and by tests that
//! check fixture contents.

use crate::errors::{db_err, Result};
use rusqlite::Connection;

/// Domain tables in dependency order (parents before children)
pub const TABLES: [&str; 10] = [
    "user",
    "tenant_user",
    "property",
    "unit",
    "tenant",
    "lease_request",
    "lease",
    "payment",
    "maintenance_request",
    "emergency_contact",
];

/// Bookkeeping table maintained by the migration runner
pub const SCHEMA_VERSION_TABLE: &str = "schema_version";

/// Row count of a single domain table
pub fn row_count(conn: &Connection, table: &str) -> Result<i64> {
    // Table names come from TABLES only; identifiers cannot be bound
    let sql = format!("SELECT COUNT(*) FROM \"{}\"", table);
    conn.query_row(&sql, [], |row| row.get(0))
        .map_err(|e| db_err("row_count")(e).with_entity(table.to_string()))
}

/// Row counts of every domain table, in dependency order
pub fn table_counts(conn: &Connection) -> Result<Vec<(&'static str, i64)>> {
    TABLES
        .iter()
        .map(|table| Ok((*table, row_count(conn, table)?)))
        .collect()
}

/// Names of all user tables present in the database, sorted
pub fn table_names(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare(
            "SELECT name FROM sqlite_master
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
             ORDER BY name",
        )
        .map_err(db_err("table_names"))?;
    let names = stmt
        .query_map([], |row| row.get(0))
        .map_err(db_err("table_names"))?
        .collect::<std::result::Result<Vec<String>, _>>()
        .map_err(db_err("table_names"))?;
    Ok(names)
}

/// Whether foreign-key enforcement is on for this connection
pub fn foreign_keys_enabled(conn: &Connection) -> Result<bool> {
    let enabled: i64 = conn
        .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
        .map_err(db_err("foreign_keys_enabled"))?;
    Ok(enabled == 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db, migrations};

    #[test]
    fn test_all_tables_created() {
        let mut conn = db::open_in_memory().unwrap();
        migrations::apply_migrations(&mut conn).unwrap();

        let names = table_names(&conn).unwrap();
        for table in TABLES.iter().chain([SCHEMA_VERSION_TABLE].iter()) {
            assert!(names.iter().any(|n| n == table), "missing table {}", table);
        }
        assert_eq!(names.len(), 11);
    }

    #[test]
    fn test_counts_on_empty_schema() {
        let mut conn = db::open_in_memory().unwrap();
        migrations::apply_migrations(&mut conn).unwrap();

        let counts = table_counts(&conn).unwrap();
        assert_eq!(counts.len(), TABLES.len());
        assert!(counts.iter().all(|(_, n)| *n == 0));
        assert!(foreign_keys_enabled(&conn).unwrap());
    }
}
