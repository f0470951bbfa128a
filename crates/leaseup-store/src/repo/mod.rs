//! SQLite repository
//!
//! `SqliteRepo` groups the per-table operations as associated functions over
//! a borrowed `Connection`. A `Transaction` derefs to `Connection`, so the
//! same functions run inside the seed importer's transaction.
//!
//! Inserts only name the columns the caller supplied; anything left as
//! `None` takes the column default from the schema.

#![allow(clippy::result_large_err)]

mod accounts;
mod properties;
mod tenancy;
mod upkeep;

pub(crate) use properties::unit_from_row;

use crate::errors::{db_err, not_found, Result};
use leaseup_core::errors::LeaseUpError;
use rusqlite::types::{ToSql, Type};
use rusqlite::{Connection, Row};
use std::str::FromStr;

/// SQLite repository for the leasing tables
pub struct SqliteRepo;

/// Column-by-column INSERT that leaves omitted columns to their defaults
pub(crate) struct Insert<'a> {
    table: &'static str,
    columns: Vec<&'static str>,
    values: Vec<&'a dyn ToSql>,
}

impl<'a> Insert<'a> {
    pub(crate) fn into_table(table: &'static str) -> Self {
        Self {
            table,
            columns: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Always write this column
    pub(crate) fn value(mut self, column: &'static str, value: &'a dyn ToSql) -> Self {
        self.columns.push(column);
        self.values.push(value);
        self
    }

    /// Write this column only when a value is present
    pub(crate) fn value_opt<T: ToSql>(mut self, column: &'static str, value: &'a Option<T>) -> Self {
        if let Some(v) = value {
            self.columns.push(column);
            self.values.push(v);
        }
        self
    }

    /// Run the insert and return the new row id
    pub(crate) fn execute(self, conn: &Connection, op: &'static str) -> Result<i64> {
        let sql = if self.columns.is_empty() {
            format!("INSERT INTO {} DEFAULT VALUES", self.table)
        } else {
            let placeholders: Vec<String> =
                (1..=self.columns.len()).map(|i| format!("?{}", i)).collect();
            format!(
                "INSERT INTO {} ({}) VALUES ({})",
                self.table,
                self.columns.join(", "),
                placeholders.join(", ")
            )
        };

        conn.execute(&sql, rusqlite::params_from_iter(self.values.iter()))
            .map_err(|e| db_err(op)(e).with_entity(self.table))?;

        Ok(conn.last_insert_rowid())
    }
}

/// Turn an affected-row count of zero into `NotFound`
pub(crate) fn expect_row(
    affected: usize,
    op: &'static str,
    table: &'static str,
    id: i64,
) -> Result<()> {
    if affected == 0 {
        return Err(not_found(op, table, id));
    }
    Ok(())
}

/// Read a status column through its closed vocabulary
///
/// Unknown text fails the row conversion with the domain error attached,
/// which `from_rusqlite` turns back into `InvalidStatus`.
pub(crate) fn status_column<T>(row: &Row<'_>, column: &str) -> rusqlite::Result<T>
where
    T: FromStr<Err = LeaseUpError>,
{
    let text: String = row.get(column)?;
    text.parse().map_err(|e: LeaseUpError| {
        let idx = row.as_ref().column_index(column).unwrap_or(0);
        rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
    })
}

/// Collect every row of a prepared query through a mapper
pub(crate) fn query_all<T, P, F>(
    conn: &Connection,
    sql: &str,
    params: P,
    op: &'static str,
    map: F,
) -> Result<Vec<T>>
where
    P: rusqlite::Params,
    F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
{
    let mut stmt = conn.prepare(sql).map_err(db_err(op))?;
    let rows = stmt
        .query_map(params, map)
        .map_err(db_err(op))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(db_err(op))?;
    Ok(rows)
}
