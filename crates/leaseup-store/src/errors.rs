//! Error handling for leaseup-store
//!
//! Wraps leaseup-core ExError with store-specific helpers. SQLite constraint
//! failures are classified so callers can tell a duplicate (`Conflict`) from
//! a dangling reference (`InvalidReference`).

use leaseup_core::errors::{ExError, ExErrorKind, LeaseUpError};
use rusqlite::ffi;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::ConstraintViolation)
        .with_op("migration_checksum")
        .with_message(format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ))
}

/// Create a seed validation error
pub fn seed_validation(reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("seed_parse")
        .with_message(reason.to_string())
}

/// Create a missing-row error for a table
pub fn not_found(op: &str, entity: &str, id: i64) -> ExError {
    ExError::new(ExErrorKind::NotFound)
        .with_op(op.to_string())
        .with_entity(entity.to_string())
        .with_entity_id(id)
        .with_message("Row not found")
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    let kind = match &err {
        rusqlite::Error::SqliteFailure(e, _) if e.code == rusqlite::ErrorCode::ConstraintViolation => {
            match e.extended_code {
                ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                    ExErrorKind::Conflict
                }
                ffi::SQLITE_CONSTRAINT_FOREIGNKEY => ExErrorKind::InvalidReference,
                _ => ExErrorKind::ConstraintViolation,
            }
        }
        rusqlite::Error::FromSqlConversionFailure(_, _, inner) => {
            // Stored text outside a closed vocabulary
            if let Some(domain) = inner.downcast_ref::<LeaseUpError>() {
                return ExError::from(domain.clone()).with_op("sqlite_read");
            }
            ExErrorKind::Serialization
        }
        rusqlite::Error::QueryReturnedNoRows => ExErrorKind::NotFound,
        _ => ExErrorKind::Persistence,
    };

    let message = err.to_string();
    let mut ex = ExError::new(kind).with_op("sqlite");
    if let Some(table) = constraint_table(&message) {
        ex = ex.with_entity(table.to_string());
    }
    ex.with_message(message)
}

/// Build a mapper that classifies a rusqlite error and tags the operation
pub fn db_err(op: &'static str) -> impl Fn(rusqlite::Error) -> ExError {
    move |err| from_rusqlite(err).with_op(op)
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Table named in a SQLite constraint message
/// ("UNIQUE constraint failed: tenant_user.email" -> "tenant_user")
fn constraint_table(message: &str) -> Option<&str> {
    let (_, target) = message.split_once("constraint failed: ")?;
    target.split('.').next().filter(|t| !t.is_empty())
}
