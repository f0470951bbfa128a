//! LeaseUp Core - domain kernel for the property-leasing store
//!
//! This crate provides the pieces shared by the persistence layer and the CLI:
//! - Row models for accounts, properties, tenancy and upkeep tables
//! - Closed status vocabularies validated at the application boundary
//! - The structured error facility (`ExError`) and its kind taxonomy
//! - The structured logging facility and its operation macros
//! - Password hashing for account rows
//! - Pure ledger computations (lease balances, expiring leases)

pub mod credentials;
pub mod errors;
pub mod ledger;
pub mod logging_facility;
pub mod model;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, LeaseUpError, Result};
pub use model::{LeaseRequestStatus, MaintenanceStatus, UnitStatus};
