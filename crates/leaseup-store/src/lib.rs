//! LeaseUp Store - SQLite persistence for the leasing schema
//!
//! Provides:
//! - Connection management and configuration (database path resolution)
//! - Checksummed, idempotent schema migrations
//! - Seed fixture format, parser and transactional importer (plus the
//!   embedded demo fixture)
//! - A typed repository over every table
//! - Read-only reports (balances, expiring leases, vacancies)

pub mod config;
pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;
pub mod reports;
pub mod schema;
pub mod seed;

// Re-export key types
pub use config::StoreConfig;
pub use errors::Result;
pub use repo::SqliteRepo;
