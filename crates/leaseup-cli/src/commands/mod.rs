pub mod db;
pub mod report;
pub mod seed;

use leaseup_store::{db as store_db, migrations, StoreConfig};
use rusqlite::Connection;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Open the configured database with the schema brought up to date
pub fn open_migrated(config: &StoreConfig) -> Result<Connection, Box<dyn std::error::Error>> {
    let mut conn = store_db::open_configured(config)?;
    migrations::apply_migrations(&mut conn)?;
    Ok(conn)
}
