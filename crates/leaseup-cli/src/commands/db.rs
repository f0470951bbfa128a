//! Schema commands
//!
//! Usage: leaseup db migrate | leaseup db status

use super::CommandResult;
use clap::{Args, Subcommand};
use leaseup_store::{db as store_db, migrations, schema, StoreConfig};

#[derive(Debug, Args)]
pub struct DbArgs {
    #[command(subcommand)]
    pub command: DbCommand,
}

#[derive(Debug, Subcommand)]
pub enum DbCommand {
    /// Apply pending migrations
    Migrate,
    /// Show applied migrations and row counts
    Status,
}

/// Execute db command
pub fn execute(args: DbArgs, config: &StoreConfig) -> CommandResult {
    match args.command {
        DbCommand::Migrate => execute_migrate(config),
        DbCommand::Status => execute_status(config),
    }
}

fn execute_migrate(config: &StoreConfig) -> CommandResult {
    let mut conn = store_db::open_configured(config)?;
    let applied = migrations::apply_migrations(&mut conn)?;

    println!(
        "Applied {} migration(s) to {}",
        applied,
        config.database_path.display()
    );
    Ok(())
}

fn execute_status(config: &StoreConfig) -> CommandResult {
    let conn = store_db::open_configured(config)?;

    println!("Database: {}", config.database_path.display());

    let applied = migrations::applied_migrations(&conn)?;
    let known = migrations::get_migrations();
    println!("Migrations ({}/{} applied):", applied.len(), known.len());
    for migration in &known {
        let state = if applied.iter().any(|a| a.migration_id == migration.id) {
            "applied"
        } else {
            "pending"
        };
        println!("  {} {}", migration.id, state);
    }

    let present = schema::table_names(&conn)?;
    println!("Tables:");
    for table in schema::TABLES {
        if present.iter().any(|name| name == table) {
            println!("  {:<20} {}", table, schema::row_count(&conn, table)?);
        } else {
            println!("  {:<20} missing", table);
        }
    }

    Ok(())
}
