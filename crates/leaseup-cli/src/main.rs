//! LeaseUp CLI
//!
//! Command-line interface for the LeaseUp store

use clap::{Parser, Subcommand};
use leaseup_core::logging_facility::{self, Profile};
use leaseup_store::StoreConfig;
use std::path::PathBuf;

mod commands;

/// Environment variable selecting the log format (`json` for structured output)
const LOG_FORMAT_ENV: &str = "LEASEUP_LOG_FORMAT";

#[derive(Debug, Parser)]
#[command(name = "leaseup")]
#[command(about = "LeaseUp - Property leasing store", long_about = None)]
struct Cli {
    /// Database file (defaults to LEASEUP_DATABASE, then database/leaseup.db
    /// if present, then instance/leaseup.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Schema operations
    Db(commands::db::DbArgs),
    /// Seed import operations
    Seed(commands::seed::SeedArgs),
    /// Dashboard reports
    Report(commands::report::ReportArgs),
}

fn main() {
    dotenvy::dotenv().ok();
    let format = std::env::var(LOG_FORMAT_ENV).ok();
    logging_facility::init(Profile::from_format(format.as_deref()));

    let cli = Cli::parse();
    let config = StoreConfig::resolve(cli.db);

    let result = match cli.command {
        Commands::Db(args) => commands::db::execute(args, &config),
        Commands::Seed(args) => commands::seed::execute(args, &config),
        Commands::Report(args) => commands::report::execute(args, &config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
