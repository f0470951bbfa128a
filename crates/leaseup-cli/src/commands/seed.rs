//! Seed import commands
//!
//! Usage: leaseup seed import <PATH> | leaseup seed demo

use super::{open_migrated, CommandResult};
use clap::{Args, Subcommand};
use leaseup_store::seed::{self, SeedImportSummary};
use leaseup_store::StoreConfig;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct SeedArgs {
    #[command(subcommand)]
    pub command: SeedCommand,
}

#[derive(Debug, Subcommand)]
pub enum SeedCommand {
    /// Import a seed file, or every *.yaml / *.yml file in a directory
    Import(ImportArgs),
    /// Import the built-in demo fixture
    Demo,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Path to seed YAML file or directory
    pub path: PathBuf,
}

/// Execute seed command
pub fn execute(args: SeedArgs, config: &StoreConfig) -> CommandResult {
    let mut conn = open_migrated(config)?;

    match args.command {
        SeedCommand::Import(import_args) => {
            let summaries = if import_args.path.is_dir() {
                seed::import_seed_dir(&import_args.path, &mut conn)?
            } else {
                vec![seed::import_seed(&import_args.path, &mut conn)?]
            };
            if summaries.is_empty() {
                println!("No seed files found in {}", import_args.path.display());
            }
            summaries.iter().for_each(print_summary);
        }
        SeedCommand::Demo => {
            let summary = seed::import_demo_seed(&mut conn)?;
            print_summary(&summary);
        }
    }

    Ok(())
}

fn print_summary(summary: &SeedImportSummary) {
    println!(
        "Imported {} ({} rows, digest: {})",
        summary.fixture.as_deref().unwrap_or("seed"),
        summary.total_rows(),
        summary.digest
    );
}
