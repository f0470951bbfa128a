//! Dashboard reports
//!
//! Usage: leaseup report balances|expiring|vacancies [--as-of YYYY-MM-DD] [--json]

use super::{open_migrated, CommandResult};
use chrono::{NaiveDate, Utc};
use clap::{Args, Subcommand};
use leaseup_core::ledger::DEFAULT_EXPIRY_WINDOW_DAYS;
use leaseup_store::{reports, StoreConfig};

#[derive(Debug, Args)]
pub struct ReportArgs {
    #[command(subcommand)]
    pub command: ReportCommand,

    /// Print rows as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum ReportCommand {
    /// Expected rent, payments and balance per lease
    Balances(AsOfArgs),
    /// Leases ending within the window (or already ended)
    Expiring(ExpiringArgs),
    /// Vacant units with their last asking rent
    Vacancies,
}

#[derive(Debug, Args)]
pub struct AsOfArgs {
    /// Report date (defaults to today, UTC)
    #[arg(long)]
    pub as_of: Option<NaiveDate>,
}

#[derive(Debug, Args)]
pub struct ExpiringArgs {
    #[command(flatten)]
    pub as_of: AsOfArgs,

    /// Days ahead that count as expiring
    #[arg(long, default_value_t = DEFAULT_EXPIRY_WINDOW_DAYS)]
    pub window_days: i64,
}

impl AsOfArgs {
    fn date(&self) -> NaiveDate {
        self.as_of.unwrap_or_else(|| Utc::now().date_naive())
    }
}

/// Execute report command
pub fn execute(args: ReportArgs, config: &StoreConfig) -> CommandResult {
    let conn = open_migrated(config)?;

    match args.command {
        ReportCommand::Balances(as_of) => {
            let rows = reports::lease_balances(&conn, as_of.date())?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
                return Ok(());
            }
            println!("{:>6} {:>6} {:>12} {:>12} {:>12}", "lease", "months", "expected", "paid", "balance");
            for row in rows {
                println!(
                    "{:>6} {:>6} {:>12.2} {:>12.2} {:>12.2}",
                    row.lease_id, row.months, row.expected, row.paid, row.balance
                );
            }
        }
        ReportCommand::Expiring(expiring) => {
            let rows =
                reports::expiring_leases(&conn, expiring.as_of.date(), expiring.window_days)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
                return Ok(());
            }
            println!("{:>6} {:>6} {:>12} {:>6}", "lease", "unit", "end_date", "days");
            for row in rows {
                println!(
                    "{:>6} {:>6} {:>12} {:>6}",
                    row.lease.id,
                    row.lease.unit_id.map(|id| id.to_string()).unwrap_or_default(),
                    row.lease.end_date.map(|d| d.to_string()).unwrap_or_default(),
                    row.days_remaining
                );
            }
        }
        ReportCommand::Vacancies => {
            let rows = reports::available_units(&conn)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
                return Ok(());
            }
            for row in rows {
                println!(
                    "{:<12} {:<24} {:>10.2}",
                    row.unit.number, row.property_name, row.monthly_rent
                );
            }
        }
    }

    Ok(())
}
