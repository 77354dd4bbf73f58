use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use rust_decimal::Decimal;
use saldo_core::{LunchAllowanceMode, Region, TablePeriod, Twelfths};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Portuguese net salary simulator.
///
/// Classifies the worker, picks the IRS withholding table published for the
/// region and period, and prints the monthly and yearly salary figures.
///
/// The table period is `--period` when given, otherwise the period covering
/// `--date`, otherwise the latest period published for the region.
#[derive(Debug, Parser)]
#[command(name = "saldo")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Monthly base salary in euros
    pub income: Decimal,

    /// TOML configuration file (defaults to ./saldo.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Tax region (continente, acores, madeira)
    #[arg(short, long)]
    pub region: Option<Region>,

    /// Table validity period, e.g. 2024-01-01_2024-08-31
    #[arg(short, long, conflicts_with = "date")]
    pub period: Option<TablePeriod>,

    /// Pick the period covering this date (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<NaiveDate>,

    #[arg(long, default_value_t = false)]
    pub married: bool,

    /// Number of income holders in the household (1 or 2)
    #[arg(long)]
    pub holders: Option<u8>,

    #[arg(long)]
    pub dependents: Option<u32>,

    /// How many of the dependents are disabled
    #[arg(long)]
    pub disabled_dependents: Option<u32>,

    /// The worker is disabled
    #[arg(long, default_value_t = false)]
    pub disabled: bool,

    /// The partner is disabled (married, single holder only)
    #[arg(long, default_value_t = false)]
    pub partner_disabled: bool,

    /// Bonus months paid in twelfths (0, 0.5, 1 or 2)
    #[arg(short, long)]
    pub twelfths: Option<Twelfths>,

    /// Social security rate, e.g. 0.11
    #[arg(long)]
    pub social_security_tax: Option<Decimal>,

    /// Lunch allowance paid per working day
    #[arg(long, default_value_t = Decimal::ZERO)]
    pub lunch_daily: Decimal,

    /// Working days with lunch allowance in the month
    #[arg(long, default_value_t = 0)]
    pub lunch_days: u32,

    /// How the lunch allowance is paid (cupon or salary)
    #[arg(long, default_value = "cupon")]
    pub lunch_mode: LunchAllowanceMode,

    /// Treat income outside every bracket as untaxed instead of failing
    #[arg(long, default_value_t = false)]
    pub zero_tax_fallback: bool,

    /// Print the result as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Table backend, overriding the configuration file
    #[arg(long)]
    pub backend: Option<String>,

    /// Table location, overriding the configuration file
    #[arg(long)]
    pub tables: Option<String>,
}
