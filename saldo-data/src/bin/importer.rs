use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use saldo_core::{Region, TablePeriod};
use saldo_data::RetentionTableImporter;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Import a published withholding CSV into the JSON table layout.
///
/// The CSV is semicolon separated with a header row and the columns
/// situation, signal, limit, marginal rate, deduction, var1, var2,
/// per-dependent deduction and effective monthly rate. Decimal cells use a
/// comma; percentage cells end in `%`.
#[derive(Parser, Debug)]
#[command(name = "saldo-table-importer")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file for one region and period
    #[arg(short, long)]
    file: PathBuf,

    /// Region the CSV belongs to (continente, acores, madeira)
    #[arg(short, long)]
    region: Region,

    /// First day the tables apply (YYYY-MM-DD)
    #[arg(long)]
    start: NaiveDate,

    /// Last day the tables apply (YYYY-MM-DD)
    #[arg(long)]
    end: NaiveDate,

    /// Root of the table directory tree
    #[arg(short, long, default_value = "data/retention-tables")]
    output: PathBuf,

    /// Parse and validate only, without writing any file
    #[arg(long, default_value_t = false)]
    dry_run: bool,
}

/// Progress lines without timestamps; `RUST_LOG` overrides the `info` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .compact()
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();
    let period = TablePeriod::new(args.start, args.end).context("Invalid table period")?;

    info!("importing {} tables for {} from {}", args.region, period, args.file.display());

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let tables = RetentionTableImporter::default()
        .parse(file, args.region, period)
        .with_context(|| format!("Failed to import CSV: {}", args.file.display()))?;

    info!("parsed {} situation tables", tables.len());

    if args.dry_run {
        println!("Dry run: {} tables valid, nothing written.", tables.len());
        return Ok(());
    }

    let written = RetentionTableImporter::publish(&args.output, &tables)
        .with_context(|| format!("Failed to publish tables under: {}", args.output.display()))?;

    println!(
        "Successfully published {} tables under {}.",
        written.len(),
        args.output.display()
    );

    Ok(())
}
