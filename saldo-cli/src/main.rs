use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use saldo_cli::{app, Cli};

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Logs go to stderr so stdout carries only the report. `RUST_LOG` picks
/// the level, `info` otherwise.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    debug!(?cli, "parsed arguments");

    let report = app::run(&cli)?;
    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{report}");
    }

    Ok(())
}
