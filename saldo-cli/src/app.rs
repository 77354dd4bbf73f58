use anyhow::Context;
use saldo_core::tables::{TableSourceConfig, TableSourceRegistry};
use saldo_core::{
    LunchAllowance, NoBracketPolicy, Region, SimulationError, SimulationInput, Simulator,
    TableError, TablePeriod, TableSource,
};
use thiserror::Error;
use tracing::debug;

use crate::cli::Cli;
use crate::config::{AppConfig, Defaults};
use crate::report::Report;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("no withholding tables are published for {0}")]
    NoPublishedPeriod(Region),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

/// Registry with every table backend the binary supports.
pub fn build_registry() -> TableSourceRegistry {
    TableSourceRegistry::with_builtin_backends()
}

/// File configuration with the `--backend` and `--tables` overrides applied.
pub fn table_config(
    cli: &Cli,
    config: &AppConfig,
) -> TableSourceConfig {
    let mut tables = config.tables.clone();
    if let Some(backend) = &cli.backend {
        tables.backend = backend.clone();
    }
    if let Some(location) = &cli.tables {
        tables.location = location.clone();
    }
    tables
}

/// Explicit period, else the one covering `--date`, else the latest one.
pub fn resolve_period<S: TableSource + ?Sized>(
    source: &S,
    cli: &Cli,
    region: Region,
) -> Result<TablePeriod, AppError> {
    if let Some(period) = cli.period {
        return Ok(period);
    }
    if let Some(date) = cli.date {
        return Ok(source.resolve_period(date, region)?);
    }
    source
        .periods(region)?
        .last()
        .copied()
        .ok_or(AppError::NoPublishedPeriod(region))
}

pub fn build_input(
    cli: &Cli,
    defaults: &Defaults,
    region: Region,
    period: TablePeriod,
) -> SimulationInput {
    let mut input = SimulationInput::new(cli.income, region, period);
    input.married = cli.married;
    input.number_of_holders = cli.holders;
    input.number_of_dependents = cli.dependents;
    input.number_of_dependents_disabled = cli.disabled_dependents;
    input.disabled = cli.disabled;
    input.partner_disabled = cli.partner_disabled;
    input.twelfths = cli.twelfths.unwrap_or(defaults.twelfths);
    input.social_security_tax = cli
        .social_security_tax
        .unwrap_or(defaults.social_security_tax);
    input.lunch_allowance = LunchAllowance::new(cli.lunch_daily, cli.lunch_days, cli.lunch_mode);
    if cli.zero_tax_fallback {
        input.no_bracket_policy = NoBracketPolicy::ZeroTax;
    }
    input
}

/// Runs one simulation against an already opened source.
pub fn simulate_with<S: TableSource + ?Sized>(
    source: &S,
    cli: &Cli,
    defaults: &Defaults,
) -> Result<Report, AppError> {
    let region = cli.region.unwrap_or(defaults.region);
    let period = resolve_period(source, cli, region)?;
    debug!("simulating {} on {} tables for {}", cli.income, region, period);

    let input = build_input(cli, defaults, region, period);
    let result = Simulator::new(source).simulate(&input)?;

    Ok(Report::new(region, period, &result))
}

/// Loads the configuration, opens the table source and runs the simulation.
pub fn run(cli: &Cli) -> anyhow::Result<Report> {
    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    let tables = table_config(cli, &config);
    debug!("opening {} tables at {}", tables.backend, tables.location);
    let source = build_registry()
        .create(&tables)
        .with_context(|| format!("Failed to open tables at: {}", tables.location))?;

    let report = simulate_with(source.as_ref(), cli, &config.defaults)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use saldo_core::tables::MemoryTableSource;
    use saldo_core::{BoundarySignal, Situation, TaxBracket, TaxRetentionTable, Twelfths};

    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["saldo"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    fn period(s: &str) -> TablePeriod {
        s.parse().unwrap()
    }

    /// Single bracket taxing everything at 10 %.
    fn flat_table(period: TablePeriod) -> TaxRetentionTable {
        TaxRetentionTable {
            region: Region::Continente,
            period,
            situation: Situation::UnmarriedOrTwoHolders,
            description: String::new(),
            brackets: vec![TaxBracket {
                signal: BoundarySignal::Max,
                limit: dec!(100000),
                marginal_rate: dec!(0.1),
                base_deduction: dec!(0),
                deduction_coefficient_1: None,
                deduction_coefficient_2: None,
                per_dependent_deduction: dec!(0),
                effective_monthly_rate: dec!(0.1),
            }],
            dependent_disabled_addition_deduction: None,
            partner_disabled_addition_deduction: None,
        }
    }

    fn source() -> MemoryTableSource {
        MemoryTableSource::new()
            .with_table(flat_table(period("2024-01-01_2024-08-31")))
            .with_table(flat_table(period("2024-09-01_2024-12-31")))
    }

    // =========================================================================
    // table_config
    // =========================================================================

    #[test]
    fn flags_override_configured_tables() {
        let config = AppConfig::default();

        let tables = table_config(&cli(&["1000", "--tables", "/srv/irs"]), &config);

        assert_eq!(tables.backend, "json");
        assert_eq!(tables.location, "/srv/irs");
    }

    #[test]
    fn configured_tables_kept_without_flags() {
        let mut config = AppConfig::default();
        config.tables.location = "elsewhere".to_string();

        let tables = table_config(&cli(&["1000"]), &config);

        assert_eq!(tables, config.tables);
    }

    // =========================================================================
    // resolve_period
    // =========================================================================

    #[test]
    fn explicit_period_wins() {
        let resolved = resolve_period(
            &source(),
            &cli(&["1000", "--period", "2024-01-01_2024-08-31"]),
            Region::Continente,
        )
        .unwrap();

        assert_eq!(resolved, period("2024-01-01_2024-08-31"));
    }

    #[test]
    fn date_selects_covering_period() {
        let resolved = resolve_period(
            &source(),
            &cli(&["1000", "--date", "2024-03-15"]),
            Region::Continente,
        )
        .unwrap();

        assert_eq!(resolved, period("2024-01-01_2024-08-31"));
    }

    #[test]
    fn latest_period_is_the_default() {
        let resolved = resolve_period(&source(), &cli(&["1000"]), Region::Continente).unwrap();

        assert_eq!(resolved, period("2024-09-01_2024-12-31"));
    }

    #[test]
    fn region_without_tables_is_an_error() {
        let result = resolve_period(&source(), &cli(&["1000"]), Region::Acores);

        assert!(
            matches!(result, Err(AppError::NoPublishedPeriod(Region::Acores))),
            "got {result:?}"
        );
    }

    // =========================================================================
    // build_input
    // =========================================================================

    #[test]
    fn defaults_fill_missing_flags() {
        let defaults = Defaults {
            region: Region::Madeira,
            social_security_tax: dec!(0.095),
            twelfths: Twelfths::TwoMonths,
        };
        let p = period("2024-01-01_2024-08-31");

        let input = build_input(&cli(&["1000"]), &defaults, Region::Madeira, p);

        assert_eq!(input.social_security_tax, dec!(0.095));
        assert_eq!(input.twelfths, Twelfths::TwoMonths);
        assert_eq!(input.no_bracket_policy, NoBracketPolicy::Fail);
    }

    #[test]
    fn flags_override_defaults() {
        let p = period("2024-01-01_2024-08-31");

        let input = build_input(
            &cli(&[
                "1000",
                "--twelfths",
                "1",
                "--social-security-tax",
                "0.1",
                "--zero-tax-fallback",
                "--lunch-daily",
                "8",
                "--lunch-days",
                "20",
            ]),
            &Defaults::default(),
            Region::Continente,
            p,
        );

        assert_eq!(input.twelfths, Twelfths::OneMonth);
        assert_eq!(input.social_security_tax, dec!(0.1));
        assert_eq!(input.no_bracket_policy, NoBracketPolicy::ZeroTax);
        assert_eq!(input.lunch_allowance.monthly_value(), dec!(160));
    }

    // =========================================================================
    // simulate_with
    // =========================================================================

    #[test]
    fn simulation_uses_resolved_period() {
        let report =
            simulate_with(&source(), &cli(&["1000", "--date", "2024-10-01"]), &Defaults::default())
                .unwrap();

        assert_eq!(report.period, period("2024-09-01_2024-12-31"));
        assert_eq!(report.tax, dec!(100));
        assert_eq!(report.social_security, dec!(110));
        assert_eq!(report.net_salary, dec!(790));
    }

    #[test]
    fn missing_situation_table_surfaces_table_error() {
        let result = simulate_with(
            &source(),
            &cli(&["1000", "--dependents", "1"]),
            &Defaults::default(),
        );

        assert!(matches!(result, Err(AppError::Simulation(_))), "got {result:?}");
    }
}
