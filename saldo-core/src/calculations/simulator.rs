//! Net salary simulation for a dependent worker.
//!
//! # Example
//!
//! ```no_run
//! use rust_decimal_macros::dec;
//! use saldo_core::calculations::simulate;
//! use saldo_core::tables::JsonDirectorySource;
//! use saldo_core::{Region, SimulationInput};
//!
//! let source = JsonDirectorySource::new("data/retention-tables");
//! let period = "2024-01-01_2024-08-31".parse().unwrap();
//! let input = SimulationInput::new(dec!(1500), Region::Continente, period);
//!
//! let result = simulate(&source, &input).unwrap();
//!
//! assert_eq!(result.net_salary, dec!(1131.66));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

use crate::calculations::classifier::{classify, ConditionError};
use crate::calculations::withholding::{
    disability_deduction, WithholdingCalculator, WithholdingInput,
};
use crate::models::{
    BracketError, NoBracketPolicy, SimulationInput, SimulationResult, Situation,
    TaxRetentionTable,
};
use crate::tables::{TableError, TableKey, TableSource};

/// Salary payments per year: twelve months plus holiday and Christmas subsidies.
const PAYMENTS_PER_YEAR: u32 = 14;

/// Months in which a lunch allowance is paid.
const LUNCH_ALLOWANCE_MONTHS: u32 = 11;

/// Ceiling for monthly amounts, keeping every product well inside `Decimal` range.
const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Lunch allowance days in one month.
const MAX_LUNCH_DAYS: u32 = 31;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimulationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Condition(#[from] ConditionError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Bracket(#[from] BracketError),
}

/// Runs simulations against one table source.
pub struct Simulator<S> {
    source: S,
}

impl<S: TableSource> Simulator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Computes monthly and yearly salary figures for `input`.
    ///
    /// # Errors
    ///
    /// * [`SimulationError::InvalidInput`] for out-of-domain amounts or more
    ///   disabled dependents than dependents.
    /// * [`SimulationError::Condition`] when the household cannot be
    ///   classified.
    /// * [`SimulationError::Table`] when the table cannot be loaded.
    /// * [`SimulationError::Bracket`] when no bracket matches and the input's
    ///   policy is [`NoBracketPolicy::Fail`].
    pub fn simulate(
        &self,
        input: &SimulationInput,
    ) -> Result<SimulationResult, SimulationError> {
        validate(input)?;

        let situation = classify(&input.condition())?;
        let lunch = &input.lunch_allowance;

        let twelfths_income = input.twelfths.income(input.income);
        let taxable_income = input.income + lunch.taxable_monthly_value();
        let retention_income = taxable_income + twelfths_income;
        let gross_income = retention_income + lunch.tax_free_monthly_value();

        let key = TableKey::new(input.region, input.period, situation);
        let table = self.source.load(&key)?;

        let tax = self.tax(input, &table, taxable_income, twelfths_income)?;
        let social_security = retention_income * input.social_security_tax;
        let net_salary = gross_income - tax - social_security;

        let yearly_net_salary =
            net_salary * (Decimal::from(PAYMENTS_PER_YEAR) - input.twelfths.months());
        let yearly_gross_salary = input.income * Decimal::from(PAYMENTS_PER_YEAR)
            + lunch.monthly_value() * Decimal::from(LUNCH_ALLOWANCE_MONTHS);

        debug!(%situation, %taxable_income, %tax, %net_salary, "simulation complete");

        Ok(SimulationResult {
            situation,
            taxable_income,
            twelfths_income,
            gross_income,
            tax,
            social_security,
            social_security_tax: input.social_security_tax,
            net_salary,
            yearly_net_salary,
            yearly_gross_salary,
            lunch_allowance: lunch.clone(),
        })
    }

    fn tax(
        &self,
        input: &SimulationInput,
        table: &TaxRetentionTable,
        taxable_income: Decimal,
        twelfths_income: Decimal,
    ) -> Result<Decimal, SimulationError> {
        let bracket = match table.find_bracket(taxable_income) {
            Ok(bracket) => bracket,
            Err(err) => match input.no_bracket_policy {
                NoBracketPolicy::Fail => return Err(err.into()),
                NoBracketPolicy::ZeroTax => {
                    warn!(
                        table = %TableKey::new(table.region, table.period, table.situation),
                        %taxable_income,
                        "no bracket matched, withholding nothing"
                    );
                    return Ok(Decimal::ZERO);
                }
            },
        };
        debug!(
            limit = %bracket.limit,
            signal = bracket.signal.as_str(),
            rate = %bracket.marginal_rate,
            "bracket selected"
        );

        let partner_disabled = input.partner_disabled && has_single_holder(table.situation);
        let extra_deduction = disability_deduction(
            table,
            input.number_of_dependents_disabled.unwrap_or(0),
            partner_disabled,
        );

        let result = WithholdingCalculator::new(bracket).calculate(&WithholdingInput {
            taxable_income,
            twelfths_income,
            number_of_dependents: input.number_of_dependents.unwrap_or(0),
            extra_deduction,
        });

        Ok(result.tax)
    }
}

/// Convenience wrapper around [`Simulator::simulate`] for a borrowed source.
pub fn simulate<S: TableSource + ?Sized>(
    source: &S,
    input: &SimulationInput,
) -> Result<SimulationResult, SimulationError> {
    Simulator::new(source).simulate(input)
}

fn has_single_holder(situation: Situation) -> bool {
    matches!(
        situation,
        Situation::MarriedSingleHolder | Situation::MarriedSingleHolderDisabled
    )
}

fn validate(input: &SimulationInput) -> Result<(), SimulationError> {
    if input.income.is_sign_negative() {
        return Err(SimulationError::InvalidInput(format!(
            "income must not be negative, got {}",
            input.income
        )));
    }
    if input.income > MAX_AMOUNT {
        return Err(SimulationError::InvalidInput(format!(
            "income must not exceed {MAX_AMOUNT}, got {}",
            input.income
        )));
    }
    if input.social_security_tax < Decimal::ZERO || input.social_security_tax > Decimal::ONE {
        return Err(SimulationError::InvalidInput(format!(
            "social_security_tax must be between 0 and 1, got {}",
            input.social_security_tax
        )));
    }
    if input.lunch_allowance.daily_value.is_sign_negative() {
        return Err(SimulationError::InvalidInput(format!(
            "lunch allowance daily value must not be negative, got {}",
            input.lunch_allowance.daily_value
        )));
    }
    if input.lunch_allowance.daily_value > MAX_AMOUNT {
        return Err(SimulationError::InvalidInput(format!(
            "lunch allowance daily value must not exceed {MAX_AMOUNT}, got {}",
            input.lunch_allowance.daily_value
        )));
    }
    if input.lunch_allowance.days_count > MAX_LUNCH_DAYS {
        return Err(SimulationError::InvalidInput(format!(
            "lunch allowance days must not exceed {MAX_LUNCH_DAYS}, got {}",
            input.lunch_allowance.days_count
        )));
    }

    let dependents = input.number_of_dependents.unwrap_or(0);
    let disabled = input.number_of_dependents_disabled.unwrap_or(0);
    if disabled > dependents {
        return Err(SimulationError::InvalidInput(format!(
            "{disabled} disabled dependents exceed the {dependents} declared dependents"
        )));
    }

    Ok(())
}
