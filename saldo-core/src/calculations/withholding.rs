//! Monthly IRS withholding for one resolved bracket.
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Deductible: `deduction * var1 * (var2 - income)` when both coefficients are present, else `deduction` |
//! | 2    | Base tax: `income * rate - deductible - dependents * per_dependent - extra` |
//! | 3    | Effective rate: `base tax / income` (zero for zero income) |
//! | 4    | Twelfths tax: `twelfths income * effective rate` |
//! | 5    | Tax: `max(0, base tax + twelfths tax)` |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use saldo_core::calculations::withholding::calculate_tax;
//! use saldo_core::{BoundarySignal, TaxBracket};
//!
//! let bracket = TaxBracket {
//!     signal: BoundarySignal::Max,
//!     limit: dec!(1769),
//!     marginal_rate: dec!(0.26),
//!     base_deduction: dec!(186.66),
//!     deduction_coefficient_1: None,
//!     deduction_coefficient_2: None,
//!     per_dependent_deduction: dec!(21.43),
//!     effective_monthly_rate: dec!(0.1545),
//! };
//!
//! let tax = calculate_tax(&bracket, dec!(1500), dec!(0), 0, dec!(0));
//!
//! assert_eq!(tax, dec!(203.34));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{max, ratio_or_zero};
use crate::models::{TaxBracket, TaxRetentionTable};

/// Amounts the calculator needs besides the bracket itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithholdingInput {
    pub taxable_income: Decimal,
    /// Prorated extra-month income, taxed at the effective rate.
    pub twelfths_income: Decimal,
    pub number_of_dependents: u32,
    /// Disability additions, see [`disability_deduction`].
    pub extra_deduction: Decimal,
}

/// Every intermediate value of one withholding computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithholdingResult {
    pub deductible: Decimal,
    /// May be negative; only the final tax is floored.
    pub base_tax: Decimal,
    pub effective_rate: Decimal,
    pub twelfths_tax: Decimal,
    pub tax: Decimal,
}

/// Applies the withholding formula of a single bracket.
#[derive(Debug, Clone)]
pub struct WithholdingCalculator<'a> {
    bracket: &'a TaxBracket,
}

impl<'a> WithholdingCalculator<'a> {
    pub fn new(bracket: &'a TaxBracket) -> Self {
        Self { bracket }
    }

    pub fn calculate(
        &self,
        input: &WithholdingInput,
    ) -> WithholdingResult {
        let deductible = self.deductible(input.taxable_income);
        let base_tax = self.base_tax(
            input.taxable_income,
            deductible,
            input.number_of_dependents,
            input.extra_deduction,
        );
        let effective_rate = ratio_or_zero(base_tax, input.taxable_income);
        let twelfths_tax = input.twelfths_income * effective_rate;
        let tax = max(base_tax + twelfths_tax, Decimal::ZERO);

        WithholdingResult {
            deductible,
            base_tax,
            effective_rate,
            twelfths_tax,
            tax,
        }
    }

    fn deductible(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        match self.bracket.deduction_coefficients() {
            Some((var1, var2)) => self.bracket.base_deduction * var1 * (var2 - taxable_income),
            None => self.bracket.base_deduction,
        }
    }

    fn base_tax(
        &self,
        taxable_income: Decimal,
        deductible: Decimal,
        number_of_dependents: u32,
        extra_deduction: Decimal,
    ) -> Decimal {
        taxable_income * self.bracket.marginal_rate
            - deductible
            - Decimal::from(number_of_dependents) * self.bracket.per_dependent_deduction
            - extra_deduction
    }
}

/// Withholding tax for `bracket`, never negative.
pub fn calculate_tax(
    bracket: &TaxBracket,
    taxable_income: Decimal,
    twelfths_income: Decimal,
    number_of_dependents: u32,
    extra_deduction: Decimal,
) -> Decimal {
    let input = WithholdingInput {
        taxable_income,
        twelfths_income,
        number_of_dependents,
        extra_deduction,
    };
    WithholdingCalculator::new(bracket).calculate(&input).tax
}

/// Extra deduction for disability in the household, using the amounts the
/// table publishes. Amounts a table does not define count as zero.
pub fn disability_deduction(
    table: &TaxRetentionTable,
    disabled_dependents: u32,
    partner_disabled: bool,
) -> Decimal {
    let per_dependent = table
        .dependent_disabled_addition_deduction
        .unwrap_or(Decimal::ZERO);
    let partner = if partner_disabled {
        table
            .partner_disabled_addition_deduction
            .unwrap_or(Decimal::ZERO)
    } else {
        Decimal::ZERO
    };

    Decimal::from(disabled_dependents) * per_dependent + partner
}
