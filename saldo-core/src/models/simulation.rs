use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Condition, LunchAllowance, Region, Situation, TablePeriod, Twelfths};

/// What to do when the taxable income falls outside every bracket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoBracketPolicy {
    /// Surface `NoBracketMatched` to the caller.
    #[default]
    Fail,
    /// Treat the income as untaxed.
    ZeroTax,
}

/// Inputs of one dependent-worker simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationInput {
    /// Monthly base salary.
    pub income: Decimal,
    pub region: Region,
    pub period: TablePeriod,
    pub married: bool,
    pub disabled: bool,
    pub partner_disabled: bool,
    pub number_of_holders: Option<u8>,
    pub number_of_dependents: Option<u32>,
    /// How many of `number_of_dependents` are disabled.
    pub number_of_dependents_disabled: Option<u32>,
    pub social_security_tax: Decimal,
    pub twelfths: Twelfths,
    pub lunch_allowance: LunchAllowance,
    #[serde(default)]
    pub no_bracket_policy: NoBracketPolicy,
}

impl SimulationInput {
    /// Default social security rate for dependent workers (11 %).
    pub const SOCIAL_SECURITY_TAX: Decimal = Decimal::from_parts(11, 0, 0, false, 2);

    /// Single worker with no dependents, no twelfths and no lunch allowance.
    pub fn new(
        income: Decimal,
        region: Region,
        period: TablePeriod,
    ) -> Self {
        Self {
            income,
            region,
            period,
            married: false,
            disabled: false,
            partner_disabled: false,
            number_of_holders: None,
            number_of_dependents: None,
            number_of_dependents_disabled: None,
            social_security_tax: Self::SOCIAL_SECURITY_TAX,
            twelfths: Twelfths::Zero,
            lunch_allowance: LunchAllowance::default(),
            no_bracket_policy: NoBracketPolicy::Fail,
        }
    }

    pub fn condition(&self) -> Condition {
        Condition {
            married: self.married,
            number_of_holders: self.number_of_holders,
            number_of_dependents: self.number_of_dependents,
            disabled: self.disabled,
            partner_disabled: Some(self.partner_disabled),
        }
    }
}

/// Monthly and yearly salary figures produced by one simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub situation: Situation,
    /// Base income plus the taxable part of the lunch allowance.
    pub taxable_income: Decimal,
    pub twelfths_income: Decimal,
    /// Everything received in the month, taxed or not.
    pub gross_income: Decimal,
    pub tax: Decimal,
    pub social_security: Decimal,
    pub social_security_tax: Decimal,
    pub net_salary: Decimal,
    pub yearly_net_salary: Decimal,
    pub yearly_gross_salary: Decimal,
    pub lunch_allowance: LunchAllowance,
}
