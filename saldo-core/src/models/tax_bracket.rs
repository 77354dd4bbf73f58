use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a bracket's `limit` is compared against taxable income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundarySignal {
    /// Ceiling: matches when `income <= limit`.
    Max,
    /// Floor: matches when `income > limit`.
    Min,
}

impl BoundarySignal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Max => "max",
            Self::Min => "min",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "max" => Some(Self::Max),
            "min" => Some(Self::Min),
            _ => None,
        }
    }
}

/// One row of a withholding table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub signal: BoundarySignal,
    pub limit: Decimal,
    pub marginal_rate: Decimal,
    /// Fixed amount to deduct, or the rate factor of the variable formula
    /// when both coefficients are present.
    pub base_deduction: Decimal,
    pub deduction_coefficient_1: Option<Decimal>,
    pub deduction_coefficient_2: Option<Decimal>,
    pub per_dependent_deduction: Decimal,
    pub effective_monthly_rate: Decimal,
}

impl TaxBracket {
    /// Whether `taxable_income` falls inside this bracket.
    pub fn matches(
        &self,
        taxable_income: Decimal,
    ) -> bool {
        match self.signal {
            BoundarySignal::Max => taxable_income <= self.limit,
            BoundarySignal::Min => taxable_income > self.limit,
        }
    }

    /// Both coefficients, when the bracket uses the variable deduction formula.
    pub fn deduction_coefficients(&self) -> Option<(Decimal, Decimal)> {
        self.deduction_coefficient_1
            .zip(self.deduction_coefficient_2)
    }
}
