use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{BoundarySignal, Region, Situation, TablePeriod, TaxBracket};

/// Errors raised while resolving or validating a table's brackets.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketError {
    /// The scan ran past the last bracket without a match.
    #[error("no bracket matches taxable income {0}")]
    NoBracketMatched(Decimal),

    #[error("table has no brackets")]
    EmptyTable,

    #[error("bracket {index} has limit {limit}, not above the previous ceiling {previous}")]
    UnorderedLimits {
        index: usize,
        limit: Decimal,
        previous: Decimal,
    },

    #[error("bracket {index} follows the floor bracket and can never be reached")]
    UnreachableBracket { index: usize },

    #[error("floor bracket limit {floor} leaves a gap above the last ceiling {ceiling}")]
    Gap { ceiling: Decimal, floor: Decimal },
}

/// Withholding table for one (region, period, situation) combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRetentionTable {
    pub region: Region,
    pub period: TablePeriod,
    pub situation: Situation,
    pub description: String,
    /// Declaration order is priority order; never re-sorted.
    pub brackets: Vec<TaxBracket>,
    /// Extra deduction per disabled dependent.
    pub dependent_disabled_addition_deduction: Option<Decimal>,
    /// Extra deduction when the non-earning partner is disabled.
    pub partner_disabled_addition_deduction: Option<Decimal>,
}

impl TaxRetentionTable {
    /// Returns the first bracket, in stored order, that matches the income.
    ///
    /// Ceiling (`max`) brackets match when `income <= limit`, the floor
    /// (`min`) bracket when `income > limit`.
    ///
    /// # Errors
    ///
    /// [`BracketError::NoBracketMatched`] when the scan is exhausted.
    pub fn find_bracket(
        &self,
        taxable_income: Decimal,
    ) -> Result<&TaxBracket, BracketError> {
        self.brackets
            .iter()
            .find(|b| b.matches(taxable_income))
            .ok_or(BracketError::NoBracketMatched(taxable_income))
    }

    /// Checks that the stored order lets the scan terminate deterministically:
    /// ceilings strictly ascending, at most one floor bracket and only in last
    /// position, and no gap between the last ceiling and the floor.
    pub fn validate(&self) -> Result<(), BracketError> {
        if self.brackets.is_empty() {
            return Err(BracketError::EmptyTable);
        }

        let mut last_ceiling: Option<Decimal> = None;
        for (index, bracket) in self.brackets.iter().enumerate() {
            match bracket.signal {
                BoundarySignal::Max => {
                    if let Some(previous) = last_ceiling {
                        if bracket.limit <= previous {
                            return Err(BracketError::UnorderedLimits {
                                index,
                                limit: bracket.limit,
                                previous,
                            });
                        }
                    }
                    last_ceiling = Some(bracket.limit);
                }
                BoundarySignal::Min => {
                    if index + 1 != self.brackets.len() {
                        return Err(BracketError::UnreachableBracket { index: index + 1 });
                    }
                    if let Some(ceiling) = last_ceiling {
                        if bracket.limit > ceiling {
                            return Err(BracketError::Gap {
                                ceiling,
                                floor: bracket.limit,
                            });
                        }
                    }
                }
            }
        }

        Ok(())
    }
}
