//! Maps a worker's household condition to the withholding situation whose
//! table applies.
//!
//! | household                         | not disabled | disabled    |
//! |-----------------------------------|--------------|-------------|
//! | unmarried, no dependents          | `SOLCAS2`    | `SOLCAS2+DEF` |
//! | unmarried, dependents             | `SOLD`       | `SOLD+DEF`  |
//! | married, one holder               | `CAS1`       | `CAS1+DEF`  |
//! | married, two holders, no dependents | `SOLCAS2`  | `SOLCAS2+DEF` |
//! | married, two holders, dependents  | `SOLCAS2`    | `CAS2D+DEF` |

use thiserror::Error;

use crate::models::{Condition, Situation};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConditionError {
    #[error("number_of_holders is required for married workers")]
    MissingHolders,

    #[error("number_of_holders must be 1 or 2, got {0}")]
    InvalidHolders(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Household {
    Unmarried { dependents: bool },
    MarriedSingleHolder,
    MarriedTwoHolders { dependents: bool },
}

impl Household {
    fn from_condition(condition: &Condition) -> Result<Self, ConditionError> {
        let holders = match condition.number_of_holders {
            Some(n @ (1 | 2)) => Some(n),
            Some(n) => return Err(ConditionError::InvalidHolders(n)),
            None => None,
        };
        let dependents = condition.has_dependents();

        if !condition.married {
            return Ok(Household::Unmarried { dependents });
        }

        match holders {
            Some(1) => Ok(Household::MarriedSingleHolder),
            Some(_) => Ok(Household::MarriedTwoHolders { dependents }),
            None => Err(ConditionError::MissingHolders),
        }
    }
}

/// Selects the situation for `condition`.
///
/// # Errors
///
/// * [`ConditionError::InvalidHolders`] when a holder count outside `{1, 2}`
///   is given.
/// * [`ConditionError::MissingHolders`] when the worker is married and no
///   holder count is given.
pub fn classify(condition: &Condition) -> Result<Situation, ConditionError> {
    let household = Household::from_condition(condition)?;

    let situation = match (household, condition.disabled) {
        (Household::Unmarried { dependents: false }, false) => Situation::UnmarriedOrTwoHolders,
        (Household::Unmarried { dependents: false }, true) => {
            Situation::UnmarriedOrTwoHoldersDisabled
        }
        (Household::Unmarried { dependents: true }, false) => Situation::UnmarriedWithDependents,
        (Household::Unmarried { dependents: true }, true) => {
            Situation::UnmarriedWithDependentsDisabled
        }
        (Household::MarriedSingleHolder, false) => Situation::MarriedSingleHolder,
        (Household::MarriedSingleHolder, true) => Situation::MarriedSingleHolderDisabled,
        (Household::MarriedTwoHolders { dependents: false }, false) => {
            Situation::UnmarriedOrTwoHolders
        }
        (Household::MarriedTwoHolders { dependents: false }, true) => {
            Situation::UnmarriedOrTwoHoldersDisabled
        }
        (Household::MarriedTwoHolders { dependents: true }, false) => {
            Situation::UnmarriedOrTwoHolders
        }
        (Household::MarriedTwoHolders { dependents: true }, true) => {
            Situation::MarriedTwoHoldersWithDependentsDisabled
        }
    };

    Ok(situation)
}
