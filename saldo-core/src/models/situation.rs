use std::fmt;

use serde::{Deserialize, Serialize};

/// Legally defined worker classification selecting the withholding table.
///
/// The variant set is closed: every published table belongs to exactly one
/// of these codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Situation {
    /// Unmarried without dependents, or married with two holders.
    #[serde(rename = "SOLCAS2")]
    UnmarriedOrTwoHolders,
    /// Unmarried with one or more dependents.
    #[serde(rename = "SOLD")]
    UnmarriedWithDependents,
    /// Married, single holder.
    #[serde(rename = "CAS1")]
    MarriedSingleHolder,
    #[serde(rename = "SOLCAS2+DEF")]
    UnmarriedOrTwoHoldersDisabled,
    #[serde(rename = "SOLD+DEF")]
    UnmarriedWithDependentsDisabled,
    /// Married, two holders, with one or more dependents, disabled.
    #[serde(rename = "CAS2D+DEF")]
    MarriedTwoHoldersWithDependentsDisabled,
    #[serde(rename = "CAS1+DEF")]
    MarriedSingleHolderDisabled,
}

impl Situation {
    pub fn all() -> &'static [Situation] {
        &[
            Situation::UnmarriedOrTwoHolders,
            Situation::UnmarriedWithDependents,
            Situation::MarriedSingleHolder,
            Situation::UnmarriedOrTwoHoldersDisabled,
            Situation::UnmarriedWithDependentsDisabled,
            Situation::MarriedTwoHoldersWithDependentsDisabled,
            Situation::MarriedSingleHolderDisabled,
        ]
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::UnmarriedOrTwoHolders => "SOLCAS2",
            Self::UnmarriedWithDependents => "SOLD",
            Self::MarriedSingleHolder => "CAS1",
            Self::UnmarriedOrTwoHoldersDisabled => "SOLCAS2+DEF",
            Self::UnmarriedWithDependentsDisabled => "SOLD+DEF",
            Self::MarriedTwoHoldersWithDependentsDisabled => "CAS2D+DEF",
            Self::MarriedSingleHolderDisabled => "CAS1+DEF",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::UnmarriedOrTwoHolders => {
                "Trabalho dependente - Não casado sem dependentes ou casado dois titulares"
            }
            Self::UnmarriedWithDependents => {
                "Trabalho dependente - Não casado com um ou mais dependentes"
            }
            Self::MarriedSingleHolder => "Trabalho dependente - Casado único titular",
            Self::UnmarriedOrTwoHoldersDisabled => {
                "Trabalho dependente - Não casado ou casado dois titulares sem dependentes - deficiente"
            }
            Self::UnmarriedWithDependentsDisabled => {
                "Trabalho dependente - Não casado, com um ou mais dependentes - Deficiente"
            }
            Self::MarriedTwoHoldersWithDependentsDisabled => {
                "Trabalho dependente - Casado dois titulares, com um ou mais dependentes - Deficiente"
            }
            Self::MarriedSingleHolderDisabled => {
                "Trabalho dependente - Casado único titular - deficiente"
            }
        }
    }

    pub fn parse(code: &str) -> Option<Self> {
        Self::all().iter().copied().find(|s| s.code() == code)
    }

    pub fn is_disabled(&self) -> bool {
        matches!(
            self,
            Self::UnmarriedOrTwoHoldersDisabled
                | Self::UnmarriedWithDependentsDisabled
                | Self::MarriedTwoHoldersWithDependentsDisabled
                | Self::MarriedSingleHolderDisabled
        )
    }
}

impl fmt::Display for Situation {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_round_trips_every_code() {
        for situation in Situation::all() {
            assert_eq!(Situation::parse(situation.code()), Some(*situation));
        }
    }

    #[test]
    fn parse_rejects_unknown_code() {
        assert_eq!(Situation::parse("CAS3"), None);
        assert_eq!(Situation::parse("solcas2"), None);
    }

    #[test]
    fn serde_uses_published_codes() {
        let json = serde_json::to_string(&Situation::MarriedTwoHoldersWithDependentsDisabled)
            .unwrap();

        assert_eq!(json, "\"CAS2D+DEF\"");
    }

    #[test]
    fn disabled_variants_are_flagged() {
        let disabled: Vec<_> = Situation::all()
            .iter()
            .filter(|s| s.is_disabled())
            .map(|s| s.code())
            .collect();

        assert_eq!(
            disabled,
            vec!["SOLCAS2+DEF", "SOLD+DEF", "CAS2D+DEF", "CAS1+DEF"]
        );
    }
}
