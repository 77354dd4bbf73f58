use std::fmt;

use rust_decimal::Decimal;
use saldo_core::calculations::common::round_half_up;
use saldo_core::{Region, SimulationResult, Situation, TablePeriod};
use serde::Serialize;

/// Simulation outcome rounded to cents for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub region: Region,
    pub period: TablePeriod,
    pub situation: Situation,
    pub taxable_income: Decimal,
    pub twelfths_income: Decimal,
    pub lunch_allowance_tax_free: Decimal,
    pub gross_income: Decimal,
    pub tax: Decimal,
    pub social_security: Decimal,
    pub net_salary: Decimal,
    pub yearly_gross_salary: Decimal,
    pub yearly_net_salary: Decimal,
}

impl Report {
    pub fn new(
        region: Region,
        period: TablePeriod,
        result: &SimulationResult,
    ) -> Self {
        Self {
            region,
            period,
            situation: result.situation,
            taxable_income: round_half_up(result.taxable_income),
            twelfths_income: round_half_up(result.twelfths_income),
            lunch_allowance_tax_free: round_half_up(
                result.lunch_allowance.tax_free_monthly_value(),
            ),
            gross_income: round_half_up(result.gross_income),
            tax: round_half_up(result.tax),
            social_security: round_half_up(result.social_security),
            net_salary: round_half_up(result.net_salary),
            yearly_gross_salary: round_half_up(result.yearly_gross_salary),
            yearly_net_salary: round_half_up(result.yearly_net_salary),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn amount_line(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    value: Decimal,
) -> fmt::Result {
    writeln!(f, "  {:<24}{:>12} €", label, format!("{value:.2}"))
}

impl fmt::Display for Report {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "{} ({})", self.region.label(), self.period)?;
        writeln!(
            f,
            "Situation {}: {}",
            self.situation,
            self.situation.description()
        )?;
        writeln!(f)?;
        amount_line(f, "Taxable income", self.taxable_income)?;
        amount_line(f, "Twelfths", self.twelfths_income)?;
        amount_line(f, "Lunch allowance (exempt)", self.lunch_allowance_tax_free)?;
        amount_line(f, "Gross income", self.gross_income)?;
        amount_line(f, "IRS withholding", -self.tax)?;
        amount_line(f, "Social security", -self.social_security)?;
        amount_line(f, "Net salary", self.net_salary)?;
        writeln!(f)?;
        amount_line(f, "Yearly gross salary", self.yearly_gross_salary)?;
        amount_line(f, "Yearly net salary", self.yearly_net_salary)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use saldo_core::LunchAllowance;

    use super::*;

    fn period() -> TablePeriod {
        "2024-01-01_2024-08-31".parse().unwrap()
    }

    fn result() -> SimulationResult {
        SimulationResult {
            situation: Situation::UnmarriedOrTwoHolders,
            taxable_income: dec!(1500),
            twelfths_income: dec!(0),
            gross_income: dec!(1500),
            tax: dec!(203.335),
            social_security: dec!(165),
            social_security_tax: dec!(0.11),
            net_salary: dec!(1131.665),
            yearly_net_salary: dec!(15843.31),
            yearly_gross_salary: dec!(21000),
            lunch_allowance: LunchAllowance::default(),
        }
    }

    #[test]
    fn amounts_are_rounded_half_up() {
        let report = Report::new(Region::Continente, period(), &result());

        assert_eq!(report.tax, dec!(203.34));
        assert_eq!(report.net_salary, dec!(1131.67));
        assert_eq!(report.situation, Situation::UnmarriedOrTwoHolders);
    }

    #[test]
    fn text_output_lists_every_amount() {
        let text = Report::new(Region::Continente, period(), &result()).to_string();

        assert!(text.starts_with("Portugal Continental (2024-01-01_2024-08-31)\n"));
        assert!(text.contains("Situation SOLCAS2"));
        assert!(text.contains("IRS withholding"));
        assert!(text.contains("-203.34 €"));
        assert!(text.contains("1131.67 €"));
        assert!(text.contains("21000.00 €"));
    }

    #[test]
    fn json_output_carries_codes_and_amounts() {
        let json = Report::new(Region::Madeira, period(), &result())
            .to_json()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["region"], "madeira");
        assert_eq!(value["situation"], "SOLCAS2");
        assert_eq!(value["tax"], "203.34");
        assert_eq!(value["period"]["start"], "2024-01-01");
    }
}
