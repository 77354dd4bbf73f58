use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of bonus months (holiday and Christmas subsidies) paid monthly in
/// twelfths instead of as lump sums.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Twelfths {
    #[default]
    #[serde(rename = "0")]
    Zero,
    #[serde(rename = "0.5")]
    HalfMonth,
    #[serde(rename = "1")]
    OneMonth,
    #[serde(rename = "2")]
    TwoMonths,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("twelfths must be one of 0, 0.5, 1 or 2, got '{0}'")]
pub struct InvalidTwelfths(pub String);

impl Twelfths {
    pub fn months(&self) -> Decimal {
        match self {
            Self::Zero => Decimal::ZERO,
            Self::HalfMonth => Decimal::new(5, 1),
            Self::OneMonth => Decimal::ONE,
            Self::TwoMonths => Decimal::TWO,
        }
    }

    /// Monthly share of `income` paid in twelfths: `income * months / 12`.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use saldo_core::Twelfths;
    ///
    /// assert_eq!(Twelfths::TwoMonths.income(dec!(1000)), dec!(2000) / dec!(12));
    /// assert_eq!(Twelfths::HalfMonth.income(dec!(1500)), dec!(62.5));
    /// ```
    pub fn income(
        &self,
        income: Decimal,
    ) -> Decimal {
        income * self.months() / Decimal::from(12)
    }
}

impl FromStr for Twelfths {
    type Err = InvalidTwelfths;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let months: Decimal = s
            .trim()
            .parse()
            .map_err(|_| InvalidTwelfths(s.to_string()))?;
        [Self::Zero, Self::HalfMonth, Self::OneMonth, Self::TwoMonths]
            .into_iter()
            .find(|t| t.months() == months)
            .ok_or_else(|| InvalidTwelfths(s.to_string()))
    }
}

impl fmt::Display for Twelfths {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.months())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn income_prorates_over_twelve_months() {
        assert_eq!(Twelfths::Zero.income(dec!(1500)), dec!(0));
        assert_eq!(Twelfths::HalfMonth.income(dec!(1500)), dec!(62.5));
        assert_eq!(Twelfths::OneMonth.income(dec!(1500)), dec!(125));
        assert_eq!(Twelfths::TwoMonths.income(dec!(1500)), dec!(250));
    }

    #[test]
    fn parse_accepts_equivalent_spellings() {
        assert_eq!("0".parse(), Ok(Twelfths::Zero));
        assert_eq!("0.5".parse(), Ok(Twelfths::HalfMonth));
        assert_eq!("1.0".parse(), Ok(Twelfths::OneMonth));
        assert_eq!(" 2 ".parse(), Ok(Twelfths::TwoMonths));
    }

    #[test]
    fn parse_rejects_other_values() {
        assert_eq!(
            "3".parse::<Twelfths>(),
            Err(InvalidTwelfths("3".to_string()))
        );
        assert!("two".parse::<Twelfths>().is_err());
    }

    #[test]
    fn serde_uses_month_counts() {
        let json = serde_json::to_string(&Twelfths::HalfMonth).unwrap();

        assert_eq!(json, "\"0.5\"");
        assert_eq!(
            serde_json::from_str::<Twelfths>("\"2\"").unwrap(),
            Twelfths::TwoMonths
        );
    }
}
