use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PeriodError {
    #[error("period must look like YYYY-MM-DD_YYYY-MM-DD, got '{0}'")]
    Malformed(String),

    #[error("period starts on {start} but ends earlier, on {end}")]
    Reversed { start: NaiveDate, end: NaiveDate },
}

/// Inclusive validity range of a published withholding table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TablePeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TablePeriod {
    pub fn new(
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Self, PeriodError> {
        if end < start {
            return Err(PeriodError::Reversed { start, end });
        }
        Ok(Self { start, end })
    }

    /// Tables are filed under the year the period starts in.
    pub fn year(&self) -> i32 {
        self.start.year()
    }

    pub fn contains(
        &self,
        date: NaiveDate,
    ) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn overlaps(
        &self,
        other: &TablePeriod,
    ) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

impl fmt::Display for TablePeriod {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}_{}", self.start, self.end)
    }
}

impl FromStr for TablePeriod {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || PeriodError::Malformed(s.to_string());
        let (start, end) = s.split_once('_').ok_or_else(malformed)?;
        let start = start.parse().map_err(|_| malformed())?;
        let end = end.parse().map_err(|_| malformed())?;
        Self::new(start, end)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn date(
        y: i32,
        m: u32,
        d: u32,
    ) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn jan_to_aug() -> TablePeriod {
        TablePeriod::new(date(2024, 1, 1), date(2024, 8, 31)).unwrap()
    }

    #[test]
    fn contains_is_inclusive_on_both_ends() {
        let period = jan_to_aug();

        assert!(period.contains(date(2024, 1, 1)));
        assert!(period.contains(date(2024, 8, 31)));
        assert!(!period.contains(date(2024, 9, 1)));
        assert!(!period.contains(date(2023, 12, 31)));
    }

    #[test]
    fn display_and_parse_agree() {
        let period = jan_to_aug();

        assert_eq!(period.to_string(), "2024-01-01_2024-08-31");
        assert_eq!("2024-01-01_2024-08-31".parse(), Ok(period));
    }

    #[test]
    fn parse_rejects_malformed_names() {
        assert_eq!(
            "2024-01-01".parse::<TablePeriod>(),
            Err(PeriodError::Malformed("2024-01-01".to_string()))
        );
        assert!("2024-01-01_august".parse::<TablePeriod>().is_err());
    }

    #[test]
    fn new_rejects_reversed_range() {
        let result = TablePeriod::new(date(2024, 9, 1), date(2024, 8, 31));

        assert!(matches!(result, Err(PeriodError::Reversed { .. })));
    }

    #[test]
    fn overlap_detection() {
        let first = jan_to_aug();
        let second = TablePeriod::new(date(2024, 9, 1), date(2024, 10, 31)).unwrap();
        let straddling = TablePeriod::new(date(2024, 8, 31), date(2024, 9, 30)).unwrap();

        assert!(!first.overlaps(&second));
        assert!(first.overlaps(&straddling));
        assert!(second.overlaps(&straddling));
    }

    #[test]
    fn year_comes_from_start_date() {
        let period = TablePeriod::new(date(2024, 11, 1), date(2025, 1, 31)).unwrap();

        assert_eq!(period.year(), 2024);
    }
}
