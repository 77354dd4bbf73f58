use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;

use crate::models::{Region, Situation, TablePeriod, TaxRetentionTable};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("no withholding table published for {key}")]
    NotFound { key: TableKey },

    #[error("no published period in {region} covers {date}")]
    NoPeriod { region: Region, date: NaiveDate },

    #[error("periods {first} and {second} in {region} both cover {date}")]
    AmbiguousPeriod {
        region: Region,
        date: NaiveDate,
        first: TablePeriod,
        second: TablePeriod,
    },

    #[error("invalid table {key}: {reason}")]
    InvalidTable { key: TableKey, reason: String },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Identifies exactly one published table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableKey {
    pub region: Region,
    pub period: TablePeriod,
    pub situation: Situation,
}

impl TableKey {
    pub fn new(
        region: Region,
        period: TablePeriod,
        situation: Situation,
    ) -> Self {
        Self {
            region,
            period,
            situation,
        }
    }
}

impl fmt::Display for TableKey {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}/{}/{}", self.region, self.period, self.situation)
    }
}

/// Read access to published withholding tables.
///
/// Implementations are plain blocking reads; tables are immutable once
/// published, so callers may cache what they load.
pub trait TableSource {
    /// Loads the table identified by `key`, brackets in declaration order.
    fn load(
        &self,
        key: &TableKey,
    ) -> Result<TaxRetentionTable, TableError>;

    /// Every validity period published for `region`, in ascending order.
    fn periods(
        &self,
        region: Region,
    ) -> Result<Vec<TablePeriod>, TableError>;

    /// The single published period in `region` that covers `date`.
    fn resolve_period(
        &self,
        date: NaiveDate,
        region: Region,
    ) -> Result<TablePeriod, TableError> {
        let mut covering = self
            .periods(region)?
            .into_iter()
            .filter(|p| p.contains(date));

        let first = covering
            .next()
            .ok_or(TableError::NoPeriod { region, date })?;
        if let Some(second) = covering.next() {
            return Err(TableError::AmbiguousPeriod {
                region,
                date,
                first,
                second,
            });
        }

        Ok(first)
    }

    /// Loads the table in force on `date`.
    fn load_for_date(
        &self,
        date: NaiveDate,
        region: Region,
        situation: Situation,
    ) -> Result<TaxRetentionTable, TableError> {
        let period = self.resolve_period(date, region)?;
        debug!(%date, %region, %period, %situation, "resolved table period");
        self.load(&TableKey::new(region, period, situation))
    }
}

impl<T: TableSource + ?Sized> TableSource for Box<T> {
    fn load(
        &self,
        key: &TableKey,
    ) -> Result<TaxRetentionTable, TableError> {
        (**self).load(key)
    }

    fn periods(
        &self,
        region: Region,
    ) -> Result<Vec<TablePeriod>, TableError> {
        (**self).periods(region)
    }
}

impl<T: TableSource + ?Sized> TableSource for &T {
    fn load(
        &self,
        key: &TableKey,
    ) -> Result<TaxRetentionTable, TableError> {
        (**self).load(key)
    }

    fn periods(
        &self,
        region: Region,
    ) -> Result<Vec<TablePeriod>, TableError> {
        (**self).periods(region)
    }
}
