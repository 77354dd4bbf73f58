use std::collections::HashMap;

use super::source::{TableError, TableKey, TableSource};
use crate::models::{Region, TablePeriod, TaxRetentionTable};

/// In-process table store, used by tests and by callers that build tables
/// on the fly.
#[derive(Debug, Clone, Default)]
pub struct MemoryTableSource {
    tables: HashMap<TableKey, TaxRetentionTable>,
}

impl MemoryTableSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `table` under its own region, period and situation, replacing
    /// any table already stored there.
    pub fn insert(
        &mut self,
        table: TaxRetentionTable,
    ) {
        let key = TableKey::new(table.region, table.period, table.situation);
        self.tables.insert(key, table);
    }

    pub fn with_table(
        mut self,
        table: TaxRetentionTable,
    ) -> Self {
        self.insert(table);
        self
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl TableSource for MemoryTableSource {
    fn load(
        &self,
        key: &TableKey,
    ) -> Result<TaxRetentionTable, TableError> {
        self.tables
            .get(key)
            .cloned()
            .ok_or(TableError::NotFound { key: *key })
    }

    fn periods(
        &self,
        region: Region,
    ) -> Result<Vec<TablePeriod>, TableError> {
        let mut periods: Vec<TablePeriod> = self
            .tables
            .keys()
            .filter(|k| k.region == region)
            .map(|k| k.period)
            .collect();
        periods.sort_unstable();
        periods.dedup();
        Ok(periods)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::Situation;

    fn empty_table(
        region: Region,
        period: &str,
        situation: Situation,
    ) -> TaxRetentionTable {
        TaxRetentionTable {
            region,
            period: period.parse().unwrap(),
            situation,
            description: String::new(),
            brackets: vec![],
            dependent_disabled_addition_deduction: None,
            partner_disabled_addition_deduction: None,
        }
    }

    fn date(
        y: i32,
        m: u32,
        d: u32,
    ) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // =========================================================================
    // load
    // =========================================================================

    #[test]
    fn load_returns_stored_table() {
        let table = empty_table(
            Region::Continente,
            "2024-01-01_2024-08-31",
            Situation::UnmarriedOrTwoHolders,
        );
        let source = MemoryTableSource::new().with_table(table.clone());

        let key = TableKey::new(table.region, table.period, table.situation);

        assert_eq!(source.load(&key), Ok(table));
    }

    #[test]
    fn load_missing_key_is_not_found() {
        let source = MemoryTableSource::new();
        let key = TableKey::new(
            Region::Madeira,
            "2024-01-01_2024-08-31".parse().unwrap(),
            Situation::MarriedSingleHolder,
        );

        assert_eq!(source.load(&key), Err(TableError::NotFound { key }));
    }

    #[test]
    fn insert_replaces_same_key() {
        let mut source = MemoryTableSource::new();
        let mut table = empty_table(
            Region::Acores,
            "2024-01-01_2024-08-31",
            Situation::UnmarriedWithDependents,
        );
        source.insert(table.clone());
        table.description = "replacement".to_string();
        source.insert(table.clone());

        assert_eq!(source.len(), 1);
        let key = TableKey::new(table.region, table.period, table.situation);
        assert_eq!(source.load(&key).unwrap().description, "replacement");
    }

    // =========================================================================
    // periods and date resolution
    // =========================================================================

    #[test]
    fn periods_are_sorted_and_deduplicated_per_region() {
        let source = MemoryTableSource::new()
            .with_table(empty_table(
                Region::Continente,
                "2024-09-01_2024-12-31",
                Situation::UnmarriedOrTwoHolders,
            ))
            .with_table(empty_table(
                Region::Continente,
                "2024-01-01_2024-08-31",
                Situation::UnmarriedOrTwoHolders,
            ))
            .with_table(empty_table(
                Region::Continente,
                "2024-01-01_2024-08-31",
                Situation::MarriedSingleHolder,
            ))
            .with_table(empty_table(
                Region::Madeira,
                "2023-01-01_2023-12-31",
                Situation::MarriedSingleHolder,
            ));

        let periods = source.periods(Region::Continente).unwrap();

        assert_eq!(
            periods,
            vec![
                "2024-01-01_2024-08-31".parse().unwrap(),
                "2024-09-01_2024-12-31".parse().unwrap(),
            ]
        );
    }

    #[test]
    fn load_for_date_picks_covering_period() {
        let source = MemoryTableSource::new()
            .with_table(empty_table(
                Region::Continente,
                "2024-01-01_2024-08-31",
                Situation::UnmarriedOrTwoHolders,
            ))
            .with_table(empty_table(
                Region::Continente,
                "2024-09-01_2024-12-31",
                Situation::UnmarriedOrTwoHolders,
            ));

        let table = source
            .load_for_date(
                date(2024, 10, 15),
                Region::Continente,
                Situation::UnmarriedOrTwoHolders,
            )
            .unwrap();

        assert_eq!(table.period.to_string(), "2024-09-01_2024-12-31");
    }

    #[test]
    fn period_bounds_are_inclusive() {
        let source = MemoryTableSource::new().with_table(empty_table(
            Region::Continente,
            "2024-01-01_2024-08-31",
            Situation::UnmarriedOrTwoHolders,
        ));

        assert!(source.resolve_period(date(2024, 1, 1), Region::Continente).is_ok());
        assert!(source.resolve_period(date(2024, 8, 31), Region::Continente).is_ok());
    }

    #[test]
    fn uncovered_date_is_no_period() {
        let source = MemoryTableSource::new().with_table(empty_table(
            Region::Continente,
            "2024-01-01_2024-08-31",
            Situation::UnmarriedOrTwoHolders,
        ));

        assert_eq!(
            source.resolve_period(date(2024, 9, 1), Region::Continente),
            Err(TableError::NoPeriod {
                region: Region::Continente,
                date: date(2024, 9, 1),
            })
        );
    }

    #[test]
    fn overlapping_periods_are_ambiguous() {
        let source = MemoryTableSource::new()
            .with_table(empty_table(
                Region::Acores,
                "2024-01-01_2024-08-31",
                Situation::UnmarriedOrTwoHolders,
            ))
            .with_table(empty_table(
                Region::Acores,
                "2024-08-01_2024-12-31",
                Situation::UnmarriedOrTwoHolders,
            ));

        let err = source
            .resolve_period(date(2024, 8, 15), Region::Acores)
            .unwrap_err();

        assert!(matches!(err, TableError::AmbiguousPeriod { .. }), "got {err:?}");
    }

    #[test]
    fn boxed_source_delegates() {
        let boxed: Box<dyn TableSource> = Box::new(MemoryTableSource::new().with_table(
            empty_table(
                Region::Madeira,
                "2024-01-01_2024-08-31",
                Situation::MarriedSingleHolderDisabled,
            ),
        ));

        let table = boxed
            .load_for_date(
                date(2024, 3, 1),
                Region::Madeira,
                Situation::MarriedSingleHolderDisabled,
            )
            .unwrap();

        assert_eq!(table.situation, Situation::MarriedSingleHolderDisabled);
    }
}
