use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use saldo_core::tables::{table_path, TableFile, TableKey};
use saldo_core::{
    BoundarySignal, BracketError, Region, Situation, TablePeriod, TaxBracket, TaxRetentionTable,
};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur when importing a published withholding CSV.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("line {line}: {reason}")]
    InvalidRow { line: u64, reason: String },

    #[error("line {line}: unknown situation code '{code}'")]
    UnknownSituation { line: u64, code: String },

    #[error("table {situation} is inconsistent: {source}")]
    InvalidTable {
        situation: Situation,
        #[source]
        source: BracketError,
    },

    #[error("CSV contains no brackets")]
    Empty,

    #[error("I/O error on {path}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("failed to serialize table {situation}: {message}")]
    Serialize { situation: Situation, message: String },
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParse(err.to_string())
    }
}

/// Legal amounts that the published CSV does not carry and that are stored
/// alongside each imported table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConstants {
    /// Per disabled dependent, for single-earner situations.
    pub dependent_disabled_addition: Decimal,
    /// Per disabled dependent, when two holders share the addition.
    pub dependent_disabled_shared_addition: Decimal,
    /// Disabled, non-earning partner of a single holder.
    pub partner_disabled_addition: Decimal,
}

impl Default for ImportConstants {
    /// 2024 amounts.
    fn default() -> Self {
        Self {
            dependent_disabled_addition: Decimal::new(8482, 2),
            dependent_disabled_shared_addition: Decimal::new(4241, 2),
            partner_disabled_addition: Decimal::new(13571, 2),
        }
    }
}

impl ImportConstants {
    pub fn dependent_disabled_for(
        &self,
        situation: Situation,
    ) -> Option<Decimal> {
        match situation {
            Situation::UnmarriedWithDependents
            | Situation::MarriedSingleHolder
            | Situation::UnmarriedWithDependentsDisabled
            | Situation::MarriedSingleHolderDisabled => Some(self.dependent_disabled_addition),
            Situation::UnmarriedOrTwoHolders
            | Situation::MarriedTwoHoldersWithDependentsDisabled => {
                Some(self.dependent_disabled_shared_addition)
            }
            Situation::UnmarriedOrTwoHoldersDisabled => None,
        }
    }

    pub fn partner_disabled_for(
        &self,
        situation: Situation,
    ) -> Option<Decimal> {
        match situation {
            Situation::MarriedSingleHolder | Situation::MarriedSingleHolderDisabled => {
                Some(self.partner_disabled_addition)
            }
            _ => None,
        }
    }
}

/// Number of columns in the published CSV.
const COLUMNS: usize = 9;

/// Converts one published CSV cell to a decimal.
///
/// Cells use `,` as the decimal separator and may carry a `%` suffix, in
/// which case the value is divided by 100. Empty cells are absent values.
pub fn parse_cell(cell: &str) -> Result<Option<Decimal>, String> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Ok(None);
    }

    let (number, percent) = match cell.strip_suffix('%') {
        Some(number) => (number.trim(), true),
        None => (cell, false),
    };
    let value: Decimal = number
        .replace(',', ".")
        .parse()
        .map_err(|e| format!("'{cell}' is not a number: {e}"))?;

    Ok(Some(if percent {
        value / Decimal::ONE_HUNDRED
    } else {
        value
    }))
}

/// Imports the semicolon-separated withholding CSV published per region and
/// period into one [`TaxRetentionTable`] per situation.
///
/// Columns, in order: situation, signal, limit, marginal rate, deduction,
/// var1, var2, per-dependent deduction, effective monthly rate. The first
/// row is a header.
#[derive(Debug, Clone, Default)]
pub struct RetentionTableImporter {
    constants: ImportConstants,
}

impl RetentionTableImporter {
    pub fn new(constants: ImportConstants) -> Self {
        Self { constants }
    }

    /// Parses the CSV into tables, grouping rows by situation and keeping
    /// their order. Tables are returned in order of first appearance and are
    /// validated before being returned.
    pub fn parse<R: Read>(
        &self,
        reader: R,
        region: Region,
        period: TablePeriod,
    ) -> Result<Vec<TaxRetentionTable>, ImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let mut order: Vec<Situation> = Vec::new();
        let mut brackets: HashMap<Situation, Vec<TaxBracket>> = HashMap::new();

        for result in csv_reader.records() {
            let record = result?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            if record.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }

            let (situation, bracket) = Self::parse_row(&record, line)?;
            if !brackets.contains_key(&situation) {
                order.push(situation);
            }
            brackets.entry(situation).or_default().push(bracket);
        }

        if order.is_empty() {
            return Err(ImportError::Empty);
        }

        let mut tables = Vec::with_capacity(order.len());
        for situation in order {
            let table = TaxRetentionTable {
                region,
                period,
                situation,
                description: situation.description().to_string(),
                brackets: brackets.remove(&situation).unwrap_or_default(),
                dependent_disabled_addition_deduction: self
                    .constants
                    .dependent_disabled_for(situation),
                partner_disabled_addition_deduction: self.constants.partner_disabled_for(situation),
            };
            table
                .validate()
                .map_err(|source| ImportError::InvalidTable { situation, source })?;
            debug!(%situation, brackets = table.brackets.len(), "parsed table");
            tables.push(table);
        }

        Ok(tables)
    }

    fn parse_row(
        record: &csv::StringRecord,
        line: u64,
    ) -> Result<(Situation, TaxBracket), ImportError> {
        let invalid = |reason: String| ImportError::InvalidRow { line, reason };

        if record.len() < COLUMNS {
            return Err(invalid(format!(
                "expected {COLUMNS} columns, found {}",
                record.len()
            )));
        }

        let code = record[0].trim();
        let situation = Situation::parse(code).ok_or_else(|| ImportError::UnknownSituation {
            line,
            code: code.to_string(),
        })?;

        let signal = BoundarySignal::parse(record[1].trim())
            .ok_or_else(|| invalid(format!("unknown signal '{}'", record[1].trim())))?;

        let optional = |index: usize| parse_cell(&record[index]).map_err(invalid);
        let required = |index: usize, name: &str| {
            parse_cell(&record[index])
                .map_err(invalid)?
                .ok_or_else(|| invalid(format!("missing {name}")))
        };

        let bracket = TaxBracket {
            signal,
            limit: required(2, "limit")?,
            marginal_rate: required(3, "marginal rate")?,
            base_deduction: required(4, "deduction")?,
            deduction_coefficient_1: optional(5)?,
            deduction_coefficient_2: optional(6)?,
            per_dependent_deduction: required(7, "per-dependent deduction")?,
            effective_monthly_rate: required(8, "effective monthly rate")?,
        };

        Ok((situation, bracket))
    }

    /// Writes each table as JSON under `root`, using the shared path layout.
    /// Existing files are overwritten, so publishing is idempotent.
    ///
    /// Returns the written paths.
    pub fn publish(
        root: &Path,
        tables: &[TaxRetentionTable],
    ) -> Result<Vec<PathBuf>, ImportError> {
        let mut written = Vec::with_capacity(tables.len());

        for table in tables {
            let key = TableKey::new(table.region, table.period, table.situation);
            let path = table_path(root, &key);
            let io_error = |e: std::io::Error, path: &Path| ImportError::Io {
                path: path.to_path_buf(),
                message: e.to_string(),
            };

            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|e| io_error(e, parent))?;
            }

            let json = serde_json::to_string_pretty(&TableFile::from(table)).map_err(|e| {
                ImportError::Serialize {
                    situation: table.situation,
                    message: e.to_string(),
                }
            })?;
            fs::write(&path, json + "\n").map_err(|e| io_error(e, &path))?;

            info!(path = %path.display(), brackets = table.brackets.len(), "published table");
            written.push(path);
        }

        Ok(written)
    }
}
