//! Serialized form of a withholding table file.
//!
//! ```json
//! {
//!     "situation": "SOLCAS2",
//!     "description": "...",
//!     "brackets": [
//!         {
//!             "signal": "max",
//!             "limit": 935.0,
//!             "max_marginal_rate": 0.1325,
//!             "deduction": 0.1325,
//!             "var1_deduction": 2.6,
//!             "var2_deduction": 1135.39,
//!             "dependent_aditional_deduction": 21.43,
//!             "effective_mensal_rate": 0.0587
//!         }
//!     ],
//!     "dependent_disabled_addition_deduction": 42.41
//! }
//! ```
//!
//! Field names are those used by the published data and are kept verbatim,
//! spelling included.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::models::{
    BoundarySignal, Region, Situation, TablePeriod, TaxBracket, TaxRetentionTable,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BracketRecord {
    pub signal: BoundarySignal,
    #[serde(serialize_with = "serialize_decimal")]
    pub limit: Decimal,
    #[serde(serialize_with = "serialize_decimal")]
    pub max_marginal_rate: Decimal,
    #[serde(serialize_with = "serialize_decimal")]
    pub deduction: Decimal,
    #[serde(
        default,
        serialize_with = "serialize_optional_decimal",
        deserialize_with = "deserialize_optional_decimal"
    )]
    pub var1_deduction: Option<Decimal>,
    #[serde(
        default,
        serialize_with = "serialize_optional_decimal",
        deserialize_with = "deserialize_optional_decimal"
    )]
    pub var2_deduction: Option<Decimal>,
    #[serde(serialize_with = "serialize_decimal")]
    pub dependent_aditional_deduction: Decimal,
    #[serde(serialize_with = "serialize_decimal")]
    pub effective_mensal_rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableFile {
    pub situation: String,
    #[serde(default)]
    pub description: String,
    pub brackets: Vec<BracketRecord>,
    #[serde(
        default,
        serialize_with = "serialize_optional_decimal",
        deserialize_with = "deserialize_optional_decimal"
    )]
    pub dependent_disabled_addition_deduction: Option<Decimal>,
    #[serde(
        default,
        serialize_with = "serialize_optional_decimal",
        deserialize_with = "deserialize_optional_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub partner_disabled_addition_deduction: Option<Decimal>,
}

/// Published files carry JSON numbers, not the string form `Decimal` uses by
/// default.
fn serialize_decimal<S>(
    value: &Decimal,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match value.to_f64() {
        Some(number) => serializer.serialize_f64(number),
        None => serializer.serialize_str(&value.to_string()),
    }
}

fn serialize_optional_decimal<S>(
    value: &Option<Decimal>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match value {
        Some(value) => serialize_decimal(value, serializer),
        None => serializer.serialize_none(),
    }
}

/// Accepts a number, a numeric string, `null`, or an empty string (older
/// scraped files wrote empty CSV cells through as `""`).
fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Cell {
        Number(Decimal),
        Text(String),
    }

    match Option::<Cell>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Cell::Number(value)) => Ok(Some(value)),
        Some(Cell::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Cell::Text(s)) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

impl From<BracketRecord> for TaxBracket {
    fn from(record: BracketRecord) -> Self {
        TaxBracket {
            signal: record.signal,
            limit: record.limit,
            marginal_rate: record.max_marginal_rate,
            base_deduction: record.deduction,
            deduction_coefficient_1: record.var1_deduction,
            deduction_coefficient_2: record.var2_deduction,
            per_dependent_deduction: record.dependent_aditional_deduction,
            effective_monthly_rate: record.effective_mensal_rate,
        }
    }
}

impl From<&TaxBracket> for BracketRecord {
    fn from(bracket: &TaxBracket) -> Self {
        BracketRecord {
            signal: bracket.signal,
            limit: bracket.limit,
            max_marginal_rate: bracket.marginal_rate,
            deduction: bracket.base_deduction,
            var1_deduction: bracket.deduction_coefficient_1,
            var2_deduction: bracket.deduction_coefficient_2,
            dependent_aditional_deduction: bracket.per_dependent_deduction,
            effective_mensal_rate: bracket.effective_monthly_rate,
        }
    }
}

impl TableFile {
    /// Converts the file contents into a table for the given region and
    /// period. The situation code must be a known one.
    pub fn into_table(
        self,
        region: Region,
        period: TablePeriod,
    ) -> Result<TaxRetentionTable, String> {
        let situation = Situation::parse(&self.situation)
            .ok_or_else(|| format!("unknown situation code '{}'", self.situation))?;

        Ok(TaxRetentionTable {
            region,
            period,
            situation,
            description: self.description,
            brackets: self.brackets.into_iter().map(TaxBracket::from).collect(),
            dependent_disabled_addition_deduction: self.dependent_disabled_addition_deduction,
            partner_disabled_addition_deduction: self.partner_disabled_addition_deduction,
        })
    }
}

impl From<&TaxRetentionTable> for TableFile {
    fn from(table: &TaxRetentionTable) -> Self {
        TableFile {
            situation: table.situation.code().to_string(),
            description: table.description.clone(),
            brackets: table.brackets.iter().map(BracketRecord::from).collect(),
            dependent_disabled_addition_deduction: table.dependent_disabled_addition_deduction,
            partner_disabled_addition_deduction: table.partner_disabled_addition_deduction,
        }
    }
}
