//! Storage layout shared by table publishers and loaders.
//!
//! Every table lives at
//!
//! ```text
//! <root>/<year>/<region>/<start>_<end>/<situation>.json
//! ```
//!
//! where `<year>` is the year of the period start, `<region>` the region
//! code, `<start>_<end>` the ISO dates of the validity period and
//! `<situation>` the situation code, e.g.
//! `2024/continente/2024-01-01_2024-08-31/SOLCAS2.json`.

use std::path::{Path, PathBuf};

use super::source::TableKey;
use crate::models::{Region, TablePeriod};

pub const TABLE_EXTENSION: &str = "json";

/// Directory holding every situation table for one region and period.
pub fn period_dir(
    root: &Path,
    region: Region,
    period: &TablePeriod,
) -> PathBuf {
    root.join(period.year().to_string())
        .join(region.as_str())
        .join(period.to_string())
}

/// Full path of the table identified by `key`.
pub fn table_path(
    root: &Path,
    key: &TableKey,
) -> PathBuf {
    period_dir(root, key.region, &key.period)
        .join(format!("{}.{TABLE_EXTENSION}", key.situation.code()))
}
