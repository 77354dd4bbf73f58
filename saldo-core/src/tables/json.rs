use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::factory::{TableSourceConfig, TableSourceFactory};
use super::format::TableFile;
use super::path::table_path;
use super::source::{TableError, TableKey, TableSource};
use crate::models::{Region, TablePeriod, TaxRetentionTable};

/// Reads tables from a directory tree laid out as described in
/// [`super::path`].
#[derive(Debug, Clone)]
pub struct JsonDirectorySource {
    root: PathBuf,
}

impl JsonDirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TableSource for JsonDirectorySource {
    fn load(
        &self,
        key: &TableKey,
    ) -> Result<TaxRetentionTable, TableError> {
        let path = table_path(&self.root, key);
        debug!(path = %path.display(), "loading withholding table");

        let contents = fs::read_to_string(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => TableError::NotFound { key: *key },
            _ => TableError::Io(format!("{}: {e}", path.display())),
        })?;

        let file: TableFile = serde_json::from_str(&contents)
            .map_err(|e| TableError::Parse(format!("{}: {e}", path.display())))?;

        let table = file
            .into_table(key.region, key.period)
            .map_err(|reason| TableError::InvalidTable { key: *key, reason })?;

        if table.situation != key.situation {
            return Err(TableError::InvalidTable {
                key: *key,
                reason: format!("file declares situation {}", table.situation),
            });
        }

        table.validate().map_err(|e| TableError::InvalidTable {
            key: *key,
            reason: e.to_string(),
        })?;

        Ok(table)
    }

    fn periods(
        &self,
        region: Region,
    ) -> Result<Vec<TablePeriod>, TableError> {
        let years = fs::read_dir(&self.root)
            .map_err(|e| TableError::Io(format!("{}: {e}", self.root.display())))?;

        let mut periods = Vec::new();
        for year in years {
            let year = year.map_err(|e| TableError::Io(e.to_string()))?;
            let filed_year = year.file_name().to_str().and_then(|y| y.parse::<i32>().ok());
            let region_dir = year.path().join(region.as_str());
            if !region_dir.is_dir() {
                continue;
            }

            let entries = fs::read_dir(&region_dir)
                .map_err(|e| TableError::Io(format!("{}: {e}", region_dir.display())))?;
            for entry in entries {
                let entry = entry.map_err(|e| TableError::Io(e.to_string()))?;
                if !entry.path().is_dir() {
                    continue;
                }
                let name = entry.file_name();
                let name = name.to_string_lossy();
                match name.parse::<TablePeriod>() {
                    Ok(period) if filed_year == Some(period.year()) => periods.push(period),
                    Ok(period) => warn!(
                        dir = %entry.path().display(),
                        "skipping directory: period starts in {}, outside its year directory",
                        period.year()
                    ),
                    Err(e) => warn!(dir = %entry.path().display(), "skipping directory: {e}"),
                }
            }
        }

        periods.sort_unstable();
        periods.dedup();
        Ok(periods)
    }
}

/// Registers the `json` backend.
pub struct JsonDirectoryFactory;

impl TableSourceFactory for JsonDirectoryFactory {
    fn backend_name(&self) -> &'static str {
        "json"
    }

    fn create(
        &self,
        config: &TableSourceConfig,
    ) -> Result<Box<dyn TableSource>, TableError> {
        let root = PathBuf::from(&config.location);
        if !root.is_dir() {
            return Err(TableError::Configuration(format!(
                "table directory '{}' does not exist",
                root.display()
            )));
        }
        Ok(Box::new(JsonDirectorySource::new(root)))
    }
}
