//! Optional TOML configuration.
//!
//! ```toml
//! [tables]
//! backend = "json"
//! location = "data/retention-tables"
//!
//! [defaults]
//! region = "continente"
//! social_security_tax = 0.11
//! twelfths = "0"
//! ```
//!
//! Every key may be omitted. Command-line flags take precedence over the
//! file.

use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use saldo_core::tables::TableSourceConfig;
use saldo_core::{Region, SimulationInput, Twelfths};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "saldo.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("invalid configuration in {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub region: Region,
    pub social_security_tax: Decimal,
    pub twelfths: Twelfths,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            region: Region::Continente,
            social_security_tax: SimulationInput::SOCIAL_SECURITY_TAX,
            twelfths: Twelfths::Zero,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tables: TableSourceConfig,
    pub defaults: Defaults,
}

impl AppConfig {
    pub fn from_toml_str(
        contents: &str,
        origin: &Path,
    ) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Reads `path` when given. Otherwise reads [`DEFAULT_CONFIG_FILE`] if it
    /// exists, falling back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !fallback.is_file() {
                    debug!("no configuration file, using defaults");
                    return Ok(Self::default());
                }
                fallback
            }
        };

        debug!(path = %path.display(), "reading configuration");
        let contents = fs::read_to_string(&path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&contents, &path)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    use super::*;

    fn parse(contents: &str) -> Result<AppConfig, ConfigError> {
        AppConfig::from_toml_str(contents, Path::new("test.toml"))
    }

    #[test]
    fn empty_file_gives_defaults() {
        let config = parse("").unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.tables.backend, "json");
        assert_eq!(config.defaults.social_security_tax, dec!(0.11));
    }

    #[test]
    fn full_file_is_read() {
        let config = parse(
            r#"
            [tables]
            backend = "json"
            location = "/srv/irs"

            [defaults]
            region = "madeira"
            social_security_tax = 0.095
            twelfths = "0.5"
            "#,
        )
        .unwrap();

        assert_eq!(config.tables.location, "/srv/irs");
        assert_eq!(config.defaults.region, Region::Madeira);
        assert_eq!(config.defaults.social_security_tax, dec!(0.095));
        assert_eq!(config.defaults.twelfths, Twelfths::HalfMonth);
    }

    #[test]
    fn partial_tables_section_keeps_other_defaults() {
        let config = parse("[tables]\nlocation = \"tables\"\n").unwrap();

        assert_eq!(config.tables.backend, "json");
        assert_eq!(config.tables.location, "tables");
        assert_eq!(config.defaults, Defaults::default());
    }

    #[test]
    fn unknown_region_is_rejected() {
        let err = parse("[defaults]\nregion = \"lisboa\"\n").unwrap_err();

        assert!(matches!(err, ConfigError::Parse { .. }), "got {err:?}");
    }

    #[test]
    fn twelfths_outside_closed_set_is_rejected() {
        assert!(parse("[defaults]\ntwelfths = \"3\"\n").is_err());
    }

    #[test]
    fn load_reads_given_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[defaults]\nregion = \"acores\"\n").unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();

        assert_eq!(config.defaults.region, Region::Acores);
    }

    #[test]
    fn load_missing_given_file_is_io_error() {
        let dir = TempDir::new().unwrap();

        let err = AppConfig::load(Some(&dir.path().join("absent.toml"))).unwrap_err();

        assert!(matches!(err, ConfigError::Io { .. }), "got {err:?}");
    }
}
