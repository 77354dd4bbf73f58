use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::source::{TableError, TableSource};

/// Backend-agnostic table source configuration.
///
/// `backend` must match the [`TableSourceFactory::backend_name`] of a
/// registered factory. `location` is passed through unchanged and its
/// meaning is backend-specific.
///
/// | backend | location examples                  |
/// |---------|------------------------------------|
/// | `json`  | `data/retention-tables`, `/srv/irs` |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSourceConfig {
    pub backend: String,
    pub location: String,
}

impl TableSourceConfig {
    pub const DEFAULT_LOCATION: &'static str = "data/retention-tables";
}

impl Default for TableSourceConfig {
    fn default() -> Self {
        Self {
            backend: "json".to_string(),
            location: Self::DEFAULT_LOCATION.to_string(),
        }
    }
}

/// One implementation per storage backend, registered with a
/// [`TableSourceRegistry`] at startup.
pub trait TableSourceFactory {
    /// Unique, lowercase identifier for this backend.
    fn backend_name(&self) -> &'static str;

    /// Opens the source described by `config`.
    fn create(
        &self,
        config: &TableSourceConfig,
    ) -> Result<Box<dyn TableSource>, TableError>;
}

/// Table backends available to the application, looked up by
/// [`TableSourceFactory::backend_name`].
pub struct TableSourceRegistry {
    factories: BTreeMap<&'static str, Box<dyn TableSourceFactory>>,
}

impl TableSourceRegistry {
    pub fn new() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// Registry with every backend this crate ships.
    pub fn with_builtin_backends() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(super::json::JsonDirectoryFactory));
        registry
    }

    /// Adds `factory`. A later registration under the same name wins.
    pub fn register(
        &mut self,
        factory: Box<dyn TableSourceFactory>,
    ) {
        let name = factory.backend_name();
        if self.factories.insert(name, factory).is_some() {
            debug!(backend = name, "table backend replaced");
        }
    }

    /// Registered backend names in alphabetical order.
    pub fn available_backends(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }

    /// Opens the source named by `config.backend`.
    ///
    /// # Errors
    /// [`TableError::Configuration`] for an unregistered backend, otherwise
    /// whatever the backend's factory reports.
    pub fn create(
        &self,
        config: &TableSourceConfig,
    ) -> Result<Box<dyn TableSource>, TableError> {
        match self.factories.get(config.backend.as_str()) {
            Some(factory) => factory.create(config),
            None => Err(TableError::Configuration(format!(
                "unknown table backend '{}'; available: {}",
                config.backend,
                self.available_backends().join(", ")
            ))),
        }
    }
}

impl Default for TableSourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
