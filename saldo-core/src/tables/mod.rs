//! Published withholding tables and the ways of reading them.

mod factory;
mod format;
mod json;
mod memory;
mod path;
mod source;

pub use factory::{TableSourceConfig, TableSourceFactory, TableSourceRegistry};
pub use format::{BracketRecord, TableFile};
pub use json::{JsonDirectoryFactory, JsonDirectorySource};
pub use memory::MemoryTableSource;
pub use path::{period_dir, table_path, TABLE_EXTENSION};
pub use source::{TableError, TableKey, TableSource};
