//! Conversion of the published withholding CSVs into the JSON table layout
//! read by `saldo-core`.

mod importer;

pub use importer::{parse_cell, ImportConstants, ImportError, RetentionTableImporter};
