//! Portuguese IRS withholding and net salary simulation for dependent
//! workers.
//!
//! [`tables`] reads the published withholding tables, [`calculations`]
//! classifies the household, resolves the bracket and derives the monthly
//! and yearly figures.

pub mod calculations;
pub mod models;
pub mod tables;

pub use calculations::{classify, simulate, ConditionError, SimulationError, Simulator};
pub use models::*;
pub use tables::{TableError, TableKey, TableSource};
