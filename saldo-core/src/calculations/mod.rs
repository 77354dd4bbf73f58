//! Withholding and net-salary calculations.

pub mod classifier;
pub mod common;
pub mod simulator;
pub mod withholding;

pub use classifier::{classify, ConditionError};
pub use simulator::{simulate, SimulationError, Simulator};
pub use withholding::{
    calculate_tax, disability_deduction, WithholdingCalculator, WithholdingInput,
    WithholdingResult,
};
