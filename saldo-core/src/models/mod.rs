mod condition;
mod lunch_allowance;
mod period;
mod region;
mod retention_table;
mod simulation;
mod situation;
mod tax_bracket;
mod twelfths;

pub use condition::Condition;
pub use lunch_allowance::{
    LunchAllowance, LunchAllowanceLimits, LunchAllowanceMode, UnknownLunchAllowanceMode,
};
pub use period::{PeriodError, TablePeriod};
pub use region::{Region, UnknownRegion};
pub use retention_table::{BracketError, TaxRetentionTable};
pub use simulation::{NoBracketPolicy, SimulationInput, SimulationResult};
pub use situation::Situation;
pub use tax_bracket::{BoundarySignal, TaxBracket};
pub use twelfths::{InvalidTwelfths, Twelfths};
