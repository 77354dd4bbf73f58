use serde::{Deserialize, Serialize};

/// Marital, dependent and disability status of one worker.
///
/// Built per simulation call and handed to the classifier, which validates
/// the holder count before choosing a [`Situation`](super::Situation).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub married: bool,
    /// Number of income holders in the household (1 or 2). Required when married.
    pub number_of_holders: Option<u8>,
    pub number_of_dependents: Option<u32>,
    pub disabled: bool,
    pub partner_disabled: Option<bool>,
}

impl Condition {
    pub fn dependents(&self) -> u32 {
        self.number_of_dependents.unwrap_or(0)
    }

    pub fn has_dependents(&self) -> bool {
        self.dependents() > 0
    }
}
