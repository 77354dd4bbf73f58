use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How the employer pays the lunch allowance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LunchAllowanceMode {
    /// Meal vouchers or card.
    #[default]
    #[serde(rename = "cupon")]
    Voucher,
    /// Paid in cash together with the salary.
    #[serde(rename = "salary")]
    Salary,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown lunch allowance mode '{0}', expected 'cupon' or 'salary'")]
pub struct UnknownLunchAllowanceMode(pub String);

impl FromStr for LunchAllowanceMode {
    type Err = UnknownLunchAllowanceMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cupon" | "voucher" => Ok(Self::Voucher),
            "salary" => Ok(Self::Salary),
            _ => Err(UnknownLunchAllowanceMode(s.to_string())),
        }
    }
}

/// Per-day tax exemption for the lunch allowance.
///
/// Defaults are the 2024 values: 6.00 € per day paid with the salary and
/// 160 % of that (9.60 €) paid in vouchers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LunchAllowanceLimits {
    pub daily_exemption: Decimal,
    pub voucher_factor: Decimal,
}

impl Default for LunchAllowanceLimits {
    fn default() -> Self {
        Self {
            daily_exemption: Decimal::new(600, 2),
            voucher_factor: Decimal::new(16, 1),
        }
    }
}

impl LunchAllowanceLimits {
    pub fn daily_limit(
        &self,
        mode: LunchAllowanceMode,
    ) -> Decimal {
        match mode {
            LunchAllowanceMode::Salary => self.daily_exemption,
            LunchAllowanceMode::Voucher => self.daily_exemption * self.voucher_factor,
        }
    }
}

/// Employer-paid meal benefit, partly tax exempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LunchAllowance {
    pub daily_value: Decimal,
    pub days_count: u32,
    #[serde(default)]
    pub mode: LunchAllowanceMode,
    #[serde(default)]
    pub limits: LunchAllowanceLimits,
}

impl LunchAllowance {
    pub fn new(
        daily_value: Decimal,
        days_count: u32,
        mode: LunchAllowanceMode,
    ) -> Self {
        Self {
            daily_value,
            days_count,
            mode,
            limits: LunchAllowanceLimits::default(),
        }
    }

    pub fn daily_limit(&self) -> Decimal {
        self.limits.daily_limit(self.mode)
    }

    pub fn monthly_value(&self) -> Decimal {
        self.daily_value * Decimal::from(self.days_count)
    }

    /// Portion above the daily exemption, added to taxable income.
    pub fn taxable_monthly_value(&self) -> Decimal {
        let excess = (self.daily_value - self.daily_limit()).max(Decimal::ZERO);
        excess * Decimal::from(self.days_count)
    }

    pub fn tax_free_monthly_value(&self) -> Decimal {
        self.daily_value.min(self.daily_limit()) * Decimal::from(self.days_count)
    }
}
