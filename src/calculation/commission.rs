//! Commission lookup functionality.
//!
//! This module resolves the coach's share of a trainee fee from the
//! per-branch commission table, falling back to the configured default
//! percentage for branches missing from the table.

use rust_decimal::Decimal;

use crate::config::{CommissionRule, CompensationConfig};

/// Computes the coach's share of one trainee's fee.
///
/// The branch's rule decides the outcome:
/// 1. A percentage branch pays `rate × fee`
/// 2. A flat branch pays a fixed amount per trainee, ignoring the fee
/// 3. A branch missing from the table pays `default_rate × fee`
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::coach_share;
/// use payroll_engine::config::CompensationConfig;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let config: CompensationConfig = serde_yaml::from_str(r#"
/// admin_base_salary: "2000"
/// default_rate: "0.40"
/// branches:
///   eastside: { type: flat, amount: "200" }
/// "#).unwrap();
///
/// let fee = Decimal::from_str("1500").unwrap();
/// assert_eq!(coach_share(&config, "eastside", fee), Decimal::from_str("200").unwrap());
/// ```
pub fn coach_share(config: &CompensationConfig, branch: &str, fee: Decimal) -> Decimal {
    match config.rule_for(branch) {
        Some(CommissionRule::Percentage { rate }) => fee * *rate,
        Some(CommissionRule::Flat { amount }) => *amount,
        None => fee * config.default_rate,
    }
}
