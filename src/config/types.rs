//! Configuration types for the compensation engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. The per-branch commission
//! table replaces any hardcoded branch-to-rate mapping: new branches or
//! commission rules are a configuration change, not a code change.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

/// A branch's rule for converting a trainee fee into the coach's share.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CommissionRule {
    /// The coach receives `rate × fee` (e.g. a rate of 0.40 is 40%).
    Percentage {
        /// Fraction of the trainee's fee paid to the coach.
        rate: Decimal,
    },
    /// The coach receives a flat amount per trainee regardless of the fee.
    Flat {
        /// Amount paid per trainee.
        amount: Decimal,
    },
}

/// The complete compensation configuration loaded from YAML.
///
/// # Example
///
/// ```
/// use payroll_engine::config::CompensationConfig;
///
/// let yaml = r#"
/// admin_base_salary: "2000"
/// default_working_days: 30
/// default_rate: "0.40"
/// branches:
///   downtown: { type: percentage, rate: "0.40" }
///   eastside: { type: flat, amount: "200" }
/// "#;
/// let config: CompensationConfig = serde_yaml::from_str(yaml).unwrap();
/// assert!(config.rule_for("downtown").is_some());
/// assert!(config.rule_for("unlisted").is_none());
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct CompensationConfig {
    /// Fixed monthly base salary for admin staff.
    pub admin_base_salary: Decimal,
    /// Working days assumed when an employee has none configured.
    #[serde(default = "default_working_days")]
    pub default_working_days: u32,
    /// Fallback commission fraction for branches missing from the table.
    pub default_rate: Decimal,
    /// Commission rules keyed by branch identifier.
    #[serde(default)]
    pub branches: HashMap<String, CommissionRule>,
}

fn default_working_days() -> u32 {
    30
}

impl CompensationConfig {
    /// Returns the commission rule configured for a branch, if any.
    pub fn rule_for(&self, branch: &str) -> Option<&CommissionRule> {
        self.branches.get(branch)
    }
}
