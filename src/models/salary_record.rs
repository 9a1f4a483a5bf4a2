//! Salary record models for the compensation engine.
//!
//! This module contains the [`SalaryRecord`] type and its associated line
//! items. One record captures the full monthly breakdown for one employee:
//! base or trainee-derived pay, attendance deductions, and the final amount.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::StaffRole;

/// The kind of a deduction applied to a salary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeductionKind {
    /// Deduction proportional to recorded absence.
    Absence,
}

/// A single deduction line on a salary record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeductionDetail {
    /// The kind of deduction.
    pub kind: DeductionKind,
    /// Human-readable description of the deduction.
    pub description: String,
    /// The amount deducted.
    pub amount: Decimal,
}

/// One trainee's contribution to a coach's pay.
///
/// The amount here is the *coach's share* of the trainee's fee after the
/// branch commission rule is applied, not the trainee's full payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraineeShare {
    /// Identifier of the trainee.
    pub trainee_id: String,
    /// Display name of the trainee at computation time.
    pub trainee_name: String,
    /// The coach's share of this trainee's fee.
    pub coach_share_amount: Decimal,
    /// The date the trainee's fee was paid.
    pub payment_date: NaiveDate,
}

/// The computed monthly compensation for one employee in one period.
///
/// At most one record exists per (employee, canonical period); the ledger's
/// upsert enforces that. Records are created or fully overwritten by a
/// recompute and deleted only when the reconciliation engine merges
/// duplicates — they are never partially mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRecord {
    /// Opaque record identity, stable across overwrites.
    pub id: Uuid,
    /// The employee this record belongs to.
    pub employee_id: String,
    /// Canonical period string ("January 2024"); historical records may
    /// still carry the legacy numeric form until reconciliation runs.
    pub period: String,
    /// The employee's role at computation time.
    pub role: StaffRole,
    /// The employee's branch at computation time.
    pub branch: String,
    /// Fixed base component; non-zero only for admin staff.
    pub base_salary: Decimal,
    /// Sum of per-trainee coach shares; zero for admin staff.
    pub trainee_share_total: Decimal,
    /// Per-trainee share breakdown; empty for admin staff.
    pub trainee_details: Vec<TraineeShare>,
    /// Days counted absent this period.
    pub absence_days: u32,
    /// Working days the absence is measured against.
    pub total_working_days: u32,
    /// Absence as a percentage of working days.
    pub absence_percentage: Decimal,
    /// Total amount deducted.
    pub deduction_amount: Decimal,
    /// Deduction line items.
    pub deduction_details: Vec<DeductionDetail>,
    /// Pay after deductions.
    pub final_salary: Decimal,
    /// When the record was first created.
    pub created_at: DateTime<Utc>,
    /// When the record was last overwritten.
    pub updated_at: DateTime<Utc>,
}

impl SalaryRecord {
    /// Returns the base the deduction applies to: the trainee share for
    /// coaching roles, the fixed base for admin staff.
    pub fn relevant_base(&self) -> Decimal {
        if self.role.is_coaching_role() {
            self.trainee_share_total
        } else {
            self.base_salary
        }
    }

    /// Sums the deduction line items.
    pub fn deduction_total(&self) -> Decimal {
        self.deduction_details.iter().map(|d| d.amount).sum()
    }
}
