//! Salary computation.
//!
//! This module assembles the full monthly [`SalaryRecord`] for one employee
//! from the pure calculation units: commission shares for coaching roles, the
//! fixed base for admin staff, and the attendance deduction applied uniformly
//! to whichever base is relevant.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::config::CompensationConfig;
use crate::models::{
    DeductionDetail, DeductionKind, Employee, PeriodKey, SalaryRecord, Trainee, TraineeShare,
};

use super::attendance::assess_attendance;
use super::commission::coach_share;

/// Computes one employee's salary breakdown for a period.
///
/// `assigned_trainees` must be the subset of trainees assigned to this
/// employee and in an active-like status; admin staff ignore it entirely.
///
/// The computation is pure and infallible: identical inputs always yield an
/// identical record apart from the freshly generated id and the `now`
/// timestamps. Degenerate inputs (no trainees, no attendance, zero working
/// days) produce numerically degenerate results, never errors.
///
/// Behavior by role:
/// - **admin**: base salary from configuration, no trainee share.
/// - **coach / head coach**: no fixed base; the pay is the sum of per-trainee
///   commission shares, with one [`TraineeShare`] line per trainee.
///
/// The attendance deduction applies to whichever base is relevant for the
/// role and is recorded as a single `ABSENCE` line when positive.
pub fn compute_salary(
    employee: &Employee,
    assigned_trainees: &[Trainee],
    config: &CompensationConfig,
    period: &PeriodKey,
    now: DateTime<Utc>,
) -> SalaryRecord {
    let (base_salary, trainee_share_total, trainee_details) = if employee.role.is_coaching_role()
    {
        let details: Vec<TraineeShare> = assigned_trainees
            .iter()
            .map(|trainee| TraineeShare {
                trainee_id: trainee.id.clone(),
                trainee_name: trainee.name.clone(),
                coach_share_amount: coach_share(config, &employee.branch, trainee.payment_amount),
                payment_date: trainee.payment_date,
            })
            .collect();
        let share_total: Decimal = details.iter().map(|d| d.coach_share_amount).sum();
        (Decimal::ZERO, share_total, details)
    } else {
        (config.admin_base_salary, Decimal::ZERO, Vec::new())
    };

    let relevant_base = if employee.role.is_coaching_role() {
        trainee_share_total
    } else {
        base_salary
    };

    let breakdown = assess_attendance(employee, config);
    let deduction_amount =
        relevant_base * breakdown.absence_percentage / Decimal::ONE_HUNDRED;

    let deduction_details = if deduction_amount > Decimal::ZERO {
        vec![DeductionDetail {
            kind: DeductionKind::Absence,
            description: format!(
                "Absence deduction for {} of {} working day(s)",
                breakdown.absence_days, breakdown.total_working_days
            ),
            amount: deduction_amount,
        }]
    } else {
        Vec::new()
    };

    SalaryRecord {
        id: Uuid::new_v4(),
        employee_id: employee.id.clone(),
        period: period.to_string(),
        role: employee.role,
        branch: employee.branch.clone(),
        base_salary,
        trainee_share_total,
        trainee_details,
        absence_days: breakdown.absence_days,
        total_working_days: breakdown.total_working_days,
        absence_percentage: breakdown.absence_percentage,
        deduction_amount,
        deduction_details,
        final_salary: relevant_base - deduction_amount,
        created_at: now,
        updated_at: now,
    }
}
