//! Attendance assessment functionality.
//!
//! This module derives the absence figures a salary deduction is based on
//! from an employee's attendance map. All degenerate inputs are defaulted or
//! guarded; the assessment never fails.

use rust_decimal::Decimal;

use crate::config::CompensationConfig;
use crate::models::Employee;

/// The result of assessing one employee's attendance for a period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceBreakdown {
    /// Working days the absence is measured against.
    pub total_working_days: u32,
    /// Days marked present.
    pub present_days: u32,
    /// Days counted absent.
    pub absence_days: u32,
    /// Absence as a percentage of working days.
    pub absence_percentage: Decimal,
}

/// Assesses an employee's attendance for the current period.
///
/// Rules:
/// - Working days come from the employee when configured (> 0), otherwise
///   from `config.default_working_days`.
/// - An empty attendance map means nothing was recorded and yields zero
///   absence (no deduction), whatever the working-day count.
/// - More present marks than working days clamps absence at zero rather
///   than going negative.
/// - The percentage is guarded against a zero working-day count.
pub fn assess_attendance(
    employee: &Employee,
    config: &CompensationConfig,
) -> AttendanceBreakdown {
    let total_working_days = if employee.total_working_days > 0 {
        employee.total_working_days
    } else {
        config.default_working_days
    };

    let present_days = employee.present_days();

    let absence_days = if employee.attendance.is_empty() {
        0
    } else {
        total_working_days.saturating_sub(present_days)
    };

    let absence_percentage = if total_working_days > 0 {
        Decimal::from(absence_days) * Decimal::ONE_HUNDRED / Decimal::from(total_working_days)
    } else {
        Decimal::ZERO
    };

    AttendanceBreakdown {
        total_working_days,
        present_days,
        absence_days,
        absence_percentage,
    }
}
