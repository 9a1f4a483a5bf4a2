//! Calculation logic for the compensation engine.
//!
//! This module contains the pure calculation functions for determining pay:
//! per-branch commission shares, attendance assessment, and the full
//! per-employee salary computation.

mod attendance;
mod commission;
mod salary;

pub use attendance::{AttendanceBreakdown, assess_attendance};
pub use commission::coach_share;
pub use salary::compute_salary;
