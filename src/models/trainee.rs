//! Trainee model and related types.
//!
//! This module defines the Trainee struct and TraineeStatus enum. Only
//! trainees in an active-like status contribute to a coach's revenue share.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Enrollment status of a trainee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraineeStatus {
    /// Actively enrolled and paying.
    Active,
    /// Temporarily paused; fees do not accrue.
    Frozen,
    /// Finished the program.
    Completed,
    /// Dropped out or otherwise not enrolled.
    Inactive,
}

impl TraineeStatus {
    /// Returns true for statuses that count toward a coach's revenue share.
    pub fn is_active_like(&self) -> bool {
        matches!(self, TraineeStatus::Active)
    }
}

/// Represents a trainee assigned to a coach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trainee {
    /// Unique identifier for the trainee.
    pub id: String,
    /// Display name, carried into salary record line items.
    pub name: String,
    /// Identifier of the coach this trainee is assigned to.
    pub coach_id: String,
    /// Identifier of the branch the trainee trains at.
    pub branch: String,
    /// The fee attributable to this trainee for the period.
    pub payment_amount: Decimal,
    /// The date the fee was paid.
    pub payment_date: NaiveDate,
    /// Enrollment status.
    pub status: TraineeStatus,
}
