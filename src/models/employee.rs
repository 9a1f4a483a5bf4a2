//! Employee model and related types.
//!
//! This module defines the Employee struct and StaffRole enum for
//! representing coaching staff in the compensation engine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Represents the role an employee holds within a branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    /// Administrative staff paid a fixed base salary.
    Admin,
    /// Coach paid a share of assigned trainees' fees.
    Coach,
    /// Head coach, paid like a coach.
    HeadCoach,
}

impl StaffRole {
    /// Returns true for roles whose pay derives from trainee fees.
    pub fn is_coaching_role(&self) -> bool {
        matches!(self, StaffRole::Coach | StaffRole::HeadCoach)
    }
}

/// Represents a member of staff subject to monthly compensation.
///
/// Attendance is a map from an opaque timestamp key to a present/absent
/// flag; the `BTreeMap` keeps the keys ordered so the most recent marks sit
/// at the end. An empty map means no attendance was recorded for the period
/// and no deduction applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// The role held by this employee.
    pub role: StaffRole,
    /// Identifier of the branch the employee works at.
    pub branch: String,
    /// Working days configured for this employee; 0 means "use the default".
    #[serde(default)]
    pub total_working_days: u32,
    /// Attendance marks for the current period, keyed by timestamp string.
    #[serde(default)]
    pub attendance: BTreeMap<String, bool>,
}

impl Employee {
    /// Counts the days marked present in the attendance map.
    pub fn present_days(&self) -> u32 {
        self.attendance.values().filter(|present| **present).count() as u32
    }
}
