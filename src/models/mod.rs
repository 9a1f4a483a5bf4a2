//! Core data models for the compensation engine.
//!
//! This module contains all the domain models used throughout the engine.

mod employee;
mod period;
mod salary_record;
mod trainee;

pub use employee::{Employee, StaffRole};
pub use period::PeriodKey;
pub use salary_record::{DeductionDetail, DeductionKind, SalaryRecord, TraineeShare};
pub use trainee::{Trainee, TraineeStatus};
