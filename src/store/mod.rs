//! Storage and clock seams for the compensation engine.
//!
//! The engine never talks to a concrete database or system clock directly.
//! The [`DirectoryStore`], [`SalaryLedger`], and [`TrustedClock`] traits are
//! injected into the orchestrators as explicit dependencies, so hosts can
//! back them with whatever persistence they run. In-memory implementations
//! are provided for tests and lightweight hosts.
//!
//! All trait methods return `Send` futures so callers can await them from
//! multi-threaded runtimes; implementations must not hold locks across
//! await points.

mod clock;
mod memory;

use std::future::Future;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{Employee, PeriodKey, SalaryRecord, Trainee};

pub use clock::{FixedClock, SystemClock};
pub use memory::{MemoryDirectory, MemoryLedger};

/// Read access to the employee and trainee directory.
///
/// The directory is read-only to the engine with one exception: the rollover
/// controller resets attendance maps at the period boundary through
/// [`DirectoryStore::clear_attendance`]. All other mutation (attendance
/// marking, trainee CRUD) happens outside the engine and is read back on the
/// next recompute.
pub trait DirectoryStore: Send + Sync {
    /// Lists every active employee.
    fn list_active_employees(&self) -> impl Future<Output = EngineResult<Vec<Employee>>> + Send;

    /// Looks up one employee by id.
    fn get_employee(
        &self,
        employee_id: &str,
    ) -> impl Future<Output = EngineResult<Option<Employee>>> + Send;

    /// Lists every trainee assigned to the given coach, in any status.
    fn list_trainees_for_coach(
        &self,
        coach_id: &str,
    ) -> impl Future<Output = EngineResult<Vec<Trainee>>> + Send;

    /// Empties the attendance map of one employee so the next period starts
    /// with zero recorded attendance.
    fn clear_attendance(
        &self,
        employee_id: &str,
    ) -> impl Future<Output = EngineResult<()>> + Send;
}

/// A date source the client cannot forge.
///
/// Period rollover must never be decided from a client device clock; the
/// host injects an implementation backed by an authoritative time source.
pub trait TrustedClock: Send + Sync {
    /// Returns the current date.
    fn today(&self) -> impl Future<Output = EngineResult<NaiveDate>> + Send;
}

/// Persistence for salary records.
///
/// [`SalaryLedger::upsert`] is the sole write path for computed salaries and
/// the enforcement point for the one-record-per-(employee, period) invariant.
/// It must be atomic per (employee, period) key: a compare-and-write, not a
/// separate read followed by a write.
pub trait SalaryLedger: Send + Sync {
    /// Creates or overwrites the record for `(record.employee_id,
    /// record.period)`.
    ///
    /// When a record already exists for that key, all computed fields are
    /// overwritten in place while the existing identity (`id`, `created_at`)
    /// is kept. Returns the stored record.
    fn upsert(
        &self,
        record: SalaryRecord,
    ) -> impl Future<Output = EngineResult<SalaryRecord>> + Send;

    /// Finds the record for one employee and canonical period.
    fn find(
        &self,
        employee_id: &str,
        period: &PeriodKey,
    ) -> impl Future<Output = EngineResult<Option<SalaryRecord>>> + Send;

    /// Lists every record stored under the canonical form of the period.
    fn list_for_period(
        &self,
        period: &PeriodKey,
    ) -> impl Future<Output = EngineResult<Vec<SalaryRecord>>> + Send;

    /// Lists every record in the ledger.
    fn list_all(&self) -> impl Future<Output = EngineResult<Vec<SalaryRecord>>> + Send;

    /// Rewrites a record under its existing id.
    ///
    /// Used by reconciliation, which must control record identity while
    /// merging; calculators go through [`SalaryLedger::upsert`] instead.
    fn replace(
        &self,
        record: SalaryRecord,
    ) -> impl Future<Output = EngineResult<()>> + Send;

    /// Deletes a record by id. Deleting an absent id is a no-op.
    fn delete(&self, record_id: Uuid) -> impl Future<Output = EngineResult<()>> + Send;
}
