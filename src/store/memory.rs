//! In-memory store implementations.
//!
//! These back the store traits with mutex-guarded maps. They are the
//! reference implementations used by the test suites and are sufficient for
//! single-process hosts; persistent hosts supply their own trait impls.

use std::collections::HashMap;
use std::sync::Mutex;

use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{Employee, PeriodKey, SalaryRecord, Trainee};

use super::{DirectoryStore, SalaryLedger};

/// In-memory employee and trainee directory.
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    employees: Mutex<HashMap<String, Employee>>,
    trainees: Mutex<HashMap<String, Trainee>>,
}

impl MemoryDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an employee.
    pub fn insert_employee(&self, employee: Employee) {
        self.employees
            .lock()
            .unwrap()
            .insert(employee.id.clone(), employee);
    }

    /// Adds or replaces a trainee.
    pub fn insert_trainee(&self, trainee: Trainee) {
        self.trainees
            .lock()
            .unwrap()
            .insert(trainee.id.clone(), trainee);
    }
}

impl DirectoryStore for MemoryDirectory {
    async fn list_active_employees(&self) -> EngineResult<Vec<Employee>> {
        let mut employees: Vec<Employee> =
            self.employees.lock().unwrap().values().cloned().collect();
        employees.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(employees)
    }

    async fn get_employee(&self, employee_id: &str) -> EngineResult<Option<Employee>> {
        Ok(self.employees.lock().unwrap().get(employee_id).cloned())
    }

    async fn list_trainees_for_coach(&self, coach_id: &str) -> EngineResult<Vec<Trainee>> {
        let mut trainees: Vec<Trainee> = self
            .trainees
            .lock()
            .unwrap()
            .values()
            .filter(|t| t.coach_id == coach_id)
            .cloned()
            .collect();
        trainees.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(trainees)
    }

    async fn clear_attendance(&self, employee_id: &str) -> EngineResult<()> {
        if let Some(employee) = self.employees.lock().unwrap().get_mut(employee_id) {
            employee.attendance.clear();
        }
        Ok(())
    }
}

/// In-memory salary ledger.
///
/// All operations take the single map lock for their whole duration, so the
/// upsert's find-then-write is a per-key compare-and-write: two racing
/// upserts for the same (employee, period) serialize on the lock and the
/// second overwrites rather than duplicates. No lock is ever held across an
/// await point.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    records: Mutex<HashMap<Uuid, SalaryRecord>>,
}

impl MemoryLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record verbatim, bypassing the upsert's key matching.
    ///
    /// This exists so tests and data importers can seed historical state,
    /// including the duplicate and legacy-period records the reconciliation
    /// engine is meant to clean up.
    pub fn insert_raw(&self, record: SalaryRecord) {
        self.records.lock().unwrap().insert(record.id, record);
    }

    /// Returns the number of stored records.
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    /// Returns true when the ledger holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.lock().unwrap().is_empty()
    }
}

impl SalaryLedger for MemoryLedger {
    async fn upsert(&self, mut record: SalaryRecord) -> EngineResult<SalaryRecord> {
        let mut records = self.records.lock().unwrap();

        let existing = records
            .values()
            .find(|r| r.employee_id == record.employee_id && r.period == record.period)
            .map(|r| (r.id, r.created_at));

        if let Some((id, created_at)) = existing {
            record.id = id;
            record.created_at = created_at;
        }

        records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find(
        &self,
        employee_id: &str,
        period: &PeriodKey,
    ) -> EngineResult<Option<SalaryRecord>> {
        let canonical = period.to_string();
        Ok(self
            .records
            .lock()
            .unwrap()
            .values()
            .find(|r| r.employee_id == employee_id && r.period == canonical)
            .cloned())
    }

    async fn list_for_period(&self, period: &PeriodKey) -> EngineResult<Vec<SalaryRecord>> {
        let canonical = period.to_string();
        let mut records: Vec<SalaryRecord> = self
            .records
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.period == canonical)
            .cloned()
            .collect();
        records.sort_by(|a, b| a.employee_id.cmp(&b.employee_id));
        Ok(records)
    }

    async fn list_all(&self) -> EngineResult<Vec<SalaryRecord>> {
        let mut records: Vec<SalaryRecord> =
            self.records.lock().unwrap().values().cloned().collect();
        records.sort_by(|a, b| {
            a.employee_id
                .cmp(&b.employee_id)
                .then_with(|| a.period.cmp(&b.period))
        });
        Ok(records)
    }

    async fn replace(&self, record: SalaryRecord) -> EngineResult<()> {
        self.records.lock().unwrap().insert(record.id, record);
        Ok(())
    }

    async fn delete(&self, record_id: Uuid) -> EngineResult<()> {
        self.records.lock().unwrap().remove(&record_id);
        Ok(())
    }
}
