//! Period rollover orchestration.
//!
//! This module contains the [`RolloverController`], which detects the start
//! of a new payroll period and recomputes every active employee's salary for
//! it. The controller is a two-state machine: a period is **current** when
//! the ledger already holds records for it and **stale** when it does not.
//! Each host activation calls [`RolloverController::trigger_rollover_if_needed`],
//! which transitions a stale period to current and is a no-op otherwise.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::calculation::compute_salary;
use crate::config::CompensationConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, PeriodKey, SalaryRecord};
use crate::store::{DirectoryStore, SalaryLedger, TrustedClock};

/// Orchestrates period-transition detection and bulk recomputation.
///
/// All collaborators are injected: the directory and ledger stores and the
/// trusted clock the current period is derived from. The clock must be a
/// source the client cannot forge; deriving the period from a device clock
/// would let a skewed or manipulated clock trigger premature rollovers.
///
/// The staleness check is period-global: the batch runs only when *no*
/// record exists for the derived period. A rollover interrupted after
/// writing some employees' records therefore leaves the period looking
/// current, and the remaining employees are not picked up by later
/// activations; the recovery path is
/// [`RolloverController::recalculate_for_employee`] per affected employee.
pub struct RolloverController<D, L, C> {
    directory: Arc<D>,
    ledger: Arc<L>,
    clock: Arc<C>,
    config: Arc<CompensationConfig>,
}

impl<D, L, C> RolloverController<D, L, C>
where
    D: DirectoryStore,
    L: SalaryLedger,
    C: TrustedClock,
{
    /// Creates a controller over the given stores and clock.
    pub fn new(
        directory: Arc<D>,
        ledger: Arc<L>,
        clock: Arc<C>,
        config: Arc<CompensationConfig>,
    ) -> Self {
        Self {
            directory,
            ledger,
            clock,
            config,
        }
    }

    /// Runs the rollover batch if the current period has no salary records.
    ///
    /// Safe to call on every host activation. When records already exist for
    /// the clock-derived period the call is a no-op and reports success.
    /// Otherwise every active employee is recomputed and upserted, then all
    /// attendance maps are reset so the new period starts from zero.
    ///
    /// Per-employee failures are logged and skipped; the batch continues.
    /// Returns `false` if any unit of work failed (including a failure to
    /// reach the clock or the stores at all), `true` otherwise.
    pub async fn trigger_rollover_if_needed(&self) -> bool {
        let period = match self.clock.today().await {
            Ok(today) => PeriodKey::from_date(today),
            Err(error) => {
                warn!(%error, "rollover aborted: trusted clock unavailable");
                return false;
            }
        };

        let existing = match self.ledger.list_for_period(&period).await {
            Ok(records) => records,
            Err(error) => {
                warn!(%error, period = %period, "rollover aborted: ledger unavailable");
                return false;
            }
        };
        if !existing.is_empty() {
            info!(
                period = %period,
                records = existing.len(),
                "salary records already exist for period; rollover skipped"
            );
            return true;
        }

        let employees = match self.directory.list_active_employees().await {
            Ok(employees) => employees,
            Err(error) => {
                warn!(%error, period = %period, "rollover aborted: directory unavailable");
                return false;
            }
        };

        let mut failed = 0usize;
        for employee in &employees {
            if let Err(error) = self.recompute_one(employee, &period).await {
                warn!(
                    employee_id = %employee.id,
                    period = %period,
                    %error,
                    "skipping employee after recompute failure"
                );
                failed += 1;
            }
        }

        // Attendance restarts from zero for the new period, whether or not
        // every salary write succeeded.
        for employee in &employees {
            if let Err(error) = self.directory.clear_attendance(&employee.id).await {
                warn!(
                    employee_id = %employee.id,
                    %error,
                    "failed to reset attendance"
                );
                failed += 1;
            }
        }

        info!(
            period = %period,
            employees = employees.len(),
            failed,
            "rollover batch completed"
        );
        failed == 0
    }

    /// Recomputes one employee's salary for the clock-derived period.
    ///
    /// This is the manual path used when a trainee is added or renewed
    /// mid-period. It does not touch attendance maps. Returns `false` when
    /// the employee does not exist or any store fails; the failure is logged.
    pub async fn recalculate_for_employee(&self, employee_id: &str) -> bool {
        match self.try_recalculate(employee_id).await {
            Ok(record) => {
                info!(
                    employee_id,
                    period = %record.period,
                    final_salary = %record.final_salary,
                    "salary recalculated"
                );
                true
            }
            Err(error) => {
                warn!(employee_id, %error, "salary recalculation failed");
                false
            }
        }
    }

    async fn try_recalculate(&self, employee_id: &str) -> EngineResult<SalaryRecord> {
        let period = PeriodKey::from_date(self.clock.today().await?);
        let employee = self.directory.get_employee(employee_id).await?.ok_or_else(|| {
            EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            }
        })?;
        self.recompute_one(&employee, &period).await
    }

    async fn recompute_one(
        &self,
        employee: &Employee,
        period: &PeriodKey,
    ) -> EngineResult<SalaryRecord> {
        let assigned = if employee.role.is_coaching_role() {
            self.directory
                .list_trainees_for_coach(&employee.id)
                .await?
                .into_iter()
                .filter(|t| t.status.is_active_like())
                .collect()
        } else {
            Vec::new()
        };

        let record = compute_salary(employee, &assigned, &self.config, period, Utc::now());
        self.ledger.upsert(record).await
    }
}
