//! Host-facing service facade.
//!
//! This module wires the rollover controller and the reconciliation engine
//! over a shared set of injected stores and exposes the operations a host
//! application calls: the batch mutations (rollover, per-employee
//! recalculation, period migration) and the salary queries backing history
//! and reporting screens.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::warn;

use crate::config::CompensationConfig;
use crate::error::EngineResult;
use crate::models::{PeriodKey, SalaryRecord};
use crate::reconcile::ReconciliationEngine;
use crate::rollover::RolloverController;
use crate::store::{DirectoryStore, SalaryLedger, TrustedClock};

/// The compensation engine's host interface.
///
/// Batch operations follow a log-plus-bool contract: failures inside a batch
/// are logged per unit of work and summarized as a coarse success flag, never
/// surfaced as errors. Queries return typed results.
pub struct PayrollService<D, L, C> {
    rollover: RolloverController<D, L, C>,
    reconciliation: ReconciliationEngine<L>,
    ledger: Arc<L>,
}

impl<D, L, C> PayrollService<D, L, C>
where
    D: DirectoryStore,
    L: SalaryLedger,
    C: TrustedClock,
{
    /// Creates a service over the given stores, clock, and configuration.
    pub fn new(
        directory: Arc<D>,
        ledger: Arc<L>,
        clock: Arc<C>,
        config: CompensationConfig,
    ) -> Self {
        let config = Arc::new(config);
        Self {
            rollover: RolloverController::new(
                directory,
                Arc::clone(&ledger),
                clock,
                Arc::clone(&config),
            ),
            reconciliation: ReconciliationEngine::new(Arc::clone(&ledger)),
            ledger,
        }
    }

    /// Runs the period rollover if the current period has no records.
    pub async fn trigger_rollover_if_needed(&self) -> bool {
        self.rollover.trigger_rollover_if_needed().await
    }

    /// Recomputes one employee's salary for the current period.
    pub async fn recalculate_for_employee(&self, employee_id: &str) -> bool {
        self.rollover.recalculate_for_employee(employee_id).await
    }

    /// Normalizes period formats and merges duplicate ledger entries.
    pub async fn migrate_period_formats(&self) -> bool {
        self.reconciliation.migrate_period_formats().await
    }

    /// Returns the salary record for one employee and period, if present.
    pub async fn get_salary(
        &self,
        employee_id: &str,
        period: &PeriodKey,
    ) -> EngineResult<Option<SalaryRecord>> {
        self.ledger.find(employee_id, period).await
    }

    /// Lists every salary record for one period.
    pub async fn list_salaries_for_period(
        &self,
        period: &PeriodKey,
    ) -> EngineResult<Vec<SalaryRecord>> {
        self.ledger.list_for_period(period).await
    }

    /// Lists every period that has at least one salary record, newest first.
    ///
    /// Records whose stored period string predates migration and cannot be
    /// parsed are skipped with a warning; they become visible here once
    /// [`PayrollService::migrate_period_formats`] has normalized them.
    pub async fn list_available_periods(&self) -> EngineResult<Vec<PeriodKey>> {
        let records = self.ledger.list_all().await?;
        let mut periods: BTreeSet<PeriodKey> = BTreeSet::new();
        for record in &records {
            match record.period.parse::<PeriodKey>() {
                Ok(period) => {
                    periods.insert(period);
                }
                Err(error) => {
                    warn!(
                        record_id = %record.id,
                        period = %record.period,
                        %error,
                        "skipping record with unparseable period"
                    );
                }
            }
        }
        Ok(periods.into_iter().rev().collect())
    }
}
