//! Ledger reconciliation.
//!
//! This module contains the [`ReconciliationEngine`], the offline process
//! that brings historical ledger data back to one canonical record per
//! (employee, period). It normalizes legacy numeric period strings to the
//! canonical month form and collapses duplicate records produced by racing
//! writers or by the two formats coexisting.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::error::EngineResult;
use crate::models::{PeriodKey, SalaryRecord, TraineeShare};
use crate::store::SalaryLedger;

/// Normalizes period formats and merges duplicate salary records.
///
/// Running the engine twice is a no-op: after a successful pass every
/// processed group holds exactly one record and every period string is
/// canonical, so the second pass finds nothing to change.
pub struct ReconciliationEngine<L> {
    ledger: Arc<L>,
}

impl<L> ReconciliationEngine<L>
where
    L: SalaryLedger,
{
    /// Creates an engine over the given ledger.
    pub fn new(ledger: Arc<L>) -> Self {
        Self { ledger }
    }

    /// Runs one reconciliation pass over the whole ledger.
    ///
    /// Steps: normalize every record's period string, group records by
    /// (employee, normalized period), merge each group with more than one
    /// record into its most-recently-created member and delete the rest,
    /// and rewrite singleton records whose stored period differed from the
    /// canonical form.
    ///
    /// Records with a period that parses as neither canonical nor legacy
    /// numeric are flagged and left untouched. A failure merging one group
    /// does not abort the others. Returns `true` only if no record was
    /// flagged and no group failed.
    pub async fn migrate_period_formats(&self) -> bool {
        let records = match self.ledger.list_all().await {
            Ok(records) => records,
            Err(error) => {
                warn!(%error, "reconciliation aborted: ledger unavailable");
                return false;
            }
        };
        let total = records.len();

        let mut groups: HashMap<(String, String), Vec<SalaryRecord>> = HashMap::new();
        let mut flagged = 0usize;
        for record in records {
            match PeriodKey::normalize(&record.period) {
                Ok(normalized) => {
                    groups
                        .entry((record.employee_id.clone(), normalized))
                        .or_default()
                        .push(record);
                }
                Err(error) => {
                    warn!(
                        record_id = %record.id,
                        period = %record.period,
                        %error,
                        "leaving record with unparseable period unchanged"
                    );
                    flagged += 1;
                }
            }
        }

        let mut failed_groups = 0usize;
        let mut merged_groups = 0usize;
        for ((employee_id, period), group) in groups {
            let was_duplicate = group.len() > 1;
            if let Err(error) = self.reconcile_group(&period, group).await {
                warn!(
                    employee_id,
                    period,
                    %error,
                    "skipping group after reconciliation failure"
                );
                failed_groups += 1;
            } else if was_duplicate {
                merged_groups += 1;
            }
        }

        info!(
            records = total,
            merged_groups,
            flagged,
            failed_groups,
            "reconciliation pass completed"
        );
        flagged == 0 && failed_groups == 0
    }

    async fn reconcile_group(
        &self,
        period: &str,
        mut group: Vec<SalaryRecord>,
    ) -> EngineResult<()> {
        // Oldest first; the last element is the most recently created and
        // becomes the surviving identity.
        group.sort_by_key(|r| r.created_at);

        if group.len() == 1 {
            let mut record = group.remove(0);
            if record.period != period {
                record.period = period.to_string();
                record.updated_at = Utc::now();
                self.ledger.replace(record).await?;
            }
            return Ok(());
        }

        let merged = merge_group(period, &group);
        let primary_id = merged.id;
        self.ledger.replace(merged).await?;
        for record in &group {
            if record.id != primary_id {
                self.ledger.delete(record.id).await?;
            }
        }
        Ok(())
    }
}

/// Merges a group of duplicate records into one, under the identity of the
/// most-recently-created member.
///
/// `group` must be non-empty and sorted by `created_at` ascending. The merge
/// sums the trainee share totals (the combined payments), absence days,
/// deduction amounts, and final salaries; takes the maximum working-day
/// count; recomputes the absence percentage from the merged totals;
/// concatenates deduction details; and deduplicates trainee details by
/// trainee, keeping the entry with the latest payment date.
fn merge_group(period: &str, group: &[SalaryRecord]) -> SalaryRecord {
    let primary = &group[group.len() - 1];

    let trainee_share_total: Decimal = group.iter().map(|r| r.trainee_share_total).sum();
    let absence_days: u32 = group.iter().map(|r| r.absence_days).sum();
    let total_working_days = group
        .iter()
        .map(|r| r.total_working_days)
        .max()
        .unwrap_or(0);
    let deduction_amount: Decimal = group.iter().map(|r| r.deduction_amount).sum();
    let final_salary: Decimal = group.iter().map(|r| r.final_salary).sum();

    let absence_percentage = if total_working_days > 0 {
        Decimal::from(absence_days) * Decimal::ONE_HUNDRED / Decimal::from(total_working_days)
    } else {
        Decimal::ZERO
    };

    let deduction_details = group
        .iter()
        .flat_map(|r| r.deduction_details.iter().cloned())
        .collect();

    // Latest payment date wins per trainee.
    let mut shares_by_trainee: HashMap<String, TraineeShare> = HashMap::new();
    for share in group.iter().flat_map(|r| r.trainee_details.iter()) {
        match shares_by_trainee.get(&share.trainee_id) {
            Some(kept) if kept.payment_date >= share.payment_date => {}
            _ => {
                shares_by_trainee.insert(share.trainee_id.clone(), share.clone());
            }
        }
    }
    let mut trainee_details: Vec<TraineeShare> = shares_by_trainee.into_values().collect();
    trainee_details.sort_by(|a, b| a.trainee_id.cmp(&b.trainee_id));

    SalaryRecord {
        id: primary.id,
        employee_id: primary.employee_id.clone(),
        period: period.to_string(),
        role: primary.role,
        branch: primary.branch.clone(),
        base_salary: primary.base_salary,
        trainee_share_total,
        trainee_details,
        absence_days,
        total_working_days,
        absence_percentage,
        deduction_amount,
        deduction_details,
        final_salary,
        created_at: primary.created_at,
        updated_at: Utc::now(),
    }
}
