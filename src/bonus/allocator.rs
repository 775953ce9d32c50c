//! Per-engineer bonus shares for one bonus month.

use super::resolver::same_engineer;
use crate::config::SettlementPolicy;
use crate::task::domain::{BonusMonth, Task, TaskId, bonus_month};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// A settled task left out of allocation because its stamp is unreadable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedTask {
    /// Task identifier.
    pub task_id: TaskId,
    /// Stored stamp text.
    pub stamp: String,
}

/// Bonus shares of every credited engineer for one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BonusLedger {
    month: BonusMonth,
    shares: BTreeMap<String, Decimal>,
    contributing: Vec<TaskId>,
    skipped: Vec<SkippedTask>,
}

impl BonusLedger {
    /// Allocates the bonus pools of the tasks dated into `month`.
    ///
    /// A task contributes when it is done, approved on both tracks, has a
    /// work date and a stamp, and its bonus month equals `month`. Its pool
    /// of `work price × bonus share` is split evenly across the non-empty
    /// engineer slots. Tasks with unreadable stamps are skipped and listed.
    #[must_use]
    pub fn for_month(tasks: &[Task], month: BonusMonth, policy: &SettlementPolicy) -> Self {
        let mut ledger = Self {
            month,
            shares: BTreeMap::new(),
            contributing: Vec::new(),
            skipped: Vec::new(),
        };
        for task in tasks {
            ledger.allocate(task, policy);
        }
        debug!(
            %month,
            engineers = ledger.shares.len(),
            tasks = ledger.contributing.len(),
            skipped = ledger.skipped.len(),
            "allocated engineer bonuses"
        );
        ledger
    }

    fn allocate(&mut self, task: &Task, policy: &SettlementPolicy) {
        if !task.is_settled() {
            return;
        }
        let (Some(work_date), Some(stamp)) = (task.work_date(), task.bonus_approval()) else {
            return;
        };
        let stamped = match stamp.month() {
            Ok(stamped) => stamped,
            Err(err) => {
                warn!(
                    task_id = %task.id(),
                    error = %err,
                    "skipping task with malformed bonus stamp"
                );
                self.skipped.push(SkippedTask {
                    task_id: task.id(),
                    stamp: stamp.to_string(),
                });
                return;
            }
        };
        if bonus_month(work_date, stamped) != self.month {
            return;
        }
        let engineers = task.engineers();
        let Some(share) = task
            .rollup()
            .work_price
            .saturating_mul(policy.bonus_share)
            .checked_div(Decimal::from(engineers.credited_count()))
        else {
            return;
        };
        // A name filling several slots still takes one share per task.
        let credited: BTreeSet<&str> = engineers.credited().collect();
        for engineer in credited {
            let entry = self.shares.entry(engineer.to_owned()).or_default();
            *entry = entry.saturating_add(share);
        }
        self.contributing.push(task.id());
    }

    /// Returns the month this ledger covers.
    #[must_use]
    pub const fn month(&self) -> BonusMonth {
        self.month
    }

    /// Returns the bonus owed to the engineer called `name`.
    #[must_use]
    pub fn bonus_for(&self, name: &str) -> Decimal {
        self.shares
            .iter()
            .filter(|(engineer, _)| same_engineer(engineer, name))
            .map(|(_, share)| *share)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Returns every engineer's share, ordered by name.
    #[must_use]
    pub const fn shares(&self) -> &BTreeMap<String, Decimal> {
        &self.shares
    }

    /// Returns the tasks that contributed to the ledger.
    #[must_use]
    pub fn contributing_tasks(&self) -> &[TaskId] {
        &self.contributing
    }

    /// Returns the tasks skipped for unreadable stamps.
    #[must_use]
    pub fn skipped(&self) -> &[SkippedTask] {
        &self.skipped
    }
}

/// Returns one engineer's bonus for `month` without keeping the ledger.
#[must_use]
pub fn engineer_bonus(
    tasks: &[Task],
    name: &str,
    month: BonusMonth,
    policy: &SettlementPolicy,
) -> Decimal {
    BonusLedger::for_month(tasks, month, policy).bonus_for(name)
}
