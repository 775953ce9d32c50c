//! Task aggregate root and the save pipeline.

use super::{
    ApprovalDecision, ApprovalRole, ApprovalState, ApprovalTrack, BonusStamp, DecisionContext,
    EngineerSlots, MoneyInputs, MoneyRollup, TaskId, TaskStatus, ValidationFailure, Violation,
    normalize_work_date, stamp_bonus_approval,
};
use crate::config::SettlementPolicy;
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use tracing::debug;

/// Service task aggregate root.
///
/// Derived money sums are recomputed from the leaf inputs on every save and
/// on reconstruction; they are never accepted from callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    request_number: Option<String>,
    service_region: Option<String>,
    status: TaskStatus,
    block_reason: Option<String>,
    warehouse: ApprovalTrack,
    accountant: ApprovalTrack,
    request_date: Option<NaiveDate>,
    work_date: Option<NaiveDate>,
    bonus_approval: Option<BonusStamp>,
    engineers: EngineerSlots,
    money: MoneyInputs,
    rollup: MoneyRollup,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted request number.
    pub request_number: Option<String>,
    /// Persisted service region.
    pub service_region: Option<String>,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted block reason.
    pub block_reason: Option<String>,
    /// Persisted warehouse track.
    pub warehouse: ApprovalTrack,
    /// Persisted accountant track.
    pub accountant: ApprovalTrack,
    /// Persisted request date.
    pub request_date: Option<NaiveDate>,
    /// Persisted work date.
    pub work_date: Option<NaiveDate>,
    /// Persisted bonus approval stamp.
    pub bonus_approval: Option<BonusStamp>,
    /// Persisted engineer slots.
    pub engineers: EngineerSlots,
    /// Persisted leaf money inputs.
    pub money: MoneyInputs,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest save timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Field edits and approval decisions submitted in one save.
///
/// Fields left untouched keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    request_number: Option<Option<String>>,
    service_region: Option<Option<String>>,
    status: Option<TaskStatus>,
    block_reason: Option<Option<String>>,
    request_date: Option<Option<NaiveDate>>,
    work_date: Option<Option<NaiveDate>>,
    engineers: Option<EngineerSlots>,
    money: Option<MoneyInputs>,
    warehouse: Option<ApprovalDecision>,
    accountant: Option<ApprovalDecision>,
}

impl TaskChanges {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the request number.
    #[must_use]
    pub fn with_request_number(mut self, value: Option<String>) -> Self {
        self.request_number = Some(value);
        self
    }

    /// Sets the service region.
    #[must_use]
    pub fn with_service_region(mut self, value: Option<String>) -> Self {
        self.service_region = Some(value);
        self
    }

    /// Sets the lifecycle status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the block reason.
    #[must_use]
    pub fn with_block_reason(mut self, value: Option<String>) -> Self {
        self.block_reason = Some(value);
        self
    }

    /// Sets the request date.
    #[must_use]
    pub const fn with_request_date(mut self, value: Option<NaiveDate>) -> Self {
        self.request_date = Some(value);
        self
    }

    /// Sets the work date.
    #[must_use]
    pub const fn with_work_date(mut self, value: Option<NaiveDate>) -> Self {
        self.work_date = Some(value);
        self
    }

    /// Replaces the engineer slots.
    #[must_use]
    pub fn with_engineers(mut self, engineers: EngineerSlots) -> Self {
        self.engineers = Some(engineers);
        self
    }

    /// Replaces the leaf money inputs.
    #[must_use]
    pub fn with_money(mut self, money: MoneyInputs) -> Self {
        self.money = Some(money);
        self
    }

    /// Requests an approval change on one track.
    #[must_use]
    pub fn with_decision(mut self, role: ApprovalRole, decision: ApprovalDecision) -> Self {
        match role {
            ApprovalRole::Warehouse => self.warehouse = Some(decision),
            ApprovalRole::Accountant => self.accountant = Some(decision),
        }
        self
    }

    /// Returns whether the change set carries no edits.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Task {
    /// Creates an empty task in the [`TaskStatus::Request`] status.
    #[must_use]
    pub fn new(clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            request_number: None,
            service_region: None,
            status: TaskStatus::Request,
            block_reason: None,
            warehouse: ApprovalTrack::default(),
            accountant: ApprovalTrack::default(),
            request_date: None,
            work_date: None,
            bonus_approval: None,
            engineers: EngineerSlots::default(),
            money: MoneyInputs::default(),
            rollup: MoneyRollup::default(),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage, recomputing derived sums.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        let rollup = data.money.rollup();
        Self {
            id: data.id,
            request_number: data.request_number,
            service_region: data.service_region,
            status: data.status,
            block_reason: data.block_reason,
            warehouse: data.warehouse,
            accountant: data.accountant,
            request_date: data.request_date,
            work_date: data.work_date,
            bonus_approval: data.bonus_approval,
            engineers: data.engineers,
            money: data.money,
            rollup,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the operator-facing request number.
    #[must_use]
    pub fn request_number(&self) -> Option<&str> {
        self.request_number.as_deref()
    }

    /// Returns the region that serviced the task.
    #[must_use]
    pub fn service_region(&self) -> Option<&str> {
        self.service_region.as_deref()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the block reason.
    #[must_use]
    pub fn block_reason(&self) -> Option<&str> {
        self.block_reason.as_deref()
    }

    /// Returns the approval track owned by `role`.
    #[must_use]
    pub const fn track(&self, role: ApprovalRole) -> &ApprovalTrack {
        match role {
            ApprovalRole::Warehouse => &self.warehouse,
            ApprovalRole::Accountant => &self.accountant,
        }
    }

    /// Returns the warehouse approval track.
    #[must_use]
    pub const fn warehouse(&self) -> &ApprovalTrack {
        &self.warehouse
    }

    /// Returns the accountant approval track.
    #[must_use]
    pub const fn accountant(&self) -> &ApprovalTrack {
        &self.accountant
    }

    /// Returns the date the warehouse last approved the task.
    #[must_use]
    pub const fn warehouse_approval_date(&self) -> Option<NaiveDate> {
        self.warehouse.approved_on()
    }

    /// Returns the request date.
    #[must_use]
    pub const fn request_date(&self) -> Option<NaiveDate> {
        self.request_date
    }

    /// Returns the date the work was performed.
    #[must_use]
    pub const fn work_date(&self) -> Option<NaiveDate> {
        self.work_date
    }

    /// Returns the bonus approval stamp.
    #[must_use]
    pub const fn bonus_approval(&self) -> Option<&BonusStamp> {
        self.bonus_approval.as_ref()
    }

    /// Returns the engineer slots.
    #[must_use]
    pub const fn engineers(&self) -> &EngineerSlots {
        &self.engineers
    }

    /// Returns the leaf money inputs.
    #[must_use]
    pub const fn money(&self) -> &MoneyInputs {
        &self.money
    }

    /// Returns the derived money sums.
    #[must_use]
    pub const fn rollup(&self) -> &MoneyRollup {
        &self.rollup
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest save timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns whether the task is done and approved on both tracks.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        matches!(self.status, TaskStatus::Done)
            && self.warehouse.is_approved()
            && self.accountant.is_approved()
    }

    /// Applies a change set as one atomic save.
    ///
    /// Approval decisions run through each track's state machine, the reset
    /// rules compare the task before and after the edit, derived money is
    /// recomputed, and the bonus stamp is written when the task becomes
    /// settled (or is settled without a stamp).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationFailure`] listing every violated rule. The task is
    /// left unchanged when any rule is violated.
    pub fn save(
        &mut self,
        changes: TaskChanges,
        actor: Option<&str>,
        policy: &SettlementPolicy,
        clock: &impl Clock,
    ) -> Result<(), ValidationFailure> {
        let now = clock.utc();
        let context = DecisionContext {
            today: now.date_naive(),
            now,
            actor,
            policy,
        };
        let mut next = self.clone();
        let mut violations = Vec::new();

        next.apply_fields(&changes);
        for (role, decision) in [
            (ApprovalRole::Warehouse, changes.warehouse.as_ref()),
            (ApprovalRole::Accountant, changes.accountant.as_ref()),
        ] {
            let Some(decision) = decision else { continue };
            if let Err(violation) = next.track_mut(role).apply(role, decision, &context) {
                violations.push(violation);
            }
        }

        next.apply_reset_rules(self);
        violations.extend(next.field_violations());
        if !violations.is_empty() {
            return Err(ValidationFailure::new(violations));
        }

        next.rollup = next.money.rollup();
        debug!(
            task_id = %next.id,
            work_price = %next.rollup.work_price,
            "recomputed task money rollup"
        );
        next.stamp_if_settled(self.is_settled(), context.today, policy);
        next.updated_at = now;
        *self = next;
        Ok(())
    }

    fn track_mut(&mut self, role: ApprovalRole) -> &mut ApprovalTrack {
        match role {
            ApprovalRole::Warehouse => &mut self.warehouse,
            ApprovalRole::Accountant => &mut self.accountant,
        }
    }

    fn apply_fields(&mut self, changes: &TaskChanges) {
        if let Some(value) = &changes.request_number {
            self.request_number = non_blank(value.as_deref());
        }
        if let Some(value) = &changes.service_region {
            self.service_region = non_blank(value.as_deref());
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        if let Some(value) = &changes.block_reason {
            self.block_reason = non_blank(value.as_deref());
        }
        if let Some(value) = changes.request_date {
            self.request_date = value;
        }
        if let Some(value) = changes.work_date {
            self.work_date = value;
        }
        if let Some(engineers) = &changes.engineers {
            self.engineers = engineers.clone();
        }
        if let Some(money) = &changes.money {
            self.money = money.clone();
        }
    }

    fn apply_reset_rules(&mut self, previous: &Self) {
        let warehouse_before = previous.warehouse.state();
        let warehouse_after = self.warehouse.state();

        if warehouse_after == ApprovalState::Approved
            && warehouse_before != ApprovalState::Approved
            && previous.accountant.is_rejected()
            && self.accountant.is_rejected()
        {
            debug!(task_id = %self.id, "warehouse approval reopens accountant rejection");
            self.accountant.reset_rejection();
        }

        if warehouse_after == ApprovalState::Rejected && warehouse_before != ApprovalState::Rejected
        {
            debug!(task_id = %self.id, "warehouse rejection returns task to work");
            self.status = TaskStatus::InProgress;
        }

        if previous.status == TaskStatus::InProgress && self.status == TaskStatus::Done {
            for role in ApprovalRole::ALL {
                if previous.track(role).is_rejected() {
                    self.track_mut(role).reset_rejection();
                }
            }
        }
    }

    fn field_violations(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        if self.status == TaskStatus::Done && self.work_date.is_none() {
            violations.push(Violation::MissingWorkDate);
        }
        if self.status == TaskStatus::Blocked && self.block_reason.is_none() {
            violations.push(Violation::MissingBlockReason);
        }
        violations
    }

    fn stamp_if_settled(&mut self, was_settled: bool, today: NaiveDate, policy: &SettlementPolicy) {
        if !self.is_settled() || (was_settled && self.bonus_approval.is_some()) {
            return;
        }
        let Some(work_date) = self.work_date else {
            return;
        };
        let stamp = stamp_bonus_approval(work_date, today, policy.stamp_cutoff_day);
        let normalized = normalize_work_date(work_date, today);
        debug!(
            task_id = %self.id,
            %stamp,
            %work_date,
            %normalized,
            "stamped bonus approval"
        );
        self.bonus_approval = Some(BonusStamp::Month(stamp));
        self.work_date = Some(normalized);
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
}
