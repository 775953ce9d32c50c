//! JSON record exchanged with the task-editing surface.
//!
//! [`TaskRecord`] is the only place the legacy literal values appear:
//! Ukrainian status and approval labels, boolean approvals, numeric fields
//! that arrive as either numbers or text, and the duplicated accountant
//! comment field. Everything past this boundary uses the closed domain
//! enums.

use crate::task::domain::{
    ApprovalState, ApprovalTrack, BonusStamp, EngineerSlots, MAX_ENGINEER_SLOTS, MaterialLine,
    MoneyInputs, ParseApprovalStateError, ParseTaskStatusError, PersistedApprovalTrack,
    PersistedTaskData, Task, TaskDomainError, TaskId, TaskStatus,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

/// Errors raised while converting a [`TaskRecord`] into a [`Task`].
#[derive(Debug, Error)]
pub enum TaskRecordError {
    /// The record is not valid JSON for the task shape.
    #[error("invalid task record JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The status literal is unknown.
    #[error(transparent)]
    Status(#[from] ParseTaskStatusError),

    /// An approval literal is unknown.
    #[error("invalid value for {field}: {source}")]
    Approval {
        /// Record field holding the literal.
        field: &'static str,
        /// Parse failure.
        source: ParseApprovalStateError,
    },

    /// A date field is not `YYYY-MM-DD`.
    #[error("invalid date in {field}: '{value}'")]
    InvalidDate {
        /// Record field holding the date.
        field: &'static str,
        /// Offending text.
        value: String,
    },

    /// Engineer slots could not be built.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
}

/// Camel-case task record with legacy literal values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    /// Task identifier.
    pub id: Uuid,
    /// Operator-facing request number.
    #[serde(default, deserialize_with = "lenient_text")]
    pub request_number: String,
    /// Region that serviced the task.
    #[serde(default, deserialize_with = "lenient_text")]
    pub service_region: String,
    /// Status label.
    #[serde(default, deserialize_with = "lenient_text")]
    pub status: String,
    /// Block reason.
    #[serde(default, deserialize_with = "lenient_text")]
    pub block_reason: String,
    /// Request date, `YYYY-MM-DD`.
    #[serde(default, deserialize_with = "lenient_text")]
    pub request_date: String,
    /// Work date, `YYYY-MM-DD`.
    #[serde(default, alias = "date", deserialize_with = "lenient_text")]
    pub work_date: String,
    /// Bonus approval stamp, `MM-YYYY`.
    #[serde(default, deserialize_with = "lenient_text")]
    pub bonus_approval_date: String,

    /// Warehouse approval label.
    #[serde(default, deserialize_with = "lenient_text")]
    pub approved_by_warehouse: String,
    /// Warehouse comment.
    #[serde(default, deserialize_with = "lenient_text")]
    pub warehouse_comment: String,
    /// Date the warehouse approved.
    #[serde(default)]
    pub warehouse_approval_date: Option<NaiveDate>,
    /// When the warehouse last rejected.
    #[serde(default)]
    pub warehouse_rejected_at: Option<DateTime<Utc>>,
    /// Who last rejected for the warehouse.
    #[serde(default)]
    pub warehouse_rejected_by: Option<String>,

    /// Accountant approval label.
    #[serde(default, deserialize_with = "lenient_text")]
    pub approved_by_accountant: String,
    /// Accountant comment, canonical field.
    #[serde(default, deserialize_with = "lenient_text")]
    pub accountant_comment: String,
    /// Accountant comment, legacy duplicate emitted identically.
    #[serde(default, deserialize_with = "lenient_text")]
    pub accountant_comments: String,
    /// Date the accountant approved.
    #[serde(default)]
    pub accountant_approval_date: Option<NaiveDate>,
    /// When the accountant last rejected.
    #[serde(default)]
    pub accountant_rejected_at: Option<DateTime<Utc>>,
    /// Who last rejected for the accountant.
    #[serde(default)]
    pub accountant_rejected_by: Option<String>,

    /// First engineer slot.
    #[serde(default, deserialize_with = "lenient_text")]
    pub engineer1: String,
    /// Second engineer slot.
    #[serde(default, deserialize_with = "lenient_text")]
    pub engineer2: String,
    /// Third engineer slot.
    #[serde(default, deserialize_with = "lenient_text")]
    pub engineer3: String,
    /// Fourth engineer slot.
    #[serde(default, deserialize_with = "lenient_text")]
    pub engineer4: String,
    /// Fifth engineer slot.
    #[serde(default, deserialize_with = "lenient_text")]
    pub engineer5: String,
    /// Sixth engineer slot.
    #[serde(default, deserialize_with = "lenient_text")]
    pub engineer6: String,

    /// Oil litres used.
    #[serde(default, deserialize_with = "lenient_text")]
    pub oil_used: String,
    /// Oil price per litre.
    #[serde(default, deserialize_with = "lenient_text")]
    pub oil_price: String,
    /// Oil filter count.
    #[serde(default, deserialize_with = "lenient_text")]
    pub filter_count: String,
    /// Oil filter price.
    #[serde(default, deserialize_with = "lenient_text")]
    pub filter_price: String,
    /// Fuel filter count.
    #[serde(default, deserialize_with = "lenient_text")]
    pub fuel_filter_count: String,
    /// Fuel filter price.
    #[serde(default, deserialize_with = "lenient_text")]
    pub fuel_filter_price: String,
    /// Air filter count.
    #[serde(default, deserialize_with = "lenient_text")]
    pub air_filter_count: String,
    /// Air filter price.
    #[serde(default, deserialize_with = "lenient_text")]
    pub air_filter_price: String,
    /// Antifreeze litres.
    #[serde(default, rename = "antifreezeL", deserialize_with = "lenient_text")]
    pub antifreeze_litres: String,
    /// Antifreeze price per litre.
    #[serde(default, deserialize_with = "lenient_text")]
    pub antifreeze_price: String,
    /// Other materials amount.
    #[serde(default, deserialize_with = "lenient_text")]
    pub other_sum: String,
    /// Transport expenses.
    #[serde(default, deserialize_with = "lenient_text")]
    pub transport_sum: String,
    /// Per-diem expenses.
    #[serde(default, deserialize_with = "lenient_text")]
    pub per_diem: String,
    /// Lodging expenses.
    #[serde(default, deserialize_with = "lenient_text")]
    pub living: String,
    /// Other expenses.
    #[serde(default, deserialize_with = "lenient_text")]
    pub other_exp: String,
    /// Gross service total.
    #[serde(default, deserialize_with = "lenient_text")]
    pub service_total: String,
    /// Internal, non-billable job.
    #[serde(default)]
    pub internal_work: bool,

    /// Derived oil total; ignored on input.
    #[serde(default, skip_deserializing)]
    pub oil_total: Decimal,
    /// Derived oil filter sum; ignored on input.
    #[serde(default, skip_deserializing)]
    pub filter_sum: Decimal,
    /// Derived fuel filter sum; ignored on input.
    #[serde(default, skip_deserializing)]
    pub fuel_filter_sum: Decimal,
    /// Derived air filter sum; ignored on input.
    #[serde(default, skip_deserializing)]
    pub air_filter_sum: Decimal,
    /// Derived antifreeze sum; ignored on input.
    #[serde(default, skip_deserializing)]
    pub antifreeze_sum: Decimal,
    /// Derived work price; ignored on input.
    #[serde(default, skip_deserializing)]
    pub work_price: Decimal,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest save timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TaskRecord {
    /// Parses a record from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRecordError::Json`] when the text is not a task record.
    pub fn from_json(text: &str) -> Result<Self, TaskRecordError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Renders the record as JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRecordError::Json`] when serialization fails.
    pub fn to_json(&self) -> Result<String, TaskRecordError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Returns the accountant comment, preferring the canonical field.
    #[must_use]
    pub fn accountant_comment_text(&self) -> &str {
        if self.accountant_comment.trim().is_empty() {
            &self.accountant_comments
        } else {
            &self.accountant_comment
        }
    }

    fn engineer_slots(&self) -> [&str; MAX_ENGINEER_SLOTS] {
        [
            self.engineer1.as_str(),
            self.engineer2.as_str(),
            self.engineer3.as_str(),
            self.engineer4.as_str(),
            self.engineer5.as_str(),
            self.engineer6.as_str(),
        ]
    }
}

impl From<&Task> for TaskRecord {
    fn from(task: &Task) -> Self {
        let slots = task.engineers().slots();
        let slot = |position: usize| slots.get(position).cloned().unwrap_or_default();
        let money = task.money();
        let rollup = task.rollup();
        let accountant_comment = task.accountant().comment().unwrap_or_default().to_owned();

        Self {
            id: task.id().into_inner(),
            request_number: task.request_number().unwrap_or_default().to_owned(),
            service_region: task.service_region().unwrap_or_default().to_owned(),
            status: task.status().legacy_label().to_owned(),
            block_reason: task.block_reason().unwrap_or_default().to_owned(),
            request_date: format_date(task.request_date()),
            work_date: format_date(task.work_date()),
            bonus_approval_date: task
                .bonus_approval()
                .map(ToString::to_string)
                .unwrap_or_default(),
            approved_by_warehouse: task.warehouse().state().legacy_label().to_owned(),
            warehouse_comment: task.warehouse().comment().unwrap_or_default().to_owned(),
            warehouse_approval_date: task.warehouse().approved_on(),
            warehouse_rejected_at: task.warehouse().rejected_at(),
            warehouse_rejected_by: task.warehouse().rejected_by().map(str::to_owned),
            approved_by_accountant: task.accountant().state().legacy_label().to_owned(),
            accountant_comments: accountant_comment.clone(),
            accountant_comment,
            accountant_approval_date: task.accountant().approved_on(),
            accountant_rejected_at: task.accountant().rejected_at(),
            accountant_rejected_by: task.accountant().rejected_by().map(str::to_owned),
            engineer1: slot(0),
            engineer2: slot(1),
            engineer3: slot(2),
            engineer4: slot(3),
            engineer5: slot(4),
            engineer6: slot(5),
            oil_used: money.oil.quantity.clone(),
            oil_price: money.oil.unit_price.clone(),
            filter_count: money.oil_filter.quantity.clone(),
            filter_price: money.oil_filter.unit_price.clone(),
            fuel_filter_count: money.fuel_filter.quantity.clone(),
            fuel_filter_price: money.fuel_filter.unit_price.clone(),
            air_filter_count: money.air_filter.quantity.clone(),
            air_filter_price: money.air_filter.unit_price.clone(),
            antifreeze_litres: money.antifreeze.quantity.clone(),
            antifreeze_price: money.antifreeze.unit_price.clone(),
            other_sum: money.other_materials.clone(),
            transport_sum: money.transport.clone(),
            per_diem: money.per_diem.clone(),
            living: money.living.clone(),
            other_exp: money.other_expenses.clone(),
            service_total: money.service_total.clone(),
            internal_work: money.internal_work,
            oil_total: rollup.oil_total,
            filter_sum: rollup.filter_sum,
            fuel_filter_sum: rollup.fuel_filter_sum,
            air_filter_sum: rollup.air_filter_sum,
            antifreeze_sum: rollup.antifreeze_sum,
            work_price: rollup.work_price,
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}

impl TryFrom<TaskRecord> for Task {
    type Error = TaskRecordError;

    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        let warehouse_state = parse_approval("approvedByWarehouse", &record.approved_by_warehouse)?;
        // An approved warehouse track carries no leftover rejection note.
        let warehouse = ApprovalTrack::from_persisted(PersistedApprovalTrack {
            state: warehouse_state,
            comment: (warehouse_state != ApprovalState::Approved)
                .then(|| record.warehouse_comment.clone()),
            approved_on: record.warehouse_approval_date,
            rejected_at: record.warehouse_rejected_at,
            rejected_by: record.warehouse_rejected_by.clone(),
        });
        let accountant = ApprovalTrack::from_persisted(PersistedApprovalTrack {
            state: parse_approval("approvedByAccountant", &record.approved_by_accountant)?,
            comment: Some(record.accountant_comment_text().to_owned()),
            approved_on: record.accountant_approval_date,
            rejected_at: record.accountant_rejected_at,
            rejected_by: record.accountant_rejected_by.clone(),
        });
        let engineers = EngineerSlots::new(
            record
                .engineer_slots()
                .into_iter()
                .filter(|name| !name.trim().is_empty()),
        )?;
        let status = if record.status.trim().is_empty() {
            TaskStatus::default()
        } else {
            TaskStatus::try_from(record.status.as_str())?
        };
        let bonus_approval = non_blank(&record.bonus_approval_date).map(BonusStamp::parse);

        Ok(Self::from_persisted(PersistedTaskData {
            id: TaskId::from_uuid(record.id),
            request_number: non_blank(&record.request_number).map(str::to_owned),
            service_region: non_blank(&record.service_region).map(str::to_owned),
            status,
            block_reason: non_blank(&record.block_reason).map(str::to_owned),
            warehouse,
            accountant,
            request_date: parse_date("requestDate", &record.request_date)?,
            work_date: parse_date("workDate", &record.work_date)?,
            bonus_approval,
            engineers,
            money: MoneyInputs {
                oil: MaterialLine::new(record.oil_used, record.oil_price),
                oil_filter: MaterialLine::new(record.filter_count, record.filter_price),
                fuel_filter: MaterialLine::new(record.fuel_filter_count, record.fuel_filter_price),
                air_filter: MaterialLine::new(record.air_filter_count, record.air_filter_price),
                antifreeze: MaterialLine::new(record.antifreeze_litres, record.antifreeze_price),
                other_materials: record.other_sum,
                transport: record.transport_sum,
                per_diem: record.per_diem,
                living: record.living,
                other_expenses: record.other_exp,
                service_total: record.service_total,
                internal_work: record.internal_work,
            },
            created_at: record.created_at,
            updated_at: record.updated_at,
        }))
    }
}

fn non_blank(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|value| value.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn parse_date(field: &'static str, text: &str) -> Result<Option<NaiveDate>, TaskRecordError> {
    let Some(trimmed) = non_blank(text) else {
        return Ok(None);
    };
    let date_part = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| TaskRecordError::InvalidDate {
            field,
            value: text.to_owned(),
        })
}

fn parse_approval(field: &'static str, text: &str) -> Result<ApprovalState, TaskRecordError> {
    ApprovalState::try_from(text).map_err(|source| TaskRecordError::Approval { field, source })
}

/// Accepts text, numbers, booleans or null, yielding the text form.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    })
}
