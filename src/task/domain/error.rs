//! Error types for task domain validation and parsing.

use super::{ApprovalRole, ApprovalState};
use thiserror::Error;

/// Errors returned while constructing or interpreting domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// A bonus approval stamp matches neither `MM-YYYY` nor `YYYY-MM-DD`.
    #[error("malformed bonus approval stamp '{0}', expected MM-YYYY or YYYY-MM-DD")]
    MalformedBonusStamp(String),

    /// A month number outside `1..=12` was supplied.
    #[error("invalid bonus month {month} of year {year}")]
    InvalidBonusMonth {
        /// Calendar year.
        year: i32,
        /// Month number as supplied.
        month: u32,
    },

    /// More engineer names were supplied than there are slots.
    #[error("{0} engineers supplied, a task has at most 6 engineer slots")]
    TooManyEngineers(usize),
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing approval states from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown approval state: {0}")]
pub struct ParseApprovalStateError(pub String);

/// Field of a task named by a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskField {
    /// Date the work was performed.
    WorkDate,
    /// Warehouse rejection comment.
    WarehouseComment,
    /// Accountant rejection comment.
    AccountantComment,
    /// Reason recorded when a task is blocked.
    BlockReason,
    /// Warehouse approval state.
    ApprovedByWarehouse,
    /// Accountant approval state.
    ApprovedByAccountant,
}

impl TaskField {
    /// Returns the field name used at the serialization boundary.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WorkDate => "workDate",
            Self::WarehouseComment => "warehouseComment",
            Self::AccountantComment => "accountantComment",
            Self::BlockReason => "blockReason",
            Self::ApprovedByWarehouse => "approvedByWarehouse",
            Self::ApprovedByAccountant => "approvedByAccountant",
        }
    }
}

/// A single reason a task save was refused.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Violation {
    /// The task was marked done without a work date.
    #[error("work date is required when the task is done")]
    MissingWorkDate,

    /// An approval track was rejected without a comment.
    #[error("a comment is required to reject the {0} approval")]
    MissingRejectionComment(ApprovalRole),

    /// The task was blocked without a reason.
    #[error("a block reason is required when the task is blocked")]
    MissingBlockReason,

    /// The approval track does not permit the requested move.
    #[error("{role} approval cannot move from {from} to {to}")]
    InvalidApprovalTransition {
        /// Track being changed.
        role: ApprovalRole,
        /// Current state.
        from: ApprovalState,
        /// Requested state.
        to: ApprovalState,
    },
}

impl Violation {
    /// Returns the task field this violation refers to.
    #[must_use]
    pub const fn field(&self) -> TaskField {
        match self {
            Self::MissingWorkDate => TaskField::WorkDate,
            Self::MissingRejectionComment(ApprovalRole::Warehouse) => TaskField::WarehouseComment,
            Self::MissingRejectionComment(ApprovalRole::Accountant) => {
                TaskField::AccountantComment
            }
            Self::MissingBlockReason => TaskField::BlockReason,
            Self::InvalidApprovalTransition {
                role: ApprovalRole::Warehouse,
                ..
            } => TaskField::ApprovedByWarehouse,
            Self::InvalidApprovalTransition {
                role: ApprovalRole::Accountant,
                ..
            } => TaskField::ApprovedByAccountant,
        }
    }
}

/// Every reason a task save was refused, collected rather than fail-fast.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("task validation failed: {}", format_violations(.0))]
pub struct ValidationFailure(Vec<Violation>);

fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|violation| format!("{}: {violation}", violation.field().as_str()))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationFailure {
    /// Wraps collected violations.
    #[must_use]
    pub const fn new(violations: Vec<Violation>) -> Self {
        Self(violations)
    }

    /// Returns the collected violations.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.0
    }

    /// Returns the names of the invalid fields, in detection order.
    #[must_use]
    pub fn fields(&self) -> Vec<TaskField> {
        self.0.iter().map(Violation::field).collect()
    }
}
