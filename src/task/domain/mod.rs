//! Domain model for service tasks.
//!
//! The task domain owns the money rollup, the two approval tracks and their
//! reset rules, and the bonus dating rules, while keeping storage concerns
//! outside the domain boundary.

mod approval;
mod bonus;
mod engineers;
mod error;
mod ids;
mod money;
mod status;
mod task;

pub use approval::{
    ApprovalDecision, ApprovalRole, ApprovalState, ApprovalTrack, DecisionContext,
    PersistedApprovalTrack,
};
pub use bonus::{BonusMonth, BonusStamp, bonus_month, normalize_work_date, stamp_bonus_approval};
pub use engineers::{EngineerSlots, MAX_ENGINEER_SLOTS};
pub use error::{
    ParseApprovalStateError, ParseTaskStatusError, TaskDomainError, TaskField, ValidationFailure,
    Violation,
};
pub use ids::TaskId;
pub use money::{MaterialCategory, MaterialLine, MoneyInputs, MoneyRollup, parse_amount};
pub use status::TaskStatus;
pub use task::{PersistedTaskData, Task, TaskChanges};
