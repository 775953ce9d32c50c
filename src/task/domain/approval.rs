//! Approval tracks and their state machine.
//!
//! A task carries two independent approval tracks, one for the warehouse and
//! one for the accountant. Each track moves between pending, approved and
//! rejected states; rejection always carries a comment, and leaving the
//! rejected state clears it.

use super::{ParseApprovalStateError, Violation};
use crate::config::SettlementPolicy;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// State of a single approval track.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalState {
    /// Awaiting a decision.
    #[default]
    Pending,
    /// Approved by the responsible role.
    Approved,
    /// Rejected with a comment.
    Rejected,
}

impl ApprovalState {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Returns the literal stored by the task-editing surface.
    #[must_use]
    pub const fn legacy_label(self) -> &'static str {
        match self {
            Self::Pending => "На розгляді",
            Self::Approved => "Підтверджено",
            Self::Rejected => "Відмова",
        }
    }

    /// Returns whether the track may move from this state to `target`.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Approved | Self::Rejected)
                | (Self::Approved, Self::Rejected)
                | (Self::Rejected, Self::Pending | Self::Approved)
        )
    }
}

impl fmt::Display for ApprovalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ApprovalState {
    type Error = ParseApprovalStateError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" | "На розгляді" | "" => Ok(Self::Pending),
            "approved" | "Підтверджено" | "true" => Ok(Self::Approved),
            "rejected" | "Відмова" | "false" => Ok(Self::Rejected),
            _ => Err(ParseApprovalStateError(value.to_owned())),
        }
    }
}

/// Role owning an approval track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalRole {
    /// Warehouse manager, confirms materials.
    Warehouse,
    /// Accountant, confirms billing.
    Accountant,
}

impl ApprovalRole {
    /// Both roles, in the order their tracks are evaluated.
    pub const ALL: [Self; 2] = [Self::Warehouse, Self::Accountant];

    /// Returns the canonical role name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Warehouse => "warehouse",
            Self::Accountant => "accountant",
        }
    }
}

impl fmt::Display for ApprovalRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requested change to one approval track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalDecision {
    state: ApprovalState,
    comment: Option<String>,
}

impl ApprovalDecision {
    /// Requests approval of the track.
    #[must_use]
    pub const fn approve() -> Self {
        Self {
            state: ApprovalState::Approved,
            comment: None,
        }
    }

    /// Requests rejection of the track with the given comment.
    #[must_use]
    pub fn reject(comment: impl Into<String>) -> Self {
        Self {
            state: ApprovalState::Rejected,
            comment: Some(comment.into()),
        }
    }

    /// Requests that the track return to pending review.
    #[must_use]
    pub const fn reopen() -> Self {
        Self {
            state: ApprovalState::Pending,
            comment: None,
        }
    }

    /// Requests the given state without a comment.
    #[must_use]
    pub const fn new(state: ApprovalState) -> Self {
        Self {
            state,
            comment: None,
        }
    }

    /// Attaches a comment to the decision.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Returns the requested state.
    #[must_use]
    pub const fn state(&self) -> ApprovalState {
        self.state
    }

    /// Returns the supplied comment, if any.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    fn trimmed_comment(&self) -> Option<String> {
        self.comment
            .as_deref()
            .map(str::trim)
            .filter(|comment| !comment.is_empty())
            .map(str::to_owned)
    }
}

/// Clock-derived context of a single approval change.
#[derive(Debug, Clone, Copy)]
pub struct DecisionContext<'a> {
    /// Calendar date used for approval stamps.
    pub today: NaiveDate,
    /// Instant used for rejection audit.
    pub now: DateTime<Utc>,
    /// Display name of the person making the change.
    pub actor: Option<&'a str>,
    /// Policy supplying the canned accountant comment.
    pub policy: &'a SettlementPolicy,
}

/// One approval track of a task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalTrack {
    state: ApprovalState,
    comment: Option<String>,
    approved_on: Option<NaiveDate>,
    rejected_at: Option<DateTime<Utc>>,
    rejected_by: Option<String>,
}

/// Parameter object for reconstructing a persisted approval track.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedApprovalTrack {
    /// Persisted state.
    pub state: ApprovalState,
    /// Persisted comment.
    pub comment: Option<String>,
    /// Persisted approval date.
    pub approved_on: Option<NaiveDate>,
    /// Persisted rejection instant.
    pub rejected_at: Option<DateTime<Utc>>,
    /// Persisted rejecting actor.
    pub rejected_by: Option<String>,
}

impl ApprovalTrack {
    /// Reconstructs a track from persisted storage.
    ///
    /// Blank stored comments are dropped.
    #[must_use]
    pub fn from_persisted(data: PersistedApprovalTrack) -> Self {
        let comment = data.comment.filter(|comment| !comment.trim().is_empty());
        Self {
            state: data.state,
            comment,
            approved_on: data.approved_on,
            rejected_at: data.rejected_at,
            rejected_by: data.rejected_by,
        }
    }

    /// Returns the track state.
    #[must_use]
    pub const fn state(&self) -> ApprovalState {
        self.state
    }

    /// Returns the track comment: the rejection reason while rejected, an
    /// approval note otherwise.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Returns the date the track was last approved.
    #[must_use]
    pub const fn approved_on(&self) -> Option<NaiveDate> {
        self.approved_on
    }

    /// Returns when the track was last rejected.
    #[must_use]
    pub const fn rejected_at(&self) -> Option<DateTime<Utc>> {
        self.rejected_at
    }

    /// Returns who last rejected the track.
    #[must_use]
    pub fn rejected_by(&self) -> Option<&str> {
        self.rejected_by.as_deref()
    }

    /// Returns whether the track is approved.
    #[must_use]
    pub const fn is_approved(&self) -> bool {
        matches!(self.state, ApprovalState::Approved)
    }

    /// Returns whether the track is rejected.
    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        matches!(self.state, ApprovalState::Rejected)
    }

    /// Applies a decision to the track.
    ///
    /// Requesting the current state only updates the comment of a rejected
    /// track when a new one is supplied.
    ///
    /// # Errors
    ///
    /// Returns [`Violation::MissingRejectionComment`] when a rejection has no
    /// comment and [`Violation::InvalidApprovalTransition`] when the state
    /// machine forbids the move. The track is left unchanged in both cases.
    pub fn apply(
        &mut self,
        role: ApprovalRole,
        decision: &ApprovalDecision,
        context: &DecisionContext<'_>,
    ) -> Result<(), Violation> {
        let target = decision.state();
        if target == self.state {
            if let (ApprovalState::Rejected, Some(comment)) = (target, decision.trimmed_comment()) {
                self.comment = Some(comment);
            }
            return Ok(());
        }
        if !self.state.can_transition_to(target) {
            return Err(Violation::InvalidApprovalTransition {
                role,
                from: self.state,
                to: target,
            });
        }

        match target {
            ApprovalState::Rejected => {
                let comment = decision
                    .trimmed_comment()
                    .ok_or(Violation::MissingRejectionComment(role))?;
                self.state = ApprovalState::Rejected;
                self.comment = Some(comment);
                self.approved_on = None;
                self.rejected_at = Some(context.now);
                self.rejected_by = context.actor.map(str::to_owned);
            }
            ApprovalState::Approved => {
                self.leave_rejected();
                if let Some(comment) = decision.trimmed_comment() {
                    self.comment = Some(comment);
                }
                if role == ApprovalRole::Accountant && self.comment.is_none() {
                    self.comment = Some(approval_note(context));
                }
                self.state = ApprovalState::Approved;
                self.approved_on = Some(context.today);
                self.rejected_at = None;
                self.rejected_by = None;
            }
            ApprovalState::Pending => {
                self.leave_rejected();
                self.state = ApprovalState::Pending;
            }
        }
        Ok(())
    }

    /// Returns a rejected track to pending review, clearing its comment.
    ///
    /// Tracks in any other state are left untouched.
    pub fn reset_rejection(&mut self) {
        if self.is_rejected() {
            self.leave_rejected();
            self.state = ApprovalState::Pending;
        }
    }

    fn leave_rejected(&mut self) {
        if self.is_rejected() {
            self.comment = None;
        }
    }
}

fn approval_note(context: &DecisionContext<'_>) -> String {
    let note = context.policy.accountant_approval_note.as_str();
    context
        .actor
        .map(str::trim)
        .filter(|actor| !actor.is_empty())
        .map_or_else(|| note.to_owned(), |actor| format!("{note} {actor}"))
}
