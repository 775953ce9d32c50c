//! Task lifecycle status.

use super::ParseTaskStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a service task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task registered by an operator, work not started.
    #[default]
    Request,
    /// Service staff are working on the task.
    InProgress,
    /// Work has been performed.
    Done,
    /// Task is blocked; a block reason accompanies this status.
    Blocked,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Request => "request",
            Self::InProgress => "in_progress",
            Self::Done => "done",
            Self::Blocked => "blocked",
        }
    }

    /// Returns the literal stored by the task-editing surface.
    #[must_use]
    pub const fn legacy_label(self) -> &'static str {
        match self {
            Self::Request => "Заявка",
            Self::InProgress => "В роботі",
            Self::Done => "Виконано",
            Self::Blocked => "Заблоковано",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "request" | "Заявка" => Ok(Self::Request),
            "in_progress" | "В роботі" => Ok(Self::InProgress),
            "done" | "Виконано" => Ok(Self::Done),
            "blocked" | "Заблоковано" => Ok(Self::Blocked),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}
