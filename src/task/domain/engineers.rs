//! Engineers credited on a task.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};

/// Number of named engineer slots on a task.
pub const MAX_ENGINEER_SLOTS: usize = 6;

/// Up to six engineer name slots; order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EngineerSlots(Vec<String>);

impl EngineerSlots {
    /// Creates slots from raw names, blank entries included.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TooManyEngineers`] when more than
    /// [`MAX_ENGINEER_SLOTS`] names are supplied.
    pub fn new<I, S>(names: I) -> Result<Self, TaskDomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let slots: Vec<String> = names.into_iter().map(Into::into).collect();
        if slots.len() > MAX_ENGINEER_SLOTS {
            return Err(TaskDomainError::TooManyEngineers(slots.len()));
        }
        Ok(Self(slots))
    }

    /// Returns the raw slot values.
    #[must_use]
    pub fn slots(&self) -> &[String] {
        &self.0
    }

    /// Returns the trimmed, non-empty engineer names.
    pub fn credited(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|name| name.trim()).filter(|name| !name.is_empty())
    }

    /// Returns how many slots hold a name.
    #[must_use]
    pub fn credited_count(&self) -> usize {
        self.credited().count()
    }
}
