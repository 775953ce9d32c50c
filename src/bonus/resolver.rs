//! Matching engineer names on tasks to roster display names.

use crate::task::domain::Task;

/// Returns whether a task slot value names the given engineer.
///
/// Names match exactly after trimming; blank names never match.
#[must_use]
pub fn same_engineer(slot: &str, name: &str) -> bool {
    let wanted = name.trim();
    !wanted.is_empty() && slot.trim() == wanted
}

/// Returns whether `task` credits the engineer called `name`.
#[must_use]
pub fn credits_engineer(task: &Task, name: &str) -> bool {
    task.engineers()
        .credited()
        .any(|slot| same_engineer(slot, name))
}
