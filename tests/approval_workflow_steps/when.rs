//! When steps for approval workflow BDD scenarios.

use super::world::{ApprovalWorld, parse_role};
use eyre::eyre;
use rstest_bdd_macros::when;
use tasksettle::task::{
    domain::{ApprovalDecision, ApprovalState, TaskChanges, TaskStatus},
    services::SaveTaskRequest,
};

#[when(r#"the "{role}" approves the task"#)]
fn role_approves(world: &mut ApprovalWorld, role: String) -> Result<(), eyre::Report> {
    world.decide(parse_role(&role)?, ApprovalDecision::approve())
}

#[when(r#"the "{role}" rejects the task with comment "{comment}""#)]
fn role_rejects(
    world: &mut ApprovalWorld,
    role: String,
    comment: String,
) -> Result<(), eyre::Report> {
    world.decide(parse_role(&role)?, ApprovalDecision::reject(comment))
}

#[when(r#"the "{role}" rejects the task without a comment"#)]
fn role_rejects_silently(world: &mut ApprovalWorld, role: String) -> Result<(), eyre::Report> {
    world.decide(
        parse_role(&role)?,
        ApprovalDecision::new(ApprovalState::Rejected),
    )
}

#[when(r#"the "{role}" reopens the task"#)]
fn role_reopens(world: &mut ApprovalWorld, role: String) -> Result<(), eyre::Report> {
    world.decide(parse_role(&role)?, ApprovalDecision::reopen())
}

#[when(r#"the task is marked "{status}""#)]
fn task_marked(world: &mut ApprovalWorld, status: String) -> Result<(), eyre::Report> {
    let target = TaskStatus::try_from(status.as_str()).map_err(|err| eyre!("{err}"))?;
    world.save(SaveTaskRequest::new(TaskChanges::new().with_status(target)))
}
