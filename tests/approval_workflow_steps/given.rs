//! Given steps for approval workflow BDD scenarios.

use super::world::{ApprovalWorld, parse_date, parse_role, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use tasksettle::task::{
    domain::{ApprovalDecision, EngineerSlots, MoneyInputs, TaskChanges, TaskStatus},
    services::SaveTaskRequest,
};

#[given(r#"today is "{today}""#)]
fn today_is(world: &mut ApprovalWorld, today: String) -> Result<(), eyre::Report> {
    world.start_on(parse_date(&today)?)
}

#[given(r#"a completed task worked on "{work_date}" by "{engineer}" for "{service_total}""#)]
fn completed_task(
    world: &mut ApprovalWorld,
    work_date: String,
    engineer: String,
    service_total: String,
) -> Result<(), eyre::Report> {
    let changes = TaskChanges::new()
        .with_status(TaskStatus::Done)
        .with_work_date(Some(parse_date(&work_date)?))
        .with_service_region(Some("Київ".to_owned()))
        .with_engineers(EngineerSlots::new([engineer])?)
        .with_money(MoneyInputs {
            service_total,
            internal_work: true,
            ..MoneyInputs::default()
        });
    let task = run_async(world.service()?.create_task(SaveTaskRequest::new(changes)))
        .wrap_err("create completed task")?;
    world.task_id = Some(task.id());
    Ok(())
}

#[given(r#"the "{role}" has approved the task"#)]
fn role_has_approved(world: &mut ApprovalWorld, role: String) -> Result<(), eyre::Report> {
    world.decide_ok(parse_role(&role)?, ApprovalDecision::approve())
}

#[given(r#"the "{role}" has rejected the task with comment "{comment}""#)]
fn role_has_rejected(
    world: &mut ApprovalWorld,
    role: String,
    comment: String,
) -> Result<(), eyre::Report> {
    world.decide_ok(parse_role(&role)?, ApprovalDecision::reject(comment))
}
