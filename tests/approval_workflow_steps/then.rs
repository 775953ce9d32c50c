//! Then steps for approval workflow BDD scenarios.

use super::world::{ApprovalWorld, parse_date, parse_role};
use eyre::{ensure, eyre};
use rstest_bdd_macros::then;
use tasksettle::task::{domain::BonusStamp, services::TaskLifecycleError};

#[then("the task is settled")]
fn task_is_settled(world: &ApprovalWorld) -> Result<(), eyre::Report> {
    let task = world.stored_task()?;
    ensure!(task.is_settled(), "expected a settled task, found {task:?}");
    Ok(())
}

#[then("the task is not settled")]
fn task_is_not_settled(world: &ApprovalWorld) -> Result<(), eyre::Report> {
    let task = world.stored_task()?;
    ensure!(!task.is_settled(), "expected an unsettled task");
    ensure!(task.bonus_approval().is_none(), "unsettled task carries a stamp");
    Ok(())
}

#[then(r#"the bonus stamp is "{stamp}""#)]
fn bonus_stamp_is(world: &ApprovalWorld, stamp: String) -> Result<(), eyre::Report> {
    let task = world.stored_task()?;
    let Some(BonusStamp::Month(month)) = task.bonus_approval() else {
        return Err(eyre!("expected a month stamp, found {:?}", task.bonus_approval()));
    };
    ensure!(month.to_string() == stamp, "expected stamp {stamp}, found {month}");
    Ok(())
}

#[then(r#"the work date is "{work_date}""#)]
fn work_date_is(world: &ApprovalWorld, work_date: String) -> Result<(), eyre::Report> {
    let expected = parse_date(&work_date)?;
    let task = world.stored_task()?;
    ensure!(
        task.work_date() == Some(expected),
        "expected work date {expected}, found {:?}",
        task.work_date()
    );
    Ok(())
}

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &ApprovalWorld, status: String) -> Result<(), eyre::Report> {
    let task = world.stored_task()?;
    ensure!(
        task.status().as_str() == status,
        "expected status {status}, found {}",
        task.status()
    );
    Ok(())
}

#[then(r#"the "{role}" track is "{state}""#)]
fn track_is(world: &ApprovalWorld, role: String, state: String) -> Result<(), eyre::Report> {
    let task = world.stored_task()?;
    let track = task.track(parse_role(&role)?);
    ensure!(
        track.state().as_str() == state,
        "expected {role} track {state}, found {}",
        track.state()
    );
    Ok(())
}

#[then(r#"the save is refused for field "{field}""#)]
fn save_refused_for(world: &ApprovalWorld, field: String) -> Result<(), eyre::Report> {
    let result = world
        .last_save_result
        .as_ref()
        .ok_or_else(|| eyre!("missing save result in scenario world"))?;
    let Err(TaskLifecycleError::Validation(failure)) = result else {
        return Err(eyre!("expected a validation failure, found {result:?}"));
    };
    ensure!(
        failure.fields().iter().any(|invalid| invalid.as_str() == field),
        "expected {field} among {:?}",
        failure.fields()
    );
    Ok(())
}
