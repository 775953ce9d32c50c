//! In-memory integration tests for task saves and settlement.

use super::helpers::{FixedClock, Services, completed_work, date, late_april};
use eyre::ensure;
use rstest::rstest;
use rust_decimal_macros::dec;
use tasksettle::task::{
    adapters::TaskRecord,
    ports::TaskRepository,
    domain::{
        ApprovalDecision, ApprovalRole, ApprovalState, BonusMonth, BonusStamp, Task, TaskChanges,
        TaskField, TaskStatus,
    },
    services::{SaveTaskRequest, TaskLifecycleError},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn second_approval_settles_and_stamps_the_task(late_april: Services) -> eyre::Result<()> {
    let created = late_april
        .lifecycle
        .create_task(completed_work(date(2024, 3, 10), &["Ivan", "Petro"], "10000", "Київ"))
        .await?;
    ensure!(created.bonus_approval().is_none());

    let after_warehouse = late_april
        .lifecycle
        .decide_approval(
            created.id(),
            ApprovalRole::Warehouse,
            ApprovalDecision::approve(),
            Some("stock"),
        )
        .await?;
    ensure!(!after_warehouse.is_settled());
    ensure!(after_warehouse.bonus_approval().is_none());
    ensure!(after_warehouse.warehouse_approval_date() == Some(date(2024, 4, 20)));

    let settled = late_april
        .lifecycle
        .decide_approval(
            created.id(),
            ApprovalRole::Accountant,
            ApprovalDecision::approve(),
            Some("Olha"),
        )
        .await?;
    ensure!(settled.is_settled());
    ensure!(settled.bonus_approval() == Some(&BonusStamp::Month(BonusMonth::new(2024, 5)?)));
    ensure!(settled.work_date() == Some(date(2024, 3, 20)));
    ensure!(settled.accountant().comment().is_some_and(|note| note.contains("Olha")));

    let stored = late_april
        .lifecycle
        .find_by_id(created.id())
        .await?
        .ok_or_else(|| eyre::eyre!("settled task missing from store"))?;
    ensure!(stored == settled);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_save_leaves_the_stored_task_untouched(late_april: Services) -> eyre::Result<()> {
    let created = late_april
        .lifecycle
        .create_task(SaveTaskRequest::new(
            TaskChanges::new().with_request_number(Some("R-17".to_owned())),
        ))
        .await?;

    let result = late_april
        .lifecycle
        .save_task(
            created.id(),
            SaveTaskRequest::new(
                TaskChanges::new()
                    .with_status(TaskStatus::Done)
                    .with_request_number(Some("R-18".to_owned()))
                    .with_decision(ApprovalRole::Accountant, ApprovalDecision::reject("  ")),
            ),
        )
        .await;

    let Err(TaskLifecycleError::Validation(failure)) = &result else {
        eyre::bail!("expected validation failure, got {result:?}");
    };
    ensure!(failure.fields().contains(&TaskField::WorkDate));
    ensure!(failure.fields().contains(&TaskField::AccountantComment));

    let stored = late_april
        .lifecycle
        .find_by_id(created.id())
        .await?
        .ok_or_else(|| eyre::eyre!("created task missing from store"))?;
    ensure!(stored.request_number() == Some("R-17"));
    ensure!(stored.status() == TaskStatus::Request);
    ensure!(stored.accountant().state() == ApprovalState::Pending);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn warehouse_rejection_sends_work_back_and_rework_reopens_review(
    late_april: Services,
) -> eyre::Result<()> {
    let created = late_april
        .lifecycle
        .create_task(completed_work(date(2024, 4, 2), &["Ivan"], "4000", "Київ"))
        .await?;

    let rejected = late_april
        .lifecycle
        .decide_approval(
            created.id(),
            ApprovalRole::Warehouse,
            ApprovalDecision::reject("filters not returned"),
            Some("stock"),
        )
        .await?;
    ensure!(rejected.status() == TaskStatus::InProgress);
    ensure!(rejected.warehouse().rejected_by() == Some("stock"));

    let reworked = late_april
        .lifecycle
        .save_task(
            created.id(),
            SaveTaskRequest::new(TaskChanges::new().with_status(TaskStatus::Done)),
        )
        .await?;
    ensure!(reworked.status() == TaskStatus::Done);
    ensure!(reworked.warehouse().state() == ApprovalState::Pending);
    ensure!(reworked.warehouse().comment().is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_task_is_reported_as_not_found(late_april: Services) -> eyre::Result<()> {
    let missing = Task::new(&FixedClock::on(2024, 4, 1));

    let result = late_april
        .lifecycle
        .decide_approval(
            missing.id(),
            ApprovalRole::Warehouse,
            ApprovalDecision::approve(),
            None,
        )
        .await;

    ensure!(matches!(result, Err(TaskLifecycleError::NotFound(id)) if id == missing.id()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn settled_task_survives_a_json_document_round_trip(
    late_april: Services,
) -> eyre::Result<()> {
    let created = late_april
        .lifecycle
        .create_task(completed_work(date(2024, 4, 5), &["Ivan", "Petro"], "9000", "Львів"))
        .await?;
    late_april
        .lifecycle
        .decide_approval(
            created.id(),
            ApprovalRole::Warehouse,
            ApprovalDecision::approve(),
            None,
        )
        .await?;
    let settled = late_april
        .lifecycle
        .decide_approval(
            created.id(),
            ApprovalRole::Accountant,
            ApprovalDecision::approve(),
            None,
        )
        .await?;

    let document = TaskRecord::from(&settled).to_json()?;
    let restored = Task::try_from(TaskRecord::from_json(&document)?)?;

    ensure!(restored == settled);
    ensure!(restored.rollup().work_price == dec!(9000));
    ensure!(restored.engineers().credited_count() == 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_returns_tasks_in_creation_order(late_april: Services) -> eyre::Result<()> {
    let first = late_april
        .lifecycle
        .create_task(SaveTaskRequest::new(TaskChanges::new()))
        .await?;
    let second = late_april
        .lifecycle
        .create_task(SaveTaskRequest::new(TaskChanges::new()))
        .await?;

    let ids: Vec<_> = late_april
        .lifecycle
        .list_tasks()
        .await?
        .iter()
        .map(Task::id)
        .collect();
    ensure!(ids == vec![first.id(), second.id()]);
    ensure!(late_april.tasks.list_all().await?.len() == 2);
    Ok(())
}
