//! In-memory integration tests for regional payroll reports.

use super::helpers::{Services, completed_work, date, late_april, staff};
use eyre::ensure;
use rstest::rstest;
use rust_decimal_macros::dec;
use serde_json::json;
use tasksettle::payroll::domain::{PayChange, PayrollPeriod, RegionName, StaffMember};
use tasksettle::task::{
    adapters::TaskRecord,
    domain::{ApprovalDecision, ApprovalRole, Task, TaskId},
    ports::TaskRepository,
    services::SaveTaskRequest,
};

async fn settle(services: &Services, request: SaveTaskRequest) -> eyre::Result<TaskId> {
    let task = services.lifecycle.create_task(request).await?;
    for role in [ApprovalRole::Warehouse, ApprovalRole::Accountant] {
        services
            .lifecycle
            .decide_approval(task.id(), role, ApprovalDecision::approve(), None)
            .await?;
    }
    Ok(task.id())
}

fn roster() -> Vec<StaffMember> {
    vec![
        staff("u1", "Ivan", Some("Київ")),
        staff("u2", "Petro", Some("Київ")),
        staff("u3", "Olena", Some("Львів")),
    ]
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn report_pays_bonuses_from_tasks_settled_this_month(
    late_april: Services,
) -> eyre::Result<()> {
    let late_march = settle(
        &late_april,
        completed_work(date(2024, 3, 10), &["Ivan", "Petro"], "10000", "Київ"),
    )
    .await?;
    let early_april = settle(
        &late_april,
        completed_work(date(2024, 4, 3), &["Ivan "], "4000", "Київ"),
    )
    .await?;
    settle(
        &late_april,
        completed_work(date(2024, 4, 4), &["Olena"], "8000", "Львів"),
    )
    .await?;

    let period = PayrollPeriod::new(2024, 4)?;
    let report = late_april
        .payroll
        .regional_report(&RegionName::new("Київ"), period, &roster())
        .await?;

    ensure!(report.work_days == 22);
    ensure!(report.work_hours == dec!(176));
    let totals: Vec<_> = report
        .rows
        .iter()
        .map(|row| (row.staff.name().to_owned(), row.summary.engineer_bonus, row.summary.total_pay))
        .collect();
    ensure!(
        totals
            == vec![
                ("Ivan".to_owned(), dec!(2250), dec!(27250)),
                ("Petro".to_owned(), dec!(1250), dec!(26250)),
            ],
        "unexpected payroll rows: {totals:?}"
    );
    ensure!(report.total_pay() == dec!(53500));

    let detail_ids: Vec<_> = report.details.rows().iter().map(|row| row.task_id).collect();
    ensure!(detail_ids == vec![late_march, early_april]);
    ensure!(report.details.totals().bonus == dec!(3500));
    ensure!(report.skipped_tasks.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn pay_edits_flow_into_the_next_report(late_april: Services) -> eyre::Result<()> {
    let roster = roster();
    let ivan = roster
        .first()
        .ok_or_else(|| eyre::eyre!("roster is empty"))?;
    let period = PayrollPeriod::new(2024, 4)?;

    late_april
        .payroll
        .record_pay(ivan, period, PayChange {
            salary: Some(dec!(30000)),
            bonus: Some(dec!(500)),
        })
        .await?;
    late_april
        .payroll
        .record_hours(ivan, period, 6, dec!(4))
        .await?;

    let report = late_april
        .payroll
        .regional_report(&RegionName::new("Київ"), period, &roster)
        .await?;
    let row = report
        .rows
        .first()
        .ok_or_else(|| eyre::eyre!("report has no rows"))?;

    ensure!(row.summary.salary == dec!(30000));
    ensure!(row.summary.custom_bonus == dec!(500));
    ensure!(row.summary.weekend_hours == dec!(4));
    ensure!(row.summary.base_pay == dec!(30000));
    ensure!(row.summary.total_pay > dec!(30500));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unreadable_stamp_is_listed_instead_of_paid(late_april: Services) -> eyre::Result<()> {
    let document = json!({
        "id": "6f1c1f55-3f2a-4c4e-9a53-0b8f7f6c2a10",
        "serviceRegion": "Київ",
        "status": "Виконано",
        "date": "2024-04-08",
        "bonusApprovalDate": "квітень",
        "approvedByWarehouse": "Підтверджено",
        "approvedByAccountant": "Підтверджено",
        "engineer1": "Ivan",
        "serviceTotal": 6000,
        "internalWork": true,
        "createdAt": "2024-04-08T09:00:00Z",
        "updatedAt": "2024-04-18T09:00:00Z"
    });
    let legacy = Task::try_from(TaskRecord::from_json(&document.to_string())?)?;
    late_april.tasks.store(&legacy).await?;

    let report = late_april
        .payroll
        .regional_report(&RegionName::new("Київ"), PayrollPeriod::new(2024, 4)?, &roster())
        .await?;

    ensure!(report.skipped_tasks.len() == 1);
    ensure!(
        report
            .skipped_tasks
            .first()
            .is_some_and(|skipped| skipped.task_id == legacy.id() && skipped.stamp == "квітень")
    );
    ensure!(report.rows.iter().all(|row| row.summary.engineer_bonus == dec!(0)));
    Ok(())
}
