//! Budget-vs-actual-cost recomputation across a project's tasks.

use anyhow::Result;
use futures::stream::{self, StreamExt};
use tracing::{error, info, instrument, warn};

use crate::client::AsanaClient;
use crate::models::{ProjectSummary, Task};

/// Custom field holding a task's allocated budget.
pub const BUDGET_FIELD: &str = "Budget";

/// Custom field holding a task's actual cost to date.
pub const ACTUAL_COST_FIELD: &str = "Actual Cost";

/// Name of the task whose notes receive the formatted summary.
pub const STATUS_TASK_NAME: &str = "Project Status";

/// Accumulate budget aggregates over a set of tasks.
///
/// Tasks are visited in iteration order; when several tasks are named
/// "Project Status", the last one wins.
#[must_use]
pub fn summarize(tasks: impl IntoIterator<Item = Task>) -> ProjectSummary {
    let mut summary = ProjectSummary::default();

    for task in tasks {
        let budget = task.number_field(BUDGET_FIELD);
        let actual = task.number_field(ACTUAL_COST_FIELD);

        summary.total_budget += budget;
        summary.total_actual_cost += actual;
        if actual > budget {
            summary.over_budget_tasks += 1;
        }
        if task.name == STATUS_TASK_NAME {
            summary.status_task_gid = Some(task.gid);
        }
    }

    summary
}

/// Recompute the project's budget summary and write it into the status
/// task's notes.
///
/// Task-detail fetches fan out with at most `concurrency` requests in
/// flight, joined before aggregation. A failed fetch logs a warning and
/// contributes zero for both fields; the scan never aborts. The final write
/// is attempted once; on failure it is logged, not retried.
///
/// The caller consumes no return value in the webhook path; the summary is
/// returned so callers and tests can observe what was written.
#[instrument(skip(client), fields(project_gid = %project_gid))]
pub async fn recompute(
    client: &AsanaClient,
    project_gid: &str,
    concurrency: usize,
) -> Result<ProjectSummary> {
    let refs = client.list_project_tasks(project_gid).await?;
    info!(count = refs.len(), "Scanning project tasks");

    // `buffered` (not `buffer_unordered`) keeps listing order, which is what
    // makes the duplicate-status-task tiebreak deterministic.
    let details: Vec<Option<Task>> = stream::iter(refs.into_iter().map(|task_ref| async move {
        match client.get_task(&task_ref.gid).await {
            Ok(task) => Some(task),
            Err(e) => {
                warn!(
                    task_gid = %task_ref.gid,
                    error = %e,
                    "Failed to fetch task; counting budget and actual cost as zero"
                );
                None
            }
        }
    }))
    .buffered(concurrency.max(1))
    .collect()
    .await;

    let summary = summarize(details.into_iter().flatten());

    match &summary.status_task_gid {
        Some(gid) => {
            if let Err(e) = client.update_task_notes(gid, &summary.to_notes()).await {
                error!(task_gid = %gid, error = %e, "Failed to write budget summary");
            } else {
                info!(
                    task_gid = %gid,
                    total_budget = summary.total_budget,
                    total_actual_cost = summary.total_actual_cost,
                    over_budget_tasks = summary.over_budget_tasks,
                    "Budget summary written to status task"
                );
            }
        }
        None => {
            warn!(
                status_task = STATUS_TASK_NAME,
                "No status task found; skipping summary write"
            );
        }
    }

    Ok(summary)
}
