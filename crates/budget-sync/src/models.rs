//! Asana entity type definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Compact task reference returned by the project task listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskCompact {
    /// Task GID (global ID)
    pub gid: String,
    /// Task name
    pub name: String,
}

/// Full task representation returned by the task detail fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Task GID (global ID)
    pub gid: String,
    /// Task name
    pub name: String,
    /// Task notes/description
    #[serde(default)]
    pub notes: Option<String>,
    /// Custom fields attached to the task
    #[serde(default)]
    pub custom_fields: Vec<CustomField>,
    /// Created timestamp
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A named, typed attribute attached to a task by the Asana schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomField {
    /// Field name (e.g., "Budget")
    pub name: String,
    /// Numeric value, when the field is a number field and has a value
    #[serde(default)]
    pub number_value: Option<f64>,
}

impl Task {
    /// Numeric value of the custom field with the given name.
    ///
    /// Name matching is exact (case-sensitive). An absent field or a field
    /// without a value contributes `0`.
    #[must_use]
    pub fn number_field(&self, field_name: &str) -> f64 {
        self.custom_fields
            .iter()
            .find(|f| f.name == field_name)
            .and_then(|f| f.number_value)
            .unwrap_or(0.0)
    }
}

/// Derived budget aggregates for one project.
///
/// Recomputed from scratch on every triggering event; never persisted except
/// as the formatted text written into the status task's notes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectSummary {
    /// Sum of the "Budget" field over all tasks
    pub total_budget: f64,
    /// Sum of the "Actual Cost" field over all tasks
    pub total_actual_cost: f64,
    /// Number of tasks whose actual cost strictly exceeds their budget
    pub over_budget_tasks: usize,
    /// GID of the status task, when one was found during the scan
    pub status_task_gid: Option<String>,
}

impl ProjectSummary {
    /// Format the summary as the status task's notes text.
    ///
    /// The text is a pure function of the aggregates (no timestamp), so
    /// recomputing with unchanged task data produces identical notes.
    #[must_use]
    pub fn to_notes(&self) -> String {
        format!(
            "Project Budget Summary\n\n\
             Total Budget: ${:.2}\n\
             Total Actual Cost: ${:.2}\n\
             Tasks Over Budget: {}\n",
            self.total_budget, self.total_actual_cost, self.over_budget_tasks
        )
    }
}
