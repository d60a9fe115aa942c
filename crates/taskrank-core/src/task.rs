//! Task data model.
//!
//! [`Task`] is the immutable input record the engine scores. Optional
//! fields carry serde defaults so absent values degrade to documented
//! baselines (1.0 hours, importance 5) instead of erroring.
//!
//! [`ScoredTask`] is the per-task output: the input fields echoed back,
//! the four factor sub-scores, the composed final score, structural
//! flags, and a human-readable explanation. Entities live for a single
//! scoring invocation; nothing is shared across calls.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::scoring::FactorScores;

/// A single unit of work to be prioritized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier within the batch (caller-supplied; the
    /// collaborator layer falls back to the title when absent)
    pub id: String,
    /// Display title
    pub title: String,
    /// Optional due date; tasks without one are treated as low urgency
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Effort estimate in hours (non-negative)
    #[serde(default = "default_estimated_hours")]
    pub estimated_hours: f64,
    /// Importance rating, 1 (trivial) to 10 (critical)
    #[serde(default = "default_importance")]
    pub importance: i64,
    /// Identifiers of tasks this task depends on
    #[serde(default)]
    pub dependencies: Vec<String>,
}

fn default_estimated_hours() -> f64 {
    1.0
}

fn default_importance() -> i64 {
    5
}

impl Task {
    /// Create a task with default effort, importance, and no due date.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            due_date: None,
            estimated_hours: default_estimated_hours(),
            importance: default_importance(),
            dependencies: Vec::new(),
        }
    }

    /// Set the due date.
    pub fn with_due_date(mut self, due: NaiveDate) -> Self {
        self.due_date = Some(due);
        self
    }

    /// Set the effort estimate in hours.
    pub fn with_estimated_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = hours;
        self
    }

    /// Set the importance rating (1-10).
    pub fn with_importance(mut self, importance: i64) -> Self {
        self.importance = importance;
        self
    }

    /// Set the dependency list.
    pub fn with_dependencies<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = deps.into_iter().map(Into::into).collect();
        self
    }
}

/// Structural conditions attached to a scored task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskFlags {
    /// Task participates in at least one dependency cycle
    pub circular_dependency: bool,
    /// Due date lies before the evaluation date
    pub past_due: bool,
    /// No due date was supplied
    pub no_due_date: bool,
    /// Effort estimate at or below the quick-win threshold (1.0h)
    pub quick_win: bool,
    /// Importance rating at or above the high-importance threshold (8)
    pub high_importance: bool,
    /// Number of other tasks in the batch that depend on this one
    pub blocks: usize,
}

/// A task annotated with its computed priority.
///
/// Exactly one `ScoredTask` is produced per input [`Task`]; cycle members
/// and undated tasks are never dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTask {
    /// Identifier from the input task
    pub id: String,
    /// Title from the input task
    pub title: String,
    /// Due date from the input task
    pub due_date: Option<NaiveDate>,
    /// Effort estimate from the input task
    pub estimated_hours: f64,
    /// Importance rating from the input task
    pub importance: i64,
    /// Dependency list with duplicates collapsed
    pub dependencies: Vec<String>,
    /// Signed days between evaluation date and due date (negative when
    /// past due); `None` without a due date
    pub days_until_due: Option<i64>,
    /// The four normalized factor sub-scores, each in [0, 1]
    pub scores: FactorScores,
    /// Composed weighted score, rounded for display stability. May
    /// exceed 1.0 when a cycle boost was applied.
    pub score: f64,
    /// Structural flags
    pub flags: TaskFlags,
    /// Human-readable rationale, rendered from the structured values
    pub explanation: String,
}
