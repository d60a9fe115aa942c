//! Scoring pipeline and ranking.
//!
//! [`Analyzer`] wires the stages together: build the dependency graph,
//! detect cycles, compute the four sub-scores, compose the weighted
//! final score, attach explanations, and rank. Each invocation owns its
//! graph, sub-score tables, and output exclusively; nothing is shared or
//! persisted across calls, so concurrent invocations need no
//! coordination.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::explain;
use crate::graph::DependencyGraph;
use crate::scoring::{compose, FeatureScorer, StrategyWeights, WeightOverrides};
use crate::task::{ScoredTask, Task};

/// How a detected dependency cycle is handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CycleMode {
    /// Any cycle aborts scoring for the whole batch with
    /// [`CoreError::CircularDependency`]; no partial result.
    Strict,
    /// Cycle members are flagged, boosted, and scored through along with
    /// everything else. The default.
    #[default]
    Permissive,
}

/// Result of scoring a batch: every input task, ranked, plus the sorted
/// set of cycle members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// Scored tasks ordered by final score descending, ties broken by
    /// ascending identifier
    pub tasks: Vec<ScoredTask>,
    /// Identifiers participating in at least one cycle, sorted
    pub cycles: Vec<String>,
}

impl Analysis {
    /// Top-N suggestion view: a pure slice of the ranked sequence.
    /// Scores are never re-derived or re-weighted here.
    pub fn suggest(&self, count: usize) -> Vec<Suggestion> {
        self.tasks
            .iter()
            .take(count)
            .map(|task| Suggestion {
                id: task.id.clone(),
                title: task.title.clone(),
                score: task.score,
                explanation: task.explanation.clone(),
                why: explain::why(&task.flags, task.days_until_due),
            })
            .collect()
    }
}

/// One entry of the top-N suggestion view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Task identifier
    pub id: String,
    /// Task title
    pub title: String,
    /// Composed final score
    pub score: f64,
    /// The task's note list
    pub explanation: String,
    /// Friendlier sentence for display
    pub why: String,
}

/// Batch scoring engine.
///
/// Builder-style configuration; `analyze` is a pure function of the
/// configured weights, mode, evaluation date, and the batch.
#[derive(Debug, Clone)]
pub struct Analyzer {
    weights: StrategyWeights,
    mode: CycleMode,
    today: NaiveDate,
}

impl Analyzer {
    /// Balanced weights, permissive mode, today's date.
    pub fn new() -> Self {
        Self {
            weights: StrategyWeights::default(),
            mode: CycleMode::default(),
            today: Utc::now().date_naive(),
        }
    }

    /// Resolve weights from a strategy name. Unknown names fall back to
    /// the balanced default.
    pub fn with_strategy(mut self, name: &str) -> Self {
        self.weights = StrategyWeights::from_name(name);
        self
    }

    /// Use an explicit weight vector.
    pub fn with_weights(mut self, weights: StrategyWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Merge a partial override over the current weights.
    pub fn with_overrides(mut self, overrides: &WeightOverrides) -> Self {
        self.weights = self.weights.merged(overrides);
        self
    }

    /// Set the cycle handling mode.
    pub fn with_mode(mut self, mode: CycleMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the evaluation date used for due-date arithmetic. Fixing the
    /// date makes scoring fully deterministic.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Current weight vector.
    pub fn weights(&self) -> &StrategyWeights {
        &self.weights
    }

    /// Score and rank a batch.
    ///
    /// Every input task yields exactly one output entry; cycle members
    /// and undated tasks are never dropped. An empty batch produces an
    /// empty analysis.
    pub fn analyze(&self, tasks: &[Task]) -> Result<Analysis> {
        let graph = DependencyGraph::build(tasks);

        if self.mode == CycleMode::Strict && graph.has_cycle() {
            return Err(CoreError::CircularDependency {
                members: graph.cycle_members().into_iter().collect(),
            });
        }

        let cycle_members = graph.cycle_members();
        let features = FeatureScorer::new(self.today).score_batch(tasks, &graph);

        let mut scored: Vec<ScoredTask> = tasks
            .iter()
            .zip(features.iter())
            .map(|(task, feat)| {
                let in_cycle = cycle_members.contains(&task.id);
                let flags =
                    explain::flags_for(task, feat.days_until_due, feat.blocking, in_cycle);
                ScoredTask {
                    id: task.id.clone(),
                    title: task.title.clone(),
                    due_date: task.due_date,
                    estimated_hours: task.estimated_hours,
                    importance: task.importance,
                    dependencies: graph.dependencies(&task.id).to_vec(),
                    days_until_due: feat.days_until_due,
                    scores: feat.scores,
                    score: compose(&feat.scores, &self.weights, in_cycle),
                    flags,
                    explanation: explain::explanation(&flags, feat.days_until_due),
                }
            })
            .collect();

        // Deterministic total order: score descending, then id ascending.
        scored.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.id.cmp(&b.id)));

        Ok(Analysis {
            tasks: scored,
            cycles: cycle_members.into_iter().collect(),
        })
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}
