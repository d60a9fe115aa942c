//! Multi-factor task scoring.
//!
//! Each task in a batch receives four sub-scores, every one normalized
//! to [0, 1] across the batch with the same min-max primitive:
//!
//! - **urgency**: proximity to (or lapse past) the due date
//! - **importance**: linear rescale of the 1-10 rating
//! - **effort**: inverse of the hour estimate (quick wins score high)
//! - **dependency**: how many other tasks this one blocks
//!
//! A strategy name resolves to a fixed weight vector over the four
//! factors; the composed score is the weighted sum, with a constant
//! boost for cycle members so unresolved circular dependencies surface
//! at the top of the ranking. Weights are a read-only lookup -- resolved
//! once per call and never mutated.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::graph::DependencyGraph;
use crate::task::Task;

/// Constant added to the composed score of every cycle member. The
/// result is intentionally not clamped back into [0, 1]: a score above
/// 1.0 signals exceptional priority.
pub const CYCLE_BOOST: f64 = 0.25;

/// Days beyond which due dates collapse toward minimum urgency.
const URGENCY_HORIZON_DAYS: i64 = 365;

/// Additive offset placing every past-due task strictly above every
/// non-past-due task in raw urgency, scaled by how overdue it is.
const PAST_DUE_OFFSET: f64 = 1000.0;

/// Effort at or below this many hours counts as a quick win.
pub const QUICK_WIN_HOURS: f64 = 1.0;

/// Importance at or above this rating counts as high importance.
pub const HIGH_IMPORTANCE: i64 = 8;

/// Min-max normalization shared by all four factors.
///
/// Returns `(value - min) / (max - min)`, or 0.0 when `min == max`:
/// a flat batch carries no discriminating signal.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if max == min {
        0.0
    } else {
        (value - min) / (max - min)
    }
}

/// Round a composed score to six decimals for display stability.
pub(crate) fn round_score(score: f64) -> f64 {
    (score * 1_000_000.0).round() / 1_000_000.0
}

/// The four normalized sub-scores of a task, each in [0, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FactorScores {
    /// Due-date proximity score
    pub urgency: f64,
    /// Rescaled importance rating
    pub importance: f64,
    /// Inverse effort score
    pub effort: f64,
    /// Blocking-weight score
    pub dependency: f64,
}

impl FactorScores {
    /// Weighted sum of the four factors. The weight vector is used as
    /// given; it is not assumed to sum to 1.
    pub fn weighted_total(&self, weights: &StrategyWeights) -> f64 {
        weights.urgency * self.urgency
            + weights.importance * self.importance
            + weights.effort * self.effort
            + weights.dependency * self.dependency
    }
}

/// Weight vector over the four scoring factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategyWeights {
    /// Weight for due-date urgency
    pub urgency: f64,
    /// Weight for the importance rating
    pub importance: f64,
    /// Weight for inverse effort
    pub effort: f64,
    /// Weight for blocking other tasks
    pub dependency: f64,
}

impl StrategyWeights {
    /// Balanced default weights.
    pub fn smart_balance() -> Self {
        Self {
            urgency: 0.4,
            importance: 0.3,
            effort: 0.15,
            dependency: 0.15,
        }
    }

    /// Favor tasks that can be finished quickly.
    pub fn fastest_wins() -> Self {
        Self {
            urgency: 0.2,
            importance: 0.2,
            effort: 0.5,
            dependency: 0.1,
        }
    }

    /// Favor the highest-rated tasks.
    pub fn high_impact() -> Self {
        Self {
            urgency: 0.2,
            importance: 0.6,
            effort: 0.1,
            dependency: 0.1,
        }
    }

    /// Favor approaching and lapsed deadlines.
    pub fn deadline_driven() -> Self {
        Self {
            urgency: 0.6,
            importance: 0.2,
            effort: 0.1,
            dependency: 0.1,
        }
    }

    /// Resolve a strategy name. Unknown names fall back to the balanced
    /// default rather than failing.
    pub fn from_name(name: &str) -> Self {
        match name {
            "fastest_wins" => Self::fastest_wins(),
            "high_impact" => Self::high_impact(),
            "deadline_driven" => Self::deadline_driven(),
            _ => Self::smart_balance(),
        }
    }

    /// The built-in strategy names, balanced default first.
    pub fn names() -> [&'static str; 4] {
        ["smart_balance", "fastest_wins", "high_impact", "deadline_driven"]
    }

    /// Apply a partial override: factors present in the override win,
    /// the rest keep their current value.
    pub fn merged(self, overrides: &WeightOverrides) -> Self {
        Self {
            urgency: overrides.urgency.unwrap_or(self.urgency),
            importance: overrides.importance.unwrap_or(self.importance),
            effort: overrides.effort.unwrap_or(self.effort),
            dependency: overrides.dependency.unwrap_or(self.dependency),
        }
    }
}

impl Default for StrategyWeights {
    fn default() -> Self {
        Self::smart_balance()
    }
}

/// Caller-supplied partial weight vector, merged over a strategy preset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightOverrides {
    /// Override for the urgency weight
    #[serde(default)]
    pub urgency: Option<f64>,
    /// Override for the importance weight
    #[serde(default)]
    pub importance: Option<f64>,
    /// Override for the effort weight
    #[serde(default)]
    pub effort: Option<f64>,
    /// Override for the dependency weight
    #[serde(default)]
    pub dependency: Option<f64>,
}

/// Per-task values derived before composition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaskFeatures {
    /// Signed days until the due date; negative when past due
    pub days_until_due: Option<i64>,
    /// Number of tasks in the batch blocked by this one
    pub blocking: usize,
    /// The four normalized sub-scores
    pub scores: FactorScores,
}

/// Computes the four sub-scores for a whole batch at once.
///
/// Normalization is cross-batch, so scoring is inherently a batch
/// operation: a task's sub-scores only mean something relative to its
/// siblings.
pub struct FeatureScorer {
    today: NaiveDate,
}

impl FeatureScorer {
    /// Create a scorer evaluating due dates against the given date.
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Compute features for every task, in input order.
    pub fn score_batch(&self, tasks: &[Task], graph: &DependencyGraph) -> Vec<TaskFeatures> {
        let days: Vec<Option<i64>> = tasks
            .iter()
            .map(|t| t.due_date.map(|due| (due - self.today).num_days()))
            .collect();

        let urgency_raw: Vec<f64> = days.iter().map(|d| Self::urgency_raw(*d)).collect();
        let effort_raw: Vec<f64> = tasks
            .iter()
            .map(|t| Self::effort_raw(t.estimated_hours))
            .collect();
        let blocking: Vec<usize> = tasks
            .iter()
            .map(|t| graph.blocking_count(&t.id))
            .collect();
        let blocking_raw: Vec<f64> = blocking.iter().map(|b| *b as f64).collect();

        let (min_u, max_u) = bounds(&urgency_raw);
        let (min_e, max_e) = bounds(&effort_raw);
        let (min_b, max_b) = bounds(&blocking_raw);

        tasks
            .iter()
            .enumerate()
            .map(|(i, task)| {
                let scores = FactorScores {
                    urgency: normalize(urgency_raw[i], min_u, max_u),
                    importance: (task.importance - 1) as f64 / 9.0,
                    effort: normalize(effort_raw[i], min_e, max_e),
                    dependency: normalize(blocking_raw[i], min_b, max_b),
                };
                TaskFeatures {
                    days_until_due: days[i],
                    blocking: blocking[i],
                    scores,
                }
            })
            .collect()
    }

    /// Raw urgency, before batch normalization. Larger means more
    /// urgent. No due date maps to 0.0 and participates in the min-max
    /// as the worst-case baseline; past-due tasks get a large additive
    /// offset so they strictly outrank every upcoming deadline; upcoming
    /// deadlines count down from the horizon.
    fn urgency_raw(days_until_due: Option<i64>) -> f64 {
        match days_until_due {
            None => 0.0,
            Some(d) if d < 0 => PAST_DUE_OFFSET + d.unsigned_abs() as f64,
            Some(d) => (URGENCY_HORIZON_DAYS - d.min(URGENCY_HORIZON_DAYS)) as f64,
        }
    }

    /// Raw effort, before batch normalization: `1 / (1 + hours)`, so
    /// zero-hour tasks hit 1.0 and the value decays toward 0.
    fn effort_raw(estimated_hours: f64) -> f64 {
        1.0 / (1.0 + estimated_hours.max(0.0))
    }
}

/// Compose the final score: weighted sum, cycle boost, display rounding.
pub fn compose(scores: &FactorScores, weights: &StrategyWeights, in_cycle: bool) -> f64 {
    let mut score = scores.weighted_total(weights);
    if in_cycle {
        score += CYCLE_BOOST;
    }
    round_score(score)
}

fn bounds(values: &[f64]) -> (f64, f64) {
    values.iter().fold((f64::MAX, f64::MIN), |(min, max), v| {
        (min.min(*v), max.max(*v))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn graph_of(tasks: &[Task]) -> DependencyGraph {
        DependencyGraph::build(tasks)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_normalize_basic() {
        assert_eq!(normalize(5.0, 0.0, 10.0), 0.5);
        assert_eq!(normalize(0.0, 0.0, 10.0), 0.0);
        assert_eq!(normalize(10.0, 0.0, 10.0), 1.0);
    }

    #[test]
    fn test_normalize_flat_batch() {
        assert_eq!(normalize(3.0, 3.0, 3.0), 0.0);
    }

    #[test]
    fn test_past_due_outranks_upcoming() {
        let today = date(2026, 8, 30);
        let tasks = vec![
            Task::new("past", "Overdue").with_due_date(date(2026, 8, 25)),
            Task::new("soon", "Due tomorrow").with_due_date(date(2026, 8, 31)),
            Task::new("future", "Due next year").with_due_date(date(2027, 8, 30)),
        ];
        let features = FeatureScorer::new(today).score_batch(&tasks, &graph_of(&tasks));

        assert!(features[0].scores.urgency > features[1].scores.urgency);
        assert!(features[1].scores.urgency > features[2].scores.urgency);
        assert_eq!(features[0].scores.urgency, 1.0);
        assert_eq!(features[0].days_until_due, Some(-5));
    }

    #[test]
    fn test_no_due_date_is_lowest_urgency() {
        let today = date(2026, 8, 30);
        let tasks = vec![
            Task::new("dated", "Dated").with_due_date(date(2027, 12, 31)),
            Task::new("undated", "Undated"),
        ];
        let features = FeatureScorer::new(today).score_batch(&tasks, &graph_of(&tasks));

        assert_eq!(features[1].scores.urgency, 0.0);
        assert!(features[0].scores.urgency >= features[1].scores.urgency);
        assert_eq!(features[1].days_until_due, None);
    }

    #[test]
    fn test_urgency_horizon_collapses_far_dates() {
        // Both beyond the horizon: identical raw urgency.
        assert_eq!(
            FeatureScorer::urgency_raw(Some(400)),
            FeatureScorer::urgency_raw(Some(4000))
        );
    }

    #[test]
    fn test_effort_inverse_relationship() {
        let today = date(2026, 8, 30);
        let tasks = vec![
            Task::new("quick", "Quick").with_estimated_hours(0.5),
            Task::new("slow", "Slow").with_estimated_hours(8.0),
        ];
        let features = FeatureScorer::new(today).score_batch(&tasks, &graph_of(&tasks));

        assert_eq!(features[0].scores.effort, 1.0);
        assert_eq!(features[1].scores.effort, 0.0);
    }

    #[test]
    fn test_importance_linear_rescale() {
        let today = date(2026, 8, 30);
        let tasks = vec![
            Task::new("low", "Low").with_importance(1),
            Task::new("mid", "Mid").with_importance(5),
            Task::new("high", "High").with_importance(10),
        ];
        let features = FeatureScorer::new(today).score_batch(&tasks, &graph_of(&tasks));

        assert_eq!(features[0].scores.importance, 0.0);
        assert!((features[1].scores.importance - 4.0 / 9.0).abs() < 1e-12);
        assert_eq!(features[2].scores.importance, 1.0);
    }

    #[test]
    fn test_blocking_weight() {
        let today = date(2026, 8, 30);
        let tasks = vec![
            Task::new("hub", "Everything needs this"),
            Task::new("a", "A").with_dependencies(["hub"]),
            Task::new("b", "B").with_dependencies(["hub"]),
            Task::new("c", "C").with_dependencies(["hub"]),
            Task::new("leaf", "Nobody needs this"),
        ];
        let features = FeatureScorer::new(today).score_batch(&tasks, &graph_of(&tasks));

        assert!(features[0].scores.dependency > features[4].scores.dependency);
        assert_eq!(features[0].scores.dependency, 1.0);
        assert_eq!(features[0].blocking, 3);
    }

    #[test]
    fn test_strategy_resolution() {
        assert_eq!(
            StrategyWeights::from_name("deadline_driven"),
            StrategyWeights::deadline_driven()
        );
        // Unknown names fall back to the balanced default.
        assert_eq!(
            StrategyWeights::from_name("does_not_exist"),
            StrategyWeights::smart_balance()
        );
    }

    #[test]
    fn test_override_merge_is_partial() {
        let merged = StrategyWeights::smart_balance().merged(&WeightOverrides {
            urgency: Some(0.9),
            ..Default::default()
        });

        assert_eq!(merged.urgency, 0.9);
        assert_eq!(merged.importance, 0.3);
        assert_eq!(merged.effort, 0.15);
        assert_eq!(merged.dependency, 0.15);
    }

    #[test]
    fn test_compose_applies_cycle_boost() {
        let scores = FactorScores {
            urgency: 1.0,
            importance: 1.0,
            effort: 1.0,
            dependency: 1.0,
        };
        let weights = StrategyWeights::smart_balance();

        let plain = compose(&scores, &weights, false);
        let boosted = compose(&scores, &weights, true);

        assert_eq!(plain, 1.0);
        assert_eq!(boosted, 1.25); // deliberately unclamped
    }

    #[test]
    fn test_compose_rounding() {
        let scores = FactorScores {
            urgency: 1.0 / 3.0,
            ..Default::default()
        };
        let weights = StrategyWeights {
            urgency: 1.0,
            importance: 0.0,
            effort: 0.0,
            dependency: 0.0,
        };

        assert_eq!(compose(&scores, &weights, false), 0.333333);
    }

    proptest! {
        #[test]
        fn subscores_always_in_bounds(
            hours in proptest::collection::vec(0.0..500.0f64, 1..20),
            importance in proptest::collection::vec(1..=10i64, 1..20),
            day_offsets in proptest::collection::vec(proptest::option::of(-400..400i64), 1..20),
        ) {
            let today = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
            let n = hours.len().min(importance.len()).min(day_offsets.len());
            let tasks: Vec<Task> = (0..n)
                .map(|i| {
                    let mut t = Task::new(format!("t{i}"), format!("Task {i}"))
                        .with_estimated_hours(hours[i])
                        .with_importance(importance[i]);
                    if let Some(offset) = day_offsets[i] {
                        t = t.with_due_date(today + chrono::Duration::days(offset));
                    }
                    t
                })
                .collect();

            let features = FeatureScorer::new(today).score_batch(&tasks, &DependencyGraph::build(&tasks));
            for f in &features {
                prop_assert!((0.0..=1.0).contains(&f.scores.urgency));
                prop_assert!((0.0..=1.0).contains(&f.scores.importance));
                prop_assert!((0.0..=1.0).contains(&f.scores.effort));
                prop_assert!((0.0..=1.0).contains(&f.scores.dependency));
            }
        }
    }
}
