//! # taskrank Core Library
//!
//! Priority scoring and dependency analysis for batches of tasks. Given
//! due dates, effort estimates, importance ratings, and dependency
//! links, the engine normalizes these into four comparable sub-scores,
//! detects dependency cycles, composes a weighted final score under a
//! selectable strategy, and returns a ranked, explained result set.
//!
//! The library is a pure, synchronous computation over an in-memory
//! batch: no I/O, no persisted state, no locking. Transport handling,
//! field validation, and persistence belong to collaborator layers such
//! as the CLI crate.
//!
//! ## Key Components
//!
//! - [`Analyzer`]: the scoring pipeline and ranker
//! - [`DependencyGraph`]: graph construction and cycle detection
//! - [`StrategyWeights`]: named weight presets plus caller overrides
//! - [`ScoredTask`]: the annotated per-task output

pub mod engine;
pub mod error;
pub mod explain;
pub mod graph;
pub mod scoring;
pub mod task;

pub use engine::{Analysis, Analyzer, CycleMode, Suggestion};
pub use error::{CoreError, Result, ValidationError};
pub use graph::DependencyGraph;
pub use scoring::{FactorScores, StrategyWeights, WeightOverrides, CYCLE_BOOST};
pub use task::{ScoredTask, Task, TaskFlags};
