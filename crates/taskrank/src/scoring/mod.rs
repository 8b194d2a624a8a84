//! Scoring engine.
//!
//! Turns a batch of tasks into a ranked list. For each task four sub-scores
//! are computed (see [`factors`]), combined with the strategy's weights,
//! penalized when the task sits on a dependency cycle, and scaled to 0-100.
//!
//! ```
//! use chrono::NaiveDate;
//! use taskrank::domain::{Strategy, Task};
//! use taskrank::scoring::score_tasks;
//!
//! let today = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
//! let tasks = vec![
//!     Task::new("Minor cleanup").with_id("1").with_due_date(today).with_estimated_hours(2.0).with_importance(2),
//!     Task::new("Customer fix").with_id("2").with_due_date(today).with_estimated_hours(2.0).with_importance(9),
//! ];
//!
//! let report = score_tasks(&tasks, Strategy::HighImpact, today);
//! assert_eq!(report.tasks[0].task.title, "Customer fix");
//! ```
//!
//! Every call builds its own graph and results; nothing is shared between
//! calls, so the engine can be used from many threads at once.

pub mod explain;
pub mod factors;

use crate::domain::{DueDate, PriorityLabel, ScoredTask, Strategy, SubScores, Task};
use crate::graph::{DependencyGraph, GraphAnalysis};
use crate::warning::Warning;
use chrono::NaiveDate;
use serde::Serialize;

/// Absolute penalty (on the 0-1 scale) for tasks flagged in a cycle
pub const CYCLE_PENALTY: f64 = 0.2;

/// Ranked tasks together with the warnings raised while scoring them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReport {
    /// Strategy the tasks were scored with
    pub strategy: Strategy,

    /// Non-fatal problems found in the batch, in discovery order
    pub warnings: Vec<Warning>,

    /// Tasks sorted by descending score
    pub tasks: Vec<ScoredTask>,
}

impl ScoreReport {
    /// Warning messages as plain strings
    #[must_use]
    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }

    /// Keep only the `limit` highest-ranked tasks
    #[must_use]
    pub fn top(mut self, limit: usize) -> Self {
        self.tasks.truncate(limit);
        self
    }
}

/// Combine sub-scores into the 0-100 final score, rounded to two decimals.
#[must_use]
pub fn combine(factors: &SubScores, strategy: Strategy, in_cycle: bool) -> f64 {
    let w = strategy.weights();
    let base = factors.urgency * w.urgency
        + factors.importance * w.importance
        + factors.effort * w.effort
        + factors.dependency * w.dependency;

    let penalty = if in_cycle { CYCLE_PENALTY } else { 0.0 };
    round2((base - penalty).max(0.0) * 100.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Score a single task against precomputed graph analysis.
///
/// Soft data-quality problems are appended to `warnings`.
fn score_one(
    task: &Task,
    strategy: Strategy,
    today: NaiveDate,
    analysis: &GraphAnalysis,
    warnings: &mut Vec<Warning>,
) -> ScoredTask {
    let id = task.graph_id();
    let title = task.display_title();

    let due = match &task.due_date {
        Some(DueDate::Date(date)) => Some(*date),
        Some(DueDate::Invalid(raw)) => {
            warnings.push(Warning::InvalidDueDate {
                title: title.to_string(),
                value: raw.clone(),
            });
            None
        }
        None => None,
    };

    if task.estimated_hours.is_none() {
        warnings.push(Warning::MissingEstimate {
            title: title.to_string(),
        });
    }

    let factors = SubScores {
        urgency: factors::urgency(due, today),
        importance: factors::importance(task.importance),
        effort: factors::effort(task.estimated_hours),
        dependency: analysis.influence_of(id),
    };
    let in_cycle = analysis.is_in_cycle(id);

    let score = combine(&factors, strategy, in_cycle);

    tracing::debug!(
        task = %title,
        urgency = factors.urgency,
        importance = factors.importance,
        effort = factors.effort,
        dependency = factors.dependency,
        in_cycle,
        score,
        "Scored task"
    );

    ScoredTask {
        task: task.clone(),
        score,
        priority_label: PriorityLabel::from_score(score),
        explanation: explain::explain(&factors, in_cycle),
        factors,
        in_cycle,
    }
}

/// Score and rank a batch of tasks.
///
/// Runs dependency analysis over the batch, scores every task relative to
/// `today`, and returns them sorted by descending score. The sort is stable:
/// tasks with equal scores keep their input order.
///
/// Warnings are ordered with the (single) cycle warning first, followed by
/// per-task warnings in input order.
pub fn score_tasks(tasks: &[Task], strategy: Strategy, today: NaiveDate) -> ScoreReport {
    let analysis = DependencyGraph::build(tasks).analyze();

    let mut warnings = Vec::new();
    if !analysis.in_cycle.is_empty() {
        warnings.push(Warning::CircularDependencies {
            ids: analysis.in_cycle.clone(),
        });
    }

    let mut scored: Vec<ScoredTask> = tasks
        .iter()
        .map(|task| score_one(task, strategy, today, &analysis, &mut warnings))
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));

    tracing::debug!(
        strategy = %strategy,
        tasks = scored.len(),
        warnings = warnings.len(),
        "Scored batch"
    );

    ScoreReport {
        strategy,
        warnings,
        tasks: scored,
    }
}

/// Score a batch and keep the `limit` highest-ranked tasks.
///
/// Warnings still cover the whole batch.
pub fn suggest_tasks(
    tasks: &[Task],
    strategy: Strategy,
    today: NaiveDate,
    limit: usize,
) -> ScoreReport {
    score_tasks(tasks, strategy, today).top(limit)
}
