//! Rule-based explanations for task scores.

use crate::domain::SubScores;

const VERY_URGENT: &str = "Very urgent (due soon or overdue).";
const MODERATELY_URGENT: &str = "Moderately urgent.";
const NOT_TIME_SENSITIVE: &str = "Not very time-sensitive.";
const HIGH_IMPACT: &str = "High business impact.";
const LOWER_IMPORTANCE: &str = "Lower importance compared to other tasks.";
const QUICK_WIN: &str = "Quick win with low effort.";
const LARGER_TASK: &str = "Larger task that may require more planning.";
const UNBLOCKS_SEVERAL: &str = "Unblocks several other tasks.";
const UNBLOCKS_ONE: &str = "Unblocks at least one other task.";
const CYCLE_PENALTY: &str =
    "Involved in a circular dependency, penalized in score until graph is fixed.";

/// Used when no rule produces a clause
pub const FALLBACK_EXPLANATION: &str =
    "Balanced across urgency, importance, effort, and dependencies.";

/// Build the explanation for a task's sub-scores.
///
/// Clauses appear in a fixed order (urgency, importance, effort,
/// dependencies, cycle) and are joined by single spaces.
#[must_use]
pub fn explain(factors: &SubScores, in_cycle: bool) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(5);

    parts.push(if factors.urgency >= 0.8 {
        VERY_URGENT
    } else if factors.urgency >= 0.5 {
        MODERATELY_URGENT
    } else {
        NOT_TIME_SENSITIVE
    });

    if factors.importance >= 0.8 {
        parts.push(HIGH_IMPACT);
    } else if factors.importance <= 0.4 {
        parts.push(LOWER_IMPORTANCE);
    }

    if factors.effort >= 0.8 {
        parts.push(QUICK_WIN);
    } else if factors.effort <= 0.3 {
        parts.push(LARGER_TASK);
    }

    if factors.dependency >= 0.6 {
        parts.push(UNBLOCKS_SEVERAL);
    } else if factors.dependency > 0.0 {
        parts.push(UNBLOCKS_ONE);
    }

    if in_cycle {
        parts.push(CYCLE_PENALTY);
    }

    if parts.is_empty() {
        FALLBACK_EXPLANATION.to_string()
    } else {
        parts.join(" ")
    }
}
