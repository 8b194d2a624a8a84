//! Sub-score functions.
//!
//! Each function maps one task attribute onto `[0, 1]`, where higher means
//! "work on this sooner". Missing inputs map to the neutral value 0.5.

use crate::domain::{MAX_IMPORTANCE, MIN_IMPORTANCE};
use chrono::NaiveDate;

/// Sub-score used when an input is absent
pub const NEUTRAL: f64 = 0.5;

/// Days out at which urgency reaches zero
pub const URGENCY_HORIZON_DAYS: i64 = 30;

/// Tasks at or under this many hours count as quick wins
pub const QUICK_TASK_HOURS: f64 = 2.0;

/// Tasks at or over this many hours count as heavy
pub const HEAVY_TASK_HOURS: f64 = 8.0;

/// Effort sub-score for zero or negative estimates
pub const TRIVIAL_EFFORT: f64 = 0.8;

/// Effort sub-score for heavy tasks
pub const HEAVY_EFFORT: f64 = 0.1;

/// Time pressure from the due date.
///
/// Overdue tasks are maximally urgent. Otherwise urgency falls linearly from
/// 1.0 on the due date to 0.0 at [`URGENCY_HORIZON_DAYS`] out.
#[must_use]
pub fn urgency(due: Option<NaiveDate>, today: NaiveDate) -> f64 {
    let Some(due) = due else {
        return NEUTRAL;
    };

    let days = (due - today).num_days();
    if days < 0 {
        return 1.0;
    }
    if days >= URGENCY_HORIZON_DAYS {
        return 0.0;
    }
    1.0 - days as f64 / URGENCY_HORIZON_DAYS as f64
}

/// Importance clamped to 1-10 and scaled to `[0.1, 1.0]`.
#[must_use]
pub fn importance(raw: Option<i64>) -> f64 {
    match raw {
        Some(value) => value.clamp(MIN_IMPORTANCE, MAX_IMPORTANCE) as f64 / MAX_IMPORTANCE as f64,
        None => NEUTRAL,
    }
}

/// Preference for low-effort work.
///
/// Quick tasks score 1.0, heavy tasks 0.1, with linear interpolation in
/// between. Non-positive estimates are treated as trivial.
#[must_use]
pub fn effort(hours: Option<f64>) -> f64 {
    let Some(hours) = hours else {
        return NEUTRAL;
    };

    if hours.is_nan() {
        NEUTRAL
    } else if hours <= 0.0 {
        TRIVIAL_EFFORT
    } else if hours <= QUICK_TASK_HOURS {
        1.0
    } else if hours >= HEAVY_TASK_HOURS {
        HEAVY_EFFORT
    } else {
        let span = HEAVY_TASK_HOURS - QUICK_TASK_HOURS;
        1.0 - ((hours - QUICK_TASK_HOURS) / span) * (1.0 - HEAVY_EFFORT)
    }
}
