//! Input validation for task records.
//!
//! The scoring engine tolerates missing optional fields, but records that
//! break the input contract (no title, importance out of range, negative
//! effort) are rejected here, before they reach it. Every problem in a
//! batch is collected so callers can fix them in one pass.

use crate::domain::{MAX_IMPORTANCE, MIN_IMPORTANCE, Task};
use crate::error::{Error, Result};
use std::fmt;

/// Maximum title length in characters
pub const MAX_TITLE_LENGTH: usize = 255;

/// A single rejected field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Position of the record in the batch
    pub index: usize,
    /// Name of the offending field
    pub field: &'static str,
    /// What is wrong with it
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tasks[{}].{}: {}", self.index, self.field, self.message)
    }
}

/// Validate one task record, appending any problems to `errors`.
fn check_task(index: usize, task: &Task, errors: &mut Vec<FieldError>) {
    let mut reject = |field: &'static str, message: String| {
        errors.push(FieldError {
            index,
            field,
            message,
        });
    };

    if task.title.trim().is_empty() {
        reject("title", "This field may not be blank.".to_string());
    } else if task.title.chars().count() > MAX_TITLE_LENGTH {
        reject(
            "title",
            format!("Ensure this field has no more than {MAX_TITLE_LENGTH} characters."),
        );
    }

    match task.importance {
        None => reject("importance", "This field is required.".to_string()),
        Some(value) if !(MIN_IMPORTANCE..=MAX_IMPORTANCE).contains(&value) => reject(
            "importance",
            format!("Must be between {MIN_IMPORTANCE} and {MAX_IMPORTANCE}, got {value}."),
        ),
        Some(_) => {}
    }

    if let Some(hours) = task.estimated_hours {
        if !hours.is_finite() {
            reject("estimated_hours", "A valid number is required.".to_string());
        } else if hours < 0.0 {
            reject("estimated_hours", format!("Must not be negative, got {hours}."));
        }
    }
}

/// Validate a batch of task records.
///
/// Malformed due dates are deliberately not rejected: the scoring engine
/// reports them as warnings and scores the task with neutral urgency.
///
/// # Errors
///
/// Returns [`Error::Validation`] listing every rejected field.
pub fn validate_tasks(tasks: &[Task]) -> Result<()> {
    let mut errors = Vec::new();
    for (index, task) in tasks.iter().enumerate() {
        check_task(index, task, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        tracing::debug!(count = errors.len(), "Rejected task input");
        Err(Error::Validation(errors))
    }
}
