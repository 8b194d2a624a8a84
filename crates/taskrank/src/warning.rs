//! Warning types for non-fatal problems found while scoring.
//!
//! Scoring never fails on messy data. Instead, data-quality and structural
//! problems are reported as [`Warning`]s alongside the ranked tasks, and the
//! affected tasks are scored with neutral substitutes or a penalty.

use crate::domain::TaskId;
use serde::{Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

/// A non-fatal problem found in a batch of tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// One or more tasks take part in a dependency cycle.
    ///
    /// Reported once per batch, listing every flagged ID.
    CircularDependencies {
        /// Flagged task IDs, sorted
        ids: BTreeSet<TaskId>,
    },

    /// A due date could not be parsed and was treated as absent.
    InvalidDueDate {
        /// Display title of the task
        title: String,
        /// The value as supplied
        value: String,
    },

    /// A task has no effort estimate and was scored with neutral effort.
    MissingEstimate {
        /// Display title of the task
        title: String,
    },
}

impl Warning {
    /// Returns a human-readable description of the warning.
    #[must_use]
    pub fn description(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CircularDependencies { ids } => {
                let joined = ids
                    .iter()
                    .map(TaskId::as_str)
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(
                    f,
                    "Detected circular dependencies involving task IDs: {joined}."
                )
            }
            Self::InvalidDueDate { title, value } => write!(
                f,
                "Task '{title}' has invalid due_date value '{value}', treated as no due date."
            ),
            Self::MissingEstimate { title } => write!(
                f,
                "Task '{title}' missing estimated_hours, using neutral effort in scoring."
            ),
        }
    }
}

// Warnings go over the wire as plain messages.
impl Serialize for Warning {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
