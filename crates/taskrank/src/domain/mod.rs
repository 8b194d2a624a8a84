//! Domain types for task prioritization.
//!
//! This module contains the task records handed to the scoring engine and
//! the enriched records it hands back.

mod strategy;

pub use strategy::{Strategy, Weights};

use chrono::NaiveDate;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Minimum importance value accepted by the validation layer
pub const MIN_IMPORTANCE: i64 = 1;

/// Maximum importance value accepted by the validation layer
pub const MAX_IMPORTANCE: i64 = 10;

/// Title shown for tasks that arrive without one
pub const UNTITLED_TASK: &str = "Untitled Task";

/// Date format accepted for due dates
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Unique identifier for a task within a batch
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TaskId(pub String);

impl TaskId {
    /// Create a new task ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the ID is empty or whitespace only.
    ///
    /// Blank IDs are excluded from dependency analysis.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// IDs arrive from loosely typed front ends as either strings or numbers.
impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TaskIdVisitor;

        impl Visitor<'_> for TaskIdVisitor {
            type Value = TaskId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string or integer task id")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<TaskId, E> {
                Ok(TaskId::new(v))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<TaskId, E> {
                Ok(TaskId(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<TaskId, E> {
                Ok(TaskId(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<TaskId, E> {
                Ok(TaskId(v.to_string()))
            }
        }

        deserializer.deserialize_any(TaskIdVisitor)
    }
}

/// A due date as supplied by the caller.
///
/// Values that do not parse as `YYYY-MM-DD` are kept verbatim so the
/// scoring engine can report them instead of failing the whole batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DueDate {
    /// A well-formed calendar date
    Date(NaiveDate),

    /// A value that could not be parsed as a date
    Invalid(String),
}

impl DueDate {
    /// Parse a raw due date string, keeping unparseable input as [`DueDate::Invalid`].
    ///
    /// The value must be exactly `YYYY-MM-DD`; surrounding whitespace makes it invalid.
    pub fn parse(raw: &str) -> Self {
        if raw.trim() != raw {
            return Self::Invalid(raw.to_string());
        }
        match NaiveDate::parse_from_str(raw, DUE_DATE_FORMAT) {
            Ok(date) => Self::Date(date),
            Err(_) => Self::Invalid(raw.to_string()),
        }
    }

    /// The parsed date, if any
    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(date) => Some(*date),
            Self::Invalid(_) => None,
        }
    }
}

impl From<NaiveDate> for DueDate {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(date) => write!(f, "{}", date.format(DUE_DATE_FORMAT)),
            Self::Invalid(raw) => write!(f, "{raw}"),
        }
    }
}

impl Serialize for DueDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DueDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// Treats `null` and `""` as an absent due date.
fn deserialize_due_date<'de, D>(deserializer: D) -> Result<Option<DueDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .filter(|s| !s.is_empty())
        .map(|s| DueDate::parse(&s)))
}

/// Treats `null` as an empty dependency list.
fn deserialize_dependencies<'de, D>(deserializer: D) -> Result<Vec<TaskId>, D::Error>
where
    D: Deserializer<'de>,
{
    let deps: Option<Vec<TaskId>> = Option::deserialize(deserializer)?;
    Ok(deps.unwrap_or_default())
}

/// A task to be prioritized
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Identifier referenced by other tasks' dependency lists (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TaskId>,

    /// Task title
    #[serde(default)]
    pub title: String,

    /// Due date (optional, may be unparseable)
    #[serde(default, deserialize_with = "deserialize_due_date")]
    pub due_date: Option<DueDate>,

    /// Estimated effort in hours (optional)
    #[serde(default)]
    pub estimated_hours: Option<f64>,

    /// Importance on a 1-10 scale (optional)
    #[serde(default)]
    pub importance: Option<i64>,

    /// IDs of tasks in the same batch this task depends on
    #[serde(default, deserialize_with = "deserialize_dependencies")]
    pub dependencies: Vec<TaskId>,
}

impl Task {
    /// Create a task with the given title and no other attributes
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            due_date: None,
            estimated_hours: None,
            importance: None,
            dependencies: Vec::new(),
        }
    }

    /// Set the task ID
    #[must_use]
    pub fn with_id(mut self, id: impl Into<TaskId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the due date
    #[must_use]
    pub fn with_due_date(mut self, due: impl Into<DueDate>) -> Self {
        self.due_date = Some(due.into());
        self
    }

    /// Set the estimated effort in hours
    #[must_use]
    pub fn with_estimated_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = Some(hours);
        self
    }

    /// Set the importance
    #[must_use]
    pub fn with_importance(mut self, importance: i64) -> Self {
        self.importance = Some(importance);
        self
    }

    /// Set the dependency list
    #[must_use]
    pub fn with_dependencies<I, T>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TaskId>,
    {
        self.dependencies = deps.into_iter().map(Into::into).collect();
        self
    }

    /// The ID if present and not blank
    #[must_use]
    pub fn graph_id(&self) -> Option<&TaskId> {
        self.id.as_ref().filter(|id| !id.is_blank())
    }

    /// Title for display, falling back to [`UNTITLED_TASK`]
    #[must_use]
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            UNTITLED_TASK
        } else {
            &self.title
        }
    }
}

/// Priority bucket derived from the final score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriorityLabel {
    /// Score of 80 or more
    High,

    /// Score of 50 or more
    Medium,

    /// Anything lower
    Low,
}

impl PriorityLabel {
    /// Threshold for [`PriorityLabel::High`]
    pub const HIGH_THRESHOLD: f64 = 80.0;

    /// Threshold for [`PriorityLabel::Medium`]
    pub const MEDIUM_THRESHOLD: f64 = 50.0;

    /// Label for a score on the 0-100 scale
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= Self::HIGH_THRESHOLD {
            Self::High
        } else if score >= Self::MEDIUM_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl fmt::Display for PriorityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => write!(f, "High"),
            Self::Medium => write!(f, "Medium"),
            Self::Low => write!(f, "Low"),
        }
    }
}

/// The four normalized sub-scores behind a final score, each in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SubScores {
    /// Time pressure from the due date
    pub urgency: f64,
    /// Normalized importance
    pub importance: f64,
    /// Preference for low-effort work
    pub effort: f64,
    /// How many other tasks this one unblocks, normalized
    pub dependency: f64,
}

/// A task enriched with its score, label and explanation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredTask {
    /// The task as supplied by the caller
    #[serde(flatten)]
    pub task: Task,

    /// Final score on the 0-100 scale, rounded to two decimals
    pub score: f64,

    /// Priority bucket for the score
    pub priority_label: PriorityLabel,

    /// Human-readable reasons behind the score
    pub explanation: String,

    /// Sub-scores the final score was built from
    #[serde(skip)]
    pub factors: SubScores,

    /// Whether the task was flagged as part of a dependency cycle
    #[serde(skip)]
    pub in_cycle: bool,
}
