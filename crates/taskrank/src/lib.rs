//! Taskrank - a task prioritization engine.
//!
//! Given a batch of tasks with due dates, effort estimates, importance and
//! inter-task dependencies, taskrank computes a 0-100 priority score and a
//! short explanation per task, flags dependency cycles, and ranks the batch.
//!
//! The two core operations are [`detect_circular_dependencies`] and
//! [`score_tasks`]. Both are pure functions of their inputs; the CLI in
//! [`cli`] is a thin front end over them.

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod config;
pub mod domain;
pub mod error;
pub mod graph;
pub mod input;
pub mod scoring;
pub mod validation;
pub mod warning;

// Public CLI module (needed by binary)
pub mod cli;
pub mod output;

pub use domain::{PriorityLabel, ScoredTask, Strategy, Task, TaskId};
pub use graph::detect_circular_dependencies;
pub use scoring::{ScoreReport, score_tasks, suggest_tasks};
pub use warning::Warning;
