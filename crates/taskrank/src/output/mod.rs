//! Rendering of score reports and cycle lists.
//!
//! Reports are printed either as ranked, wrapped text for people or as the
//! JSON bodies `{strategy, warnings, tasks}` and
//! `{strategy, warnings, suggested_tasks}` for scripts.
//!
//! Submodules:
//! - [`color`]: Color and styling helpers

pub mod color;

use crate::domain::{ScoredTask, TaskId};
use crate::scoring::ScoreReport;
use serde::Serialize;
use std::collections::BTreeSet;
use std::env;
use std::io::{self, Write};

pub use color::{error, warning};

use color::{bold, colorize_id, colorize_priority, dimmed};

// ============================================================================
// Output Configuration
// ============================================================================

const DEFAULT_TERMINAL_WIDTH: u16 = 80;
const DEFAULT_MAX_CONTENT_WIDTH: usize = 80;

/// Indentation for task detail lines
const DETAIL_INDENT: &str = "    ";

/// Width and color settings for text reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Maximum content width for text wrapping.
    pub max_width: usize,
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create a new OutputConfig with explicit values.
    pub fn new(max_width: usize, use_colors: bool) -> Self {
        Self {
            max_width,
            use_colors,
        }
    }

    /// Create an OutputConfig by reading from environment variables.
    ///
    /// Reads:
    /// - `TASKRANK_MAX_WIDTH`: Maximum content width (default: 80)
    /// - `NO_COLOR`: Standard env var to disable colors (any value disables colors)
    /// - `TASKRANK_COLOR`: Set to "0" or "false" to disable colors (default: true)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build an OutputConfig from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_width = match lookup("TASKRANK_MAX_WIDTH") {
            Some(s) if !s.is_empty() => match s.parse::<usize>() {
                Ok(width) if width > 0 => width,
                _ => {
                    tracing::warn!(
                        env_var = "TASKRANK_MAX_WIDTH",
                        value = %s,
                        default = DEFAULT_MAX_CONTENT_WIDTH,
                        "Invalid value, using default"
                    );
                    DEFAULT_MAX_CONTENT_WIDTH
                }
            },
            _ => DEFAULT_MAX_CONTENT_WIDTH,
        };

        // Respect NO_COLOR standard (https://no-color.org/)
        let use_colors = lookup("NO_COLOR").is_none()
            && lookup("TASKRANK_COLOR")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true);

        Self {
            max_width,
            use_colors,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_CONTENT_WIDTH,
            use_colors: true,
        }
    }
}

/// Get the current terminal width, falling back to default if detection fails.
fn get_terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(DEFAULT_TERMINAL_WIDTH as usize)
}

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

/// Which collaborator operation produced a report.
///
/// Controls the JSON key holding the task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Every scored task (`tasks`)
    Analyze,
    /// The top-ranked tasks only (`suggested_tasks`)
    Suggest,
}

impl ReportKind {
    fn tasks_key(self) -> &'static str {
        match self {
            Self::Analyze => "tasks",
            Self::Suggest => "suggested_tasks",
        }
    }
}

// ============================================================================
// Public Dispatch Functions
// ============================================================================

/// Print a score report in the specified format
pub fn print_report(report: &ScoreReport, kind: ReportKind, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match mode {
        OutputMode::Text => {
            let mut config = OutputConfig::from_env();
            config.max_width = config.max_width.min(get_terminal_width());
            print_report_text(&mut handle, report, kind, &config)
        }
        OutputMode::Json => write_json(&mut handle, &report_json(report, kind)),
    }
}

/// Print the IDs involved in dependency cycles
pub fn print_cycles(ids: &BTreeSet<TaskId>, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match mode {
        OutputMode::Text => print_cycles_text(&mut handle, ids, &OutputConfig::from_env()),
        OutputMode::Json => write_json(&mut handle, &serde_json::json!({ "circular": ids })),
    }
}

/// Print a simple message
pub fn print_message(msg: &str) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{msg}")
}

/// Print a JSON-formatted result for any serializable value
pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_json(&mut handle, value)
}

fn write_json<W: Write, T: Serialize>(w: &mut W, value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(w, "{json}")
}

// ============================================================================
// JSON Formatting
// ============================================================================

/// Response body for a report: `strategy`, `warnings` and the task list.
pub fn report_json(report: &ScoreReport, kind: ReportKind) -> serde_json::Value {
    let mut body = serde_json::Map::new();
    body.insert("strategy".to_string(), serde_json::json!(report.strategy));
    body.insert("warnings".to_string(), serde_json::json!(report.warnings));
    body.insert(kind.tasks_key().to_string(), serde_json::json!(report.tasks));
    serde_json::Value::Object(body)
}

// ============================================================================
// Text Formatting
// ============================================================================

fn print_report_text<W: Write>(
    w: &mut W,
    report: &ScoreReport,
    kind: ReportKind,
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(w, "{} {}", dimmed("Strategy:", config), report.strategy)?;

    if report.tasks.is_empty() {
        writeln!(w, "No tasks to display.")?;
    } else {
        let heading = match kind {
            ReportKind::Analyze => format!("Ranked {} task(s):", report.tasks.len()),
            ReportKind::Suggest => format!("Top {} suggested task(s):", report.tasks.len()),
        };
        writeln!(w, "{heading}")?;

        for (rank, scored) in report.tasks.iter().enumerate() {
            writeln!(w)?;
            print_task_text(w, rank + 1, scored, config)?;
        }
    }

    if !report.warnings.is_empty() {
        writeln!(w)?;
        writeln!(w, "{} ({}):", bold("Warnings", config), report.warnings.len())?;
        for item in &report.warnings {
            let lines = wrap_text(&item.to_string(), config.max_width.saturating_sub(4));
            for (i, line) in lines.iter().enumerate() {
                let bullet = if i == 0 { "  ! " } else { DETAIL_INDENT };
                writeln!(w, "{}{}", warning(bullet, config), warning(line, config))?;
            }
        }
    }

    Ok(())
}

fn print_task_text<W: Write>(
    w: &mut W,
    rank: usize,
    scored: &ScoredTask,
    config: &OutputConfig,
) -> io::Result<()> {
    let task = &scored.task;
    let id = task.id.as_ref().map_or("-", |id| id.as_str());

    writeln!(
        w,
        "{rank:>2}. [{}]  {}  {}",
        colorize_priority(scored.priority_label, scored.score, config),
        colorize_id(id, config),
        task.display_title()
    )?;

    let due = task
        .due_date
        .as_ref()
        .map_or_else(|| "none".to_string(), ToString::to_string);
    let estimate = task
        .estimated_hours
        .map_or_else(|| "N/A".to_string(), |h| format!("{h}h"));
    let importance = task
        .importance
        .map_or_else(|| "N/A".to_string(), |i| i.to_string());
    let deps = if task.dependencies.is_empty() {
        "none".to_string()
    } else {
        task.dependencies
            .iter()
            .map(TaskId::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };

    writeln!(
        w,
        "{DETAIL_INDENT}{} {due}  {} {estimate}  {} {importance}  {} {deps}",
        dimmed("Due:", config),
        dimmed("Est:", config),
        dimmed("Importance:", config),
        dimmed("Depends on:", config),
    )?;

    let width = config.max_width.saturating_sub(DETAIL_INDENT.len());
    for line in wrap_text(&scored.explanation, width) {
        writeln!(w, "{DETAIL_INDENT}{line}")?;
    }

    Ok(())
}

fn print_cycles_text<W: Write>(
    w: &mut W,
    ids: &BTreeSet<TaskId>,
    config: &OutputConfig,
) -> io::Result<()> {
    if ids.is_empty() {
        writeln!(w, "No circular dependencies found.")?;
        return Ok(());
    }

    writeln!(
        w,
        "{}",
        error(
            &format!("Found {} task(s) involved in circular dependencies:", ids.len()),
            config
        )
    )?;
    for id in ids {
        writeln!(w, "  {}", colorize_id(id.as_str(), config))?;
    }
    Ok(())
}

/// Wrap text to fit within a given width, preserving existing line breaks.
/// Uses textwrap to handle edge cases like long words (URLs, file paths).
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let max_width = max_width.max(1);
    text.lines()
        .flat_map(|line| {
            if line.trim().is_empty() {
                vec![String::new()]
            } else {
                textwrap::wrap(line, max_width)
                    .into_iter()
                    .map(|s| s.into_owned())
                    .collect()
            }
        })
        .collect()
}
