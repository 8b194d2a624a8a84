//! Command execution logic.
//!
//! This module contains the implementation of all CLI commands.

use anyhow::Result;
use chrono::NaiveDate;

use super::args::{AnalyzeArgs, CyclesArgs, InitArgs, SuggestArgs};
use super::types::StrategyArg;
use crate::config::Config;
use crate::domain::Strategy;
use crate::graph::detect_circular_dependencies;
use crate::input::TaskBatch;
use crate::output::{self, OutputMode, ReportKind};
use crate::scoring::{score_tasks, suggest_tasks};
use crate::validation::validate_tasks;

/// Pick the strategy: command line first, then the payload, then config.
fn resolve_strategy(arg: Option<StrategyArg>, batch: &TaskBatch, config: &Config) -> Strategy {
    arg.map(Strategy::from)
        .or(batch.strategy)
        .unwrap_or(config.default_strategy)
}

/// Load and validate the task batch for a scoring command.
fn load_valid_batch(input: Option<&std::path::Path>) -> Result<TaskBatch> {
    let batch = TaskBatch::load(input)?;
    validate_tasks(&batch.tasks)?;
    Ok(batch)
}

/// Execute the analyze command
pub fn execute_analyze(
    args: &AnalyzeArgs,
    config: &Config,
    today: NaiveDate,
    output_mode: OutputMode,
) -> Result<()> {
    let batch = load_valid_batch(args.input.as_deref())?;
    let strategy = resolve_strategy(args.strategy, &batch, config);

    tracing::debug!(tasks = batch.tasks.len(), %strategy, %today, "Analyzing tasks");
    let report = score_tasks(&batch.tasks, strategy, today);

    output::print_report(&report, ReportKind::Analyze, output_mode)?;
    Ok(())
}

/// Execute the suggest command
pub fn execute_suggest(
    args: &SuggestArgs,
    config: &Config,
    today: NaiveDate,
    output_mode: OutputMode,
) -> Result<()> {
    let batch = load_valid_batch(args.input.as_deref())?;
    let strategy = resolve_strategy(args.strategy, &batch, config);
    let limit = match args.limit {
        Some(n) => usize::try_from(n)?,
        None => config.suggest_limit,
    };

    tracing::debug!(tasks = batch.tasks.len(), %strategy, %today, limit, "Suggesting tasks");
    let report = suggest_tasks(&batch.tasks, strategy, today, limit);

    output::print_report(&report, ReportKind::Suggest, output_mode)?;
    Ok(())
}

/// Execute the cycles command
pub fn execute_cycles(args: &CyclesArgs, output_mode: OutputMode) -> Result<()> {
    let batch = TaskBatch::load(args.input.as_deref())?;
    let in_cycle = detect_circular_dependencies(&batch.tasks);

    output::print_cycles(&in_cycle, output_mode)?;
    Ok(())
}

/// Execute the init command
pub fn execute_init(args: &InitArgs, output_mode: OutputMode) -> Result<()> {
    let current_dir = std::env::current_dir()?;
    let path = crate::config::init(&current_dir)?;

    match output_mode {
        OutputMode::Json => {
            output::print_json(&serde_json::json!({
                "config_file": path.display().to_string(),
            }))?;
        }
        OutputMode::Text => {
            if !args.quiet {
                output::print_message(&format!("Wrote default configuration to {}", path.display()))?;
            }
        }
    }

    Ok(())
}
