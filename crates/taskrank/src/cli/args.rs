//! CLI argument structs for all commands.

use clap::Parser;
use std::path::PathBuf;

use super::types::StrategyArg;

/// Arguments for the `analyze` command
#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    /// JSON file with tasks (reads stdin when omitted or "-")
    ///
    /// Either an array of tasks or an object of the form
    /// {"tasks": [...], "strategy": "..."}.
    pub input: Option<PathBuf>,

    /// Ranking strategy (overrides the input and config)
    #[arg(short, long, value_enum)]
    pub strategy: Option<StrategyArg>,
}

/// Arguments for the `suggest` command
#[derive(Parser, Debug, Clone)]
pub struct SuggestArgs {
    /// JSON file with tasks (reads stdin when omitted or "-")
    pub input: Option<PathBuf>,

    /// Ranking strategy (overrides the input and config)
    #[arg(short, long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Number of tasks to suggest (defaults to the config's suggest-limit)
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u64).range(1..))]
    pub limit: Option<u64>,
}

/// Arguments for the `cycles` command
#[derive(Parser, Debug, Clone)]
pub struct CyclesArgs {
    /// JSON file with tasks (reads stdin when omitted or "-")
    pub input: Option<PathBuf>,
}

/// Arguments for the `init` command
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Suppress output messages
    #[arg(short, long)]
    pub quiet: bool,
}
