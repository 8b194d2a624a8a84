//! CLI argument parsing and command dispatch.
//!
//! # Commands
//!
//! - `analyze`: Score and rank every task
//! - `suggest`: Show the top-ranked tasks
//! - `cycles`: List tasks involved in circular dependencies
//! - `init`: Write a default `taskrank.yaml`
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//! - `--today`: Reference date for urgency (defaults to the local date)
//! - `--config`: Explicit config file instead of searching for `taskrank.yaml`
//!
//! # Example
//!
//! ```bash
//! taskrank analyze tasks.json --strategy deadline_driven
//! cat tasks.json | taskrank suggest -n 5 --json
//! taskrank cycles tasks.json
//! ```

mod args;
mod execute;
mod types;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use args::{AnalyzeArgs, CyclesArgs, InitArgs, SuggestArgs};
pub use types::StrategyArg;

use crate::config::Config;
use crate::domain::DUE_DATE_FORMAT;
use crate::output::OutputMode;

/// Taskrank - rank tasks by urgency, importance, effort and dependencies
///
/// Reads tasks as JSON and prints them ranked by a 0-100 priority score,
/// each with a short explanation, along with any data-quality warnings.
#[derive(Parser, Debug)]
#[command(name = "taskrank")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Reference date for urgency (YYYY-MM-DD, defaults to today)
    #[arg(long, global = true, value_parser = parse_date)]
    pub today: Option<NaiveDate>,

    /// Path to a config file (defaults to the nearest taskrank.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Score and rank all tasks
    ///
    /// Prints every task sorted by descending score, with its priority label
    /// and explanation, followed by any warnings.
    Analyze(AnalyzeArgs),

    /// Suggest the top tasks to work on
    ///
    /// Like `analyze`, but only prints the highest-ranked tasks.
    Suggest(SuggestArgs),

    /// List tasks involved in circular dependencies
    Cycles(CyclesArgs),

    /// Write a default taskrank.yaml in the current directory
    Init(InitArgs),
}

/// Parse a `YYYY-MM-DD` date argument.
fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), DUE_DATE_FORMAT)
        .map_err(|e| format!("invalid date '{s}' (expected YYYY-MM-DD): {e}"))
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    fn load_config(&self) -> Result<Config> {
        let config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::discover(&std::env::current_dir()?)?,
        };
        Ok(config)
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    /// Execute the CLI command
    pub fn execute(&self) -> Result<()> {
        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        match &self.command {
            Some(Commands::Analyze(args)) => {
                let config = self.load_config()?;
                execute::execute_analyze(args, &config, self.today(), output_mode)
            }
            Some(Commands::Suggest(args)) => {
                let config = self.load_config()?;
                execute::execute_suggest(args, &config, self.today(), output_mode)
            }
            Some(Commands::Cycles(args)) => execute::execute_cycles(args, output_mode),
            Some(Commands::Init(args)) => execute::execute_init(args, output_mode),
            None => {
                println!("Taskrank task prioritization");
                println!("Use --help for more information");
                Ok(())
            }
        }
    }
}
