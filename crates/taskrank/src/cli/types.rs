//! CLI value enums and domain type conversions.

use clap::ValueEnum;

use crate::domain::Strategy;

/// Ranking strategy for CLI arguments
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyArg {
    /// Favor low-effort tasks
    #[value(name = "fastest_wins", alias = "fastest-wins")]
    FastestWins,
    /// Favor important tasks
    #[value(name = "high_impact", alias = "high-impact")]
    HighImpact,
    /// Favor tasks that are due soon
    #[value(name = "deadline_driven", alias = "deadline-driven")]
    DeadlineDriven,
    /// Balance urgency, importance, effort and dependencies
    #[value(name = "smart_balance", alias = "smart-balance")]
    SmartBalance,
}

impl std::fmt::Display for StrategyArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Strategy::from(*self))
    }
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::FastestWins => Strategy::FastestWins,
            StrategyArg::HighImpact => Strategy::HighImpact,
            StrategyArg::DeadlineDriven => Strategy::DeadlineDriven,
            StrategyArg::SmartBalance => Strategy::SmartBalance,
        }
    }
}
