//! Weighting strategies for combining sub-scores.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Relative contribution of each sub-score to the final score.
///
/// The four weights of every built-in strategy sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    /// Weight of the urgency sub-score
    pub urgency: f64,
    /// Weight of the importance sub-score
    pub importance: f64,
    /// Weight of the effort sub-score
    pub effort: f64,
    /// Weight of the dependency influence sub-score
    pub dependency: f64,
}

impl Weights {
    /// Sum of all four weights
    #[must_use]
    pub fn total(&self) -> f64 {
        self.urgency + self.importance + self.effort + self.dependency
    }
}

/// Named weighting profile used to rank tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Favor low-effort tasks
    FastestWins,

    /// Favor important tasks
    HighImpact,

    /// Favor tasks that are due soon
    DeadlineDriven,

    /// Balance all factors
    #[default]
    SmartBalance,
}

impl Strategy {
    /// All strategies in declaration order
    pub const ALL: [Strategy; 4] = [
        Self::FastestWins,
        Self::HighImpact,
        Self::DeadlineDriven,
        Self::SmartBalance,
    ];

    /// Resolve a strategy name, case-insensitively.
    ///
    /// Unrecognized names resolve to [`Strategy::SmartBalance`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "fastest_wins" => Self::FastestWins,
            "high_impact" => Self::HighImpact,
            "deadline_driven" => Self::DeadlineDriven,
            "smart_balance" => Self::SmartBalance,
            other => {
                tracing::debug!(strategy = %other, "Unknown strategy, using smart_balance");
                Self::SmartBalance
            }
        }
    }

    /// Canonical snake_case name
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::FastestWins => "fastest_wins",
            Self::HighImpact => "high_impact",
            Self::DeadlineDriven => "deadline_driven",
            Self::SmartBalance => "smart_balance",
        }
    }

    /// Sub-score weights for this strategy
    #[must_use]
    pub fn weights(&self) -> Weights {
        let (urgency, importance, effort, dependency) = match self {
            Self::FastestWins => (0.25, 0.25, 0.50, 0.00),
            Self::HighImpact => (0.20, 0.60, 0.10, 0.10),
            Self::DeadlineDriven => (0.60, 0.20, 0.10, 0.10),
            Self::SmartBalance => (0.35, 0.35, 0.15, 0.15),
        };
        Weights {
            urgency,
            importance,
            effort,
            dependency,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

// Lenient like `from_name`: config files and request envelopes never fail on a bad name.
impl<'de> Deserialize<'de> for Strategy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name(&name))
    }
}
