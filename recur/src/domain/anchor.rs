//! Anchor mode: which timestamp the next occurrence's date is stepped from

use serde::{Deserialize, Serialize};

/// Per-task choice of stepping basis
///
/// The time of day always comes from the current due date; only the calendar
/// date is taken from the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AnchorMode {
    #[default]
    DueDate,
    CompletionDate,
}

impl std::fmt::Display for AnchorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DueDate => write!(f, "due_date"),
            Self::CompletionDate => write!(f, "completion_date"),
        }
    }
}

impl std::str::FromStr for AnchorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "due_date" | "due" => Ok(Self::DueDate),
            "completion_date" | "completion" => Ok(Self::CompletionDate),
            _ => Err(format!("Unknown anchor mode: {}", s)),
        }
    }
}
