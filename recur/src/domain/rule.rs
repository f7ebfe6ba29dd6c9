//! Task-level repetition rule and completion input

use chrono::{DateTime, Utc};

use super::anchor::AnchorMode;
use super::cadence::RepeatingCadence;
use super::pattern::{CustomRepeatingPattern, EndCondition};

/// How a task repeats
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RepeatRule {
    /// Not repeating; the engine is never consulted
    #[default]
    Never,
    /// Built-in cadence, optionally bounded by an attached end condition
    Simple {
        cadence: RepeatingCadence,
        end: Option<EndCondition>,
    },
    Custom(CustomRepeatingPattern),
}

impl RepeatRule {
    /// Unbounded simple cadence
    pub fn simple(cadence: RepeatingCadence) -> Self {
        Self::Simple { cadence, end: None }
    }
}

impl std::fmt::Display for RepeatRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Never => write!(f, "never"),
            Self::Simple { cadence, end } => {
                write!(f, "{}", cadence)?;
                match end {
                    Some(EndCondition::AfterOccurrences(n)) => write!(f, ", {} times", n),
                    Some(EndCondition::UntilDate(until)) => write!(f, ", until {}", until.to_rfc3339()),
                    Some(EndCondition::Never) | None => Ok(()),
                }
            }
            Self::Custom(pattern) => write!(f, "{}", pattern),
        }
    }
}

/// Everything the engine needs to know about one completion event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    /// Due date of the occurrence just completed, if it had one
    pub current_due: Option<DateTime<Utc>>,
    /// When the occurrence was completed
    pub completed_at: DateTime<Utc>,
    pub anchor: AnchorMode,
    /// Occurrences completed before this one
    pub occurrence_count: u32,
}

impl Completion {
    pub fn new(current_due: Option<DateTime<Utc>>, completed_at: DateTime<Utc>, anchor: AnchorMode) -> Self {
        Self {
            current_due,
            completed_at,
            anchor,
            occurrence_count: 0,
        }
    }

    pub fn with_count(mut self, occurrence_count: u32) -> Self {
        self.occurrence_count = occurrence_count;
        self
    }
}
