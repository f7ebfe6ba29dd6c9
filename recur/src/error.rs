//! Engine error types
//!
//! Every variant except `OutOfRange` is a caller contract violation caught while
//! constructing a pattern. None of them is recovered inside the engine.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::RepeatUnit;

/// Errors raised while building rules or stepping the calendar
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecurError {
    #[error("Interval must be positive, got {0}")]
    NonPositiveInterval(i64),

    #[error("Interval {0} exceeds the maximum of {max}", max = u32::MAX)]
    IntervalTooLarge(i64),

    #[error("Weekdays are only allowed with unit 'weeks', got '{0}'")]
    WeekdaysRequireWeeks(RepeatUnit),

    #[error("Weekday set is empty; omit it for flat week stepping")]
    EmptyWeekdays,

    #[error("End condition 'after_occurrences' requires endAfterOccurrences")]
    MissingEndAfterOccurrences,

    #[error("endAfterOccurrences must be positive, got {0}")]
    NonPositiveEndAfterOccurrences(i64),

    #[error("End condition 'until_date' requires endUntilDate")]
    MissingEndUntilDate,

    #[error("End condition '{0}' does not accept both endAfterOccurrences and endUntilDate")]
    ConflictingEndFields(String),

    #[error("Unknown {kind}: {value}")]
    UnknownValue { kind: &'static str, value: String },

    #[error("Stepping {step} from {date} leaves the representable calendar")]
    OutOfRange { date: NaiveDate, step: String },
}

impl RecurError {
    pub(crate) fn unknown(kind: &'static str, value: &str) -> Self {
        RecurError::UnknownValue {
            kind,
            value: value.to_string(),
        }
    }
}
