//! Custom repetition patterns and end conditions
//!
//! Storage keeps patterns in a loosely-typed shape: a string discriminator for
//! the end condition plus two optional fields. That shape only exists on the
//! wire (`RawCustomPattern`); in memory the end condition is a sum type and a
//! pattern can only be obtained through a validating constructor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

use super::weekday::{Weekday, WeekdaySet};
use crate::error::RecurError;

/// Calendar unit a custom pattern steps by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatUnit {
    Days,
    Weeks,
    Months,
    Years,
}

impl std::fmt::Display for RepeatUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Days => write!(f, "days"),
            Self::Weeks => write!(f, "weeks"),
            Self::Months => write!(f, "months"),
            Self::Years => write!(f, "years"),
        }
    }
}

impl std::str::FromStr for RepeatUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "days" | "day" => Ok(Self::Days),
            "weeks" | "week" => Ok(Self::Weeks),
            "months" | "month" => Ok(Self::Months),
            "years" | "year" => Ok(Self::Years),
            _ => Err(format!("Unknown unit: {}", s)),
        }
    }
}

/// When a recurring series stops producing occurrences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EndCondition {
    #[default]
    Never,
    /// Stop once this many occurrences have been completed
    AfterOccurrences(NonZeroU32),
    /// Stop once the next due date would fall strictly after this instant
    UntilDate(DateTime<Utc>),
}

/// Wire discriminator for `EndCondition`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EndConditionKind {
    #[default]
    Never,
    AfterOccurrences,
    UntilDate,
}

impl std::fmt::Display for EndConditionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Never => write!(f, "never"),
            Self::AfterOccurrences => write!(f, "after_occurrences"),
            Self::UntilDate => write!(f, "until_date"),
        }
    }
}

impl EndCondition {
    /// Build from the discriminator and optional fields used in storage
    ///
    /// The field matching `kind` is required and the other must be absent.
    pub fn from_fields(
        kind: EndConditionKind,
        after_occurrences: Option<i64>,
        until_date: Option<DateTime<Utc>>,
    ) -> Result<Self, RecurError> {
        if after_occurrences.is_some() && until_date.is_some() {
            return Err(RecurError::ConflictingEndFields(kind.to_string()));
        }
        match kind {
            EndConditionKind::Never => {
                if after_occurrences.is_some() || until_date.is_some() {
                    return Err(RecurError::ConflictingEndFields(kind.to_string()));
                }
                Ok(Self::Never)
            }
            EndConditionKind::AfterOccurrences => {
                if until_date.is_some() {
                    return Err(RecurError::ConflictingEndFields(kind.to_string()));
                }
                let n = after_occurrences.ok_or(RecurError::MissingEndAfterOccurrences)?;
                Self::after(n)
            }
            EndConditionKind::UntilDate => {
                if after_occurrences.is_some() {
                    return Err(RecurError::ConflictingEndFields(kind.to_string()));
                }
                until_date.map(Self::UntilDate).ok_or(RecurError::MissingEndUntilDate)
            }
        }
    }

    /// `AfterOccurrences` from an untyped count
    pub fn after(occurrences: i64) -> Result<Self, RecurError> {
        u32::try_from(occurrences)
            .ok()
            .and_then(NonZeroU32::new)
            .map(Self::AfterOccurrences)
            .ok_or(RecurError::NonPositiveEndAfterOccurrences(occurrences))
    }

    pub fn kind(&self) -> EndConditionKind {
        match self {
            Self::Never => EndConditionKind::Never,
            Self::AfterOccurrences(_) => EndConditionKind::AfterOccurrences,
            Self::UntilDate(_) => EndConditionKind::UntilDate,
        }
    }
}

/// A `{unit, interval, weekdays?}` rule with an end condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCustomPattern", into = "RawCustomPattern")]
pub struct CustomRepeatingPattern {
    unit: RepeatUnit,
    interval: NonZeroU32,
    weekdays: Option<WeekdaySet>,
    end: EndCondition,
}

impl CustomRepeatingPattern {
    /// Create a pattern; weekdays are only accepted with `RepeatUnit::Weeks`
    pub fn new(
        unit: RepeatUnit,
        interval: NonZeroU32,
        weekdays: Option<WeekdaySet>,
        end: EndCondition,
    ) -> Result<Self, RecurError> {
        if weekdays.is_some() && unit != RepeatUnit::Weeks {
            return Err(RecurError::WeekdaysRequireWeeks(unit));
        }
        Ok(Self {
            unit,
            interval,
            weekdays,
            end,
        })
    }

    /// Pattern without weekdays and without an end condition
    pub fn every(unit: RepeatUnit, interval: NonZeroU32) -> Self {
        Self {
            unit,
            interval,
            weekdays: None,
            end: EndCondition::Never,
        }
    }

    /// Replace the end condition
    pub fn with_end(mut self, end: EndCondition) -> Self {
        self.end = end;
        self
    }

    pub fn unit(&self) -> RepeatUnit {
        self.unit
    }

    pub fn interval(&self) -> NonZeroU32 {
        self.interval
    }

    pub fn weekdays(&self) -> Option<&WeekdaySet> {
        self.weekdays.as_ref()
    }

    pub fn end(&self) -> &EndCondition {
        &self.end
    }
}

impl std::fmt::Display for CustomRepeatingPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "every {} {}", self.interval, self.unit)?;
        if let Some(days) = &self.weekdays {
            write!(f, " on {}", days)?;
        }
        match self.end {
            EndCondition::Never => Ok(()),
            EndCondition::AfterOccurrences(n) => write!(f, ", {} times", n),
            EndCondition::UntilDate(until) => write!(f, ", until {}", until.to_rfc3339()),
        }
    }
}

/// Validate an untyped interval
pub(crate) fn interval_from(interval: i64) -> Result<NonZeroU32, RecurError> {
    if interval <= 0 {
        return Err(RecurError::NonPositiveInterval(interval));
    }
    u32::try_from(interval)
        .ok()
        .and_then(NonZeroU32::new)
        .ok_or(RecurError::IntervalTooLarge(interval))
}

/// Storage shape of a custom pattern
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCustomPattern {
    unit: RepeatUnit,
    interval: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    weekdays: Option<Vec<Weekday>>,
    #[serde(default)]
    end_condition: EndConditionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end_after_occurrences: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end_until_date: Option<DateTime<Utc>>,
}

impl TryFrom<RawCustomPattern> for CustomRepeatingPattern {
    type Error = RecurError;

    fn try_from(raw: RawCustomPattern) -> Result<Self, Self::Error> {
        let interval = interval_from(raw.interval)?;

        if raw.weekdays.is_some() && raw.unit != RepeatUnit::Weeks {
            return Err(RecurError::WeekdaysRequireWeeks(raw.unit));
        }
        let weekdays = raw.weekdays.map(WeekdaySet::new).transpose()?;
        let end = EndCondition::from_fields(raw.end_condition, raw.end_after_occurrences, raw.end_until_date)?;

        Self::new(raw.unit, interval, weekdays, end)
    }
}

impl From<CustomRepeatingPattern> for RawCustomPattern {
    fn from(pattern: CustomRepeatingPattern) -> Self {
        let (end_after_occurrences, end_until_date) = match pattern.end {
            EndCondition::Never => (None, None),
            EndCondition::AfterOccurrences(n) => (Some(i64::from(n.get())), None),
            EndCondition::UntilDate(until) => (None, Some(until)),
        };
        Self {
            unit: pattern.unit,
            interval: i64::from(pattern.interval.get()),
            weekdays: pattern.weekdays.map(|set| set.iter().collect()),
            end_condition: pattern.end.kind(),
            end_after_occurrences,
            end_until_date,
        }
    }
}
