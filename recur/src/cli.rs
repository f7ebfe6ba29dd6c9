//! CLI argument parsing for recur

use chrono::{DateTime, Utc};
use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::domain::{
    AnchorMode, CustomRepeatingPattern, EndCondition, RepeatRule, RepeatUnit, RepeatingCadence, Weekday, WeekdaySet,
    interval_from,
};
use crate::error::RecurError;

#[derive(Parser, Debug)]
#[command(name = "recur")]
#[command(author, version, about = "Compute next due dates for repeating tasks", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute what happens when an occurrence is completed
    Next {
        #[command(flatten)]
        rule: RuleArgs,

        /// Due date of the occurrence being completed (RFC 3339)
        #[arg(short, long)]
        due: Option<DateTime<Utc>>,

        /// Completion time (RFC 3339, default: now)
        #[arg(long)]
        completed: Option<DateTime<Utc>>,

        /// Step from the due date or the completion date
        #[arg(short, long)]
        anchor: Option<AnchorMode>,

        /// Occurrences completed before this one
        #[arg(long, default_value = "0")]
        count: u32,
    },

    /// List upcoming occurrences of a series
    Preview {
        #[command(flatten)]
        rule: RuleArgs,

        /// Due date of the current occurrence (RFC 3339)
        #[arg(short, long, required = true)]
        due: DateTime<Utc>,

        /// Occurrences already completed
        #[arg(long, default_value = "0")]
        count: u32,

        /// Maximum occurrences to list (default: from config)
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

/// Values accepted by `--cadence`
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CadenceArg {
    Never,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl CadenceArg {
    /// The repeating cadence, or `None` for `never`
    pub fn cadence(self) -> Option<RepeatingCadence> {
        match self {
            Self::Never => None,
            Self::Daily => Some(RepeatingCadence::Daily),
            Self::Weekly => Some(RepeatingCadence::Weekly),
            Self::Monthly => Some(RepeatingCadence::Monthly),
            Self::Yearly => Some(RepeatingCadence::Yearly),
        }
    }
}

/// Flags describing a repetition rule
#[derive(Args, Debug, Clone)]
#[command(group(ArgGroup::new("rule").required(true).args(["cadence", "unit"])))]
pub struct RuleArgs {
    /// Built-in cadence
    #[arg(long, value_enum)]
    pub cadence: Option<CadenceArg>,

    /// Custom pattern unit: days, weeks, months or years
    #[arg(short, long)]
    pub unit: Option<RepeatUnit>,

    /// Custom pattern interval (default: 1)
    #[arg(short, long, allow_negative_numbers = true, conflicts_with = "cadence")]
    pub interval: Option<i64>,

    /// Weekdays for a weekly pattern, comma separated (e.g. mon,wed,fri)
    #[arg(short, long, value_delimiter = ',', conflicts_with = "cadence")]
    pub weekdays: Option<Vec<Weekday>>,

    /// End the series after this many occurrences
    #[arg(long, allow_negative_numbers = true, conflicts_with = "until")]
    pub end_after: Option<i64>,

    /// End the series once the next due date would be after this instant (RFC 3339)
    #[arg(long)]
    pub until: Option<DateTime<Utc>>,
}

impl RuleArgs {
    /// Build the repetition rule, validating flag combinations
    pub fn to_rule(&self) -> Result<RepeatRule, RecurError> {
        let end = match (self.end_after, self.until) {
            (Some(n), _) => Some(EndCondition::after(n)?),
            (None, Some(until)) => Some(EndCondition::UntilDate(until)),
            (None, None) => None,
        };

        if let Some(arg) = self.cadence {
            return Ok(match arg.cadence() {
                Some(cadence) => RepeatRule::Simple { cadence, end },
                None => RepeatRule::Never,
            });
        }

        let unit = self.unit.ok_or_else(|| RecurError::unknown("rule", "neither cadence nor unit"))?;
        let interval = interval_from(self.interval.unwrap_or(1))?;
        let weekdays = self.weekdays.clone().map(WeekdaySet::new).transpose()?;
        let pattern = CustomRepeatingPattern::new(unit, interval, weekdays, end.unwrap_or_default())?;
        Ok(RepeatRule::Custom(pattern))
    }
}
