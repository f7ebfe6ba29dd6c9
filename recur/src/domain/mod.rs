//! Domain types for repeating tasks

mod anchor;
mod cadence;
mod outcome;
mod pattern;
mod rule;
mod weekday;

pub use anchor::AnchorMode;
pub use cadence::RepeatingCadence;
pub use outcome::EvaluationResult;
pub use pattern::{CustomRepeatingPattern, EndCondition, EndConditionKind, RepeatUnit};
pub(crate) use pattern::interval_from;
pub use rule::{Completion, RepeatRule};
pub use weekday::{Weekday, WeekdaySet};
