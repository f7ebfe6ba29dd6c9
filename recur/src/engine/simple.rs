//! Simple-pattern evaluator for the built-in cadences

use chrono::{DateTime, Utc};
use tracing::debug;

use super::calendar;
use crate::domain::{AnchorMode, RepeatUnit, RepeatingCadence};
use crate::error::RecurError;

impl RepeatingCadence {
    /// The single calendar step this cadence represents
    pub fn unit(&self) -> RepeatUnit {
        match self {
            Self::Daily => RepeatUnit::Days,
            Self::Weekly => RepeatUnit::Weeks,
            Self::Monthly => RepeatUnit::Months,
            Self::Yearly => RepeatUnit::Years,
        }
    }
}

/// Compute the next due date for a built-in cadence
///
/// Steps one cadence unit from the anchor's UTC calendar date and reapplies
/// the UTC time of day of the current due date (or of the anchor when there is
/// no due date). Never decides termination.
pub fn next_simple_occurrence(
    cadence: RepeatingCadence,
    current_due: Option<DateTime<Utc>>,
    completed_at: DateTime<Utc>,
    anchor: AnchorMode,
) -> Result<DateTime<Utc>, RecurError> {
    let basis = calendar::basis(current_due, completed_at, anchor);
    let date = calendar::step(basis.date, cadence.unit(), 1)?;
    let next = calendar::at_time(date, basis.time);
    debug!(%cadence, %anchor, anchor_date = %basis.date, %next, "Computed simple occurrence");
    Ok(next)
}
