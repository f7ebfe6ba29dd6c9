//! Custom-pattern evaluator for `{unit, interval, weekdays?}` rules

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use tracing::debug;

use super::{calendar, termination};
use crate::domain::{AnchorMode, CustomRepeatingPattern, EvaluationResult, RepeatUnit, Weekday, WeekdaySet};
use crate::error::RecurError;

/// Compute the next occurrence of a custom pattern and apply its end condition
///
/// `occurrence_count` is the number of occurrences completed before this one;
/// the result always carries `occurrence_count + 1`.
pub fn next_custom_occurrence(
    pattern: &CustomRepeatingPattern,
    current_due: Option<DateTime<Utc>>,
    completed_at: DateTime<Utc>,
    anchor: AnchorMode,
    occurrence_count: u32,
) -> Result<EvaluationResult, RecurError> {
    let basis = calendar::basis(current_due, completed_at, anchor);
    let interval = pattern.interval().get();

    let date = match pattern.weekdays() {
        Some(days) => next_matching_weekday(basis.date, days, interval)?,
        None => calendar::step(basis.date, pattern.unit(), interval)?,
    };
    let candidate = calendar::at_time(date, basis.time);
    debug!(%pattern, anchor_date = %basis.date, %candidate, "Computed custom occurrence");

    Ok(termination::check_end_condition(
        Some(candidate),
        occurrence_count.saturating_add(1),
        Some(pattern.end()),
    ))
}

/// First date strictly after `anchor` whose weekday is in `days`
///
/// The rest of the anchor's ISO week is tried first. When nothing matches
/// there, the search moves to the week starting `interval` weeks after the
/// anchor's week.
fn next_matching_weekday(anchor: NaiveDate, days: &WeekdaySet, interval: u32) -> Result<NaiveDate, RecurError> {
    let matches = |date: &NaiveDate| days.contains(Weekday::from(date.weekday()));

    let left_this_week = 6 - u64::from(anchor.weekday().num_days_from_monday());
    if let Some(date) = (1..=left_this_week)
        .map_while(|offset| anchor.checked_add_days(Days::new(offset)))
        .find(matches)
    {
        return Ok(date);
    }

    let target_week = calendar::step(calendar::week_start(anchor)?, RepeatUnit::Weeks, interval)?;
    (0..7)
        .map_while(|offset| target_week.checked_add_days(Days::new(offset)))
        .find(matches)
        .ok_or_else(|| calendar::out_of_range(anchor, format!("{} weeks to {}", interval, days)))
}
