//! Recurrence evaluation
//!
//! `termination` is the leaf; `simple` and `custom` compute candidate dates and
//! hand them to it. `evaluate` dispatches a task-level `RepeatRule`, and
//! `preview` projects the upcoming series of a rule.

mod calendar;
pub mod custom;
pub mod simple;
pub mod termination;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::{AnchorMode, Completion, EvaluationResult, RepeatRule};
use crate::error::RecurError;

pub use custom::next_custom_occurrence;
pub use simple::next_simple_occurrence;
pub use termination::check_end_condition;

/// Evaluate one completion of a task
///
/// Returns `None` for `RepeatRule::Never`: the task does not repeat and the
/// evaluators are not run.
pub fn evaluate(rule: &RepeatRule, completion: &Completion) -> Result<Option<EvaluationResult>, RecurError> {
    let new_count = completion.occurrence_count.saturating_add(1);

    let result = match rule {
        RepeatRule::Never => {
            debug!("Task does not repeat");
            return Ok(None);
        }
        RepeatRule::Simple { cadence, end } => {
            let next = next_simple_occurrence(*cadence, completion.current_due, completion.completed_at, completion.anchor)?;
            check_end_condition(Some(next), new_count, end.as_ref())
        }
        RepeatRule::Custom(pattern) => next_custom_occurrence(
            pattern,
            completion.current_due,
            completion.completed_at,
            completion.anchor,
            completion.occurrence_count,
        )?,
    };

    Ok(Some(result))
}

/// Project upcoming due dates of a series, starting with `first_due`
///
/// Each occurrence is assumed to be completed exactly when it falls due, so the
/// anchor mode makes no difference. The iterator ends when the series
/// terminates or on the first error; unbounded rules need `take`.
pub fn preview(rule: &RepeatRule, first_due: DateTime<Utc>, occurrence_count: u32) -> Preview<'_> {
    Preview {
        rule,
        next: Some(first_due),
        occurrence_count,
    }
}

/// Iterator returned by [`preview`]
#[derive(Debug, Clone)]
pub struct Preview<'a> {
    rule: &'a RepeatRule,
    next: Option<DateTime<Utc>>,
    occurrence_count: u32,
}

impl Iterator for Preview<'_> {
    type Item = Result<DateTime<Utc>, RecurError>;

    fn next(&mut self) -> Option<Self::Item> {
        let due = self.next.take()?;
        let completion = Completion::new(Some(due), due, AnchorMode::DueDate).with_count(self.occurrence_count);

        match evaluate(self.rule, &completion) {
            Ok(Some(result)) => {
                self.next = result.next_due_date();
                self.occurrence_count = result.new_occurrence_count();
                Some(Ok(due))
            }
            Ok(None) => Some(Ok(due)),
            Err(e) => Some(Err(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CustomRepeatingPattern, EndCondition, RepeatUnit, RepeatingCadence};
    use chrono::TimeZone;
    use std::num::NonZeroU32;

    fn ts(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_evaluate_never_short_circuits() {
        let completion = Completion::new(Some(ts(2025, 1, 1)), ts(2025, 1, 1), AnchorMode::DueDate);
        assert_eq!(evaluate(&RepeatRule::Never, &completion), Ok(None));
    }

    #[test]
    fn test_evaluate_simple_with_end() {
        let rule = RepeatRule::Simple {
            cadence: RepeatingCadence::Daily,
            end: Some(EndCondition::UntilDate(ts(2025, 1, 3))),
        };
        let completion = Completion::new(Some(ts(2025, 1, 2)), ts(2025, 1, 2), AnchorMode::DueDate).with_count(4);
        assert_eq!(evaluate(&rule, &completion), Ok(Some(EvaluationResult::proceed(ts(2025, 1, 3), 5))));

        let completion = Completion::new(Some(ts(2025, 1, 3)), ts(2025, 1, 3), AnchorMode::DueDate).with_count(5);
        assert_eq!(evaluate(&rule, &completion), Ok(Some(EvaluationResult::terminated(6))));
    }

    #[test]
    fn test_evaluate_custom() {
        let pattern = CustomRepeatingPattern::every(RepeatUnit::Years, NonZeroU32::new(1).unwrap());
        let completion = Completion::new(Some(ts(2024, 2, 29)), ts(2024, 3, 1), AnchorMode::DueDate);
        let result = evaluate(&RepeatRule::Custom(pattern), &completion).unwrap().unwrap();
        assert_eq!(result.next_due_date(), Some(ts(2025, 2, 28)));
        assert_eq!(result.new_occurrence_count(), 1);
    }

    #[test]
    fn test_preview_stops_at_termination() {
        let pattern = CustomRepeatingPattern::every(RepeatUnit::Weeks, NonZeroU32::new(1).unwrap())
            .with_end(EndCondition::AfterOccurrences(NonZeroU32::new(3).unwrap()));
        let rule = RepeatRule::Custom(pattern);
        let dates: Vec<_> = preview(&rule, ts(2025, 11, 3), 0).collect::<Result<_, _>>().unwrap();
        assert_eq!(dates, vec![ts(2025, 11, 3), ts(2025, 11, 10), ts(2025, 11, 17)]);
    }

    #[test]
    fn test_preview_unbounded_needs_take() {
        let rule = RepeatRule::simple(RepeatingCadence::Monthly);
        let dates: Vec<_> = preview(&rule, ts(2025, 1, 31), 0)
            .take(4)
            .collect::<Result<_, _>>()
            .unwrap();
        // Clamping carries forward: Jan 31 -> Feb 28 -> Mar 28
        assert_eq!(dates, vec![ts(2025, 1, 31), ts(2025, 2, 28), ts(2025, 3, 28), ts(2025, 4, 28)]);
    }

    #[test]
    fn test_preview_never_yields_current_only() {
        let dates: Vec<_> = preview(&RepeatRule::Never, ts(2025, 1, 1), 0).collect();
        assert_eq!(dates, vec![Ok(ts(2025, 1, 1))]);
    }
}
