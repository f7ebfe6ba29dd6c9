//! Termination checker shared by both evaluators

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::{EndCondition, EvaluationResult};

/// Decide whether a freshly computed candidate ends the series
///
/// `new_occurrence_count` is the count as of this completion (caller's count
/// plus one). An absent candidate always terminates. `AfterOccurrences(n)`
/// terminates once the count reaches `n`; `UntilDate(t)` terminates only when
/// the candidate is strictly after `t`.
pub fn check_end_condition(
    candidate: Option<DateTime<Utc>>,
    new_occurrence_count: u32,
    end: Option<&EndCondition>,
) -> EvaluationResult {
    let Some(next) = candidate else {
        debug!(new_occurrence_count, "No candidate date, series ends");
        return EvaluationResult::terminated(new_occurrence_count);
    };

    let terminate = match end {
        None | Some(EndCondition::Never) => false,
        Some(EndCondition::AfterOccurrences(limit)) => new_occurrence_count >= limit.get(),
        Some(EndCondition::UntilDate(until)) => next > *until,
    };

    if terminate {
        debug!(%next, new_occurrence_count, ?end, "End condition reached");
        EvaluationResult::terminated(new_occurrence_count)
    } else {
        EvaluationResult::proceed(next, new_occurrence_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::num::NonZeroU32;

    fn ts(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn after(n: u32) -> EndCondition {
        EndCondition::AfterOccurrences(NonZeroU32::new(n).unwrap())
    }

    #[test]
    fn test_no_descriptor_never_terminates() {
        let next = ts(2025, 11, 2);
        assert_eq!(check_end_condition(Some(next), 99, None), EvaluationResult::proceed(next, 99));
        assert_eq!(
            check_end_condition(Some(next), 99, Some(&EndCondition::Never)),
            EvaluationResult::proceed(next, 99)
        );
    }

    #[test]
    fn test_missing_candidate_terminates() {
        assert_eq!(check_end_condition(None, 1, None), EvaluationResult::terminated(1));
    }

    #[test]
    fn test_after_one_terminates_first_completion() {
        let result = check_end_condition(Some(ts(2025, 11, 2)), 1, Some(&after(1)));
        assert!(result.should_terminate());
        assert_eq!(result.next_due_date(), None);
    }

    #[test]
    fn test_after_three_allows_two() {
        let next = ts(2025, 11, 2);
        assert!(!check_end_condition(Some(next), 1, Some(&after(3))).should_terminate());
        assert!(!check_end_condition(Some(next), 2, Some(&after(3))).should_terminate());
        assert!(check_end_condition(Some(next), 3, Some(&after(3))).should_terminate());
        assert!(check_end_condition(Some(next), 4, Some(&after(3))).should_terminate());
    }

    #[test]
    fn test_until_date_is_inclusive() {
        let until = EndCondition::UntilDate(ts(2025, 12, 1));
        let on_boundary = check_end_condition(Some(ts(2025, 12, 1)), 1, Some(&until));
        assert_eq!(on_boundary, EvaluationResult::proceed(ts(2025, 12, 1), 1));

        let past = check_end_condition(Some(ts(2025, 12, 2)), 2, Some(&until));
        assert_eq!(past, EvaluationResult::terminated(2));
    }

    #[test]
    fn test_until_date_compares_instants() {
        let until = EndCondition::UntilDate(ts(2025, 12, 1));
        let one_second_late = Utc.with_ymd_and_hms(2025, 12, 1, 0, 0, 1).unwrap();
        assert!(check_end_condition(Some(one_second_late), 1, Some(&until)).should_terminate());
    }
}
