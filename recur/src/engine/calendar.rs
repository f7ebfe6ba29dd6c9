//! UTC calendar arithmetic
//!
//! Every date the engine steps is the UTC calendar date of an instant, and
//! every result is rebuilt from a UTC date plus a UTC time of day. The host's
//! local timezone is never consulted.

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveTime, Utc};

use crate::domain::{AnchorMode, RepeatUnit};
use crate::error::RecurError;

/// Calendar date and time of day a step starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StepBasis {
    pub date: NaiveDate,
    pub time: NaiveTime,
}

/// Pick the anchor date and the time-of-day source for a completion
///
/// The anchor only falls back to the completion when there is no due date.
/// Time of day comes from the due date when present, else from the anchor.
pub(crate) fn basis(current_due: Option<DateTime<Utc>>, completed_at: DateTime<Utc>, anchor: AnchorMode) -> StepBasis {
    let anchor_ts = match anchor {
        AnchorMode::DueDate => current_due.unwrap_or(completed_at),
        AnchorMode::CompletionDate => completed_at,
    };
    let time_source = current_due.unwrap_or(anchor_ts);
    StepBasis {
        date: anchor_ts.date_naive(),
        time: time_source.time(),
    }
}

/// Recombine a UTC date with a UTC time of day
pub(crate) fn at_time(date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
    date.and_time(time).and_utc()
}

/// Step `interval` units forward, clamping day-of-month for months and years
pub(crate) fn step(date: NaiveDate, unit: RepeatUnit, interval: u32) -> Result<NaiveDate, RecurError> {
    let stepped = match unit {
        RepeatUnit::Days => date.checked_add_days(Days::new(u64::from(interval))),
        RepeatUnit::Weeks => date.checked_add_days(Days::new(7 * u64::from(interval))),
        RepeatUnit::Months => date.checked_add_months(Months::new(interval)),
        RepeatUnit::Years => interval
            .checked_mul(12)
            .and_then(|months| date.checked_add_months(Months::new(months))),
    };
    stepped.ok_or_else(|| out_of_range(date, format!("{} {}", interval, unit)))
}

/// Monday of the ISO week containing `date`
pub(crate) fn week_start(date: NaiveDate) -> Result<NaiveDate, RecurError> {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset))
        .ok_or_else(|| out_of_range(date, "to week start".to_string()))
}

pub(crate) fn out_of_range(date: NaiveDate, step: String) -> RecurError {
    RecurError::OutOfRange { date, step }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_basis_due_date_mode() {
        let due = Utc.with_ymd_and_hms(2025, 3, 10, 9, 15, 0).unwrap();
        let done = Utc.with_ymd_and_hms(2025, 3, 12, 18, 0, 0).unwrap();
        let b = basis(Some(due), done, AnchorMode::DueDate);
        assert_eq!(b.date, date(2025, 3, 10));
        assert_eq!((b.time.hour(), b.time.minute()), (9, 15));
    }

    #[test]
    fn test_basis_completion_mode_keeps_due_time() {
        let due = Utc.with_ymd_and_hms(2025, 3, 10, 9, 15, 0).unwrap();
        let done = Utc.with_ymd_and_hms(2025, 3, 12, 18, 0, 0).unwrap();
        let b = basis(Some(due), done, AnchorMode::CompletionDate);
        assert_eq!(b.date, date(2025, 3, 12));
        assert_eq!((b.time.hour(), b.time.minute()), (9, 15));
    }

    #[test]
    fn test_basis_without_due_date() {
        let done = Utc.with_ymd_and_hms(2025, 3, 12, 18, 5, 7).unwrap();
        for mode in [AnchorMode::DueDate, AnchorMode::CompletionDate] {
            let b = basis(None, done, mode);
            assert_eq!(b.date, date(2025, 3, 12));
            assert_eq!(b.time, done.time());
        }
    }

    #[test]
    fn test_step_clamps_month_end() {
        assert_eq!(step(date(2025, 1, 31), RepeatUnit::Months, 1).unwrap(), date(2025, 2, 28));
        assert_eq!(step(date(2024, 1, 31), RepeatUnit::Months, 1).unwrap(), date(2024, 2, 29));
        assert_eq!(step(date(2025, 3, 31), RepeatUnit::Months, 1).unwrap(), date(2025, 4, 30));
        assert_eq!(step(date(2025, 10, 31), RepeatUnit::Months, 4).unwrap(), date(2026, 2, 28));
    }

    #[test]
    fn test_step_years_from_leap_day() {
        assert_eq!(step(date(2024, 2, 29), RepeatUnit::Years, 1).unwrap(), date(2025, 2, 28));
        assert_eq!(step(date(2024, 2, 29), RepeatUnit::Years, 4).unwrap(), date(2028, 2, 29));
        assert_eq!(step(date(2025, 7, 4), RepeatUnit::Years, 1).unwrap(), date(2026, 7, 4));
    }

    #[test]
    fn test_step_days_and_weeks() {
        assert_eq!(step(date(2025, 12, 31), RepeatUnit::Days, 1).unwrap(), date(2026, 1, 1));
        assert_eq!(step(date(2025, 12, 29), RepeatUnit::Weeks, 2).unwrap(), date(2026, 1, 12));
    }

    #[test]
    fn test_step_out_of_range() {
        let err = step(NaiveDate::MAX, RepeatUnit::Days, 1).unwrap_err();
        assert!(matches!(err, RecurError::OutOfRange { .. }));
    }

    #[test]
    fn test_week_start() {
        // 2025-11-05 is a Wednesday
        assert_eq!(week_start(date(2025, 11, 5)).unwrap(), date(2025, 11, 3));
        assert_eq!(week_start(date(2025, 11, 3)).unwrap(), date(2025, 11, 3));
        assert_eq!(week_start(date(2025, 11, 9)).unwrap(), date(2025, 11, 3));
    }

    #[test]
    fn test_at_time() {
        let t = NaiveTime::from_hms_opt(3, 0, 0).unwrap();
        assert_eq!(at_time(date(2026, 1, 7), t), Utc.with_ymd_and_hms(2026, 1, 7, 3, 0, 0).unwrap());
    }
}
