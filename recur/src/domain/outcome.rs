//! Evaluation result returned for every completion

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outcome of evaluating one completion
///
/// `should_terminate` is true exactly when there is no next due date. The
/// constructors are the only way to build one, so the pair cannot disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    should_terminate: bool,
    next_due_date: Option<DateTime<Utc>>,
    new_occurrence_count: u32,
}

impl EvaluationResult {
    /// The series continues with `next_due_date`
    pub fn proceed(next_due_date: DateTime<Utc>, new_occurrence_count: u32) -> Self {
        Self {
            should_terminate: false,
            next_due_date: Some(next_due_date),
            new_occurrence_count,
        }
    }

    /// The series ended with this completion
    pub fn terminated(new_occurrence_count: u32) -> Self {
        Self {
            should_terminate: true,
            next_due_date: None,
            new_occurrence_count,
        }
    }

    pub fn should_terminate(&self) -> bool {
        self.should_terminate
    }

    pub fn next_due_date(&self) -> Option<DateTime<Utc>> {
        self.next_due_date
    }

    pub fn new_occurrence_count(&self) -> u32 {
        self.new_occurrence_count
    }
}
