//! Recur - recurring-task scheduling engine
//!
//! Given a task's repetition rule and the moment it was completed, computes
//! the next due date or decides that the series has ended. The engine is a
//! set of pure functions: no I/O, no wall-clock reads, no shared state.
//!
//! # Modules
//!
//! - [`domain`] - Cadences, custom patterns, end conditions and results
//! - [`engine`] - Simple and custom evaluators plus the termination checker
//! - [`config`] - Configuration for the `recur` binary
//! - [`cli`] - Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use recur::{AnchorMode, Completion, RepeatRule, RepeatingCadence};
//!
//! let rule = RepeatRule::simple(RepeatingCadence::Monthly);
//! let completion = Completion::new(Some(due), completed_at, AnchorMode::DueDate).with_count(4);
//! let result = recur::evaluate(&rule, &completion)?;
//! ```
//!
//! All calendar arithmetic is done on UTC calendar fields. A due time stored
//! as 03:00 UTC stays 03:00 UTC on the next occurrence, whatever local day it
//! represented.

pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;

pub use domain::{
    AnchorMode, Completion, CustomRepeatingPattern, EndCondition, EndConditionKind, EvaluationResult, RepeatRule,
    RepeatUnit, RepeatingCadence, Weekday, WeekdaySet,
};
pub use engine::{check_end_condition, evaluate, next_custom_occurrence, next_simple_occurrence, preview};
pub use error::RecurError;

/// Default number of occurrences shown by `recur preview`
pub const DEFAULT_PREVIEW_LIMIT: usize = 10;
