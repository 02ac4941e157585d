//! Overdue evaluation for a parsed stage date.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use super::policy::DeadlineTable;
use crate::model::{AgeCategory, StageKey};

/// Last day of the window. The stage date itself is day 1, so a 6-day
/// window starting 1 January ends 6 January.
///
/// `None` only if the deadline falls outside chrono's calendar range.
pub fn deadline_for(
    table: &DeadlineTable,
    stage_date: NaiveDate,
    stage: StageKey,
    age: AgeCategory,
) -> Option<NaiveDate> {
    let window = table.window(stage, age);
    stage_date.checked_add_days(Days::new(u64::from(window.saturating_sub(1))))
}

/// Whether `now` is past the stage's deadline. The deadline day itself is
/// still on time.
pub fn is_overdue(
    table: &DeadlineTable,
    stage_date: NaiveDate,
    stage: StageKey,
    age: AgeCategory,
    now: NaiveDate,
) -> bool {
    deadline_for(table, stage_date, stage, age).is_some_and(|deadline| now > deadline)
}

/// Full evaluation of one stage, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageStatus {
    pub stage: StageKey,
    pub age: AgeCategory,
    pub window_days: u32,
    pub stage_date: NaiveDate,
    pub deadline: Option<NaiveDate>,
    /// Days from `now` to the deadline. Zero on the deadline day, negative
    /// once overdue.
    pub days_remaining: Option<i64>,
    pub overdue: bool,
}

pub fn stage_status(
    table: &DeadlineTable,
    stage_date: NaiveDate,
    stage: StageKey,
    age: AgeCategory,
    now: NaiveDate,
) -> StageStatus {
    let deadline = deadline_for(table, stage_date, stage, age);
    StageStatus {
        stage,
        age,
        window_days: table.window(stage, age),
        stage_date,
        deadline,
        days_remaining: deadline.map(|d| d.signed_duration_since(now).num_days()),
        overdue: deadline.is_some_and(|d| now > d),
    }
}
