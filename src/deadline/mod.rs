//! Deadline engine: free-form stage date text in, overdue flag out.
//!
//! Pure and stateless. `now` is always a parameter; only
//! [`check_overdue_today`] reads the clock.

pub mod evaluate;
pub mod parse;
pub mod policy;

pub use evaluate::{StageStatus, deadline_for, is_overdue, stage_status};
pub use parse::parse_date;
pub use policy::DeadlineTable;

use chrono::{Local, NaiveDate};
use tracing::trace;

use crate::model::{AgeCategory, StageKey};

/// Overdue flag for one stage field.
///
/// Blank or unparseable text is never overdue.
pub fn check_overdue(
    table: &DeadlineTable,
    raw: Option<&str>,
    stage: StageKey,
    age: AgeCategory,
    now: NaiveDate,
) -> bool {
    let Some(stage_date) = parse_date(raw) else {
        return false;
    };
    let overdue = is_overdue(table, stage_date, stage, age, now);
    trace!(%stage, %age, %stage_date, %now, overdue, "stage evaluated");
    overdue
}

/// [`check_overdue`] against the local calendar date.
pub fn check_overdue_today(
    table: &DeadlineTable,
    raw: Option<&str>,
    stage: StageKey,
    age: AgeCategory,
) -> bool {
    check_overdue(table, raw, stage, age, today())
}

/// Current local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// [`stage_status`] for raw text; `None` when there is no usable date.
pub fn evaluate_text(
    table: &DeadlineTable,
    raw: Option<&str>,
    stage: StageKey,
    age: AgeCategory,
    now: NaiveDate,
) -> Option<StageStatus> {
    parse_date(raw).map(|date| stage_status(table, date, stage, age, now))
}
