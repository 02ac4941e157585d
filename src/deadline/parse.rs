//! Stage date parsing.
//!
//! Two branches, tried in order:
//!
//! 1. Strict ISO: exactly `YYYY-MM-DD`, read as year-month-day.
//! 2. Day-first: three numeric tokens joined by one separator kind
//!    (`-`, `/`, `.` or whitespace), read as day-month-year. `01/02/2023`
//!    is 1 February. A four-digit leading token cannot be a day, so
//!    `2023/02/01` is read year-first.
//!
//! A trailing time of day (`HH:MM` or `HH:MM:SS`, as spreadsheet exports
//! and clerks append it) is dropped before either branch runs.
//!
//! Failure is `None`. A blank or garbled stage date is normal data.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

static ISO_DATE: LazyLock<Regex> = LazyLock::new(|| compile_regex(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$"));

static DATE_TIME: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex(
        r"^([0-9]{1,4}[-/.][0-9]{1,2}[-/.][0-9]{2,4})[ T]([01]?[0-9]|2[0-3]):[0-5][0-9](:[0-5][0-9])?$",
    )
});

fn compile_regex(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(regex) => regex,
        // Patterns are literals; covered by the tests below.
        Err(err) => panic!("invalid regex pattern `{pattern}`: {err}"),
    }
}

/// Parse a stage's raw date text into a calendar date.
pub fn parse_date(text: Option<&str>) -> Option<NaiveDate> {
    let text = text?.trim();
    if text.is_empty() {
        return None;
    }

    let text = match DATE_TIME.captures(text) {
        Some(caps) => caps.get(1).map_or(text, |m| m.as_str()),
        None => text,
    };

    let parsed = if ISO_DATE.is_match(text) {
        NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
    } else {
        parse_day_first(text)
    };

    if parsed.is_none() {
        trace!(text, "stage date not parseable");
    }
    parsed
}

fn parse_day_first(text: &str) -> Option<NaiveDate> {
    let [first, second, third] = split_numeric(text)?;

    if first.len() == 4 {
        if second.len() > 2 || third.len() > 2 {
            return None;
        }
        return ymd(first, second, third);
    }

    if first.len() > 2 || second.len() > 2 {
        return None;
    }
    let year = match third.len() {
        4 => third.parse().ok()?,
        2 => 2000 + third.parse::<i32>().ok()?,
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year, second.parse().ok()?, first.parse().ok()?)
}

fn ymd(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

/// Split into exactly three all-digit tokens sharing one separator kind.
fn split_numeric(text: &str) -> Option<[&str; 3]> {
    let sep = text.chars().find(|c| !c.is_ascii_digit())?;

    let tokens: Vec<&str> = if sep.is_whitespace() {
        text.split_whitespace().collect()
    } else if matches!(sep, '-' | '/' | '.') {
        text.split(sep).collect()
    } else {
        return None;
    };

    let [first, second, third] = tokens.as_slice() else {
        return None;
    };
    let all_digits = [first, second, third]
        .iter()
        .all(|t| !t.is_empty() && t.bytes().all(|b| b.is_ascii_digit()));

    all_digits.then_some([*first, *second, *third])
}
