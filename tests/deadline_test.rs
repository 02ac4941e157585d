//! Deadline engine behaviour: parsing, windows, and the overdue boundary.

use chrono::NaiveDate;
use tenggat::deadline::{
    DeadlineTable, check_overdue, check_overdue_today, deadline_for, evaluate_text, is_overdue,
    parse_date, stage_status, today,
};
use tenggat::model::{AgeCategory, StageKey};

const TABLE: DeadlineTable = DeadlineTable::STANDARD;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

// ---------------------------------------------------------------------------
// Absence never flags
// ---------------------------------------------------------------------------

#[test]
fn blank_text_is_never_overdue() {
    let now = d(2030, 1, 1);
    for stage in StageKey::ALL {
        for age in AgeCategory::ALL {
            for raw in [None, Some(""), Some("   ")] {
                assert!(!check_overdue(&TABLE, raw, stage, age, now));
            }
        }
    }
}

#[test]
fn malformed_text_is_not_overdue() {
    let now = d(2030, 1, 1);
    assert!(!check_overdue(
        &TABLE,
        Some("not-a-date"),
        StageKey::Spdp,
        AgeCategory::Dewasa,
        now
    ));
    assert!(!check_overdue(
        &TABLE,
        Some("NO. B-123/SPDP TGL 01-01-2023"),
        StageKey::Spdp,
        AgeCategory::Dewasa,
        now
    ));
    assert!(evaluate_text(&TABLE, Some("32/01/2023"), StageKey::P21, AgeCategory::Anak, now).is_none());
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

#[test]
fn iso_text_is_year_month_day() {
    assert_eq!(parse_date(Some("2023-01-05")), Some(d(2023, 1, 5)));
}

#[test]
fn ambiguous_text_is_day_first() {
    assert_eq!(parse_date(Some("01-02-2023")), Some(d(2023, 2, 1)));
    assert_eq!(parse_date(Some("01/02/2023")), Some(d(2023, 2, 1)));
}

// ---------------------------------------------------------------------------
// Windows
// ---------------------------------------------------------------------------

#[test]
fn standard_windows_match_the_register_rules() {
    use AgeCategory::*;
    use StageKey::*;

    let expected = [
        (Spdp, 25, 25),
        (BerkasTahap1, 6, 3),
        (P18P19, 10, 7),
        (P21, 12, 10),
        (Tahap2, 7, 5),
    ];
    for (stage, dewasa, anak) in expected {
        assert_eq!(TABLE.window(stage, Dewasa), dewasa, "{stage} Dewasa");
        assert_eq!(TABLE.window(stage, Anak), anak, "{stage} Anak");
    }
}

#[test]
fn every_pair_has_a_positive_window() {
    assert_eq!(TABLE.entries().count(), 10);
    assert!(TABLE.entries().all(|(_, _, days)| days >= 1));
}

// ---------------------------------------------------------------------------
// Boundary: the stage date is day 1, the deadline day is still on time
// ---------------------------------------------------------------------------

#[test]
fn deadline_counts_stage_date_as_day_one() {
    let deadline = deadline_for(&TABLE, d(2023, 1, 1), StageKey::BerkasTahap1, AgeCategory::Dewasa);
    assert_eq!(deadline, Some(d(2023, 1, 6)));
}

#[test]
fn on_deadline_day_is_not_overdue() {
    let stage_date = d(2023, 1, 1);
    let stage = StageKey::BerkasTahap1;
    let age = AgeCategory::Dewasa;

    assert!(!is_overdue(&TABLE, stage_date, stage, age, d(2023, 1, 6)));
    assert!(is_overdue(&TABLE, stage_date, stage, age, d(2023, 1, 7)));
}

#[test]
fn stage_date_itself_and_earlier_are_not_overdue() {
    let stage_date = d(2023, 3, 10);
    for stage in StageKey::ALL {
        assert!(!is_overdue(&TABLE, stage_date, stage, AgeCategory::Anak, stage_date));
        assert!(!is_overdue(&TABLE, stage_date, stage, AgeCategory::Anak, d(2023, 1, 1)));
    }
}

#[test]
fn boundary_holds_through_raw_text() {
    let stage = StageKey::BerkasTahap1;
    let age = AgeCategory::Dewasa;
    for raw in [
        "2023-01-01",
        "01-01-2023",
        "01/01/2023",
        "2023-01-01 00:00:00",
        "01/01/2023 08:15",
    ] {
        assert!(!check_overdue(&TABLE, Some(raw), stage, age, d(2023, 1, 6)), "{raw}");
        assert!(check_overdue(&TABLE, Some(raw), stage, age, d(2023, 1, 7)), "{raw}");
    }
}

#[test]
fn windows_span_month_and_year_ends() {
    // 25-day SPDP window from 20 Dec ends 13 Jan.
    let stage_date = d(2023, 12, 20);
    let deadline = deadline_for(&TABLE, stage_date, StageKey::Spdp, AgeCategory::Dewasa);
    assert_eq!(deadline, Some(d(2024, 1, 13)));
    assert!(!is_overdue(&TABLE, stage_date, StageKey::Spdp, AgeCategory::Dewasa, d(2024, 1, 13)));
    assert!(is_overdue(&TABLE, stage_date, StageKey::Spdp, AgeCategory::Dewasa, d(2024, 1, 14)));
}

// ---------------------------------------------------------------------------
// Age sensitivity
// ---------------------------------------------------------------------------

#[test]
fn p21_eleven_days_on_is_overdue_only_for_anak() {
    let stage_date = d(2023, 5, 1);
    let now = d(2023, 5, 12);

    assert!(is_overdue(&TABLE, stage_date, StageKey::P21, AgeCategory::Anak, now));
    assert!(!is_overdue(&TABLE, stage_date, StageKey::P21, AgeCategory::Dewasa, now));
}

#[test]
fn anak_tahap_1_runs_three_days() {
    let raw = Some("10-07-2024");
    let stage = StageKey::BerkasTahap1;
    assert!(!check_overdue(&TABLE, raw, stage, AgeCategory::Anak, d(2024, 7, 12)));
    assert!(check_overdue(&TABLE, raw, stage, AgeCategory::Anak, d(2024, 7, 13)));
    assert!(!check_overdue(&TABLE, raw, stage, AgeCategory::Dewasa, d(2024, 7, 13)));
}

// ---------------------------------------------------------------------------
// Status detail
// ---------------------------------------------------------------------------

#[test]
fn status_reports_days_remaining() {
    let status = stage_status(&TABLE, d(2023, 1, 1), StageKey::Tahap2, AgeCategory::Anak, d(2023, 1, 3));
    assert_eq!(status.window_days, 5);
    assert_eq!(status.deadline, Some(d(2023, 1, 5)));
    assert_eq!(status.days_remaining, Some(2));
    assert!(!status.overdue);

    let late = stage_status(&TABLE, d(2023, 1, 1), StageKey::Tahap2, AgeCategory::Anak, d(2023, 1, 8));
    assert_eq!(late.days_remaining, Some(-3));
    assert!(late.overdue);
}

#[test]
fn deadline_past_calendar_end_is_not_overdue() {
    let stage_date = NaiveDate::MAX;
    assert_eq!(deadline_for(&TABLE, stage_date, StageKey::Spdp, AgeCategory::Dewasa), None);
    assert!(!is_overdue(&TABLE, stage_date, StageKey::Spdp, AgeCategory::Dewasa, NaiveDate::MAX));
}

// ---------------------------------------------------------------------------
// Wall clock
// ---------------------------------------------------------------------------

#[test]
fn today_variant_never_flags_a_blank_date() {
    for stage in StageKey::ALL {
        assert!(!check_overdue_today(&TABLE, None, stage, AgeCategory::Dewasa));
    }
}

#[test]
fn today_variant_flags_a_long_lapsed_date() {
    assert!(today() > d(2000, 1, 1));
    assert!(check_overdue_today(&TABLE, Some("01-01-2000"), StageKey::Spdp, AgeCategory::Dewasa));
    assert!(check_overdue_today(&TABLE, Some("2000-01-01"), StageKey::Tahap2, AgeCategory::Anak));
}

// ---------------------------------------------------------------------------
// Purity
// ---------------------------------------------------------------------------

#[test]
fn repeated_checks_agree() {
    let now = d(2023, 2, 1);
    let raw = Some("05/01/2023");
    let first = check_overdue(&TABLE, raw, StageKey::P18P19, AgeCategory::Dewasa, now);
    let second = check_overdue(&TABLE, raw, StageKey::P18P19, AgeCategory::Dewasa, now);
    assert_eq!(first, second);
    assert!(first);
}

#[test]
fn concurrent_checks_need_no_synchronization() {
    let now = d(2023, 1, 20);
    let handles: Vec<_> = (0..8)
        .map(|_| {
            std::thread::spawn(move || {
                StageKey::ALL
                    .into_iter()
                    .map(|stage| check_overdue(&TABLE, Some("2023-01-01"), stage, AgeCategory::Anak, now))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let results: Vec<Vec<bool>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(results.windows(2).all(|w| w[0] == w[1]));
    // SPDP (25 days) still open on 20 Jan; the rest have lapsed.
    assert_eq!(results[0], vec![false, true, true, true, true]);
}
