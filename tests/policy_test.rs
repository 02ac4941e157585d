//! Deadline policy files: complete tables load, gaps are rejected at load.

use std::io::Write as _;

use tenggat::deadline::{DeadlineTable, check_overdue};
use tenggat::error::Error;
use tenggat::model::{AgeCategory, StageKey};

const FULL_POLICY: &str = r#"
[stages.spdp]
dewasa = 30
anak = 20

[stages.berkas_tahap_1]
dewasa = 6
anak = 3

[stages.p18_p19]
dewasa = 10
anak = 7

[stages.p21]
dewasa = 14
anak = 10

[stages.tahap_2]
dewasa = 7
anak = 5
"#;

#[test]
fn complete_policy_loads() {
    let table = DeadlineTable::from_toml_str(FULL_POLICY).unwrap();
    assert_eq!(table.window(StageKey::Spdp, AgeCategory::Dewasa), 30);
    assert_eq!(table.window(StageKey::Spdp, AgeCategory::Anak), 20);
    assert_eq!(table.window(StageKey::P21, AgeCategory::Dewasa), 14);
    assert_ne!(table, DeadlineTable::STANDARD);
}

#[test]
fn loaded_policy_drives_evaluation() {
    let table = DeadlineTable::from_toml_str(FULL_POLICY).unwrap();
    let stage_date = Some("2023-01-01");
    let now = chrono::NaiveDate::from_ymd_opt(2023, 1, 27).unwrap();

    // Standard SPDP window (25) ended 25 Jan; this policy's 30 ends 30 Jan.
    assert!(check_overdue(&DeadlineTable::STANDARD, stage_date, StageKey::Spdp, AgeCategory::Dewasa, now));
    assert!(!check_overdue(&table, stage_date, StageKey::Spdp, AgeCategory::Dewasa, now));
}

#[test]
fn missing_stage_is_rejected() {
    let policy = FULL_POLICY.replace("[stages.tahap_2]\ndewasa = 7\nanak = 5\n", "");
    let err = DeadlineTable::from_toml_str(&policy).unwrap_err();
    match err {
        Error::Policy(msg) => assert!(msg.contains("tahap_2"), "{msg}"),
        other => panic!("expected Policy error, got {other:?}"),
    }
}

#[test]
fn missing_age_window_is_rejected() {
    let policy = FULL_POLICY.replace("[stages.p21]\ndewasa = 14\nanak = 10", "[stages.p21]\ndewasa = 14");
    let err = DeadlineTable::from_toml_str(&policy).unwrap_err();
    match err {
        Error::Policy(msg) => assert!(msg.contains("p21") && msg.contains("Anak"), "{msg}"),
        other => panic!("expected Policy error, got {other:?}"),
    }
}

#[test]
fn unknown_stage_is_rejected() {
    let policy = format!("{FULL_POLICY}\n[stages.limpah_pn]\ndewasa = 1\nanak = 1\n");
    assert!(matches!(
        DeadlineTable::from_toml_str(&policy),
        Err(Error::Policy(_))
    ));
}

#[test]
fn zero_day_window_is_rejected() {
    let policy = FULL_POLICY.replace("dewasa = 6", "dewasa = 0");
    assert!(matches!(
        DeadlineTable::from_toml_str(&policy),
        Err(Error::Policy(_))
    ));
}

#[test]
fn unknown_keys_are_rejected() {
    let policy = FULL_POLICY.replace("anak = 3", "anak = 3\nremaja = 4");
    assert!(matches!(
        DeadlineTable::from_toml_str(&policy),
        Err(Error::Policy(_))
    ));
}

#[test]
fn load_reads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(FULL_POLICY.as_bytes()).unwrap();

    let table = DeadlineTable::load(file.path()).unwrap();
    assert_eq!(table.window(StageKey::Spdp, AgeCategory::Dewasa), 30);
}

#[test]
fn load_of_missing_file_is_a_policy_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = DeadlineTable::load(&dir.path().join("absent.toml"));
    assert!(matches!(result, Err(Error::Policy(_))));
}
