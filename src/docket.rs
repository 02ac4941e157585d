//! The docket: case register plus deadline evaluation.
//!
//! This is what a presentation layer talks to. It owns the store and the
//! deadline table; the deadline engine itself never sees the store.

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::debug;

use crate::deadline::{self, DeadlineTable, StageStatus};
use crate::error::Result;
use crate::model::*;
use crate::storage::Storage;

/// Case register with its deadline policy.
pub struct Docket {
    storage: Storage,
    table: DeadlineTable,
}

/// Deadline view of one stage cell.
#[derive(Debug, Clone, Serialize)]
pub struct StageReview {
    pub stage: StageKey,
    /// Text as stored.
    pub raw: Option<String>,
    /// Present when the text parsed to a date.
    pub status: Option<StageStatus>,
    pub overdue: bool,
}

/// Deadline view of a whole case.
#[derive(Debug, Clone, Serialize)]
pub struct CaseReview {
    pub case_id: i64,
    pub nama_tersangka: String,
    pub kategori_usia: AgeCategory,
    pub stages: Vec<StageReview>,
}

impl CaseReview {
    pub fn has_overdue(&self) -> bool {
        self.stages.iter().any(|s| s.overdue)
    }

    pub fn overdue_stages(&self) -> impl Iterator<Item = StageKey> + '_ {
        self.stages.iter().filter(|s| s.overdue).map(|s| s.stage)
    }
}

impl Docket {
    /// Docket with in-memory storage and the standard table (for testing).
    pub fn in_memory() -> Result<Self> {
        Ok(Self {
            storage: Storage::in_memory()?,
            table: DeadlineTable::STANDARD,
        })
    }

    /// Docket backed by a file.
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
        Ok(Self {
            storage: Storage::open(path)?,
            table: DeadlineTable::STANDARD,
        })
    }

    /// Replace the deadline table.
    pub fn with_table(mut self, table: DeadlineTable) -> Self {
        self.table = table;
        self
    }

    pub fn table(&self) -> &DeadlineTable {
        &self.table
    }

    /// Register a case. Returns it as stored.
    pub fn add_case(&mut self, new: NewCase) -> Result<Case> {
        let id = self.storage.insert_case(&new, Utc::now())?;
        self.storage.get_case(id)
    }

    pub fn get(&self, id: i64) -> Result<Case> {
        self.storage.get_case(id)
    }

    /// All cases, newest first.
    pub fn list(&self) -> Result<Vec<Case>> {
        self.storage.list_cases()
    }

    /// Edit one cell. Blank text clears the field. The age category must be
    /// spelled out (`Dewasa` or `Anak`); a typo is rejected, not defaulted.
    pub fn update_field(&mut self, id: i64, field: CaseField, value: Option<&str>) -> Result<Case> {
        let value = value.map(str::trim).filter(|v| !v.is_empty());

        let stored = match (field, value) {
            (CaseField::KategoriUsia, Some(v)) => Some(v.parse::<AgeCategory>()?.as_str()),
            (CaseField::KategoriUsia, None) => Some(AgeCategory::default().as_str()),
            (_, v) => v,
        };

        self.storage.update_field(id, field, stored)?;
        self.storage.get_case(id)
    }

    pub fn delete(&mut self, id: i64) -> Result<()> {
        self.storage.delete_case(id)
    }

    /// Evaluate every stage of a case as of `today`.
    pub fn review(&self, case: &Case, today: NaiveDate) -> CaseReview {
        let age = case.kategori_usia;
        let stages = StageKey::ALL
            .into_iter()
            .map(|stage| {
                let raw = case.stage_text(stage);
                let status = deadline::evaluate_text(&self.table, raw, stage, age, today);
                StageReview {
                    stage,
                    raw: raw.map(str::to_string),
                    overdue: deadline::check_overdue(&self.table, raw, stage, age, today),
                    status,
                }
            })
            .collect();

        CaseReview {
            case_id: case.id,
            nama_tersangka: case.nama_tersangka.clone(),
            kategori_usia: age,
            stages,
        }
    }

    /// Reviews of every case with at least one overdue stage.
    pub fn overdue(&self, today: NaiveDate) -> Result<Vec<CaseReview>> {
        let cases = self.storage.list_cases()?;
        let total = cases.len();

        let flagged: Vec<CaseReview> = cases
            .iter()
            .map(|case| self.review(case, today))
            .filter(CaseReview::has_overdue)
            .collect();

        debug!(%today, total, flagged = flagged.len(), "overdue scan");
        Ok(flagged)
    }
}
