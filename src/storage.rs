//! SQLite storage layer.
//!
//! Holds the case register. Stage dates are stored as the text the clerk
//! entered; interpretation happens in the deadline engine on read.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use tracing::info;

use crate::error::{Error, Result};
use crate::model::*;

/// Storage backend. Owns the SQLite connection.
pub struct Storage {
    conn: Connection,
}

const CASE_COLUMNS: &str = "id, nama_tersangka, pasal, kategori_usia, spdp, berkas_tahap_1, \
     p18_p19, p21, tahap_2, limpah_pn, keterangan, created_at";

impl Storage {
    /// Open or create a database at the given path.
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        let storage = Self { conn };
        storage.init()?;
        Ok(storage)
    }

    /// Create an in-memory database (for testing).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let storage = Self { conn };
        storage.init()?;
        Ok(storage)
    }

    fn init(&self) -> Result<()> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS cases (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                nama_tersangka  TEXT NOT NULL,
                pasal           TEXT,
                kategori_usia   TEXT NOT NULL DEFAULT 'Dewasa',
                spdp            TEXT,
                berkas_tahap_1  TEXT,
                p18_p19         TEXT,
                p21             TEXT,
                tahap_2         TEXT,
                limpah_pn       TEXT,
                keterangan      TEXT,
                created_at      TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_cases_created ON cases(created_at DESC);
            ",
        )?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Cases
    // -----------------------------------------------------------------------

    /// Insert a new case. Returns its id.
    pub fn insert_case(&mut self, new: &NewCase, created_at: DateTime<Utc>) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO cases (nama_tersangka, pasal, kategori_usia, spdp, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                new.nama_tersangka,
                new.pasal,
                new.kategori_usia.as_str(),
                new.spdp,
                created_at.to_rfc3339_opts(SecondsFormat::Micros, true),
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        info!(case_id = id, "case registered");
        Ok(id)
    }

    /// Get a case by id.
    pub fn get_case(&self, id: i64) -> Result<Case> {
        self.conn
            .query_row(
                &format!("SELECT {CASE_COLUMNS} FROM cases WHERE id = ?1"),
                params![id],
                row_to_case,
            )
            .optional()?
            .ok_or(Error::NotFound(id))
    }

    /// All cases, newest first.
    pub fn list_cases(&self) -> Result<Vec<Case>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {CASE_COLUMNS} FROM cases ORDER BY created_at DESC, id DESC"
        ))?;

        let cases = stmt
            .query_map([], row_to_case)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(cases)
    }

    /// Overwrite one editable field. `None` clears it.
    pub fn update_field(&mut self, id: i64, field: CaseField, value: Option<&str>) -> Result<()> {
        // Column names come from the closed CaseField set.
        let changed = self.conn.execute(
            &format!("UPDATE cases SET {} = ?1 WHERE id = ?2", field.column()),
            params![value, id],
        )?;
        if changed == 0 {
            return Err(Error::NotFound(id));
        }
        info!(case_id = id, %field, "case field updated");
        Ok(())
    }

    /// Delete a case.
    pub fn delete_case(&mut self, id: i64) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM cases WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(Error::NotFound(id));
        }
        info!(case_id = id, "case deleted");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Row parsing
// ---------------------------------------------------------------------------

fn row_to_case(row: &rusqlite::Row) -> rusqlite::Result<Case> {
    let kategori: Option<String> = row.get(3)?;
    let created_str: String = row.get(11)?;

    let created_at = DateTime::parse_from_rfc3339(&created_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(11, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(Case {
        id: row.get(0)?,
        nama_tersangka: row.get(1)?,
        pasal: row.get(2)?,
        kategori_usia: AgeCategory::from_label(kategori.as_deref()),
        spdp: row.get(4)?,
        berkas_tahap_1: row.get(5)?,
        p18_p19: row.get(6)?,
        p21: row.get(7)?,
        tahap_2: row.get(8)?,
        limpah_pn: row.get(9)?,
        keterangan: row.get(10)?,
        created_at,
    })
}
