//! Core data model.
//!
//! A case is one suspect's file as it moves through the prosecution stages.
//! Each stage holds the date text exactly as the clerk typed or imported it;
//! nothing here interprets those dates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::Error;

// ---------------------------------------------------------------------------
// Stage
// ---------------------------------------------------------------------------

/// A procedural stage with a deadline window. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageKey {
    /// Surat Pemberitahuan Dimulainya Penyidikan: case intake.
    #[serde(rename = "spdp")]
    Spdp,
    /// First case-file submission.
    #[serde(rename = "berkas_tahap_1")]
    BerkasTahap1,
    /// File returned as incomplete (P-18) with instructions (P-19).
    #[serde(rename = "p18_p19")]
    P18P19,
    /// File declared complete.
    #[serde(rename = "p21")]
    P21,
    /// Suspect and evidence handed over.
    #[serde(rename = "tahap_2")]
    Tahap2,
}

impl StageKey {
    /// Every stage, in procedural order.
    pub const ALL: [StageKey; 5] = [
        StageKey::Spdp,
        StageKey::BerkasTahap1,
        StageKey::P18P19,
        StageKey::P21,
        StageKey::Tahap2,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StageKey::Spdp => "spdp",
            StageKey::BerkasTahap1 => "berkas_tahap_1",
            StageKey::P18P19 => "p18_p19",
            StageKey::P21 => "p21",
            StageKey::Tahap2 => "tahap_2",
        }
    }

    /// Column heading used on the case register.
    pub fn label(self) -> &'static str {
        match self {
            StageKey::Spdp => "SPDP",
            StageKey::BerkasTahap1 => "BERKAS TAHAP I",
            StageKey::P18P19 => "P-18 / P-19",
            StageKey::P21 => "P-21",
            StageKey::Tahap2 => "TAHAP II",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for StageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Strict: an unknown stage name is a caller bug and is never defaulted.
impl FromStr for StageKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StageKey::ALL
            .into_iter()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| Error::UnknownStage(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Age category
// ---------------------------------------------------------------------------

/// Age category of the suspect. Minors get shorter windows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeCategory {
    #[default]
    Dewasa,
    Anak,
}

impl AgeCategory {
    pub const ALL: [AgeCategory; 2] = [AgeCategory::Dewasa, AgeCategory::Anak];

    pub fn as_str(self) -> &'static str {
        match self {
            AgeCategory::Dewasa => "Dewasa",
            AgeCategory::Anak => "Anak",
        }
    }

    /// Lenient reading of a stored label. Blank or unrecognized text
    /// falls back to `Dewasa`.
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            Some(s) if s.trim().eq_ignore_ascii_case("anak") => AgeCategory::Anak,
            _ => AgeCategory::Dewasa,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for AgeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Strict parse for operator input, where a typo should be reported.
impl FromStr for AgeCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dewasa" => Ok(AgeCategory::Dewasa),
            "anak" => Ok(AgeCategory::Anak),
            _ => Err(Error::UnknownAgeCategory(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Case
// ---------------------------------------------------------------------------

/// One row of the case register.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Case {
    pub id: i64,

    /// Suspect name.
    pub nama_tersangka: String,

    /// Charged article(s), free text.
    pub pasal: Option<String>,

    pub kategori_usia: AgeCategory,

    // Stage date texts, verbatim. Often blank for stages not reached yet,
    // sometimes carrying letter numbers around the date.
    pub spdp: Option<String>,
    pub berkas_tahap_1: Option<String>,
    pub p18_p19: Option<String>,
    pub p21: Option<String>,
    pub tahap_2: Option<String>,

    /// Transfer to the district court. Tracked, but has no deadline window.
    pub limpah_pn: Option<String>,

    pub keterangan: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl Case {
    /// Raw date text recorded for a stage.
    pub fn stage_text(&self, stage: StageKey) -> Option<&str> {
        match stage {
            StageKey::Spdp => self.spdp.as_deref(),
            StageKey::BerkasTahap1 => self.berkas_tahap_1.as_deref(),
            StageKey::P18P19 => self.p18_p19.as_deref(),
            StageKey::P21 => self.p21.as_deref(),
            StageKey::Tahap2 => self.tahap_2.as_deref(),
        }
    }
}

// ---------------------------------------------------------------------------
// Editable fields
// ---------------------------------------------------------------------------

/// Fields that may be changed after a case is registered.
///
/// Suspect name, article and SPDP are fixed at intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseField {
    BerkasTahap1,
    P18P19,
    P21,
    Tahap2,
    LimpahPn,
    Keterangan,
    KategoriUsia,
}

impl CaseField {
    pub const ALL: [CaseField; 7] = [
        CaseField::BerkasTahap1,
        CaseField::P18P19,
        CaseField::P21,
        CaseField::Tahap2,
        CaseField::LimpahPn,
        CaseField::Keterangan,
        CaseField::KategoriUsia,
    ];

    /// Column name in the `cases` table.
    pub fn column(self) -> &'static str {
        match self {
            CaseField::BerkasTahap1 => "berkas_tahap_1",
            CaseField::P18P19 => "p18_p19",
            CaseField::P21 => "p21",
            CaseField::Tahap2 => "tahap_2",
            CaseField::LimpahPn => "limpah_pn",
            CaseField::Keterangan => "keterangan",
            CaseField::KategoriUsia => "kategori_usia",
        }
    }

    /// The stage this field dates, if it has a deadline window.
    pub fn stage(self) -> Option<StageKey> {
        match self {
            CaseField::BerkasTahap1 => Some(StageKey::BerkasTahap1),
            CaseField::P18P19 => Some(StageKey::P18P19),
            CaseField::P21 => Some(StageKey::P21),
            CaseField::Tahap2 => Some(StageKey::Tahap2),
            CaseField::LimpahPn | CaseField::Keterangan | CaseField::KategoriUsia => None,
        }
    }
}

impl std::fmt::Display for CaseField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column())
    }
}

impl FromStr for CaseField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CaseField::ALL
            .into_iter()
            .find(|field| field.column() == s)
            .ok_or_else(|| Error::FieldNotEditable(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Builder for registering a new case.
pub struct NewCase {
    pub(crate) nama_tersangka: String,
    pub(crate) pasal: Option<String>,
    pub(crate) spdp: Option<String>,
    pub(crate) kategori_usia: AgeCategory,
}

impl NewCase {
    pub fn new(nama_tersangka: impl Into<String>) -> Self {
        Self {
            nama_tersangka: nama_tersangka.into(),
            pasal: None,
            spdp: None,
            kategori_usia: AgeCategory::Dewasa,
        }
    }

    pub fn pasal(mut self, pasal: impl Into<String>) -> Self {
        self.pasal = Some(pasal.into());
        self
    }

    pub fn spdp(mut self, spdp: impl Into<String>) -> Self {
        self.spdp = Some(spdp.into());
        self
    }

    pub fn kategori_usia(mut self, age: AgeCategory) -> Self {
        self.kategori_usia = age;
        self
    }

    /// Shorthand for a minor suspect.
    pub fn anak(self) -> Self {
        self.kategori_usia(AgeCategory::Anak)
    }
}
