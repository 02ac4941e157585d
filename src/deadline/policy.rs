//! Deadline windows per stage and age category.
//!
//! The table is a fixed array indexed by `(StageKey, AgeCategory)`, so a
//! lookup can never miss. Tables read from a policy file are checked for
//! completeness when loaded; a gap is an error at startup, not a silent
//! default at evaluation time.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::{AgeCategory, StageKey};

/// Window lengths in calendar days, counting the stage date as day 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlineTable {
    // [stage][age], indexed by StageKey::index() and AgeCategory::index().
    windows: [[u32; 2]; 5],
}

impl DeadlineTable {
    /// Statutory windows: `[Dewasa, Anak]` per stage.
    pub const STANDARD: DeadlineTable = DeadlineTable {
        windows: [
            [25, 25], // spdp
            [6, 3],   // berkas_tahap_1
            [10, 7],  // p18_p19
            [12, 10], // p21
            [7, 5],   // tahap_2
        ],
    };

    /// Window in days for a stage and age category.
    pub fn window(&self, stage: StageKey, age: AgeCategory) -> u32 {
        self.windows[stage.index()][age.index()]
    }

    /// Every `(stage, age, days)` triple, in procedural order.
    pub fn entries(&self) -> impl Iterator<Item = (StageKey, AgeCategory, u32)> + '_ {
        StageKey::ALL.into_iter().flat_map(move |stage| {
            AgeCategory::ALL
                .into_iter()
                .map(move |age| (stage, age, self.window(stage, age)))
        })
    }

    /// Load a policy file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Policy(format!("cannot read policy file {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
            .map_err(|e| Error::Policy(format!("{}: {e}", path.display())))
    }

    /// Parse and validate a TOML policy:
    ///
    /// ```toml
    /// [stages.berkas_tahap_1]
    /// dewasa = 6
    /// anak = 3
    /// ```
    ///
    /// Every stage must be listed with both categories and a window of at
    /// least one day.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: PolicyFile =
            toml::from_str(content).map_err(|e| Error::Policy(format!("bad policy: {e}")))?;

        let mut windows = [[0u32; 2]; 5];
        let mut seen = [false; 5];

        for (name, entry) in &file.stages {
            let stage: StageKey = name
                .parse()
                .map_err(|_| Error::Policy(format!("unknown stage in policy: {name}")))?;
            for age in AgeCategory::ALL {
                let days = entry.get(age).ok_or_else(|| {
                    Error::Policy(format!("stage {stage} has no {age} window"))
                })?;
                if days == 0 {
                    return Err(Error::Policy(format!(
                        "stage {stage} {age} window must be at least 1 day"
                    )));
                }
                windows[stage.index()][age.index()] = days;
            }
            seen[stage.index()] = true;
        }

        if let Some(missing) = StageKey::ALL.into_iter().find(|s| !seen[s.index()]) {
            return Err(Error::Policy(format!("stage {missing} missing from policy")));
        }

        Ok(Self { windows })
    }
}

impl Default for DeadlineTable {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PolicyFile {
    stages: BTreeMap<String, WindowEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct WindowEntry {
    dewasa: Option<u32>,
    anak: Option<u32>,
}

impl WindowEntry {
    fn get(&self, age: AgeCategory) -> Option<u32> {
        match age {
            AgeCategory::Dewasa => self.dewasa,
            AgeCategory::Anak => self.anak,
        }
    }
}
