//! Error types for tenggat.
//!
//! A missing or unparseable stage date is not an error anywhere in this
//! crate; it evaluates to "not overdue".

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("case not found: {0}")]
    NotFound(i64),

    #[error("unknown stage: {0}")]
    UnknownStage(String),

    #[error("unknown age category: {0}")]
    UnknownAgeCategory(String),

    #[error("field not editable: {0}")]
    FieldNotEditable(String),

    #[error("deadline policy error: {0}")]
    Policy(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
