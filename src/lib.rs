//! # tenggat
//!
//! Deadline tracking for prosecutor's office case records.
//!
//! Each case moves through fixed procedural stages (SPDP, Berkas Tahap I,
//! P-18/P-19, P-21, Tahap II). The [`deadline`] module decides whether a
//! stage is overdue from its loosely formatted date text and the suspect's
//! age category. [`docket`] joins that engine with a SQLite record store.

pub mod config;
pub mod deadline;
pub mod docket;
pub mod error;
pub mod model;
pub mod storage;
pub mod telemetry;
