//! Data models for the normalized weekly schedule.
//!
//! This module defines the structures serialized into `schedule.json`:
//! - [`Program`]: one scheduled broadcast segment (title + start time)
//! - [`SourceResult`]: one broadcaster's program list plus its storage prefix
//! - [`Schedule`]: the top-level two-source document
//!
//! plus [`FetchOutcome`], the tagged per-source result each scraper returns
//! so the orchestrator can tell "fetch failed" apart from "no programs".

use serde::{Deserialize, Serialize};

/// One scheduled broadcast segment.
///
/// `name` is whitespace-normalized and non-empty; `time` is a validated
/// `H:MM`/`HH:MM` start time in the broadcaster's local time. Within one
/// source's list, names are unique and times ascend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Program {
    /// Display title of the program.
    pub name: String,
    /// Start time, `H:MM` or `HH:MM`, source-local.
    pub time: String,
}

/// One broadcaster's normalized output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SourceResult {
    /// Fixed storage-path prefix for downstream consumers, e.g. `sbs/powerfm`.
    /// Hardcoded per source, never derived from fetched data.
    pub prefix: String,
    /// Programs in ascending start-time order; empty when the fetch failed.
    pub programs: Vec<Program>,
}

impl SourceResult {
    /// Empty result carrying only the source's fixed prefix. This is what
    /// a failed fetch degrades to.
    pub fn empty(prefix: &str) -> Self {
        SourceResult {
            prefix: prefix.to_string(),
            programs: Vec::new(),
        }
    }
}

/// The top-level document written to `schedule.json`.
///
/// A struct rather than a map so serialization order is stable: `sbs`
/// first, then `kbs`. Built fresh every run; the previous file is fully
/// overwritten and never read back.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Schedule {
    pub sbs: SourceResult,
    pub kbs: SourceResult,
}

/// Tagged result of one scraper run.
///
/// A transport or shape failure is a value here, not an error type: it
/// never propagates past the scraper boundary and never affects the other
/// source. The orchestrator logs the reason and writes an empty list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The fetch and parse succeeded; the list may legitimately be empty.
    Fetched(Vec<Program>),
    /// Transport or shape failure, with a human-readable reason.
    Failed(String),
}

impl FetchOutcome {
    /// Collapse into a [`SourceResult`], discarding any failure reason.
    pub fn into_source_result(self, prefix: &str) -> SourceResult {
        match self {
            FetchOutcome::Fetched(programs) => SourceResult {
                prefix: prefix.to_string(),
                programs,
            },
            FetchOutcome::Failed(_) => SourceResult::empty(prefix),
        }
    }
}
