//! Title and clock-time normalization shared by both schedule scrapers.
//!
//! Upstream schedule feeds are messy: titles carry stray whitespace and
//! start times arrive either as `H:MM`/`HH:MM` clock strings or as 4-digit
//! `HHMM` codes. This module provides the small set of pure functions both
//! scrapers use to clean titles and validate or convert start times.
//!
//! Times are passed through in the broadcaster's stated local time; no
//! timezone conversion happens anywhere in the pipeline.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches `H:MM` or `HH:MM`. Pattern-only: minutes are not range-checked,
/// so `"09:99"` passes. Upstream has never produced out-of-range minutes;
/// keeping the check loose mirrors the feeds' own behavior.
static CLOCK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{1,2}:\d{2}$").unwrap());

/// Matches a 4-digit `HHMM` start-time code, e.g. `"0900"`.
static HHMM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}$").unwrap());

/// Normalize a raw program title.
///
/// Collapses internal runs of whitespace to single ASCII spaces and trims
/// leading/trailing whitespace. The empty string stays empty.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_title("  Show   Title  "), "Show Title");
/// ```
pub fn normalize_title(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Check whether a string is an acceptable `H:MM`/`HH:MM` clock time.
pub fn is_clock_time(s: &str) -> bool {
    CLOCK_RE.is_match(s)
}

/// Convert a 4-digit `HHMM` start-time code into `HH:MM`.
///
/// The code must be exactly four ASCII digits; `"900"` is rejected rather
/// than padded, because a 3-digit value means the feed shape changed and
/// the record should be dropped, not guessed at.
///
/// # Returns
///
/// `Some("HH:MM")` for a valid code, `None` otherwise.
pub fn hhmm_to_clock(code: &str) -> Option<String> {
    if !HHMM_RE.is_match(code) {
        return None;
    }
    Some(format!("{}:{}", &code[..2], &code[2..]))
}

/// Accept a raw start-time value in either upstream form.
///
/// A value already matching the clock pattern is passed through verbatim;
/// a 4-digit code is converted. Anything else is rejected.
pub fn coerce_clock_time(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if is_clock_time(trimmed) {
        return Some(trimmed.to_string());
    }
    hhmm_to_clock(trimmed)
}
