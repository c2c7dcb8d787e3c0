//! KBS Cool FM schedule scraper.
//!
//! The KBS schedule API answers with a date *range* covering several
//! channels at once, and encodes each program as a run of fixed-size
//! (usually 30-minute) slots rather than one record per program. This
//! scraper narrows the payload to the target day and channel, then merges
//! consecutive slots of the same program down to a single entry keeping
//! the earliest start time, dropping recurring filler segments (news
//! bulletins, campaign spots) along the way.
//!
//! # URL Pattern
//!
//! `https://static.api.kbs.co.kr/mediafactory/v1/schedule/weekly` with
//! `channel_code`, `program_planned_date_from` and `program_planned_date_to`
//! query parameters (both bounds set to the target Monday, `YYYYMMDD`).

use crate::models::{FetchOutcome, Program};
use crate::normalize::{hhmm_to_clock, normalize_title};
use crate::week::compact_date;
use chrono::NaiveDate;
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Storage-path prefix downstream consumers map this source to.
pub const PREFIX: &str = "kbs/25";

/// Cool FM's channel code in the schedule API (distinct from the live
/// stream's landing code used in [`PREFIX`]).
const CHANNEL_CODE: &str = "24";

const BASE_URL: &str = "https://static.api.kbs.co.kr/mediafactory/v1/schedule/weekly";

/// Titles containing any of these substrings are filler segments and are
/// excluded from the normalized schedule.
pub const FILLER_MARKERS: &[&str] = &["뉴스", "캠페인"];

/// Fetch and normalize the Cool FM schedule for the given Monday.
#[instrument(level = "info", skip_all, fields(%monday))]
pub async fn fetch_programs(monday: NaiveDate) -> FetchOutcome {
    let date = compact_date(monday);
    let url = match Url::parse_with_params(
        BASE_URL,
        &[
            ("rtype", "json"),
            ("local_station_code", "00"),
            ("channel_code", CHANNEL_CODE),
            ("program_planned_date_from", date.as_str()),
            ("program_planned_date_to", date.as_str()),
        ],
    ) {
        Ok(url) => url,
        Err(e) => return FetchOutcome::Failed(format!("bad request url: {e}")),
    };
    debug!(url = %url, "Requesting KBS schedule");

    let body = match super::fetch_text(url.as_str()).await {
        Ok(body) => body,
        Err(reason) => return FetchOutcome::Failed(reason),
    };

    let payload: Value = match serde_json::from_str(&body) {
        Ok(v) => v,
        Err(e) => return FetchOutcome::Failed(format!("response is not JSON: {e}")),
    };

    let Some(slots) = collect_slots(&payload) else {
        return FetchOutcome::Failed("response holds no channel groups".to_string());
    };

    let raw_count = slots.len();
    let programs = merge_slots(slots, FILLER_MARKERS);
    info!(
        count = programs.len(),
        raw = raw_count,
        "Parsed KBS schedule rows (dedup from raw slots)"
    );
    FetchOutcome::Fetched(programs)
}

/// Pull `(time, title)` pairs out of every group matching the target
/// channel. Returns `None` when the payload is not the expected array of
/// per-day-per-channel groups.
fn collect_slots(payload: &Value) -> Option<Vec<(String, String)>> {
    let groups = payload.as_array()?;
    let mut slots = Vec::new();
    for group in groups {
        if !channel_matches(group.get("channel_code")) {
            continue;
        }
        let Some(schedules) = group.get("schedules").and_then(Value::as_array) else {
            warn!("KBS channel group carries no schedules array");
            continue;
        };
        for record in schedules {
            let Some(code) = start_code(record) else {
                continue;
            };
            let Some(time) = hhmm_to_clock(&code) else {
                debug!(code = %code, "Skipping slot with malformed start-time code");
                continue;
            };
            let Some(title) = record.get("program_title").and_then(Value::as_str) else {
                continue;
            };
            slots.push((time, title.to_string()));
        }
    }
    Some(slots)
}

/// The channel code arrives as a string in some revisions and a number in
/// others; compare both forms.
fn channel_matches(value: Option<&Value>) -> bool {
    match value {
        Some(Value::String(s)) => s == CHANNEL_CODE,
        Some(Value::Number(n)) => n.to_string() == CHANNEL_CODE,
        _ => false,
    }
}

/// The planned start time, stringified when the feed sends it numeric.
/// A numeric `900` stringifies to 3 digits and fails the 4-digit check
/// downstream, which is the intended rejection.
fn start_code(record: &Value) -> Option<String> {
    match record.get("program_planned_start_time") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// Merge slot records into the final program list.
///
/// Sorts pairs ascending by time string (lexicographic order on
/// zero-padded `HH:MM` is chronological within one day), then walks the
/// run keeping an emitted-name set:
///
/// - a name already emitted is a later slot of a running program — skip;
/// - a title containing a filler marker is skipped *without* entering the
///   set, so a filler title never blocks a later distinct program;
/// - anything else becomes a [`Program`] at its earliest start time.
///
/// The result is strictly ascending, contains each distinct non-filler
/// name once, and is a fixed point of this function.
pub fn merge_slots(mut slots: Vec<(String, String)>, markers: &[&str]) -> Vec<Program> {
    slots.sort_by(|a, b| a.0.cmp(&b.0));

    let mut emitted: HashSet<String> = HashSet::new();
    let mut programs = Vec::new();
    for (time, title) in slots {
        let name = normalize_title(&title);
        if name.is_empty() || emitted.contains(&name) {
            continue;
        }
        if markers.iter().any(|marker| name.contains(marker)) {
            continue;
        }
        emitted.insert(name.clone());
        programs.push(Program { name, time });
    }
    programs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(time: &str, title: &str) -> (String, String) {
        (time.to_string(), title.to_string())
    }

    #[test]
    fn test_merge_drops_later_slots_and_filler() {
        let slots = vec![
            slot("8:00", "Show A"),
            slot("8:30", "Show A"),
            slot("9:00", "Show B"),
            slot("8:10", "뉴스 브리핑"),
        ];
        let merged = merge_slots(slots, FILLER_MARKERS);
        assert_eq!(
            merged,
            vec![
                Program {
                    name: "Show A".to_string(),
                    time: "8:00".to_string()
                },
                Program {
                    name: "Show B".to_string(),
                    time: "9:00".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_merge_is_idempotent() {
        let slots = vec![
            slot("07:00", "아침 방송"),
            slot("07:30", "아침 방송"),
            slot("08:00", "음악 캠페인"),
            slot("09:00", "라디오쇼"),
        ];
        let merged = merge_slots(slots, FILLER_MARKERS);
        let again: Vec<(String, String)> = merged
            .iter()
            .map(|p| (p.time.clone(), p.name.clone()))
            .collect();
        assert_eq!(merge_slots(again, FILLER_MARKERS), merged);
    }

    #[test]
    fn test_filler_match_is_substring_based() {
        let slots = vec![slot("12:00", "정오 뉴스"), slot("12:05", "정오의 희망곡")];
        let merged = merge_slots(slots, FILLER_MARKERS);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].name, "정오의 희망곡");
    }

    #[test]
    fn test_recurring_filler_never_blocks_and_never_emits() {
        let slots = vec![
            slot("06:00", "뉴스"),
            slot("07:00", "아침 프로그램"),
            slot("12:00", "뉴스"),
            slot("13:00", "오후 프로그램"),
        ];
        let merged = merge_slots(slots, FILLER_MARKERS);
        assert_eq!(merged.len(), 2);
        assert!(merged.iter().all(|p| !p.name.contains("뉴스")));
    }

    #[test]
    fn test_merge_sorts_unordered_input() {
        let slots = vec![slot("21:00", "밤 방송"), slot("06:00", "아침 방송")];
        let merged = merge_slots(slots, FILLER_MARKERS);
        assert_eq!(merged[0].time, "06:00");
        assert_eq!(merged[1].time, "21:00");
    }

    #[test]
    fn test_merge_normalizes_titles_before_dedup() {
        let slots = vec![slot("10:00", "볼륨을  높여요"), slot("10:30", "볼륨을 높여요")];
        let merged = merge_slots(slots, FILLER_MARKERS);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].name, "볼륨을 높여요");
        assert_eq!(merged[0].time, "10:00");
    }

    #[test]
    fn test_collect_slots_filters_channel_and_bad_codes() {
        let payload: Value = serde_json::from_str(
            r#"[
            {
                "channel_code": "24",
                "schedules": [
                    {"program_planned_start_time": "0600", "program_title": "아침 방송"},
                    {"program_planned_start_time": "600", "program_title": "짧은 코드"},
                    {"program_planned_start_time": "0630", "program_title": "아침 방송"}
                ]
            },
            {
                "channel_code": "25",
                "schedules": [
                    {"program_planned_start_time": "0600", "program_title": "다른 채널"}
                ]
            }
        ]"#,
        )
        .unwrap();
        let slots = collect_slots(&payload).unwrap();
        assert_eq!(
            slots,
            vec![
                ("06:00".to_string(), "아침 방송".to_string()),
                ("06:30".to_string(), "아침 방송".to_string()),
            ]
        );
    }

    #[test]
    fn test_collect_slots_accepts_numeric_channel_code() {
        let payload: Value = serde_json::from_str(
            r#"[{
                "channel_code": 24,
                "schedules": [
                    {"program_planned_start_time": "0900", "program_title": "아침 음악"}
                ]
            }]"#,
        )
        .unwrap();
        let slots = collect_slots(&payload).unwrap();
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].0, "09:00");
    }

    #[test]
    fn test_collect_slots_declines_non_array_payload() {
        let payload: Value = serde_json::from_str(r#"{"error": "nope"}"#).unwrap();
        assert!(collect_slots(&payload).is_none());
    }

    #[test]
    fn test_records_missing_title_are_skipped() {
        let payload: Value = serde_json::from_str(
            r#"[{
                "channel_code": "24",
                "schedules": [
                    {"program_planned_start_time": "0600"},
                    {"program_planned_start_time": "0700", "program_title": "아침 방송"}
                ]
            }]"#,
        )
        .unwrap();
        let slots = collect_slots(&payload).unwrap();
        assert_eq!(slots.len(), 1);
    }
}
