//! SBS Power FM schedule scraper.
//!
//! Fetches the target Monday's schedule from the SBS daily schedule feed.
//! The feed has changed shape several times, so extraction runs an ordered
//! list of strategies over the body — JSON top-level array, JSON object
//! with a named array field, HTML table — and the first one that yields
//! items wins.
//!
//! # URL Pattern
//!
//! `https://static.apis.sbs.co.kr/schedule-api/daily/{YYYY}/{M}/{D}/Power`
//! with non-zero-padded path segments.

use crate::models::{FetchOutcome, Program};
use crate::normalize::{coerce_clock_time, normalize_title};
use crate::week::path_date;
use chrono::NaiveDate;
use scraper::{Html, Selector};
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, info, instrument, warn};

/// Storage-path prefix downstream consumers map this source to.
pub const PREFIX: &str = "sbs/powerfm";

const BASE_URL: &str = "https://static.apis.sbs.co.kr/schedule-api/daily";

/// A raw (title, start-time) pair pulled out of the feed, before
/// normalization and validation.
#[derive(Debug)]
struct RawItem {
    title: String,
    time: String,
}

/// Fetch and normalize the Power FM schedule for the given Monday.
///
/// Issues a single GET; any transport error, non-2xx status, or body that
/// no extraction strategy understands yields `Failed` with a reason. Items
/// missing a title or a valid start time are skipped silently.
#[instrument(level = "info", skip_all, fields(%monday))]
pub async fn fetch_programs(monday: NaiveDate) -> FetchOutcome {
    let url = format!("{}/{}/Power", BASE_URL, path_date(monday));
    debug!(%url, "Requesting SBS schedule");

    let body = match super::fetch_text(&url).await {
        Ok(body) => body,
        Err(reason) => return FetchOutcome::Failed(reason),
    };

    match extract_items(&body) {
        Some(items) => {
            let programs = normalize_items(items);
            info!(count = programs.len(), "Parsed SBS schedule rows");
            FetchOutcome::Fetched(programs)
        }
        None => FetchOutcome::Failed("no extraction strategy matched the response body".to_string()),
    }
}

/// Run the extraction strategies in order; first success wins.
fn extract_items(body: &str) -> Option<Vec<RawItem>> {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        let strategies: &[fn(&Value) -> Option<Vec<RawItem>>] =
            &[items_from_top_level_array, items_from_named_field];
        for strategy in strategies {
            if let Some(items) = strategy(&value) {
                return Some(items);
            }
        }
        warn!("SBS response is JSON but matched no known shape");
        return None;
    }
    items_from_html_table(body)
}

/// Strategy 1: the body is a bare array of item records.
fn items_from_top_level_array(value: &Value) -> Option<Vec<RawItem>> {
    value.as_array().map(|list| map_records(list))
}

/// Strategy 2: the body is an object holding the array under a known key.
fn items_from_named_field(value: &Value) -> Option<Vec<RawItem>> {
    for key in ["programs", "schedule"] {
        if let Some(list) = value.get(key).and_then(Value::as_array) {
            return Some(map_records(list));
        }
    }
    None
}

/// Map JSON records to raw items, tolerating the field-name variants the
/// feed has used over time.
fn map_records(records: &[Value]) -> Vec<RawItem> {
    records
        .iter()
        .filter_map(|record| {
            let title = string_field(record, &["title", "programName"])?;
            let time = string_field(record, &["start_time", "stdHours"])?;
            Some(RawItem { title, time })
        })
        .collect()
}

/// First present field among `keys`, as a string. Numeric values are
/// stringified so a feed that sends `stdHours` as a number still works.
fn string_field(record: &Value, keys: &[&str]) -> Option<String> {
    for key in keys {
        match record.get(key) {
            Some(Value::String(s)) => return Some(s.clone()),
            Some(Value::Number(n)) => return Some(n.to_string()),
            _ => {}
        }
    }
    None
}

/// Strategy 3: the older HTML revision of the page, a table whose rows
/// hold a time header cell and a title cell.
fn items_from_html_table(body: &str) -> Option<Vec<RawItem>> {
    let document = Html::parse_document(body);
    let row_selector = Selector::parse("table.schedule_tbl tbody tr").unwrap();
    let time_selector = Selector::parse("th.time, th").unwrap();
    let title_selector = Selector::parse("td.show a, td.show span, td a, td").unwrap();

    let mut items = Vec::new();
    for row in document.select(&row_selector) {
        let time = row
            .select(&time_selector)
            .next()
            .map(|cell| cell.text().collect::<String>());
        let title = row
            .select(&title_selector)
            .next()
            .map(|cell| cell.text().collect::<String>());
        if let (Some(time), Some(title)) = (time, title) {
            items.push(RawItem { title, time });
        }
    }

    if items.is_empty() {
        warn!("No schedule table rows found in SBS HTML");
        return None;
    }
    Some(items)
}

/// Validate and normalize raw items into programs.
///
/// Upstream already emits the day in time order, so emission order is
/// preserved; duplicates by normalized name keep the first occurrence.
fn normalize_items(items: Vec<RawItem>) -> Vec<Program> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut programs = Vec::new();
    for item in items {
        let name = normalize_title(&item.title);
        if name.is_empty() {
            continue;
        }
        let Some(time) = coerce_clock_time(&item.time) else {
            debug!(title = %name, raw_time = %item.time, "Skipping item with invalid start time");
            continue;
        };
        if !seen.insert(name.clone()) {
            continue;
        }
        programs.push(Program { name, time });
    }
    programs
}
