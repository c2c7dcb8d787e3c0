//! Target-week anchoring.
//!
//! Every run fetches the schedule for the Monday of the current calendar
//! week. The date is computed once at the entry point and passed down to
//! the scrapers as an explicit parameter, so the pipeline stays
//! deterministic and testable without touching the clock inside the logic.
//!
//! The two upstream APIs want the date in different shapes: KBS takes a
//! zero-padded `YYYYMMDD` query parameter, SBS takes non-padded `YYYY/M/D`
//! path segments.

use chrono::{Datelike, Duration, NaiveDate};

/// Monday of the calendar week containing `today`.
pub fn target_monday(today: NaiveDate) -> NaiveDate {
    today - Duration::days(today.weekday().num_days_from_monday() as i64)
}

/// Zero-padded `YYYYMMDD`, for query-string APIs.
pub fn compact_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Non-zero-padded `YYYY/M/D`, for path-segment APIs.
pub fn path_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.year(), date.month(), date.day())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_target_monday_is_identity_on_monday() {
        let monday = date(2025, 6, 2);
        assert_eq!(target_monday(monday), monday);
    }

    #[test]
    fn test_target_monday_from_midweek_and_sunday() {
        let monday = date(2025, 6, 2);
        assert_eq!(target_monday(date(2025, 6, 4)), monday); // Wednesday
        assert_eq!(target_monday(date(2025, 6, 8)), monday); // Sunday
    }

    #[test]
    fn test_target_monday_crosses_month_boundary() {
        // Sunday 2025-06-01 belongs to the week starting Monday 2025-05-26.
        assert_eq!(target_monday(date(2025, 6, 1)), date(2025, 5, 26));
    }

    #[test]
    fn test_compact_date_zero_pads() {
        assert_eq!(compact_date(date(2025, 6, 2)), "20250602");
        assert_eq!(compact_date(date(2025, 11, 24)), "20251124");
    }

    #[test]
    fn test_path_date_does_not_pad() {
        assert_eq!(path_date(date(2025, 6, 2)), "2025/6/2");
        assert_eq!(path_date(date(2025, 11, 24)), "2025/11/24");
    }
}
