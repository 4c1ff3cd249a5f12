//! Acquisition date parsing.
//!
//! Scene sources report acquisition times either as plain calendar dates or as
//! full RFC 3339 timestamps; the engine works at date resolution throughout.

use chrono::{DateTime, NaiveDate};

/// Parse a scene acquisition timestamp at date resolution.
///
/// Accepts `YYYY-MM-DD`, an RFC 3339 timestamp (`2023-06-01T00:00:00Z`), or
/// any string whose first ten characters form a valid date. Returns `None`
/// for anything else; the caller decides how to flag the record.
pub fn parse_scene_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if let Ok(date) = trimmed.parse::<NaiveDate>() {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }
    // Date prefix of a longer, non-RFC-3339 timestamp
    trimmed.get(..10).and_then(|prefix| prefix.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::parse_scene_date;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_plain_date() {
        assert_eq!(parse_scene_date("2023-06-01"), Some(date(2023, 6, 1)));
    }

    #[test]
    fn test_rfc3339_timestamp() {
        assert_eq!(
            parse_scene_date("2023-06-01T10:30:00Z"),
            Some(date(2023, 6, 1))
        );
    }

    #[test]
    fn test_rfc3339_with_offset() {
        assert_eq!(
            parse_scene_date("2023-06-01T23:30:00+02:00"),
            Some(date(2023, 6, 1))
        );
    }

    #[test]
    fn test_date_prefix_fallback() {
        assert_eq!(
            parse_scene_date("2023-06-01 10:30:00"),
            Some(date(2023, 6, 1))
        );
    }

    #[test]
    fn test_whitespace_trimmed() {
        assert_eq!(parse_scene_date(" 2023-06-01 "), Some(date(2023, 6, 1)));
    }

    #[test]
    fn test_garbage_rejected() {
        assert_eq!(parse_scene_date("not a date"), None);
        assert_eq!(parse_scene_date(""), None);
        assert_eq!(parse_scene_date("2023-13-01"), None);
    }
}
