//! Calendar-date parsing and formatting.
//!
//! Event dates travel as `YYYY-MM-DD` with no time zone. They are split into
//! their components and built as a `NaiveDate`, so nothing ever shifts them
//! through UTC midnight.

use chrono::NaiveDate;

use crate::error::{CountdownError, CountdownResult};

/// Parse a `YYYY-MM-DD` string into a calendar date.
pub fn parse_event_date(s: &str) -> CountdownResult<NaiveDate> {
    let invalid = || CountdownError::InvalidDate(s.to_string());

    let mut parts = s.trim().splitn(3, '-');
    let (Some(year), Some(month), Some(day)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid());
    };

    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    let day: u32 = day.parse().map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

/// Render a date in long US-English form, e.g. "January 5, 2026".
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Serialize a date as the wire's `YYYY-MM-DD`.
pub fn to_wire(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Serde adapter for `YYYY-MM-DD` event dates.
pub mod wire_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::to_wire(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_event_date(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_components_as_calendar_date() {
        assert_eq!(parse_event_date("2026-01-05").unwrap(), ymd(2026, 1, 5));
        assert_eq!(parse_event_date("2024-02-29").unwrap(), ymd(2024, 2, 29));
    }

    #[test]
    fn parses_unpadded_components() {
        assert_eq!(parse_event_date("2026-1-5").unwrap(), ymd(2026, 1, 5));
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(parse_event_date("  2026-12-25 ").unwrap(), ymd(2026, 12, 25));
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(parse_event_date("").is_err());
        assert!(parse_event_date("2026-01").is_err());
        assert!(parse_event_date("2026/01/05").is_err());
        assert!(parse_event_date("2026-13-01").is_err());
        assert!(parse_event_date("2025-02-29").is_err());
        assert!(parse_event_date("2026-01-05T00:00:00Z").is_err());
    }

    #[test]
    fn formats_long_date() {
        assert_eq!(format_long_date(ymd(2026, 1, 5)), "January 5, 2026");
        assert_eq!(format_long_date(ymd(2025, 12, 31)), "December 31, 2025");
    }

    // The formatted output depends only on the three components, never on a
    // time zone: the day that was stored is the day that is shown.
    #[test]
    fn formatting_keeps_the_stored_day() {
        let date = parse_event_date("2026-01-01").unwrap();
        assert_eq!(format_long_date(date), "January 1, 2026");
    }

    #[test]
    fn wire_format_is_zero_padded() {
        assert_eq!(to_wire(ymd(2026, 3, 7)), "2026-03-07");
    }
}
