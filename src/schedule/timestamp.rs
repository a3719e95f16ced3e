//! Guide timestamp parsing and local time rendering

use chrono::{DateTime, FixedOffset, NaiveDate};

use crate::error::{Result, ScheduleError};

/// Parse an XMLTV instant of the form `20260204003000 +0700`.
///
/// The zone offset is mandatory: a record without one, or with a mangled
/// one, is rejected rather than assumed UTC.
pub fn parse_guide_timestamp(raw: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_str(raw.trim(), "%Y%m%d%H%M%S %z").map_err(|_| {
        ScheduleError::MalformedTimestamp {
            raw: raw.to_string(),
        }
    })
}

/// Parse a fixed zone offset like `+0700` or `-0530`.
pub fn parse_zone_offset(raw: &str) -> Result<FixedOffset> {
    let s = raw.trim();
    let invalid = || ScheduleError::InvalidTimezone(raw.to_string());

    let (sign, digits) = match s.as_bytes().first() {
        Some(b'+') => (1, &s[1..]),
        Some(b'-') => (-1, &s[1..]),
        _ => return Err(invalid()),
    };
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let hours: i32 = digits[0..2].parse().map_err(|_| invalid())?;
    let minutes: i32 = digits[2..4].parse().map_err(|_| invalid())?;
    if minutes >= 60 {
        return Err(invalid());
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

/// Render an instant as a local `HH:MM:SS` string.
pub fn format_time(dt: &DateTime<FixedOffset>) -> String {
    dt.format("%H:%M:%S").to_string()
}

/// Render a calendar date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_guide_timestamp_with_offset() {
        let dt = parse_guide_timestamp("20260204003000 +0700").unwrap();
        assert_eq!(format_time(&dt), "00:30:00");
        assert_eq!(format_date(dt.date_naive()), "2026-02-04");
    }

    #[test]
    fn test_offsets_shift_the_absolute_instant() {
        let jakarta = parse_guide_timestamp("20260204070000 +0700").unwrap();
        let utc = parse_guide_timestamp("20260204000000 +0000").unwrap();
        assert_eq!(jakarta, utc);
    }

    #[test]
    fn test_rejects_non_digit_datetime() {
        let err = parse_guide_timestamp("2026020X003000 +0700").unwrap_err();
        assert!(matches!(
            err,
            ScheduleError::MalformedTimestamp { ref raw } if raw.contains('X')
        ));
    }

    #[test]
    fn test_rejects_missing_offset() {
        assert!(parse_guide_timestamp("20260204003000").is_err());
    }

    #[test]
    fn test_rejects_truncated_input() {
        assert!(parse_guide_timestamp("202602 +0700").is_err());
        assert!(parse_guide_timestamp("").is_err());
    }

    #[test]
    fn test_parses_zone_offsets() {
        assert_eq!(
            parse_zone_offset("+0700").unwrap(),
            FixedOffset::east_opt(7 * 3600).unwrap()
        );
        assert_eq!(
            parse_zone_offset("-0530").unwrap(),
            FixedOffset::west_opt(5 * 3600 + 30 * 60).unwrap()
        );
    }

    #[test]
    fn test_rejects_bad_zone_offsets() {
        for raw in ["0700", "+07", "+07000", "+07a0", "+0770", ""] {
            assert!(parse_zone_offset(raw).is_err(), "accepted {raw:?}");
        }
    }
}
