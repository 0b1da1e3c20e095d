//! Lenient decoding of the date strings emitted by the documents API.
//!
//! Depending on the serializer configuration the backend sends RFC 3339
//! datetimes, naive ISO datetimes, or bare `YYYY-MM-DD` dates.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{de, Deserialize, Deserializer};

pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset.naive_local());
    }
    if let Ok(naive) = raw.parse::<NaiveDateTime>() {
        return Some(naive);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(naive);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .ok()
        .or_else(|| parse_timestamp(raw).map(|timestamp| timestamp.date()))
}

pub fn timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| de::Error::custom(format!("unrecognised timestamp: {raw}")))
}

pub fn optional_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error> {
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => parse_date(&raw)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("unrecognised date: {raw}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_every_backend_timestamp_shape() {
        for raw in [
            "2024-06-01T08:30:00Z",
            "2024-06-01T08:30:00+02:00",
            "2024-06-01T08:30:00",
            "2024-06-01T08:30:00.654321",
            "2024-06-01 08:30:00",
        ] {
            let parsed = parse_timestamp(raw).unwrap_or_else(|| panic!("failed on {raw}"));
            assert_eq!(parsed.date(), ymd(2024, 6, 1), "{raw}");
        }
        assert_eq!(
            parse_timestamp("2024-06-01"),
            ymd(2024, 6, 1).and_hms_opt(0, 0, 0)
        );
    }

    #[test]
    fn date_from_datetime_keeps_the_calendar_day() {
        assert_eq!(parse_date("2030-12-31T00:00:00"), Some(ymd(2030, 12, 31)));
        assert_eq!(parse_date("2030-12-31"), Some(ymd(2030, 12, 31)));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_date("31-12-2024").is_none());
    }
}
