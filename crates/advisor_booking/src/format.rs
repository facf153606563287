// --- File: crates/advisor_booking/src/format.rs ---
//! Date and time rendering in the configured display zone.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// "3:30 PM"
pub fn time(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format("%-I:%M %p").to_string()
}

/// "Mar 4, 2025"
pub fn date(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format("%b %-d, %Y").to_string()
}

/// "Tuesday, March 4, 2025"
pub fn long_date(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format("%A, %B %-d, %Y").to_string()
}

/// "Mar 4, 2025 3:30 PM"
pub fn date_time(instant: DateTime<Utc>, tz: Tz) -> String {
    instant
        .with_timezone(&tz)
        .format("%b %-d, %Y %-I:%M %p")
        .to_string()
}

/// "Mar 4, 3:30 PM"
pub fn short_date_time(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format("%b %-d, %-I:%M %p").to_string()
}

/// Parses a backend timestamp. RFC 3339 only; anything else is `None`.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

/// Parses a configured IANA zone name, falling back to UTC.
pub fn parse_time_zone(name: &str) -> Tz {
    match name.parse::<Tz>() {
        Ok(tz) => tz,
        Err(_) => {
            tracing::warn!("Unknown time zone '{}', using UTC", name);
            Tz::UTC
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_formats_in_zone() {
        let instant = Utc.with_ymd_and_hms(2025, 3, 4, 15, 5, 0).unwrap();
        assert_eq!(time(instant, Tz::UTC), "3:05 PM");
        assert_eq!(time(instant, Tz::Europe__Zurich), "4:05 PM");
        assert_eq!(date(instant, Tz::UTC), "Mar 4, 2025");
        assert_eq!(long_date(instant, Tz::UTC), "Tuesday, March 4, 2025");
        assert_eq!(date_time(instant, Tz::UTC), "Mar 4, 2025 3:05 PM");
        assert_eq!(short_date_time(instant, Tz::UTC), "Mar 4, 3:05 PM");
    }

    #[test]
    fn test_parse_instant() {
        assert_eq!(
            parse_instant("2025-03-04T15:05:00+01:00"),
            Some(Utc.with_ymd_and_hms(2025, 3, 4, 14, 5, 0).unwrap())
        );
        assert_eq!(parse_instant("tomorrow"), None);
    }

    #[test]
    fn test_parse_time_zone_falls_back_to_utc() {
        assert_eq!(parse_time_zone("Europe/Zurich"), Tz::Europe__Zurich);
        assert_eq!(parse_time_zone("Mars/Olympus"), Tz::UTC);
    }
}
