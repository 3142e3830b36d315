use std::fmt;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Server-assigned instant.
///
/// The review backend emits either RFC 3339 or naive ISO-8601 without an
/// offset; naive values are taken as UTC. Display helpers render in the
/// viewer's local time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub DateTime<Utc>);

impl Timestamp {
    pub fn parse(raw: &str) -> Option<Self> {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(Self(parsed.with_timezone(&Utc)));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
            .ok()
            .map(|naive| Self(naive.and_utc()))
    }

    pub fn date(&self) -> String {
        self.date_in(&Local)
    }

    pub fn time(&self) -> String {
        self.time_in(&Local)
    }

    pub fn date_time(&self) -> String {
        self.date_time_in(&Local)
    }

    pub fn date_in<Tz: TimeZone>(&self, tz: &Tz) -> String
    where
        Tz::Offset: fmt::Display,
    {
        self.format_in(tz, "%Y-%m-%d")
    }

    pub fn time_in<Tz: TimeZone>(&self, tz: &Tz) -> String
    where
        Tz::Offset: fmt::Display,
    {
        self.format_in(tz, "%H:%M")
    }

    pub fn date_time_in<Tz: TimeZone>(&self, tz: &Tz) -> String
    where
        Tz::Offset: fmt::Display,
    {
        self.format_in(tz, "%Y-%m-%d %H:%M")
    }

    fn format_in<Tz: TimeZone>(&self, tz: &Tz, pattern: &str) -> String
    where
        Tz::Offset: fmt::Display,
    {
        self.0.with_timezone(tz).format(pattern).to_string()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_rfc3339())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Timestamp::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
    }
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;

    use super::*;

    fn seoul() -> FixedOffset {
        FixedOffset::east_opt(9 * 3600).unwrap()
    }

    #[test]
    fn accepts_offset_and_naive_forms() {
        let offset = Timestamp::parse("2025-03-04T09:15:00+09:00").unwrap();
        assert_eq!(offset.date_time_in(&Utc), "2025-03-04 00:15");

        let naive = Timestamp::parse("2025-03-04T09:15:27.123456").unwrap();
        assert_eq!(naive.date_in(&Utc), "2025-03-04");
        assert_eq!(naive.time_in(&Utc), "09:15");

        assert!(Timestamp::parse("yesterday").is_none());
    }

    #[test]
    fn displays_in_the_viewer_zone() {
        let offset = Timestamp::parse("2025-03-04T09:15:00+09:00").unwrap();
        assert_eq!(offset.date_time_in(&seoul()), "2025-03-04 09:15");

        // naive values are UTC, so late evening rolls over to the next day
        let naive = Timestamp::parse("2024-12-31T20:30:00").unwrap();
        assert_eq!(naive.date_in(&seoul()), "2025-01-01");
        assert_eq!(naive.time_in(&seoul()), "05:30");

        let local = naive.0.with_timezone(&Local);
        assert_eq!(naive.date_time(), local.format("%Y-%m-%d %H:%M").to_string());
    }

    #[test]
    fn deserializes_from_json_string() {
        let ts: Timestamp = serde_json::from_str("\"2024-12-31 23:59:59\"").unwrap();
        assert_eq!(ts.date_in(&Utc), "2024-12-31");
    }
}
