//! Serde helpers for event timestamps (ISO-8601, millisecond precision, `Z` suffix).

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Format as e.g. "2023-11-14T22:13:20.000Z". Used with #[serde(with = "crate::date")].
pub fn to_iso(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    to_iso(date).serialize(serializer)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&s)
        .map(|d| d.with_timezone(&Utc))
        .map_err(serde::de::Error::custom)
}

/// Epoch milliseconds to UTC, `None` when out of range.
pub fn from_epoch_millis(ms: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ms).single()
}

/// RFC 3339 first, then a date-only "YYYY-MM-DD" at midnight UTC.
pub fn parse_loose(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(d) = DateTime::parse_from_rfc3339(s) {
        return Some(d.with_timezone(&Utc));
    }
    if let Ok(d) = DateTime::parse_from_rfc2822(s) {
        return Some(d.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|d| Utc.from_utc_datetime(&d.and_time(NaiveTime::MIN)))
}

/// FIRMS detections carry `acq_date` ("YYYY-MM-DD") and `acq_time` ("HHMM", UTC).
pub fn parse_acquisition(date: &str, time: Option<&str>) -> Option<DateTime<Utc>> {
    let day = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()?;
    let time = time
        .map(|t| format!("{:0>4}", t.trim()))
        .and_then(|t| NaiveTime::parse_from_str(&t, "%H%M").ok())
        .unwrap_or(NaiveTime::MIN);
    Some(Utc.from_utc_datetime(&NaiveDateTime::new(day, time)))
}

/// Parse or substitute the current time. Events never carry an invalid date.
pub fn or_now(parsed: Option<DateTime<Utc>>) -> DateTime<Utc> {
    parsed.unwrap_or_else(Utc::now)
}
