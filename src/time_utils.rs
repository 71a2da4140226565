// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time parsing and formatting.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

/// Epoch numbers above this magnitude are milliseconds, not seconds.
const EPOCH_MILLIS_THRESHOLD: f64 = 2e10;

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
///
/// Fractional seconds are kept when present.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Parse a client-supplied timestamp.
///
/// Accepts RFC3339, a naive `YYYY-MM-DDTHH:MM:SS[.fff]` (taken as UTC),
/// a bare `YYYY-MM-DD` date (midnight UTC), or a numeric Unix epoch.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    if let Some(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Some(date.and_utc());
    }

    raw.parse::<f64>().ok().and_then(from_epoch)
}

/// Unix epoch in seconds, or milliseconds past 2e10.
pub fn from_epoch(value: f64) -> Option<DateTime<Utc>> {
    if !value.is_finite() {
        return None;
    }

    let millis = if value.abs() > EPOCH_MILLIS_THRESHOLD {
        value
    } else {
        value * 1000.0
    };
    let micros = (millis * 1000.0).round();
    if micros.abs() > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_micros(micros as i64)
}

/// ISO-8601 week key, e.g. `2024-W03`.
pub fn iso_week_key(date: DateTime<Utc>) -> String {
    use chrono::Datelike;

    let week = date.iso_week();
    format!("{}-W{:02}", week.year(), week.week())
}

/// Visitor accepting timestamp strings and epoch numbers.
struct TimestampVisitor;

impl<'de> serde::de::Visitor<'de> for TimestampVisitor {
    type Value = DateTime<Utc>;

    fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str("an RFC3339 datetime, a YYYY-MM-DD date or a Unix epoch")
    }

    fn visit_str<E: serde::de::Error>(self, raw: &str) -> Result<Self::Value, E> {
        parse_timestamp(raw).ok_or_else(|| {
            E::custom(format!(
                "invalid datetime `{raw}`, expected RFC3339, YYYY-MM-DD or a Unix epoch"
            ))
        })
    }

    fn visit_i64<E: serde::de::Error>(self, value: i64) -> Result<Self::Value, E> {
        epoch_or_error(value as f64)
    }

    fn visit_u64<E: serde::de::Error>(self, value: u64) -> Result<Self::Value, E> {
        epoch_or_error(value as f64)
    }

    fn visit_f64<E: serde::de::Error>(self, value: f64) -> Result<Self::Value, E> {
        epoch_or_error(value)
    }
}

fn epoch_or_error<E: serde::de::Error>(value: f64) -> Result<DateTime<Utc>, E> {
    from_epoch(value).ok_or_else(|| E::custom(format!("epoch {value} out of range")))
}

/// Serde adapter for required timestamps (lenient in, RFC3339 out).
pub mod timestamp {
    use super::{format_utc_rfc3339, TimestampVisitor};
    use chrono::{DateTime, Utc};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_utc_rfc3339(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        deserializer.deserialize_any(TimestampVisitor)
    }
}

/// Serde adapter for optional timestamps. Pair with `#[serde(default)]`.
pub mod optional_timestamp {
    use super::{format_utc_rfc3339, TimestampVisitor};
    use chrono::{DateTime, Utc};
    use serde::{de, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        date: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => serializer.serialize_str(&format_utc_rfc3339(*date)),
            None => serializer.serialize_none(),
        }
    }

    struct OptionalVisitor;

    impl<'de> de::Visitor<'de> for OptionalVisitor {
        type Value = Option<DateTime<Utc>>;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("null or a timestamp")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
            deserializer.deserialize_any(TimestampVisitor).map(Some)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        deserializer.deserialize_option(OptionalVisitor)
    }
}
