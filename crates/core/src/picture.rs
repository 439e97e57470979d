//! Core record type for picturedb.
//!
//! A `Picture` is one stored record: a caller-chosen string id, a local
//! wall-clock timestamp with second precision, a geo-position and a
//! title/URL pair.

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// A stored picture record.
///
/// Coordinates are single precision, matching the precision the store has
/// always been written with, so existing data files decode bit-exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Picture {
    /// Record key. Intended to be unique, but insert does not enforce it.
    pub id: String,
    /// Local wall-clock time, whole seconds.
    pub timestamp: NaiveDateTime,
    pub longitude: f32,
    pub latitude: f32,
    pub title: String,
    pub url: Url,
}

impl Picture {
    /// Creates a picture, truncating `timestamp` to whole seconds.
    pub fn new(
        id: impl Into<String>,
        timestamp: NaiveDateTime,
        longitude: f32,
        latitude: f32,
        title: impl Into<String>,
        url: Url,
    ) -> Self {
        Self {
            id: id.into(),
            timestamp: truncate_to_seconds(timestamp),
            longitude,
            latitude,
            title: title.into(),
            url,
        }
    }

    /// Creates a picture stamped with the current local time.
    pub fn now(
        id: impl Into<String>,
        longitude: f32,
        latitude: f32,
        title: impl Into<String>,
        url: Url,
    ) -> Self {
        Self::new(
            id,
            Local::now().naive_local(),
            longitude,
            latitude,
            title,
            url,
        )
    }
}

impl fmt::Display for Picture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} '{}' at ({}, {})",
            self.id, self.title, self.longitude, self.latitude
        )
    }
}

fn truncate_to_seconds(ts: NaiveDateTime) -> NaiveDateTime {
    ts.with_nanosecond(0).unwrap_or(ts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(h: u32, m: u32, s: u32, milli: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 5, 12)
            .unwrap()
            .and_hms_milli_opt(h, m, s, milli)
            .unwrap()
    }

    #[test]
    fn test_new_truncates_subsecond_precision() {
        let url = Url::parse("https://example.com/a.jpg").unwrap();
        let pic = Picture::new("1", ts(19, 29, 5, 750), 0.0, 0.0, "Great Bori", url);
        assert_eq!(pic.timestamp, ts(19, 29, 5, 0));
    }

    #[test]
    fn test_now_has_whole_seconds() {
        let url = Url::parse("https://example.com/a.jpg").unwrap();
        let pic = Picture::now("1", 1.0, 2.0, "x", url);
        assert_eq!(pic.timestamp.nanosecond(), 0);
    }

    #[test]
    fn test_display() {
        let url = Url::parse("https://example.com/a.jpg").unwrap();
        let pic = Picture::new("abab", ts(22, 54, 45, 0), 21.0, 20.0, "Suesser Hund", url);
        assert_eq!(pic.to_string(), "abab 'Suesser Hund' at (21, 20)");
    }

    #[test]
    fn test_serde_json_shape() {
        let url = Url::parse("https://example.com/a.jpg").unwrap();
        let pic = Picture::new("1", ts(19, 29, 5, 0), 1.5, -2.5, "t", url);
        let json = serde_json::to_value(&pic).unwrap();
        assert_eq!(json["id"], "1");
        assert_eq!(json["url"], "https://example.com/a.jpg");
        assert_eq!(json["longitude"], 1.5);
        let back: Picture = serde_json::from_value(json).unwrap();
        assert_eq!(back, pic);
    }
}
