//! Line codec for picture records.
//!
//! Each record is one line: `id; timestamp; longitude; latitude; title; url`,
//! fields joined by [`FIELD_DELIMITER`] with no escaping. Timestamps use
//! [`TIMESTAMP_FORMAT`]. Encoding never appends a line terminator; the
//! storage layer owns line framing.

use crate::config::{FIELD_COUNT, FIELD_DELIMITER, TIMESTAMP_FORMAT};
use crate::picture::Picture;
use chrono::{NaiveDateTime, Timelike};
use std::num::ParseFloatError;
use std::str::Utf8Error;
use thiserror::Error;
use url::Url;

/// Reasons a line fails to decode into a [`Picture`].
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("line is not valid UTF-8: {0}")]
    Utf8(#[from] Utf8Error),

    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("invalid timestamp: {0}")]
    Timestamp(#[from] TimestampError),

    #[error("invalid {field}: {source}")]
    Coordinate {
        field: &'static str,
        #[source]
        source: ParseFloatError,
    },

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

/// A timestamp field that is not exactly `YYYY-MM-DD HH:MM:SS`.
#[derive(Error, Debug)]
pub enum TimestampError {
    #[error("'{0}' does not match YYYY-MM-DD HH:MM:SS")]
    Layout(String),

    #[error("leap second not allowed: '{0}'")]
    LeapSecond(String),

    #[error(transparent)]
    Value(#[from] chrono::ParseError),
}

/// Encode a record as one line (without terminator).
pub fn encode(picture: &Picture) -> String {
    let d = FIELD_DELIMITER;
    format!(
        "{}{d}{}{d}{}{d}{}{d}{}{d}{}",
        picture.id,
        format_timestamp(&picture.timestamp),
        format_coordinate(picture.longitude),
        format_coordinate(picture.latitude),
        picture.title,
        picture.url,
    )
}

/// Decode one line (terminator already stripped) into a record.
pub fn decode(line: &str) -> Result<Picture, DecodeError> {
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    if fields.len() != FIELD_COUNT {
        return Err(DecodeError::FieldCount {
            expected: FIELD_COUNT,
            found: fields.len(),
        });
    }

    let timestamp = parse_timestamp(fields[1])?;
    let longitude = parse_coordinate("longitude", fields[2])?;
    let latitude = parse_coordinate("latitude", fields[3])?;
    let url = Url::parse(fields[5])?;

    Ok(Picture {
        id: fields[0].to_string(),
        timestamp,
        longitude,
        latitude,
        title: fields[4].to_string(),
        url,
    })
}

/// Raw `id` field of a line: everything before the first delimiter.
///
/// Does not validate the rest of the line, so it also works on lines
/// that would fail [`decode`].
pub fn line_id(line: &str) -> &str {
    match line.find(FIELD_DELIMITER) {
        Some(end) => &line[..end],
        None => line,
    }
}

/// Format a timestamp with [`TIMESTAMP_FORMAT`].
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a timestamp written with [`TIMESTAMP_FORMAT`].
///
/// Every field must be zero-padded and the separators must sit at their
/// fixed positions; second `60` is rejected.
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime, TimestampError> {
    if !has_timestamp_layout(s) {
        return Err(TimestampError::Layout(s.to_string()));
    }
    let ts = NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)?;
    // chrono represents :60 as a leap nanosecond
    if ts.nanosecond() >= 1_000_000_000 {
        return Err(TimestampError::LeapSecond(s.to_string()));
    }
    Ok(ts)
}

// `YYYY-MM-DD HH:MM:SS`: 19 bytes, digits everywhere except the separators.
fn has_timestamp_layout(s: &str) -> bool {
    const SEPARATORS: [(usize, u8); 5] = [(4, b'-'), (7, b'-'), (10, b' '), (13, b':'), (16, b':')];
    let bytes = s.as_bytes();
    bytes.len() == 19
        && bytes.iter().enumerate().all(|(i, &b)| {
            match SEPARATORS.iter().find(|(pos, _)| *pos == i) {
                Some(&(_, sep)) => b == sep,
                None => b.is_ascii_digit(),
            }
        })
}

// `{:?}` gives the shortest round-trip form and keeps the `.0` on integral values.
fn format_coordinate(value: f32) -> String {
    format!("{value:?}")
}

fn parse_coordinate(field: &'static str, s: &str) -> Result<f32, DecodeError> {
    s.parse::<f32>()
        .map_err(|source| DecodeError::Coordinate { field, source })
}
