//! Global configuration constants for picturedb.
//!
//! The on-disk format and the rewrite protocol are fixed at compile time.
//! Runtime configuration (which file to open, log format) is handled via CLI
//! arguments and environment variables in the `picturedb` binary.

/// Separator written between the fields of one record line.
///
/// Not escaped: field values must not contain this sequence.
pub const FIELD_DELIMITER: &str = "; ";

/// Number of fields in one record line: `id; timestamp; longitude; latitude; title; url`.
pub const FIELD_COUNT: usize = 6;

/// chrono format string for record timestamps (`yyyy-MM-dd HH:mm:ss`, local wall-clock).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Suffix appended to the backing file name to form the rewrite temp file.
///
/// The temp file lives in the same directory as the backing file so the
/// final rename never crosses a filesystem boundary.
pub const TEMP_FILE_SUFFIX: &str = ".tmp";

/// Platform line break terminating every record line.
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";

/// Platform line break terminating every record line.
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Default backing file used by the CLI.
pub const DEFAULT_DATA_FILE: &str = "./data/picture-data.csv";
