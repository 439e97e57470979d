//! Storage layer: the flat-file store, its rewrite protocol and observers.
//!
//! Records live only on disk. Each call to [`PictureStore`] opens the
//! backing file, scans or appends, and closes it again. Update and delete
//! rewrite the file through a sibling temp file that is renamed over the
//! original (atomic temp-file + rename).

/// Observer interface for store events, with a `tracing` implementation.
pub mod observer;
/// Temp-file rewrite used by update and delete.
mod replace;
/// The file-backed store.
pub mod store;

pub use observer::{NoopObserver, Operation, StoreObserver, TracingObserver};
pub use store::PictureStore;

use std::io::{self, BufRead};

/// Read the next line into `buf` as raw bytes, without its `\n` or `\r\n`.
///
/// Returns `Ok(false)` at end of file. Bytes are not checked for UTF-8 here.
pub(crate) fn read_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> io::Result<bool> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(false);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    Ok(true)
}
