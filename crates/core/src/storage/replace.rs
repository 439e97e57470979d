//! Atomic rewrite of the backing file.
//!
//! Update and delete never edit the backing file in place. The file is
//! streamed line by line into a sibling temp file (`<name>.tmp`), the first
//! line whose id matches is replaced or dropped, and the temp file is then
//! renamed over the original in a single step. If no line matches, the temp
//! file is removed and the original is left byte-identical.
//!
//! Lines are copied as raw bytes, so lines that are not valid UTF-8 pass
//! through unchanged.

use crate::codec::line_id;
use crate::config::{LINE_ENDING, TEMP_FILE_SUFFIX};
use crate::storage::read_line;
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// What to do with the first line whose id matches.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Edit<'a> {
    /// Write this line (without terminator) in its place.
    Replace(&'a str),
    /// Leave it out.
    Remove,
}

/// Temp file used when rewriting `path`: same directory, `.tmp` appended.
pub(crate) fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("picturedb"));
    name.push(TEMP_FILE_SUFFIX);
    path.with_file_name(name)
}

/// Apply `edit` to the first line of `path` whose id equals `target_id`.
///
/// Returns `Ok(false)` if no line matched; the backing file is untouched in
/// that case. All other lines keep their content and relative order.
pub(crate) fn rewrite(path: &Path, target_id: &str, edit: Edit<'_>) -> io::Result<bool> {
    let tmp_path = temp_path(path);
    match fs::remove_file(&tmp_path) {
        Ok(()) => tracing::debug!("Removed stale temp file {:?}", tmp_path),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }

    let found = match copy_with_edit(path, &tmp_path, target_id, edit) {
        Ok(found) => found,
        Err(e) => {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }
    };

    if !found {
        fs::remove_file(&tmp_path)?;
        return Ok(false);
    }

    // Single rename: the backing file is either the old or the new version,
    // never missing.
    fs::rename(&tmp_path, path)?;
    Ok(true)
}

fn copy_with_edit(src: &Path, dst: &Path, target_id: &str, edit: Edit<'_>) -> io::Result<bool> {
    let mut reader = BufReader::new(File::open(src)?);
    let tmp = OpenOptions::new().write(true).create_new(true).open(dst)?;
    // Keep the backing file's permissions across the swap.
    fs::set_permissions(dst, fs::metadata(src)?.permissions())?;
    let mut writer = BufWriter::new(tmp);

    let mut found = false;
    let mut line = Vec::new();
    while read_line(&mut reader, &mut line)? {
        if !found && line_id(&String::from_utf8_lossy(&line)) == target_id {
            found = true;
            match edit {
                Edit::Replace(new_line) => write_line(&mut writer, new_line.as_bytes())?,
                Edit::Remove => {}
            }
            continue;
        }
        write_line(&mut writer, &line)?;
    }

    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(found)
}

fn write_line<W: Write>(writer: &mut W, line: &[u8]) -> io::Result<()> {
    writer.write_all(line)?;
    writer.write_all(LINE_ENDING.as_bytes())
}
