//! The picture store: a single flat file, one encoded record per line.
//!
//! Every operation opens the backing file, works on it and closes it before
//! returning; no handle is held between calls. Reads are linear scans in
//! file order. Update and delete go through [`replace::rewrite`].
//!
//! The store assumes a single writer. Concurrent mutations of the same file
//! are not coordinated and may lose or interleave data.

use crate::codec;
use crate::config::LINE_ENDING;
use crate::error::{Result, StoreError};
use crate::picture::Picture;
use crate::search::BoundingBox;
use crate::storage::observer::{Operation, StoreObserver, TracingObserver};
use crate::storage::read_line;
use crate::storage::replace::{self, Edit};
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// File-backed picture store.
#[derive(Clone)]
pub struct PictureStore {
    path: PathBuf,
    observer: Arc<dyn StoreObserver>,
}

impl fmt::Debug for PictureStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PictureStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl PictureStore {
    /// Open a store on an existing file, logging through [`TracingObserver`].
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_observer(path, Arc::new(TracingObserver))
    }

    /// Open a store on an existing file with a custom observer.
    ///
    /// Fails with [`StoreError::FileNotFound`] if `path` does not exist or is
    /// not a regular file, and with [`StoreError::Io`] if its metadata cannot
    /// be read for any other reason. The file is never created here.
    pub fn with_observer(
        path: impl AsRef<Path>,
        observer: Arc<dyn StoreObserver>,
    ) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => return Err(StoreError::FileNotFound(path)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::FileNotFound(path))
            }
            Err(e) => return Err(e.into()),
        }
        observer.opened(&path);
        Ok(Self { path, observer })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a record. Does not check for an existing record with the same id.
    pub fn insert(&self, picture: &Picture) -> Result<()> {
        self.observer.started(Operation::Insert);
        let mut line = codec::encode(picture);
        line.push_str(LINE_ENDING);

        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        file.write_all(line.as_bytes())?;
        file.flush()?;

        self.observer.inserted(picture);
        Ok(())
    }

    /// Replace the first record whose id equals `picture.id`.
    ///
    /// On [`StoreError::NotFound`] the backing file is unchanged.
    pub fn update(&self, picture: &Picture) -> Result<()> {
        self.observer.started(Operation::Update);
        let line = codec::encode(picture);
        if !replace::rewrite(&self.path, &picture.id, Edit::Replace(&line))? {
            return Err(self.not_found(Operation::Update, &picture.id));
        }
        self.observer.updated(picture);
        Ok(())
    }

    /// Remove the first record whose id equals `picture.id`.
    ///
    /// Only the id is compared; see [`PictureStore::delete_by_id`].
    pub fn delete(&self, picture: &Picture) -> Result<()> {
        self.delete_by_id(&picture.id)
    }

    /// Remove the first line whose id field equals `id`.
    ///
    /// Other lines are not decoded, so malformed lines never make this fail
    /// with [`StoreError::Parse`]. On [`StoreError::NotFound`] the backing
    /// file is unchanged.
    pub fn delete_by_id(&self, id: &str) -> Result<()> {
        self.observer.started(Operation::Delete);
        if !replace::rewrite(&self.path, id, Edit::Remove)? {
            return Err(self.not_found(Operation::Delete, id));
        }
        self.observer.deleted(id);
        Ok(())
    }

    /// Number of lines in the backing file. Lines are not decoded.
    pub fn count(&self) -> Result<usize> {
        self.observer.started(Operation::Count);
        let mut reader = BufReader::new(File::open(&self.path)?);
        let mut buf = Vec::new();
        let mut count = 0;
        while reader.read_until(b'\n', &mut buf)? > 0 {
            count += 1;
            buf.clear();
        }
        self.observer.scanned(Operation::Count, count, count);
        Ok(count)
    }

    /// First record with the given id.
    ///
    /// Lines before the match must decode; a malformed one aborts the scan
    /// with [`StoreError::Parse`].
    pub fn find_by_id(&self, id: &str) -> Result<Picture> {
        self.observer.started(Operation::FindById);
        let mut reader = BufReader::new(File::open(&self.path)?);
        let mut line = Vec::new();
        let mut scanned = 0;
        while read_line(&mut reader, &mut line)? {
            let picture = decode_line(scanned, &line)?;
            scanned += 1;
            if picture.id == id {
                self.observer.scanned(Operation::FindById, scanned, 1);
                return Ok(picture);
            }
        }
        self.observer.scanned(Operation::FindById, scanned, 0);
        Err(self.not_found(Operation::FindById, id))
    }

    /// True if some record has the given id.
    pub fn contains_id(&self, id: &str) -> Result<bool> {
        match self.find_by_id(id) {
            Ok(_) => Ok(true),
            Err(StoreError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// All records in file order.
    pub fn find_all(&self) -> Result<Vec<Picture>> {
        self.observer.started(Operation::FindAll);
        self.scan(Operation::FindAll, |_| true)
    }

    /// Records strictly inside the box `longitude ± deviation` x `latitude ± deviation`,
    /// in file order.
    pub fn find_by_position(
        &self,
        longitude: f32,
        latitude: f32,
        deviation: f32,
    ) -> Result<Vec<Picture>> {
        self.observer.started(Operation::FindByPosition);
        let bbox = BoundingBox::around(longitude, latitude, deviation);
        self.scan(Operation::FindByPosition, |p| bbox.contains(p))
    }

    /// Decode every line and keep the records accepted by `keep`.
    fn scan<F>(&self, op: Operation, mut keep: F) -> Result<Vec<Picture>>
    where
        F: FnMut(&Picture) -> bool,
    {
        let mut reader = BufReader::new(File::open(&self.path)?);
        let mut line = Vec::new();
        let mut pictures = Vec::new();
        let mut scanned = 0;
        while read_line(&mut reader, &mut line)? {
            let picture = decode_line(scanned, &line)?;
            scanned += 1;
            if keep(&picture) {
                pictures.push(picture);
            }
        }
        self.observer.scanned(op, scanned, pictures.len());
        Ok(pictures)
    }

    fn not_found(&self, op: Operation, id: &str) -> StoreError {
        self.observer.not_found(op, id);
        StoreError::NotFound(id.to_string())
    }
}

// A line that is not UTF-8 is a parse error on that line, like any other
// undecodable line.
fn decode_line(idx: usize, line: &[u8]) -> Result<Picture> {
    std::str::from_utf8(line)
        .map_err(codec::DecodeError::from)
        .and_then(codec::decode)
        .map_err(|source| StoreError::Parse {
            line: idx + 1,
            source,
        })
}
