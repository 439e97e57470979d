//! Error types for the picture store.

use crate::codec::DecodeError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// The backing file did not exist when the store was opened.
    #[error("backing file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// No record with the requested id.
    #[error("record not found: {0}")]
    NotFound(String),

    /// A line could not be decoded. `line` is 1-based.
    #[error("parse error on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: DecodeError,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl StoreError {
    /// True for [`StoreError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
