//! # picturedb-core
//!
//! Flat-file store for picture records: one record per line, fields
//! separated by `"; "`, queried by linear scan.
//!
//! This is the core library crate with zero async dependencies. All I/O is
//! blocking and scoped to a single call.
//!
//! ```no_run
//! use picturedb_core::{Picture, PictureStore};
//! use url::Url;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = PictureStore::open("picture-data.csv")?;
//! let picture = Picture::now("p1", 8.54, 47.37, "Lake", Url::parse("https://example.org/lake.jpg")?);
//! store.insert(&picture)?;
//! let nearby = store.find_by_position(8.5, 47.4, 0.5)?;
//! assert!(!nearby.is_empty());
//! # Ok(())
//! # }
//! ```

/// Line codec: record <-> `id; timestamp; longitude; latitude; title; url`.
pub mod codec;
/// Compile-time constants: file format and rewrite settings.
pub mod config;
/// Store error type.
pub mod error;
/// The `Picture` record type.
pub mod picture;
/// Query primitives: the bounding box used by position lookups.
pub mod search;
/// Storage engine: `PictureStore`, atomic rewrite, observers.
pub mod storage;

pub use codec::{DecodeError, TimestampError};
pub use error::{Result, StoreError};
pub use picture::Picture;
pub use storage::{NoopObserver, Operation, PictureStore, StoreObserver, TracingObserver};
