//! Store observers: the logging side channel of the engine.
//!
//! The engine never logs directly. Every operation reports to a
//! [`StoreObserver`]; [`TracingObserver`] (the default) turns those reports
//! into `tracing` events, [`NoopObserver`] discards them, and callers can
//! plug in their own (metrics, audit, test recorders).

use crate::picture::Picture;
use std::fmt;
use std::path::Path;

/// Engine operation, as reported to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Insert,
    Update,
    Delete,
    Count,
    FindById,
    FindAll,
    FindByPosition,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Insert => "insert",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Count => "count",
            Operation::FindById => "find_by_id",
            Operation::FindAll => "find_all",
            Operation::FindByPosition => "find_by_position",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives notifications from a [`PictureStore`](crate::storage::PictureStore).
///
/// All methods default to no-ops. Implementations must be cheap; they run
/// inline on the calling thread.
pub trait StoreObserver: Send + Sync {
    /// The store was opened on `path`.
    fn opened(&self, _path: &Path) {}

    /// An operation is starting.
    fn started(&self, _op: Operation) {}

    /// A record was appended.
    fn inserted(&self, _picture: &Picture) {}

    /// A record was replaced and the rewrite committed.
    fn updated(&self, _picture: &Picture) {}

    /// The record with `id` was removed and the rewrite committed.
    fn deleted(&self, _id: &str) {}

    /// `op` found no record with `id`.
    fn not_found(&self, _op: Operation, _id: &str) {}

    /// A read scan finished after visiting `lines` lines and returning `matches` records.
    fn scanned(&self, _op: Operation, _lines: usize, _matches: usize) {}
}

/// Observer that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl StoreObserver for NoopObserver {}

/// Observer that emits `tracing` events. Used by default.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl StoreObserver for TracingObserver {
    fn opened(&self, path: &Path) {
        tracing::info!("Opened picture store at {:?}", path);
    }

    fn started(&self, op: Operation) {
        tracing::debug!("{} called", op);
    }

    fn inserted(&self, picture: &Picture) {
        tracing::info!("Picture inserted: {}", picture);
    }

    fn updated(&self, picture: &Picture) {
        tracing::info!("Picture updated: {}", picture);
    }

    fn deleted(&self, id: &str) {
        tracing::info!("Picture deleted: {}", id);
    }

    fn not_found(&self, op: Operation, id: &str) {
        tracing::warn!("{}: no picture with id '{}'", op, id);
    }

    fn scanned(&self, op: Operation, lines: usize, matches: usize) {
        tracing::debug!("{} scanned {} lines, {} matches", op, lines, matches);
    }
}
