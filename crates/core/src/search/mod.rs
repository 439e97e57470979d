//! Query primitives evaluated during linear scans.

/// Open-interval bounding box used by position queries.
pub mod bbox;

pub use bbox::BoundingBox;
