//! Bounding-box predicate for position queries.
//!
//! The box is open on every side: a record lying exactly on an edge is
//! outside. Bounds are computed in `f32`, the precision coordinates are
//! stored with.

use crate::picture::Picture;

/// Rectangular region `(min_longitude, max_longitude) x (min_latitude, max_latitude)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_longitude: f32,
    pub max_longitude: f32,
    pub min_latitude: f32,
    pub max_latitude: f32,
}

impl BoundingBox {
    /// Box centred on `(longitude, latitude)` extending `deviation` along both axes.
    pub fn around(longitude: f32, latitude: f32, deviation: f32) -> Self {
        Self {
            min_longitude: longitude - deviation,
            max_longitude: longitude + deviation,
            min_latitude: latitude - deviation,
            max_latitude: latitude + deviation,
        }
    }

    /// True if the picture lies strictly inside the box. NaN never matches.
    pub fn contains(&self, picture: &Picture) -> bool {
        self.contains_point(picture.longitude, picture.latitude)
    }

    /// True if `(longitude, latitude)` lies strictly inside the box.
    pub fn contains_point(&self, longitude: f32, latitude: f32) -> bool {
        latitude > self.min_latitude
            && latitude < self.max_latitude
            && longitude > self.min_longitude
            && longitude < self.max_longitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_around_bounds() {
        let bbox = BoundingBox::around(25.0, 20.0, 10.0);
        assert_eq!(bbox.min_longitude, 15.0);
        assert_eq!(bbox.max_longitude, 35.0);
        assert_eq!(bbox.min_latitude, 10.0);
        assert_eq!(bbox.max_latitude, 30.0);
    }

    #[test]
    fn test_interior_points() {
        let bbox = BoundingBox::around(25.0, 20.0, 10.0);
        assert!(bbox.contains_point(20.0, 29.0));
        assert!(bbox.contains_point(21.0, 20.0));
        assert!(bbox.contains_point(30.0, 20.0));
    }

    #[test]
    fn test_boundary_is_excluded() {
        let bbox = BoundingBox::around(25.0, 20.0, 10.0);
        assert!(!bbox.contains_point(15.0, 20.0));
        assert!(!bbox.contains_point(35.0, 20.0));
        assert!(!bbox.contains_point(25.0, 10.0));
        assert!(!bbox.contains_point(25.0, 30.0));
    }

    #[test]
    fn test_outside_on_one_axis() {
        let bbox = BoundingBox::around(25.0, 20.0, 10.0);
        // longitude inside, latitude outside
        assert!(!bbox.contains_point(25.0, 40.0));
        // latitude inside, longitude outside
        assert!(!bbox.contains_point(50.0, 20.0));
    }

    #[test]
    fn test_zero_deviation_matches_nothing() {
        let bbox = BoundingBox::around(1.0, 1.0, 0.0);
        assert!(!bbox.contains_point(1.0, 1.0));
    }

    #[test]
    fn test_nan_never_matches() {
        let bbox = BoundingBox::around(0.0, 0.0, 10.0);
        assert!(!bbox.contains_point(f32::NAN, 0.0));
        assert!(!bbox.contains_point(0.0, f32::NAN));
        assert!(!BoundingBox::around(f32::NAN, 0.0, 10.0).contains_point(0.0, 0.0));
    }
}
