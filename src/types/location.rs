//! Planar locations used for ride origins, destinations and positions.
//!
//! Coordinates are plain `f64` values on a flat Cartesian plane. Distances
//! are Euclidean; no geodesic correction is applied.

use serde::{Deserialize, Serialize};

use crate::quad::HasPoint;

/// A location given by a pair of coordinates.
///
/// Two locations are equal only when both coordinates match exactly.
///
/// ## Example
///
/// ```
/// use ride_matcher::types::Location;
///
/// let a = Location::new(0.0, 0.0);
/// let b = Location::new(3.0, 4.0);
/// assert_eq!(a.distance(&b), 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    pub x: f64,
    pub y: f64,
}

impl Location {
    /// Create a location from its coordinates
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another location
    #[inline]
    pub fn distance(&self, other: &Location) -> f64 {
        distance(self.x, self.y, other.x, other.y)
    }

    /// True if `other` lies within `radius` (inclusive)
    #[inline]
    pub fn is_within(&self, other: &Location, radius: f64) -> bool {
        self.distance(other) <= radius
    }
}

impl HasPoint for Location {
    #[inline]
    fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    fn y(&self) -> f64 {
        self.y
    }
}

impl From<(f64, f64)> for Location {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Euclidean distance between two coordinate pairs
#[inline]
pub fn distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    (x1 - x2).hypot(y1 - y2)
}

// ============================================================================
// Unit Tests
// ============================================================================
