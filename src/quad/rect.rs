//! Axis-aligned rectangles and quadrant arithmetic.
//!
//! ## Orientation
//!
//! The y axis grows northward, so the top-left corner carries the larger y:
//!
//! ```text
//! (tl_x, tl_y) +---------+---------+
//!              |   NW    |   NE    |
//!              +------(mid_x,mid_y)+
//!              |   SW    |   SE    |
//!              +---------+---------+ (br_x, br_y)
//! ```
//!
//! Points on a midline are assigned consistently: `x <= mid_x` is west and
//! `y >= mid_y` is north, so the centre itself belongs to NW.

use crate::error::QuadError;
use crate::types::distance;

/// Quadrants of a split rectangle, named after the compass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    NE,
    NW,
    SE,
    SW,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [Quadrant::NE, Quadrant::NW, Quadrant::SE, Quadrant::SW];

    /// Slot of this quadrant in a node's child array
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Quadrant::NE => 0,
            Quadrant::NW => 1,
            Quadrant::SE => 2,
            Quadrant::SW => 3,
        }
    }
}

/// Rectangle given by its top-left and bottom-right corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub top_left_x: f64,
    pub top_left_y: f64,
    pub bottom_right_x: f64,
    pub bottom_right_y: f64,
}

impl Rect {
    /// Build a rectangle, rejecting empty, inverted or non-finite corners.
    pub fn new(
        top_left_x: f64,
        top_left_y: f64,
        bottom_right_x: f64,
        bottom_right_y: f64,
    ) -> Result<Self, QuadError> {
        let finite = [top_left_x, top_left_y, bottom_right_x, bottom_right_y]
            .iter()
            .all(|v| v.is_finite());

        if !finite || top_left_x >= bottom_right_x || top_left_y <= bottom_right_y {
            return Err(QuadError::InvalidBounds {
                top_left_x,
                top_left_y,
                bottom_right_x,
                bottom_right_y,
            });
        }

        Ok(Self::from_corners(top_left_x, top_left_y, bottom_right_x, bottom_right_y))
    }

    /// Unchecked constructor used when splitting an already valid rectangle
    #[inline]
    const fn from_corners(
        top_left_x: f64,
        top_left_y: f64,
        bottom_right_x: f64,
        bottom_right_y: f64,
    ) -> Self {
        Self {
            top_left_x,
            top_left_y,
            bottom_right_x,
            bottom_right_y,
        }
    }

    #[inline]
    pub fn mid_x(&self) -> f64 {
        (self.top_left_x + self.bottom_right_x) / 2.0
    }

    #[inline]
    pub fn mid_y(&self) -> f64 {
        (self.top_left_y + self.bottom_right_y) / 2.0
    }

    /// Inclusive containment test
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.top_left_x <= x
            && x <= self.bottom_right_x
            && self.bottom_right_y <= y
            && y <= self.top_left_y
    }

    /// Quadrant a point belongs to (midline ties go west and north)
    pub fn quadrant_of(&self, x: f64, y: f64) -> Quadrant {
        let mid_x = self.mid_x();
        let mid_y = self.mid_y();

        if x <= mid_x && y >= mid_y {
            Quadrant::NW
        } else if x >= mid_x && y >= mid_y {
            Quadrant::NE
        } else if x <= mid_x && y <= mid_y {
            Quadrant::SW
        } else {
            Quadrant::SE
        }
    }

    /// The quarter of this rectangle covering `quadrant`
    pub fn quadrant(&self, quadrant: Quadrant) -> Rect {
        let mid_x = self.mid_x();
        let mid_y = self.mid_y();

        match quadrant {
            Quadrant::NW => Rect::from_corners(self.top_left_x, self.top_left_y, mid_x, mid_y),
            Quadrant::NE => Rect::from_corners(mid_x, self.top_left_y, self.bottom_right_x, mid_y),
            Quadrant::SW => Rect::from_corners(self.top_left_x, mid_y, mid_x, self.bottom_right_y),
            Quadrant::SE => {
                Rect::from_corners(mid_x, mid_y, self.bottom_right_x, self.bottom_right_y)
            }
        }
    }

    /// Distance from `(x, y)` to the closest point of this rectangle
    /// (0 when the point is inside)
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        let closest_x = x.clamp(self.top_left_x, self.bottom_right_x);
        let closest_y = y.clamp(self.bottom_right_y, self.top_left_y);
        distance(x, y, closest_x, closest_y)
    }

    /// Could a point of this rectangle lie within `radius` of `(x, y)`?
    #[inline]
    pub fn overlaps_circle(&self, x: f64, y: f64, radius: f64) -> bool {
        self.distance_to(x, y) <= radius
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
