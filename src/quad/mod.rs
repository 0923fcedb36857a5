//! Point quadtree used as the spatial index of the matcher.
//!
//! ## Architecture
//!
//! The tree covers a fixed rectangle (the universe) and is made of two node
//! kinds:
//!
//! - **Buckets**: leaves holding up to `capacity` points
//! - **Quads**: internal nodes with up to four children (NE, NW, SE, SW),
//!   each covering exactly one quarter of the parent
//!
//! A bucket turns into a quad when an insertion would overflow it. Quads
//! never collapse back into buckets.
//!
//! ## Components
//!
//! - [`HasPoint`]: anything with planar coordinates can be indexed
//! - [`Rect`] / [`Quadrant`]: rectangle arithmetic
//! - [`PointQuadtree`]: the tree itself
//! - [`Points`]: lazy depth-first iterator over the stored points
//!
//! ## Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Insert | O(depth) |
//! | Delete | O(depth + capacity) |
//! | Exact find | O(depth + capacity) |
//! | Find near | O(visited buckets × capacity) |
//!
//! ## Example
//!
//! ```
//! use ride_matcher::quad::PointQuadtree;
//! use ride_matcher::types::Location;
//!
//! let mut tree = PointQuadtree::new(
//!     Location::new(-100.0, 100.0),
//!     Location::new(100.0, -100.0),
//! ).unwrap();
//!
//! tree.insert(Location::new(1.0, 1.0)).unwrap();
//! tree.insert(Location::new(50.0, 50.0)).unwrap();
//!
//! assert_eq!(tree.find_near(0.0, 0.0, 5.0).len(), 1);
//! assert!(tree.insert(Location::new(500.0, 0.0)).is_err());
//! ```

pub mod rect;
pub mod tree;
mod trie;

pub use rect::{Quadrant, Rect};
pub use tree::{PointQuadtree, Points};

/// Planar coordinates of an indexed item
pub trait HasPoint {
    fn x(&self) -> f64;
    fn y(&self) -> f64;
}
