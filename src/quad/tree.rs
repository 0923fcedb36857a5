//! The point quadtree facade.
//!
//! [`PointQuadtree`] owns the root node, validates coordinates against the
//! universe and keeps a running point count. The node logic lives in the
//! private `trie` module.

use std::mem;
use std::slice;

use crate::error::QuadError;
use crate::quad::trie::{Limits, Trie};
use crate::quad::{HasPoint, Rect};
use crate::types::Location;

/// Points a bucket holds before splitting
pub const DEFAULT_CAPACITY: usize = 10;

/// Depth below which buckets stop splitting
pub const DEFAULT_MAX_DEPTH: usize = 24;

/// Adaptive point quadtree over a fixed rectangle.
///
/// ## Example
///
/// ```
/// use ride_matcher::quad::PointQuadtree;
/// use ride_matcher::types::Location;
///
/// let mut tree = PointQuadtree::with_capacity(
///     Location::new(0.0, 10.0),
///     Location::new(10.0, 0.0),
///     2,
///     8,
/// ).unwrap();
///
/// for i in 0..5 {
///     tree.insert(Location::new(i as f64, i as f64)).unwrap();
/// }
///
/// assert_eq!(tree.len(), 5);
/// assert!(!tree.is_leaf());
/// assert!(tree.find(&Location::new(3.0, 3.0)).is_some());
/// ```
#[derive(Debug)]
pub struct PointQuadtree<T> {
    top: Trie<T>,
    bounds: Rect,
    limits: Limits,
    len: usize,
}

impl<T: HasPoint> PointQuadtree<T> {
    /// Create an empty tree with default bucket capacity and depth limit.
    ///
    /// # Arguments
    ///
    /// * `top_left` - North-west corner (smallest x, largest y)
    /// * `bottom_right` - South-east corner (largest x, smallest y)
    pub fn new(top_left: Location, bottom_right: Location) -> Result<Self, QuadError> {
        Self::with_capacity(top_left, bottom_right, DEFAULT_CAPACITY, DEFAULT_MAX_DEPTH)
    }

    /// Create an empty tree with an explicit split policy.
    ///
    /// A bucket at `max_depth` keeps growing instead of splitting, so any
    /// number of points may share the same coordinates.
    pub fn with_capacity(
        top_left: Location,
        bottom_right: Location,
        capacity: usize,
        max_depth: usize,
    ) -> Result<Self, QuadError> {
        if capacity == 0 {
            return Err(QuadError::ZeroCapacity);
        }

        let bounds = Rect::new(top_left.x, top_left.y, bottom_right.x, bottom_right.y)?;

        Ok(Self {
            top: Trie::leaf(bounds),
            bounds,
            limits: Limits {
                capacity,
                max_depth,
            },
            len: 0,
        })
    }

    /// Insert a point. Coincident points are kept side by side.
    ///
    /// # Errors
    ///
    /// [`QuadError::PointOutOfBounds`] if the point lies outside the universe.
    pub fn insert(&mut self, point: T) -> Result<(), QuadError> {
        self.check_bounds(&point)?;

        let mut removed = 0;
        self.push(point, false, &mut removed);
        self.len += 1;
        Ok(())
    }

    /// Insert a point, first dropping any stored point with the exact same
    /// coordinates.
    pub fn insert_replace(&mut self, point: T) -> Result<(), QuadError> {
        self.check_bounds(&point)?;

        let mut removed = 0;
        self.push(point, true, &mut removed);
        self.len = self.len + 1 - removed;
        Ok(())
    }

    fn push(&mut self, point: T, replace: bool, removed: &mut usize) {
        let top = mem::replace(&mut self.top, Trie::leaf(self.bounds));
        self.top = top.insert(point, self.limits, 0, replace, removed);
    }

    fn check_bounds(&self, point: &T) -> Result<(), QuadError> {
        if self.contains(point.x(), point.y()) {
            Ok(())
        } else {
            Err(QuadError::PointOutOfBounds {
                x: point.x(),
                y: point.y(),
            })
        }
    }

    /// Remove a stored point equal to `point`. Returns `None` if absent.
    pub fn delete(&mut self, point: &T) -> Option<T>
    where
        T: PartialEq,
    {
        if !self.contains(point.x(), point.y()) {
            return None;
        }

        let removed = self.top.delete(point)?;
        self.len -= 1;
        Some(removed)
    }

    /// A stored point with exactly the coordinates of `at`
    pub fn find<P: HasPoint>(&self, at: &P) -> Option<&T> {
        self.top.find(at.x(), at.y())
    }

    /// Every stored point within `radius` of `(x, y)`, in no particular order
    pub fn find_near(&self, x: f64, y: f64, radius: f64) -> Vec<&T> {
        let mut out = Vec::new();
        self.top.collect_near(x, y, radius, &mut out);
        out
    }

    /// Every stored point
    pub fn all_points(&self) -> Vec<&T> {
        let mut out = Vec::with_capacity(self.len);
        self.top.collect_all(&mut out);
        out
    }

    /// Lazy depth-first traversal of the stored points
    pub fn iter(&self) -> Points<'_, T> {
        Points {
            stack: vec![&self.top],
            current: Default::default(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of levels in the tree (1 for a single bucket)
    pub fn depth(&self) -> usize {
        self.top.height()
    }

    /// True while the root is still a bucket
    pub fn is_leaf(&self) -> bool {
        self.top.is_leaf()
    }

    pub fn bounds(&self) -> &Rect {
        &self.bounds
    }

    /// True if `(x, y)` lies inside the universe (inclusive)
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.bounds.contains(x, y)
    }
}

// ============================================================================
// Iterator
// ============================================================================

/// Depth-first iterator over the points of a [`PointQuadtree`].
///
/// Created by [`PointQuadtree::iter`]; every call starts a fresh traversal.
pub struct Points<'a, T> {
    stack: Vec<&'a Trie<T>>,
    current: slice::Iter<'a, T>,
}

impl<'a, T: HasPoint> Iterator for Points<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        loop {
            if let Some(point) = self.current.next() {
                return Some(point);
            }

            match self.stack.pop()? {
                Trie::Leaf(leaf) => self.current = leaf.points().iter(),
                Trie::Node(node) => self.stack.extend(node.children()),
            }
        }
    }
}

impl<'a, T: HasPoint> IntoIterator for &'a PointQuadtree<T> {
    type Item = &'a T;
    type IntoIter = Points<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
