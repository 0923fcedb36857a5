//! Quadtree nodes: buckets (leaves) and quads (internal nodes).
//!
//! ## Ownership
//!
//! A node owns its children through `Option<Box<Trie<T>>>` slots, one per
//! quadrant, created lazily on the first insertion into that quadrant.
//! Insertion consumes a subtree and returns the subtree that should take its
//! place: usually the same node, or a freshly built quad when a bucket
//! overflows. The parent stores whatever comes back in its own slot.
//!
//! Quads never turn back into buckets; deletions leave empty buckets behind.

use std::mem;

use crate::quad::{HasPoint, Rect};

/// Split policy shared by every node of a tree
#[derive(Debug, Clone, Copy)]
pub(crate) struct Limits {
    /// Points a bucket holds before it splits
    pub capacity: usize,
    /// Depth at which buckets stop splitting and grow instead
    pub max_depth: usize,
}

#[derive(Debug)]
pub(crate) enum Trie<T> {
    Leaf(LeafTrie<T>),
    Node(NodeTrie<T>),
}

#[derive(Debug)]
pub(crate) struct LeafTrie<T> {
    bounds: Rect,
    points: Vec<T>,
}

#[derive(Debug)]
pub(crate) struct NodeTrie<T> {
    bounds: Rect,
    children: [Option<Box<Trie<T>>>; 4],
}

#[inline]
fn same_coordinates<A: HasPoint, B: HasPoint>(a: &A, b: &B) -> bool {
    a.x() == b.x() && a.y() == b.y()
}

impl<T: HasPoint> Trie<T> {
    /// An empty bucket covering `bounds`
    pub fn leaf(bounds: Rect) -> Self {
        Trie::Leaf(LeafTrie {
            bounds,
            points: Vec::new(),
        })
    }

    pub fn bounds(&self) -> &Rect {
        match self {
            Trie::Leaf(leaf) => &leaf.bounds,
            Trie::Node(node) => &node.bounds,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Trie::Leaf(_))
    }

    /// Number of levels below and including this node
    pub fn height(&self) -> usize {
        match self {
            Trie::Leaf(_) => 1,
            Trie::Node(node) => {
                1 + node
                    .children()
                    .map(|child| child.height())
                    .max()
                    .unwrap_or(0)
            }
        }
    }

    /// Insert `point`, returning the subtree replacing `self`.
    ///
    /// With `replace` set, points at the exact same coordinates in the
    /// target bucket are dropped first and counted in `removed`.
    pub fn insert(
        self,
        point: T,
        limits: Limits,
        depth: usize,
        replace: bool,
        removed: &mut usize,
    ) -> Self {
        match self {
            Trie::Leaf(mut leaf) => {
                if replace {
                    let before = leaf.points.len();
                    leaf.points.retain(|p| !same_coordinates(p, &point));
                    *removed += before - leaf.points.len();
                }

                if leaf.points.len() < limits.capacity || depth >= limits.max_depth {
                    leaf.points.push(point);
                    return Trie::Leaf(leaf);
                }

                log::trace!(
                    "splitting bucket at depth {} holding {} points",
                    depth,
                    leaf.points.len()
                );

                let mut node = NodeTrie::new(leaf.bounds);
                for existing in leaf.points {
                    node.insert(existing, limits, depth, false, removed);
                }
                node.insert(point, limits, depth, false, removed);
                Trie::Node(node)
            }
            Trie::Node(mut node) => {
                node.insert(point, limits, depth, replace, removed);
                Trie::Node(node)
            }
        }
    }

    /// Remove the first stored point equal to `point`
    pub fn delete(&mut self, point: &T) -> Option<T>
    where
        T: PartialEq,
    {
        match self {
            Trie::Leaf(leaf) => {
                let position = leaf.points.iter().position(|p| p == point)?;
                Some(leaf.points.swap_remove(position))
            }
            Trie::Node(node) => {
                let quadrant = node.bounds.quadrant_of(point.x(), point.y());
                node.children[quadrant.index()].as_mut()?.delete(point)
            }
        }
    }

    /// Stored point with exactly the coordinates `(x, y)`
    pub fn find(&self, x: f64, y: f64) -> Option<&T> {
        match self {
            Trie::Leaf(leaf) => leaf.points.iter().find(|p| p.x() == x && p.y() == y),
            Trie::Node(node) => {
                let quadrant = node.bounds.quadrant_of(x, y);
                node.children[quadrant.index()].as_ref()?.find(x, y)
            }
        }
    }

    /// Collect points within `radius` of `(x, y)`, skipping subtrees whose
    /// rectangle lies entirely farther away
    pub fn collect_near<'a>(&'a self, x: f64, y: f64, radius: f64, out: &mut Vec<&'a T>) {
        match self {
            Trie::Leaf(leaf) => out.extend(
                leaf.points
                    .iter()
                    .filter(|p| crate::types::distance(p.x(), p.y(), x, y) <= radius),
            ),
            Trie::Node(node) => {
                for child in node.children() {
                    if child.bounds().overlaps_circle(x, y, radius) {
                        child.collect_near(x, y, radius, out);
                    }
                }
            }
        }
    }

    /// Collect every point in this subtree
    pub fn collect_all<'a>(&'a self, out: &mut Vec<&'a T>) {
        match self {
            Trie::Leaf(leaf) => out.extend(leaf.points.iter()),
            Trie::Node(node) => {
                for child in node.children() {
                    child.collect_all(out);
                }
            }
        }
    }
}

impl<T> LeafTrie<T> {
    pub fn points(&self) -> &[T] {
        &self.points
    }
}

impl<T> NodeTrie<T> {
    fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            children: [None, None, None, None],
        }
    }

    /// Children created so far
    pub fn children(&self) -> impl Iterator<Item = &Trie<T>> {
        self.children.iter().flatten().map(|child| child.as_ref())
    }
}

impl<T: HasPoint> NodeTrie<T> {
    fn insert(&mut self, point: T, limits: Limits, depth: usize, replace: bool, removed: &mut usize) {
        let quadrant = self.bounds.quadrant_of(point.x(), point.y());
        let child_bounds = self.bounds.quadrant(quadrant);
        let slot = self.children[quadrant.index()]
            .get_or_insert_with(|| Box::new(Trie::leaf(child_bounds)));

        let child = mem::replace(&mut **slot, Trie::leaf(child_bounds));
        **slot = child.insert(point, limits, depth + 1, replace, removed);
    }
}
