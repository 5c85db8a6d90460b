//! Capacity-bounded quadtree over 2D points
//!
//! The broad phase of collision detection. A node is either:
//! - a leaf holding at most `capacity` points and no children, or
//! - an internal node holding no points and exactly four children (NW, NE, SE, SW).
//!
//! Leaves at `TREE_MAX_DEPTH` never split and absorb any overflow, so points
//! sharing a position cannot drive subdivision forever.
//!
//! The tree is built from scratch every frame and thrown away afterwards.

use glam::Vec2;

use super::rect::Rect;
use crate::consts::TREE_MAX_DEPTH;

/// Anything with a 2D position can be stored in a quadtree
pub trait Point {
    fn position(&self) -> Vec2;
}

impl Point for Vec2 {
    #[inline]
    fn position(&self) -> Vec2 {
        *self
    }
}

/// A quadtree node (the root is just the node at depth 0)
#[derive(Debug, Clone)]
pub struct QuadTree<T> {
    bound: Rect,
    capacity: usize,
    depth: u32,
    points: Vec<T>,
    children: Option<Box<[QuadTree<T>; 4]>>,
}

impl<T: Point> QuadTree<T> {
    /// Create an empty root covering `bound`
    ///
    /// A capacity of zero is treated as one.
    pub fn new(bound: Rect, capacity: usize) -> Self {
        Self::node(bound, capacity.max(1), 0)
    }

    fn node(bound: Rect, capacity: usize, depth: u32) -> Self {
        Self {
            bound,
            capacity,
            depth,
            points: Vec::with_capacity(capacity),
            children: None,
        }
    }

    pub fn bound(&self) -> &Rect {
        &self.bound
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Points held directly by this node (empty for internal nodes)
    pub fn points(&self) -> &[T] {
        &self.points
    }

    /// Children in NW, NE, SE, SW order
    pub fn children(&self) -> Option<&[QuadTree<T>; 4]> {
        self.children.as_deref()
    }

    /// Check if a point falls inside this node's bound
    pub fn includes(&self, p: Vec2) -> bool {
        self.bound.contains(p)
    }

    /// Insert a point, splitting this node if it is full
    ///
    /// Returns false if the point was dropped because it lies outside the
    /// root once the root has split.
    pub fn insert(&mut self, point: T) -> bool {
        if self.children.is_none() {
            if self.points.len() < self.capacity {
                self.points.push(point);
                return true;
            }
            if self.depth >= TREE_MAX_DEPTH {
                if self.points.len() == self.capacity {
                    log::debug!(
                        "Quadtree depth limit {} reached at {:?}, leaf overflowing",
                        TREE_MAX_DEPTH,
                        self.bound.center
                    );
                }
                self.points.push(point);
                return true;
            }
            self.split();
        }

        let pos = point.position();
        match self.child_for(pos) {
            Some(child) => child.insert(point),
            None => {
                log::trace!("Dropped point at {:?} outside {:?}", pos, self.bound);
                false
            }
        }
    }

    /// The child a point descends into: the first whose bound contains it
    ///
    /// Below the root every point already belongs to this node, so a point
    /// that falls in a rounding gap between child bounds is routed by its
    /// side of the center. Only the root drops points.
    fn child_for(&mut self, pos: Vec2) -> Option<&mut QuadTree<T>> {
        let owned = self.depth > 0 || self.includes(pos);
        let quadrant = self.bound.quadrant_of(pos);
        let children = self.children.as_deref_mut()?;
        match children.iter().position(|c| c.includes(pos)) {
            Some(i) => Some(&mut children[i]),
            None if owned => Some(&mut children[quadrant]),
            None => None,
        }
    }

    /// Subdivide into four children and hand the held points down to them
    ///
    /// No-op on a node that is already internal.
    pub fn split(&mut self) {
        if self.children.is_some() {
            return;
        }
        let (capacity, depth) = (self.capacity, self.depth + 1);
        let children = self
            .bound
            .quadrants()
            .map(|bound| QuadTree::node(bound, capacity, depth));
        self.children = Some(Box::new(children));

        for p in std::mem::take(&mut self.points) {
            self.insert(p);
        }
    }

    /// Broad-phase query
    ///
    /// Returns every point held by a leaf whose bound overlaps `range`. Leaf
    /// points are not filtered individually, so results may lie outside
    /// `range`. A point lives in exactly one leaf, so there are no duplicates.
    pub fn query(&self, range: &Rect) -> Vec<&T> {
        let mut found = Vec::new();
        self.query_into(range, &mut found);
        found
    }

    /// Like [`QuadTree::query`], appending to an existing buffer
    pub fn query_into<'a>(&'a self, range: &Rect, found: &mut Vec<&'a T>) {
        if !self.bound.overlaps(range) {
            return;
        }
        match self.children.as_deref() {
            None => found.extend(self.points.iter()),
            Some(children) => {
                for child in children {
                    child.query_into(range, found);
                }
            }
        }
    }

    /// Bounds of this node and all descendants, pre-order
    pub fn render_bounds(&self) -> Vec<Rect> {
        let mut bounds = Vec::new();
        self.collect_bounds(&mut bounds);
        bounds
    }

    fn collect_bounds(&self, bounds: &mut Vec<Rect>) {
        bounds.push(self.bound);
        if let Some(children) = self.children.as_deref() {
            for child in children {
                child.collect_bounds(bounds);
            }
        }
    }

    /// Total number of points stored in this subtree
    pub fn len(&self) -> usize {
        match self.children.as_deref() {
            None => self.points.len(),
            Some(children) => children.iter().map(QuadTree::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
