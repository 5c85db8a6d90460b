//! Axis-aligned rectangle geometry
//!
//! A rectangle is stored as a center plus half-extents:
//! - x, y: center
//! - half.x, half.y: half-width and half-height
//!
//! Screen space: y grows downward, so "top" is `y - half.y`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (center + half-extents)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Center point
    pub center: Vec2,
    /// Half-width (x) and half-height (y)
    pub half: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, dim_x: f32, dim_y: f32) -> Self {
        Self {
            center: Vec2::new(x, y),
            half: Vec2::new(dim_x, dim_y),
        }
    }

    /// Square centered at `center` with half-extent `half`
    pub fn square(center: Vec2, half: f32) -> Self {
        Self {
            center,
            half: Vec2::splat(half),
        }
    }

    /// Rectangle covering `[0, width] x [0, height]`
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(width / 2.0, height / 2.0, width / 2.0, height / 2.0)
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y - self.half.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y + self.half.y
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.half.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.half.x
    }

    /// Split into quadrants
    ///
    /// Returns the NW, NE, SE, SW children, each with half this rectangle's
    /// width and height.
    pub fn quadrants(&self) -> [Rect; 4] {
        let h = self.half / 2.0;
        let Vec2 { x, y } = self.center;
        [
            Rect::new(x - h.x, y - h.y, h.x, h.y),
            Rect::new(x + h.x, y - h.y, h.x, h.y),
            Rect::new(x + h.x, y + h.y, h.x, h.y),
            Rect::new(x - h.x, y + h.y, h.x, h.y),
        ]
    }

    /// Index into [`Rect::quadrants`] of the quadrant a point falls in,
    /// by comparison with the center (split lines go to the earlier quadrant)
    pub fn quadrant_of(&self, p: Vec2) -> usize {
        let west = p.x <= self.center.x;
        let north = p.y <= self.center.y;
        match (west, north) {
            (true, true) => 0,
            (false, true) => 1,
            (false, false) => 2,
            (true, false) => 3,
        }
    }

    /// Check if a point lies inside, edges included
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    /// Check if two rectangles overlap (touching edges count)
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(other.bottom() < self.top()
            || other.top() > self.bottom()
            || other.left() > self.right()
            || other.right() < self.left())
    }
}
