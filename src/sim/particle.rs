//! Particle state and edge reflection

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::quadtree::Point;
use super::rect::Rect;
use crate::settings::Viewport;

/// Display tag, recomputed every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorTag {
    /// Overlapped nothing this frame
    #[default]
    Idle,
    /// Overlapped at least one other particle this frame
    Colliding,
}

/// A circular particle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    #[serde(default)]
    pub tag: ColorTag,
}

impl Point for Particle {
    #[inline]
    fn position(&self) -> Vec2 {
        self.pos
    }
}

impl Particle {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
            tag: ColorTag::Idle,
        }
    }

    /// Square bounding box used to query the quadtree
    pub fn bounding_box(&self) -> Rect {
        Rect::square(self.pos, self.radius)
    }

    /// Mass grows with radius: `r * 4/3 * PI * k^3`
    #[inline]
    pub fn mass(&self, mass_scale: f32) -> f32 {
        self.radius * 4.0 / 3.0 * std::f32::consts::PI * mass_scale.powi(3)
    }

    /// Move one frame, reflecting off the viewport edges
    ///
    /// Reflection flips the velocity before it is applied, but a fast
    /// particle can still end up past an edge for one frame.
    pub fn advance(&mut self, viewport: &Viewport) {
        let (x, dx) = reflect_axis(self.pos.x, self.vel.x, self.radius, viewport.width);
        let (y, dy) = reflect_axis(self.pos.y, self.vel.y, self.radius, viewport.height);
        self.pos = Vec2::new(x, y);
        self.vel = Vec2::new(dx, dy);
    }
}

/// Next (position, velocity) along one axis bounded by `[0, extent]`
fn reflect_axis(pos: f32, vel: f32, radius: f32, extent: f32) -> (f32, f32) {
    // Already outside: pull back to the inner edge
    let pos = if pos + radius > extent {
        extent - radius
    } else if pos - radius < 0.0 {
        radius
    } else {
        pos
    };

    // About to clip an edge: reverse
    let vel = if (vel < 0.0 && pos + vel - radius < 0.0) || (vel > 0.0 && pos + vel + radius > extent) {
        -vel
    } else {
        vel
    };

    (pos + vel, vel)
}
