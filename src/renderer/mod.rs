//! Host-facing draw data
//!
//! The core never touches a canvas. Each frame it hands the host flat
//! vertex/instance buffers: particles as circles, quadtree bounds as
//! outlines, and optional candidate lines for debugging the broad phase.

pub mod shapes;
pub mod vertex;

pub use vertex::{CircleInstance, Vertex, colors};

use crate::settings::Settings;
use crate::sim::{ColorTag, FrameOutput};

/// Everything needed to draw one frame, back to front
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    /// Background fill
    pub clear: [f32; 4],
    /// Quadtree bounds as a line list
    pub outlines: Vec<Vertex>,
    /// Candidate pairs as a line list
    pub candidate_lines: Vec<Vertex>,
    /// One instance per particle
    pub circles: Vec<CircleInstance>,
}

impl DrawList {
    pub fn build(frame: &FrameOutput, settings: &Settings) -> Self {
        let outlines = frame
            .bounds
            .iter()
            .flat_map(|r| shapes::rect_outline(r, colors::TREE_OUTLINE))
            .collect();

        let candidate_lines = shapes::candidate_lines(
            &frame.candidate_groups,
            &frame.start_positions,
            &frame.particles,
        );

        let circles = frame
            .particles
            .iter()
            .map(|p| {
                let color = match p.tag {
                    ColorTag::Idle => settings.particle_color,
                    ColorTag::Colliding => settings.collision_color,
                };
                CircleInstance::new(p.pos.x, p.pos.y, p.radius, color)
            })
            .collect();

        Self {
            clear: colors::BACKGROUND,
            outlines,
            candidate_lines,
            circles,
        }
    }

    /// Expand the circle instances into a triangle list
    pub fn circle_triangles(&self, segments: u32) -> Vec<Vertex> {
        self.circles
            .iter()
            .flat_map(|c| shapes::circle(c.center.into(), c.radius, c.color, segments))
            .collect()
    }
}
