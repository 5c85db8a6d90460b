//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::sim::{Particle, Rect};

/// Color of a candidate line between two particles at `a` and `b` whose
/// radii sum to `touch`
///
/// Red saturates as the pair closes in on touching:
/// `min(255, 5 * floor(255 * (r1 + r2) / dist))`.
pub fn candidate_color(a: Vec2, b: Vec2, touch: f32) -> [f32; 4] {
    let dist = a.distance(b);
    let red = if dist > 0.0 {
        (5.0 * (255.0 * touch / dist).floor()).min(255.0)
    } else {
        255.0
    };
    [red / 255.0, 125.0 / 255.0, 200.0 / 255.0, 1.0]
}

/// Line list joining consecutive members of each candidate group
///
/// Lines are drawn between `positions` (where the quadtree saw the
/// particles); radii come from `particles`.
pub fn candidate_lines(
    groups: &[Vec<usize>],
    positions: &[Vec2],
    particles: &[Particle],
) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    let member = |i: usize| Some((*positions.get(i)?, particles.get(i)?.radius));

    for group in groups {
        for pair in group.windows(2) {
            let (Some((a, ra)), Some((b, rb))) = (member(pair[0]), member(pair[1])) else {
                continue;
            };
            let color = candidate_color(a, b, ra + rb);
            vertices.push(Vertex::new(a.x, a.y, color));
            vertices.push(Vertex::new(b.x, b.y, color));
        }
    }

    vertices
}

/// Line list outlining a rectangle (four segments, clockwise from top-left)
pub fn rect_outline(rect: &Rect, color: [f32; 4]) -> [Vertex; 8] {
    let (l, r, t, b) = (rect.left(), rect.right(), rect.top(), rect.bottom());
    [
        Vertex::new(l, t, color),
        Vertex::new(r, t, color),
        Vertex::new(r, t, color),
        Vertex::new(r, b, color),
        Vertex::new(r, b, color),
        Vertex::new(l, b, color),
        Vertex::new(l, b, color),
        Vertex::new(l, t, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}
