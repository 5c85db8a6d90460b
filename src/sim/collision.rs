//! Narrow-phase collision detection and elastic response
//!
//! Circles collide when their centers are no further apart than the sum of
//! their radii. Response is a 1D elastic impulse along the collision normal;
//! the tangential velocity is left alone.

use glam::Vec2;

use super::particle::Particle;

/// Distance between particle centers
#[inline]
pub fn distance(p1: &Particle, p2: &Particle) -> f32 {
    p1.pos.distance(p2.pos)
}

/// True if two circles overlap or touch
#[inline]
pub fn have_collided(p1: &Particle, p2: &Particle) -> bool {
    distance(p1, p2) <= p1.radius + p2.radius
}

/// Unit vector pointing from `p2` toward `p1`
///
/// Coincident centers have no direction; fall back to the x axis, signed by
/// id so that swapping the arguments still flips the normal.
pub fn collision_normal(p1: &Particle, p2: &Particle) -> Vec2 {
    let delta = p1.pos - p2.pos;
    let dist = delta.length();
    if dist > f32::EPSILON {
        delta / dist
    } else if p1.id >= p2.id {
        Vec2::X
    } else {
        Vec2::NEG_X
    }
}

/// Apply an elastic impulse to two overlapping particles
///
/// Returns false without touching either particle when they are already
/// separating along the normal. That makes a second call on the same pair
/// a no-op.
pub fn resolve_collision(p1: &mut Particle, p2: &mut Particle, mass_scale: f32) -> bool {
    let normal = collision_normal(p1, p2);
    let speed = (p1.vel - p2.vel).dot(normal);
    if speed > 0.0 {
        return false;
    }

    let m1 = p1.mass(mass_scale);
    let m2 = p2.mass(mass_scale);
    let impulse = 2.0 * speed / (m1 + m2);

    p1.vel -= impulse * m2 * normal;
    p2.vel += impulse * m1 * normal;
    true
}
