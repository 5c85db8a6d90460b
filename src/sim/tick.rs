//! Per-frame simulation step
//!
//! Each frame rebuilds the quadtree from scratch, resolves every collision it
//! finds, then advances all particles.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{have_collided, resolve_collision};
use super::particle::{ColorTag, Particle};
use super::quadtree::{Point, QuadTree};
use super::rect::Rect;
use super::state::Simulation;
use crate::settings::Viewport;

/// Host input collected since the last frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Spawn a particle at each position (clicks/taps)
    pub spawns: Vec<Vec2>,
    /// New viewport size (window resized)
    pub resize: Option<Viewport>,
}

/// What the host needs to draw a frame
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameOutput {
    /// Frame number (1 for the first frame)
    pub frame: u64,
    /// Particles after this frame's update
    pub particles: Vec<Particle>,
    /// Quadtree node bounds, pre-order
    pub bounds: Vec<Rect>,
    /// Broad-phase result of each particle's query, as indices into
    /// `particles`; empty unless candidate recording is enabled
    pub candidate_groups: Vec<Vec<usize>>,
    /// Particle positions the quadtree was built from, before advancing;
    /// recorded alongside `candidate_groups`
    pub start_positions: Vec<Vec2>,
    /// Pairs that received an impulse
    pub collisions: usize,
    /// Total broad-phase candidates examined (self included)
    pub candidates_checked: usize,
}

impl FrameOutput {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// A particle as stored in the frame's quadtree: its slot in the particle
/// table plus its position at the start of the frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleRef {
    pub index: usize,
    pub pos: Vec2,
}

impl Point for ParticleRef {
    #[inline]
    fn position(&self) -> Vec2 {
        self.pos
    }
}

/// Apply host input, then advance the simulation by one frame
pub fn tick(sim: &mut Simulation, input: &TickInput) -> FrameOutput {
    if let Some(viewport) = input.resize {
        if let Err(e) = sim.resize(viewport) {
            log::warn!("Ignoring resize: {e}");
        }
    }
    for &pos in &input.spawns {
        sim.spawn(pos);
    }
    step(sim)
}

/// Advance the simulation by one frame
pub fn step(sim: &mut Simulation) -> FrameOutput {
    let viewport = sim.viewport();
    let settings = sim.settings();
    let (capacity, mass_scale, record) = (
        settings.tree_capacity,
        settings.mass_scale,
        settings.record_candidates,
    );

    let start_positions: Vec<Vec2> = if record {
        sim.particles().iter().map(|p| p.pos).collect()
    } else {
        Vec::new()
    };

    let mut tree = QuadTree::new(sim.bounds(), capacity);
    for (index, p) in sim.particles().iter().enumerate() {
        tree.insert(ParticleRef { index, pos: p.pos });
    }

    let particles = sim.particles_mut();
    let mut colliding = vec![false; particles.len()];
    let mut candidate_groups: Vec<Vec<usize>> = Vec::new();
    let mut collisions = 0;
    let mut candidates_checked = 0;

    // Positions stay fixed until every collision is resolved; velocities
    // change in place and later pairs see the new values.
    let mut found = Vec::new();
    for i in 0..particles.len() {
        found.clear();
        tree.query_into(&particles[i].bounding_box(), &mut found);
        candidates_checked += found.len();
        if record {
            candidate_groups.push(found.iter().map(|r| r.index).collect());
        }

        for candidate in &found {
            let j = candidate.index;
            if j == i {
                continue;
            }
            let (a, b) = pair_mut(particles, i, j);
            // Only the querying particle is tagged
            if have_collided(a, b) {
                colliding[i] = true;
                if resolve_collision(a, b, mass_scale) {
                    collisions += 1;
                }
            }
        }
    }

    for (p, hit) in particles.iter_mut().zip(colliding) {
        p.tag = if hit {
            ColorTag::Colliding
        } else {
            ColorTag::Idle
        };
        p.advance(&viewport);
    }

    let frame = sim.finish_frame();
    log::trace!(
        "Frame {}: {} particles, {} candidates, {} collisions",
        frame,
        sim.particles().len(),
        candidates_checked,
        collisions
    );

    FrameOutput {
        frame,
        particles: sim.particles().to_vec(),
        bounds: tree.render_bounds(),
        candidate_groups,
        start_positions,
        collisions,
        candidates_checked,
    }
}

/// Two distinct mutable elements of a slice
fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(i, j);
    if i < j {
        let (lo, hi) = items.split_at_mut(j);
        (&mut lo[i], &mut hi[0])
    } else {
        let (lo, hi) = items.split_at_mut(i);
        (&mut hi[0], &mut lo[j])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    fn sim() -> Simulation {
        Simulation::new(Settings::default(), Viewport::new(800.0, 500.0).unwrap(), 12345).unwrap()
    }

    #[test]
    fn test_separated_stationary_particles_stay_put() {
        let mut sim = sim();
        sim.spawn_particle(Vec2::new(100.0, 100.0), Vec2::ZERO, 10.0);
        sim.spawn_particle(Vec2::new(300.0, 300.0), Vec2::ZERO, 10.0);

        for _ in 0..10 {
            let out = tick(&mut sim, &TickInput::default());
            assert_eq!(out.collisions, 0);
            assert!(out.particles.iter().all(|p| p.tag == ColorTag::Idle));
        }
        assert_eq!(sim.frame(), 10);
        assert_eq!(sim.particles()[0].pos, Vec2::new(100.0, 100.0));
        assert_eq!(sim.particles()[1].pos, Vec2::new(300.0, 300.0));
    }

    #[test]
    fn test_head_on_collision_swaps_velocities() {
        let mut sim = sim();
        sim.spawn_particle(Vec2::new(100.0, 100.0), Vec2::new(5.0, 0.0), 10.0);
        sim.spawn_particle(Vec2::new(115.0, 100.0), Vec2::new(-5.0, 0.0), 10.0);

        let out = step(&mut sim);
        // Found twice, resolved once: the second discovery sees a separating pair
        assert_eq!(out.collisions, 1);
        let [a, b] = &out.particles[..] else {
            panic!("expected two particles");
        };
        assert!((a.vel - Vec2::new(-5.0, 0.0)).length() < 1e-4);
        assert!((b.vel - Vec2::new(5.0, 0.0)).length() < 1e-4);
        assert!((a.pos - Vec2::new(95.0, 100.0)).length() < 1e-4);
        assert!((b.pos - Vec2::new(120.0, 100.0)).length() < 1e-4);
        assert_eq!(a.tag, ColorTag::Colliding);
        assert_eq!(b.tag, ColorTag::Colliding);

        // Apart now; the tag is not latched
        let out = step(&mut sim);
        assert_eq!(out.collisions, 0);
        assert!(out.particles.iter().all(|p| p.tag == ColorTag::Idle));
    }

    #[test]
    fn test_spawn_ids_sequential() {
        let mut sim = sim();
        let input = TickInput {
            spawns: (0..100)
                .map(|i| Vec2::new(20.0 + (i % 20) as f32 * 38.0, 20.0 + (i / 20) as f32 * 90.0))
                .collect(),
            ..Default::default()
        };
        let out = tick(&mut sim, &input);
        assert_eq!(out.particles.len(), 100);
        for (i, p) in out.particles.iter().enumerate() {
            assert_eq!(p.id, i as u32);
        }
    }

    #[test]
    fn test_candidate_groups_recorded() {
        let mut sim = sim();
        sim.spawn_particle(Vec2::new(100.0, 100.0), Vec2::ZERO, 10.0);
        sim.spawn_particle(Vec2::new(700.0, 400.0), Vec2::ZERO, 10.0);
        sim.spawn_particle(Vec2::new(110.0, 100.0), Vec2::ZERO, 10.0);

        let out = step(&mut sim);
        assert_eq!(out.candidate_groups.len(), 3);
        for (i, group) in out.candidate_groups.iter().enumerate() {
            assert!(group.contains(&i), "query misses its own particle");
        }
        // The far particle does not share a leaf with the close pair
        assert!(!out.candidate_groups[1].contains(&0));
        assert!(out.candidate_groups[0].contains(&2));
        assert_eq!(
            out.candidates_checked,
            out.candidate_groups.iter().map(Vec::len).sum::<usize>()
        );
        assert_eq!(out.bounds.len(), 5);
        assert_eq!(out.bounds[0], Rect::from_size(800.0, 500.0));
        assert_eq!(
            out.start_positions,
            vec![Vec2::new(100.0, 100.0), Vec2::new(700.0, 400.0), Vec2::new(110.0, 100.0)]
        );
    }

    #[test]
    fn test_start_positions_precede_advance() {
        let mut sim = sim();
        sim.spawn_particle(Vec2::new(100.0, 100.0), Vec2::new(3.0, -2.0), 10.0);
        let out = step(&mut sim);
        assert_eq!(out.start_positions, vec![Vec2::new(100.0, 100.0)]);
        assert_eq!(out.particles[0].pos, Vec2::new(103.0, 98.0));
    }

    #[test]
    fn test_tag_follows_own_query() {
        let mut sim = sim();
        // The big particle's box reaches every quadrant; the small one's
        // stays inside NE and never sees the big one
        sim.spawn_particle(Vec2::new(380.0, 240.0), Vec2::ZERO, 30.0);
        sim.spawn_particle(Vec2::new(402.0, 240.0), Vec2::ZERO, 1.0);
        sim.spawn_particle(Vec2::new(700.0, 400.0), Vec2::ZERO, 10.0);

        let out = step(&mut sim);
        assert_eq!(out.candidate_groups, vec![vec![0, 1, 2], vec![1], vec![2]]);
        assert_eq!(out.particles[0].tag, ColorTag::Colliding);
        assert_eq!(out.particles[1].tag, ColorTag::Idle);
        assert_eq!(out.particles[2].tag, ColorTag::Idle);
    }

    #[test]
    fn test_candidate_recording_can_be_disabled() {
        let settings = Settings {
            record_candidates: false,
            ..Default::default()
        };
        let mut sim = Simulation::new(settings, Viewport::default(), 1).unwrap();
        sim.spawn(Vec2::new(50.0, 50.0));
        let out = step(&mut sim);
        assert!(out.candidate_groups.is_empty());
        assert!(out.start_positions.is_empty());
        assert_eq!(out.candidates_checked, 1);
    }

    #[test]
    fn test_broad_phase_prunes_pairs() {
        let mut sim = sim();
        for row in 0..10 {
            for col in 0..20 {
                let pos = Vec2::new(20.0 + col as f32 * 40.0, 25.0 + row as f32 * 50.0);
                sim.spawn_particle(pos, Vec2::new(1.0, -1.0), 5.0);
            }
        }
        let n = sim.particles().len();
        let out = step(&mut sim);
        assert_eq!(out.collisions, 0);
        assert!(out.candidates_checked < n * n / 5);
    }

    #[test]
    fn test_coincident_particles_stay_finite() {
        let mut sim = sim();
        sim.spawn_particle(Vec2::new(200.0, 200.0), Vec2::new(1.0, 0.0), 10.0);
        sim.spawn_particle(Vec2::new(200.0, 200.0), Vec2::new(-1.0, 0.5), 10.0);
        sim.spawn_particle(Vec2::new(200.0, 200.0), Vec2::ZERO, 10.0);
        for _ in 0..20 {
            step(&mut sim);
        }
        assert!(sim.particles().iter().all(|p| p.pos.is_finite() && p.vel.is_finite()));
    }

    #[test]
    fn test_resize_input() {
        let mut sim = sim();
        let input = TickInput {
            resize: Some(Viewport::new(1000.0, 600.0).unwrap()),
            ..Default::default()
        };
        let out = tick(&mut sim, &input);
        assert_eq!(out.bounds[0], Rect::from_size(1000.0, 600.0));

        // An invalid resize is ignored
        let input = TickInput {
            resize: Some(Viewport {
                width: 0.0,
                height: 600.0,
            }),
            ..Default::default()
        };
        let out = tick(&mut sim, &input);
        assert_eq!(out.bounds[0], Rect::from_size(1000.0, 600.0));
    }

    #[test]
    fn test_frame_output_json() {
        let mut sim = sim();
        sim.spawn_particle(Vec2::new(100.0, 100.0), Vec2::ZERO, 10.0);
        let out = step(&mut sim);
        let json = out.to_json().unwrap();
        let back: FrameOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(back.frame, 1);
        assert_eq!(back.particles, out.particles);
    }

    #[test]
    fn test_determinism() {
        // Two simulations with the same seed evolve identically
        let mut sim1 = sim();
        let mut sim2 = sim();

        let input = TickInput {
            spawns: (0..60)
                .map(|i| Vec2::new(100.0 + (i % 12) as f32 * 50.0, 80.0 + (i / 12) as f32 * 70.0))
                .collect(),
            ..Default::default()
        };
        tick(&mut sim1, &input);
        tick(&mut sim2, &input);
        for _ in 0..200 {
            step(&mut sim1);
            step(&mut sim2);
        }

        assert_eq!(sim1.frame(), sim2.frame());
        assert_eq!(sim1.particles(), sim2.particles());
    }

    #[test]
    fn test_particles_stay_in_viewport() {
        let mut sim = sim();
        for i in 0..80 {
            sim.spawn(Vec2::new(30.0 + (i % 16) as f32 * 47.0, 40.0 + (i / 16) as f32 * 95.0));
        }
        let vp = sim.viewport();
        for _ in 0..500 {
            step(&mut sim);
            for p in sim.particles() {
                let slack = p.vel.length() + 1e-3;
                assert!(p.pos.x >= p.radius - slack && p.pos.x <= vp.width - p.radius + slack);
                assert!(p.pos.y >= p.radius - slack && p.pos.y <= vp.height - p.radius + slack);
            }
        }
    }
}
