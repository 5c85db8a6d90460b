//! Simulation state
//!
//! Owns the particle table, the id counter and the seeded RNG. Everything a
//! frame needs is reached through `&mut Simulation`, so spawns can only
//! happen between frames.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::particle::Particle;
use super::rect::Rect;
use crate::error::ConfigError;
use crate::settings::{Settings, Viewport};

/// Seed kept alongside the RNG so a run can be reproduced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct Simulation {
    settings: Settings,
    viewport: Viewport,
    rng_state: RngState,
    rng: Pcg32,
    /// Live particles, in spawn order
    particles: Vec<Particle>,
    /// Frames simulated so far
    frame: u64,
    /// Next particle id
    next_id: u32,
}

impl Simulation {
    /// Create an empty simulation
    pub fn new(settings: Settings, viewport: Viewport, seed: u64) -> Result<Self, ConfigError> {
        settings.validate()?;
        viewport.validate()?;

        let rng_state = RngState::new(seed);
        log::info!(
            "Simulation created: {}x{} viewport, capacity {}, seed {}",
            viewport.width,
            viewport.height,
            settings.tree_capacity,
            seed
        );

        Ok(Self {
            settings,
            viewport,
            rng_state,
            rng: rng_state.to_rng(),
            particles: Vec::new(),
            frame: 0,
            next_id: 0,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn seed(&self) -> u64 {
        self.rng_state.seed
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub(crate) fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub(crate) fn finish_frame(&mut self) -> u64 {
        self.frame += 1;
        self.frame
    }

    /// Root bound for this frame's quadtree
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.viewport.width, self.viewport.height)
    }

    /// Change the viewport (host window resized)
    pub fn resize(&mut self, viewport: Viewport) -> Result<(), ConfigError> {
        viewport.validate()?;
        if viewport != self.viewport {
            log::info!(
                "Viewport resized: {}x{} -> {}x{}",
                self.viewport.width,
                self.viewport.height,
                viewport.width,
                viewport.height
            );
            self.viewport = viewport;
        }
        Ok(())
    }

    /// Allocate a new particle id
    pub fn next_particle_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn a particle at `pos` with a random radius and velocity
    pub fn spawn(&mut self, pos: Vec2) -> u32 {
        let s = &self.settings;
        let radius = s.particle_radius + s.radius_variance * self.rng.random::<f32>();
        let vel = Vec2::new(
            s.base_speed * (0.5 - self.rng.random::<f32>()),
            s.base_speed * (0.5 - self.rng.random::<f32>()),
        );
        self.spawn_particle(pos, vel, radius)
    }

    /// Spawn a particle with exact state
    pub fn spawn_particle(&mut self, pos: Vec2, vel: Vec2, radius: f32) -> u32 {
        let id = self.next_particle_id();
        log::debug!("Spawned particle {id} at {pos:?} (r={radius:.1}, v={vel:?})");
        self.particles.push(Particle::new(id, pos, vel, radius));
        id
    }
}
