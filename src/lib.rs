//! Quadsim - quadtree-accelerated 2D particle collisions
//!
//! Core modules:
//! - `sim`: Frame simulation (quadtree broad-phase, elastic collisions, edge reflection)
//! - `renderer`: Host-facing draw data (circle instances, tree outlines, candidate lines)
//! - `settings`: Tunable simulation settings
//! - `error`: Configuration errors

pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::{Settings, Viewport};

/// Simulation defaults
pub mod consts {
    /// Base particle radius (pixels)
    pub const PARTICLE_RADIUS: f32 = 10.0;
    /// Random extra radius added on spawn, in `[0, PARTICLE_RADIUS_VARIANCE)`
    pub const PARTICLE_RADIUS_VARIANCE: f32 = 20.0;
    /// Spawn speed scale; each velocity component lies in `(-speed/2, speed/2]`
    pub const PARTICLE_BASE_SPEED: f32 = 5.0;
    /// Size-to-mass scaling constant `k` (mass = r * 4/3 * PI * k^3)
    pub const PARTICLE_MASS_SCALE: f32 = 5.0;

    /// Max points a quadtree leaf holds before it splits
    pub const TREE_CAPACITY: usize = 2;
    /// Depth at which leaves stop splitting and absorb overflow
    pub const TREE_MAX_DEPTH: u32 = 16;

    /// Host frame rate target
    pub const FRAME_RATE: u32 = 60;

    /// Default viewport
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 500.0;
}
