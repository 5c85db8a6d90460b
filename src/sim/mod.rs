//! Particle simulation module
//!
//! All physics lives here. This module must stay pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (particle table order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod particle;
pub mod quadtree;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{collision_normal, distance, have_collided, resolve_collision};
pub use particle::{ColorTag, Particle};
pub use quadtree::{Point, QuadTree};
pub use rect::Rect;
pub use state::{RngState, Simulation};
pub use tick::{FrameOutput, ParticleRef, TickInput, step, tick};
