//! Simulation settings
//!
//! Loaded from JSON by native hosts; validated before a simulation is built.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Simulation settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Spawning ===
    /// Base particle radius
    pub particle_radius: f32,
    /// Random extra radius on spawn
    pub radius_variance: f32,
    /// Spawn velocity scale
    pub base_speed: f32,

    // === Physics ===
    /// Size-to-mass scaling constant
    pub mass_scale: f32,
    /// Quadtree leaf capacity
    pub tree_capacity: usize,

    // === Host ===
    /// Target frames per second (the core does not schedule frames)
    pub frame_rate: u32,
    /// Colour of a particle that overlapped nothing this frame
    pub particle_color: [f32; 4],
    /// Colour of a particle that overlapped another this frame
    pub collision_color: [f32; 4],
    /// Keep per-query candidate groups in the frame output (debug lines)
    pub record_candidates: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            particle_radius: PARTICLE_RADIUS,
            radius_variance: PARTICLE_RADIUS_VARIANCE,
            base_speed: PARTICLE_BASE_SPEED,

            mass_scale: PARTICLE_MASS_SCALE,
            tree_capacity: TREE_CAPACITY,

            frame_rate: FRAME_RATE,
            particle_color: [0.565, 0.447, 0.678, 1.0],  // #9072ad
            collision_color: [0.808, 0.506, 0.831, 1.0], // #ce81d4
            record_candidates: true,
        }
    }
}

impl Settings {
    /// Check every numeric setting; the first bad one is reported
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.particle_radius.is_finite() && self.particle_radius > 0.0) {
            return Err(ConfigError::setting("particle_radius", self.particle_radius));
        }
        if !(self.radius_variance.is_finite() && self.radius_variance >= 0.0) {
            return Err(ConfigError::setting("radius_variance", self.radius_variance));
        }
        if !self.base_speed.is_finite() {
            return Err(ConfigError::setting("base_speed", self.base_speed));
        }
        if !(self.mass_scale.is_finite() && self.mass_scale > 0.0) {
            return Err(ConfigError::setting("mass_scale", self.mass_scale));
        }
        if self.tree_capacity == 0 {
            return Err(ConfigError::setting("tree_capacity", self.tree_capacity));
        }
        if self.frame_rate == 0 {
            return Err(ConfigError::setting("frame_rate", self.frame_rate));
        }
        Ok(())
    }

    /// Time between frames the host should aim for
    pub fn frame_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / f64::from(self.frame_rate.max(1)))
    }

    /// Parse and validate settings; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        log::info!("Loaded settings (capacity {})", settings.tree_capacity);
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// Host viewport in pixels, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: VIEWPORT_WIDTH,
            height: VIEWPORT_HEIGHT,
        }
    }
}

impl Viewport {
    /// Build a viewport, rejecting non-finite or non-positive sizes
    pub fn new(width: f32, height: f32) -> Result<Self, ConfigError> {
        let viewport = Self { width, height };
        viewport.validate()?;
        Ok(viewport)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ok = |v: f32| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(ConfigError::InvalidViewport {
                width: self.width,
                height: self.height,
            })
        }
    }
}
