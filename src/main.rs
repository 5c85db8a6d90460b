//! Headless native driver
//!
//! Spawns a burst of particles, runs a fixed number of frames and reports how
//! much work the quadtree saved over all-pairs checks. Pass a settings JSON
//! path as the first argument to override the defaults.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Quadsim (native) starting...");

    if let Err(e) = headless::run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web hosts drive the library directly
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::Path;

    use glam::Vec2;
    use quadsim::renderer::DrawList;
    use quadsim::sim::{RngState, Simulation, TickInput, tick};
    use quadsim::{ConfigError, Settings, Viewport};
    use rand::Rng;

    const SEED: u64 = 0x5eed;
    const BURST: usize = 300;
    const FRAMES: u64 = 600;

    pub(super) fn run() -> Result<(), ConfigError> {
        let settings = match std::env::args().nth(1) {
            Some(path) => Settings::load(Path::new(&path))?,
            None => Settings::default(),
        };
        let viewport = Viewport::default();
        let report_every = u64::from(settings.frame_rate);
        let mut sim = Simulation::new(settings, viewport, SEED)?;

        // Simulated clicks scattered over the viewport
        let mut rng = RngState::new(SEED.rotate_left(17)).to_rng();
        let spawns = (0..BURST)
            .map(|_| {
                Vec2::new(
                    rng.random_range(0.0..viewport.width),
                    rng.random_range(0.0..viewport.height),
                )
            })
            .collect();
        let mut input = TickInput {
            spawns,
            ..Default::default()
        };

        let mut total_candidates = 0usize;
        let mut total_collisions = 0usize;
        for _ in 0..FRAMES {
            let out = tick(&mut sim, &input);
            input = TickInput::default();

            total_candidates += out.candidates_checked;
            total_collisions += out.collisions;

            if out.frame % report_every == 0 {
                let draw = DrawList::build(&out, sim.settings());
                log::info!(
                    "Frame {}: {} nodes, {} collisions, {} candidates ({} all-pairs)",
                    out.frame,
                    out.bounds.len(),
                    out.collisions,
                    out.candidates_checked,
                    out.particles.len() * out.particles.len()
                );
                log::debug!(
                    "Draw list: {} circles, {} outline vertices, {} candidate line vertices",
                    draw.circles.len(),
                    draw.outlines.len(),
                    draw.candidate_lines.len()
                );
            }
        }

        let n = sim.particles().len();
        let all_pairs = n * n * FRAMES as usize;
        println!(
            "{} particles, {} frames: {} collisions, {} candidates checked vs {} all-pairs ({:.1}%)",
            n,
            FRAMES,
            total_collisions,
            total_candidates,
            all_pairs,
            100.0 * total_candidates as f64 / all_pairs.max(1) as f64
        );
        Ok(())
    }
}
