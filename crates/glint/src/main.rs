//! Glint driver.
//!
//! Usage: `glint [settings.json]`
//!
//! Without a settings file the full-size demo render is produced with default
//! settings. Set `RUST_LOG=debug` to see per-scanline progress.

use anyhow::{Context, Result};
use glint_core::{build_demo_scene, save_image, RenderSettings};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    log::info!("Starting Glint");

    let settings = match std::env::args().nth(1) {
        Some(path) => RenderSettings::load(&path)
            .with_context(|| format!("Failed to load settings from {}", path))?,
        None => RenderSettings::default(),
    };

    // One stream drives both scene building and rendering
    let mut rng = StdRng::seed_from_u64(settings.seed);

    let start = Instant::now();
    let world = build_demo_scene(&mut rng);
    log::info!("Scene built in {:?}", start.elapsed());

    let camera = settings.camera();
    let image = glint_renderer::render(&camera, &world, &settings.render_config(), &mut rng);

    save_image(&image, &settings.output)
        .with_context(|| format!("Failed to save image to {}", settings.output.display()))?;

    Ok(())
}
