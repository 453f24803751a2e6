//! Glint Core - the collaborators around the path tracer.
//!
//! This crate provides:
//!
//! - **Settings**: `RenderSettings`, loadable from JSON
//! - **Scene building**: the demo scene of randomly placed spheres
//! - **Output**: PPM and PNG writers for rendered images
//!
//! # Example
//!
//! ```ignore
//! use glint_core::{build_demo_scene, save_image, RenderSettings};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let settings = RenderSettings::load("render.json")?;
//! let mut rng = StdRng::seed_from_u64(settings.seed);
//! let world = build_demo_scene(&mut rng);
//! let config = settings.render_config();
//! let image = glint_renderer::render(&settings.camera(), &world, &config, &mut rng);
//! save_image(&image, &settings.output)?;
//! ```

pub mod output;
pub mod scene;
pub mod settings;

// Re-export commonly used types
pub use output::{save_image, save_png, save_ppm, write_ppm, OutputError, OutputResult};
pub use scene::build_demo_scene;
pub use settings::{RenderSettings, SettingsError, SettingsResult};
