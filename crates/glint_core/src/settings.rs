//! Render settings.
//!
//! Every field has a default producing the full-size demo render, so a settings
//! file only needs to name what it changes:
//!
//! ```json
//! { "image_width": 400, "samples_per_pixel": 10, "output": "preview.png" }
//! ```

use std::path::{Path, PathBuf};

use glint_math::{Point3, Vec3};
use glint_renderer::{Camera, CameraSettings, RenderConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid setting `{name}`: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Result type for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Everything the driver needs to produce one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Output image width in pixels
    pub image_width: u32,
    /// Width over height; the height is derived from it
    pub aspect_ratio: f64,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Seed for the single random stream used by scene building and rendering
    pub seed: u64,
    /// Output file (.ppm or .png)
    pub output: PathBuf,
    /// Camera placement and lens
    pub camera: CameraSettings,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            image_width: 1000,
            aspect_ratio: 3.0 / 2.0,
            samples_per_pixel: 50,
            max_depth: 50,
            seed: 0,
            output: PathBuf::from("output.ppm"),
            camera: CameraSettings::default()
                .with_position(
                    Point3::new(13.0, 2.0, 3.0), // look_from
                    Point3::new(0.0, 0.0, 0.0),  // look_at
                    Vec3::new(0.0, 1.0, 0.0),    // vup
                )
                .with_lens(20.0, 0.1, 10.0),
        }
    }
}

impl RenderSettings {
    /// Parse settings from a JSON string and validate them.
    pub fn from_json_str(json: &str) -> SettingsResult<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file and validate them.
    pub fn load(path: impl AsRef<Path>) -> SettingsResult<Self> {
        let path = path.as_ref();
        log::info!("Loading settings from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Image height derived from width and aspect ratio (truncated).
    pub fn image_height(&self) -> u32 {
        (f64::from(self.image_width) / self.aspect_ratio) as u32
    }

    /// Check values the renderer cannot work with.
    pub fn validate(&self) -> SettingsResult<()> {
        fn invalid(name: &'static str, reason: impl Into<String>) -> SettingsResult<()> {
            Err(SettingsError::Invalid {
                name,
                reason: reason.into(),
            })
        }

        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return invalid("aspect_ratio", format!("must be positive, got {}", self.aspect_ratio));
        }
        // Sample coordinates are normalized by (dimension - 1)
        if self.image_width < 2 {
            return invalid("image_width", format!("must be at least 2, got {}", self.image_width));
        }
        if self.image_height() < 2 {
            return invalid(
                "aspect_ratio",
                format!("gives an image height of {}, need at least 2", self.image_height()),
            );
        }
        if self.samples_per_pixel == 0 {
            return invalid("samples_per_pixel", "must be at least 1");
        }

        let camera = &self.camera;
        if !(camera.vfov > 0.0 && camera.vfov < 180.0) {
            return invalid("camera.vfov", format!("must be in (0, 180), got {}", camera.vfov));
        }
        if !(camera.focus_dist.is_finite() && camera.focus_dist > 0.0) {
            return invalid(
                "camera.focus_dist",
                format!("must be positive, got {}", camera.focus_dist),
            );
        }
        if camera.aperture < 0.0 {
            return invalid(
                "camera.aperture",
                format!("must not be negative, got {}", camera.aperture),
            );
        }
        let view = camera.look_from - camera.look_at;
        if view.length_squared() == 0.0 {
            return invalid("camera.look_at", "must differ from look_from");
        }
        if camera.vup.cross(view).length_squared() == 0.0 {
            return invalid("camera.vup", "must not be parallel to the view direction");
        }

        Ok(())
    }

    /// Renderer configuration for these settings.
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            image_width: self.image_width,
            image_height: self.image_height(),
            samples_per_pixel: self.samples_per_pixel,
            max_depth: self.max_depth,
        }
    }

    /// Camera for these settings.
    pub fn camera(&self) -> Camera {
        self.camera.build(self.aspect_ratio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_demo_render() {
        let settings = RenderSettings::default();
        assert_eq!(settings.image_width, 1000);
        assert_eq!(settings.image_height(), 666);
        assert_eq!(settings.samples_per_pixel, 50);
        assert_eq!(settings.max_depth, 50);
        assert_eq!(settings.camera.look_from, Point3::new(13.0, 2.0, 3.0));
        assert_eq!(settings.camera.vfov, 20.0);
        assert_eq!(settings.camera.aperture, 0.1);
        assert_eq!(settings.camera.focus_dist, 10.0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = RenderSettings::from_json_str(
            r#"{ "image_width": 400, "samples_per_pixel": 10, "camera": { "vfov": 30.0 } }"#,
        )
        .unwrap();

        assert_eq!(settings.image_width, 400);
        assert_eq!(settings.image_height(), 266);
        assert_eq!(settings.samples_per_pixel, 10);
        assert_eq!(settings.max_depth, 50);
        assert_eq!(settings.camera.vfov, 30.0);
        // Nested camera fields fall back to the camera's own defaults
        assert_eq!(settings.camera.look_at, Point3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_vectors_parse_as_arrays() {
        let settings = RenderSettings::from_json_str(
            r#"{ "camera": { "look_from": [0.0, 1.0, 5.0], "look_at": [0.0, 1.0, 0.0] } }"#,
        )
        .unwrap();
        assert_eq!(settings.camera.look_from, Point3::new(0.0, 1.0, 5.0));
    }

    #[test]
    fn test_render_config() {
        let config = RenderSettings::default().render_config();
        assert_eq!(config.image_width, 1000);
        assert_eq!(config.image_height, 666);
        assert_eq!(config.samples_per_pixel, 50);
        assert_eq!(config.max_depth, 50);
    }

    #[test]
    fn test_invalid_json() {
        let err = RenderSettings::from_json_str("{ image_width: 4 ").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_rejects_degenerate_dimensions() {
        let err = RenderSettings::from_json_str(r#"{ "image_width": 1 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { name: "image_width", .. }));

        let err = RenderSettings::from_json_str(r#"{ "image_width": 10, "aspect_ratio": 8.0 }"#)
            .unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { name: "aspect_ratio", .. }));
    }

    #[test]
    fn test_rejects_zero_samples() {
        let err = RenderSettings::from_json_str(r#"{ "samples_per_pixel": 0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { name: "samples_per_pixel", .. }));
    }

    #[test]
    fn test_rejects_degenerate_camera() {
        let mut settings = RenderSettings::default();
        settings.camera.look_at = settings.camera.look_from;
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::Invalid { name: "camera.look_at", .. })
        ));

        let mut settings = RenderSettings::default();
        settings.camera = settings
            .camera
            .with_position(Point3::new(0.0, 5.0, 0.0), Point3::ZERO, Vec3::Y);
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::Invalid { name: "camera.vup", .. })
        ));

        let mut settings = RenderSettings::default();
        settings.camera.focus_dist = 0.0;
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::Invalid { name: "camera.focus_dist", .. })
        ));

        let mut settings = RenderSettings::default();
        settings.camera.aperture = -0.5;
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::Invalid { name: "camera.aperture", .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("glint_settings_does_not_exist.json");
        let err = RenderSettings::load(&path).unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join("glint_settings_test_load.json");
        std::fs::write(&path, r#"{ "seed": 99, "output": "frame.png" }"#).unwrap();

        let settings = RenderSettings::load(&path).unwrap();
        assert_eq!(settings.seed, 99);
        assert_eq!(settings.output, PathBuf::from("frame.png"));

        std::fs::remove_file(&path).ok();
    }
}
