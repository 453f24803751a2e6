//! Camera for ray generation.

use glint_math::{random_in_unit_disk, unit_vector, Point3, Ray, Vec3};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Placement and lens settings for a [`Camera`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    // Camera positioning
    pub look_from: Point3,
    pub look_at: Point3,
    pub vup: Vec3,

    // Lens settings
    pub vfov: f64,       // Vertical field of view in degrees
    pub aperture: f64,   // Lens diameter, 0.0 = pinhole
    pub focus_dist: f64, // Distance from camera to plane of perfect focus
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            look_from: Point3::new(0.0, 0.0, 0.0),
            look_at: Point3::new(0.0, 0.0, -1.0),
            vup: Vec3::new(0.0, 1.0, 0.0),
            vfov: 90.0,
            aperture: 0.0,
            focus_dist: 1.0,
        }
    }
}

impl CameraSettings {
    /// Set camera position.
    pub fn with_position(mut self, look_from: Point3, look_at: Point3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f64, aperture: f64, focus_dist: f64) -> Self {
        self.vfov = vfov;
        self.aperture = aperture;
        self.focus_dist = focus_dist;
        self
    }

    /// Build the camera for an image with the given aspect ratio.
    pub fn build(&self, aspect_ratio: f64) -> Camera {
        Camera::new(self, aspect_ratio)
    }
}

/// Thin-lens camera mapping normalized image coordinates to world rays.
///
/// All derived vectors are computed once in [`Camera::new`].
#[derive(Debug, Clone)]
pub struct Camera {
    origin: Point3,
    lower_left_corner: Point3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    lens_radius: f64,
}

impl Camera {
    /// Create a camera from its settings and the image aspect ratio.
    pub fn new(settings: &CameraSettings, aspect_ratio: f64) -> Self {
        // Calculate viewport dimensions
        let theta = settings.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = aspect_ratio * viewport_height;

        // Calculate camera basis vectors
        let w = unit_vector(settings.look_from - settings.look_at);
        let u = unit_vector(settings.vup.cross(w));
        let v = unit_vector(w.cross(u));

        let origin = settings.look_from;
        let horizontal = settings.focus_dist * viewport_width * u;
        let vertical = settings.focus_dist * viewport_height * v;
        let lower_left_corner =
            origin - horizontal / 2.0 - vertical / 2.0 - settings.focus_dist * w;

        Self {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            lens_radius: settings.aperture / 2.0,
        }
    }

    /// Generate a ray through normalized image coordinates (s, t).
    ///
    /// (0, 0) is the lower-left corner of the viewport and (1, 1) the
    /// upper-right. The origin is jittered across the lens disk.
    pub fn get_ray(&self, s: f64, t: f64, rng: &mut dyn RngCore) -> Ray {
        let rd = self.lens_radius * random_in_unit_disk(rng);
        let offset = self.u * rd.x + self.v * rd.y;

        Ray::new(
            self.origin + offset,
            self.focus_point(s, t) - self.origin - offset,
        )
    }

    /// Point on the focus plane hit by every ray through (s, t).
    fn focus_point(&self, s: f64, t: f64) -> Point3 {
        self.lower_left_corner + s * self.horizontal + t * self.vertical
    }
}
