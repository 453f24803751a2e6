//! Glint Renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer for spheres with diffuse, metallic and
//! dielectric materials. Rendering is single-threaded and driven by one
//! explicitly passed random number generator.

mod camera;
mod hittable;
mod material;
mod renderer;
mod sphere;

pub use camera::{Camera, CameraSettings};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Dielectric, Lambertian, Material, Metal, ScatterResult};
pub use renderer::{
    color_to_rgb8, linear_to_gamma, ray_color, render, render_pixel, sky_color, ImageBuffer,
    RenderConfig, T_MIN,
};
pub use sphere::Sphere;

/// Re-export the math types used throughout the renderer API
pub use glint_math::{Color, Interval, Point3, Ray, Vec3};
