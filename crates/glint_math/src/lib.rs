//! Glint math - vectors, rays and sampling helpers for the path tracer.
//!
//! All geometry is computed in double precision. `Vec3`, `Point3` and
//! `Color` are the same `glam::DVec3` type under names that document intent.

// Re-export glam's double precision vector for convenience
pub use glam::DVec3;

mod interval;
mod random;
mod ray;
mod vec;

pub use interval::Interval;
pub use random::{
    gen_f64, gen_range, random_in_unit_disk, random_in_unit_sphere, random_unit_vector,
    random_vector,
};
pub use ray::Ray;
pub use vec::{reflect, refract, unit_vector, Vec3Ext};

/// General purpose 3-component vector.
pub type Vec3 = DVec3;

/// A position in world space.
pub type Point3 = DVec3;

/// Linear RGB triple, usually in [0, 1].
pub type Color = DVec3;
