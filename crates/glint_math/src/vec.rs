//! Vector helpers not provided by glam.

use crate::Vec3;

/// Components below this magnitude count as zero in [`Vec3Ext::near_zero`].
const NEAR_ZERO_EPSILON: f64 = 1e-8;

/// Extra queries on [`Vec3`].
pub trait Vec3Ext {
    /// True if every component is within 1e-8 of zero.
    fn near_zero(&self) -> bool;
}

impl Vec3Ext for Vec3 {
    #[inline]
    fn near_zero(&self) -> bool {
        self.abs().cmplt(Vec3::splat(NEAR_ZERO_EPSILON)).all()
    }
}

/// Scale `v` to unit length.
///
/// The caller must not pass a zero-length vector.
#[inline]
pub fn unit_vector(v: Vec3) -> Vec3 {
    let length = v.length();
    debug_assert!(length > 0.0, "unit_vector called on a zero-length vector");
    v / length
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface with normal `n`.
///
/// `eta_ratio` is the ratio of refractive indices (incident over transmitted).
/// Callers must check for total internal reflection first; the radicand is
/// clamped at zero so grazing angles never produce NaN.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, eta_ratio: f64) -> Vec3 {
    let cos_theta = (-uv).dot(n);
    let r_out_perp = eta_ratio * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).max(0.0).sqrt() * n;
    r_out_perp + r_out_parallel
}
