//! Mirror reflection and Snell refraction of direction vectors.

use crate::Vec3;

/// Reflect `v` about the normal `n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract the unit direction `v` through a surface with unit normal `n`.
///
/// `n` must face against `v` and `eta` is the ratio n1 / n2 of the
/// incident medium over the transmission medium. Returns `None` under
/// total internal reflection.
pub fn refract(v: Vec3, n: Vec3, eta: f32) -> Option<Vec3> {
    let cos_i = (-v.dot(n)).min(1.0);
    let sin2_t = eta * eta * (1.0 - cos_i * cos_i);
    if sin2_t > 1.0 {
        return None;
    }
    let cos_t = (1.0 - sin2_t).sqrt();
    Some((eta * v + (eta * cos_i - cos_t) * n).normalize())
}
