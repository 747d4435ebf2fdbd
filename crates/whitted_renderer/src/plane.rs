//! Infinite plane primitive.

use crate::hittable::{Shape, ShapeHit};
use crate::Ray;
use whitted_math::{Interval, Vec3};

/// Rays closer to parallel than this never hit a plane.
const PARALLEL_EPSILON: f32 = 1e-8;

/// An infinite, two-sided plane through `point` with unit `normal`.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    point: Vec3,
    normal: Vec3,
}

impl Plane {
    /// Create a new plane. `normal` is normalized.
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self {
            point,
            normal: normal.normalize(),
        }
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }
}

impl Shape for Plane {
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<ShapeHit> {
        let denom = ray.direction().dot(self.normal);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = (self.point - ray.origin()).dot(self.normal) / denom;
        if !ray_t.surrounds(t) {
            return None;
        }

        Some(ShapeHit {
            t,
            outward_normal: self.normal,
        })
    }
}
