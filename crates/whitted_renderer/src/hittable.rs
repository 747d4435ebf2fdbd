//! Shape capability, surfaces and intersection records.

use std::fmt;

use crate::{Material, Ray};
use whitted_math::{Interval, Vec3};

/// Raw geometric result of a ray/shape test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeHit {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Unit normal pointing out of the shape
    pub outward_normal: Vec3,
}

/// Trait for geometry that can be intersected by rays.
pub trait Shape: Send + Sync + fmt::Debug {
    /// Find the nearest intersection whose parameter lies strictly inside `ray_t`.
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<ShapeHit>;
}

/// Record of a ray-surface intersection.
///
/// Lives for a single shading evaluation; it borrows the surface it hit.
#[derive(Debug, Clone, Copy)]
pub struct Hit<'a> {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Point of intersection
    pub point: Vec3,
    /// Surface normal at intersection (always points against the ray)
    pub normal: Vec3,
    /// Whether the ray arrived from outside the surface
    pub front_face: bool,
    /// The surface that was hit
    pub surface: &'a Surface,
}

impl<'a> Hit<'a> {
    fn new(ray: &Ray, shape_hit: ShapeHit, surface: &'a Surface) -> Self {
        // If the ray and normal point in the same direction, we're inside
        let front_face = ray.direction().dot(shape_hit.outward_normal) < 0.0;
        let normal = if front_face {
            shape_hit.outward_normal
        } else {
            -shape_hit.outward_normal
        };

        Self {
            t: shape_hit.t,
            point: ray.at(shape_hit.t),
            normal,
            front_face,
            surface,
        }
    }

    /// Refractive indices (n1, n2) of the incident and transmission media,
    /// or `None` if the surface is opaque.
    pub fn refractive_indices(&self) -> Option<(f32, f32)> {
        self.surface.material().refractive_indices(self.front_face)
    }
}

/// A shape paired with the material it is rendered with.
#[derive(Debug)]
pub struct Surface {
    shape: Box<dyn Shape>,
    material: Material,
}

impl Surface {
    /// Create a new surface. Reflection and transmission weights are
    /// clamped to [0, 1].
    pub fn new(shape: impl Shape + 'static, material: Material) -> Self {
        Self {
            shape: Box::new(shape),
            material: material.clamped(),
        }
    }

    /// Get the surface's material.
    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Get the surface's geometry.
    pub fn shape(&self) -> &dyn Shape {
        self.shape.as_ref()
    }

    /// Intersect the surface, orienting the hit normal against the ray.
    pub fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<Hit<'_>> {
        self.shape
            .intersect(ray, ray_t)
            .map(|shape_hit| Hit::new(ray, shape_hit, self))
    }
}
