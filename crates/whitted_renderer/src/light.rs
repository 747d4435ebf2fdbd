//! Light sources.
//!
//! A light answers three questions for a shaded point: which way it is,
//! how bright it is there, and whether a given surface blocks it.

use std::fmt;

use crate::{Color, Ray, Surface};
use whitted_math::{Interval, Vec3};

/// Lower bound on shadow-ray hits.
///
/// Shadow rays start exactly on the shaded surface; hits closer than this
/// are the surface itself and never occlude.
pub const SHADOW_EPSILON: f32 = 1e-3;

/// Trait for light sources.
pub trait Light: Send + Sync + fmt::Debug {
    /// Ray from `point` toward the light.
    fn ray_to_light(&self, point: Vec3) -> Ray;

    /// Light intensity arriving at `point` along `ray_to_light`.
    fn intensity(&self, point: Vec3, ray_to_light: &Ray) -> Color;

    /// Whether `surface` blocks `ray_to_light` between its origin and the light.
    fn is_occluded_by(&self, surface: &Surface, ray_to_light: &Ray) -> bool;
}

/// A light infinitely far away, shining along `direction`.
#[derive(Debug, Clone, Copy)]
pub struct DirectionalLight {
    direction: Vec3,
    intensity: Color,
}

impl DirectionalLight {
    /// `direction` is the direction the light travels; it is normalized.
    pub fn new(direction: Vec3, intensity: Color) -> Self {
        Self {
            direction: direction.normalize(),
            intensity,
        }
    }
}

impl Light for DirectionalLight {
    fn ray_to_light(&self, point: Vec3) -> Ray {
        Ray::new(point, -self.direction)
    }

    fn intensity(&self, _point: Vec3, _ray_to_light: &Ray) -> Color {
        self.intensity
    }

    fn is_occluded_by(&self, surface: &Surface, ray_to_light: &Ray) -> bool {
        surface
            .intersect(ray_to_light, Interval::new(SHADOW_EPSILON, f32::INFINITY))
            .is_some()
    }
}

/// A point light with constant, linear and quadratic attenuation.
#[derive(Debug, Clone, Copy)]
pub struct PointLight {
    position: Vec3,
    intensity: Color,
    kc: f32,
    kl: f32,
    kq: f32,
}

impl PointLight {
    /// Create an unattenuated point light.
    pub fn new(position: Vec3, intensity: Color) -> Self {
        Self {
            position,
            intensity,
            kc: 1.0,
            kl: 0.0,
            kq: 0.0,
        }
    }

    /// Set the attenuation coefficients: I / (kc + kl·d + kq·d²).
    pub fn with_attenuation(mut self, kc: f32, kl: f32, kq: f32) -> Self {
        self.kc = kc;
        self.kl = kl;
        self.kq = kq;
        self
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }
}

impl Light for PointLight {
    fn ray_to_light(&self, point: Vec3) -> Ray {
        Ray::through(point, self.position)
    }

    fn intensity(&self, point: Vec3, _ray_to_light: &Ray) -> Color {
        let d = point.distance(self.position);
        self.intensity / (self.kc + self.kl * d + self.kq * d * d)
    }

    fn is_occluded_by(&self, surface: &Surface, ray_to_light: &Ray) -> bool {
        let distance = ray_to_light.origin().distance(self.position);
        surface
            .intersect(ray_to_light, Interval::new(SHADOW_EPSILON, distance))
            .is_some()
    }
}

/// A point light restricted to a cone around `direction`.
#[derive(Debug, Clone, Copy)]
pub struct SpotLight {
    point: PointLight,
    direction: Vec3,
    cutoff_cos: f32,
}

impl SpotLight {
    /// `cutoff_degrees` is the half-angle of the cone.
    pub fn new(position: Vec3, direction: Vec3, cutoff_degrees: f32, intensity: Color) -> Self {
        Self {
            point: PointLight::new(position, intensity),
            direction: direction.normalize(),
            cutoff_cos: cutoff_degrees.to_radians().cos(),
        }
    }

    pub fn with_attenuation(mut self, kc: f32, kl: f32, kq: f32) -> Self {
        self.point = self.point.with_attenuation(kc, kl, kq);
        self
    }
}

impl Light for SpotLight {
    fn ray_to_light(&self, point: Vec3) -> Ray {
        self.point.ray_to_light(point)
    }

    fn intensity(&self, point: Vec3, ray_to_light: &Ray) -> Color {
        let cos = (-ray_to_light.direction()).dot(self.direction);
        if cos < self.cutoff_cos {
            return Color::ZERO;
        }
        self.point.intensity(point, ray_to_light) * cos
    }

    fn is_occluded_by(&self, surface: &Surface, ray_to_light: &Ray) -> bool {
        self.point.is_occluded_by(surface, ray_to_light)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Material, Plane, Sphere};

    fn blocker() -> Surface {
        Surface::new(Sphere::new(Vec3::new(0.0, 2.0, 0.0), 0.5), Material::default())
    }

    #[test]
    fn test_directional_ray_points_against_travel() {
        let light = DirectionalLight::new(Vec3::NEG_Y, Color::ONE);
        let ray = light.ray_to_light(Vec3::ZERO);
        assert!((ray.direction() - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_directional_occlusion() {
        let light = DirectionalLight::new(Vec3::NEG_Y, Color::ONE);
        let ray = light.ray_to_light(Vec3::ZERO);
        assert!(light.is_occluded_by(&blocker(), &ray));

        let ray = light.ray_to_light(Vec3::new(5.0, 0.0, 0.0));
        assert!(!light.is_occluded_by(&blocker(), &ray));
    }

    #[test]
    fn test_point_light_ignores_surfaces_beyond_it() {
        let light = PointLight::new(Vec3::new(0.0, 1.0, 0.0), Color::ONE);
        let ray = light.ray_to_light(Vec3::ZERO);
        assert!(!light.is_occluded_by(&blocker(), &ray));

        let far = PointLight::new(Vec3::new(0.0, 5.0, 0.0), Color::ONE);
        let ray = far.ray_to_light(Vec3::ZERO);
        assert!(far.is_occluded_by(&blocker(), &ray));
    }

    #[test]
    fn test_point_light_attenuation() {
        let light = PointLight::new(Vec3::new(0.0, 2.0, 0.0), Color::ONE)
            .with_attenuation(1.0, 0.5, 0.25);
        let ray = light.ray_to_light(Vec3::ZERO);
        // 1 / (1 + 0.5*2 + 0.25*4) = 1/3
        let intensity = light.intensity(Vec3::ZERO, &ray);
        assert!((intensity - Color::splat(1.0 / 3.0)).length() < 1e-6);
    }

    #[test]
    fn test_shaded_surface_does_not_shadow_itself() {
        let floor = Surface::new(Plane::new(Vec3::ZERO, Vec3::Y), Material::default());
        let light = DirectionalLight::new(Vec3::new(1.0, -1.0, 0.0), Color::ONE);
        let ray = light.ray_to_light(Vec3::new(3.0, 0.0, -2.0));
        assert!(!light.is_occluded_by(&floor, &ray));
    }

    #[test]
    fn test_occluder_just_past_epsilon_blocks() {
        // A sphere whose surface sits 2·SHADOW_EPSILON above the shaded point
        let radius = 1.0;
        let gap = 2.0 * SHADOW_EPSILON;
        let sphere = Surface::new(
            Sphere::new(Vec3::new(0.0, gap + radius, 0.0), radius),
            Material::default(),
        );
        let light = DirectionalLight::new(Vec3::NEG_Y, Color::ONE);
        assert!(light.is_occluded_by(&sphere, &light.ray_to_light(Vec3::ZERO)));
    }

    #[test]
    fn test_spot_light_cone() {
        let spot = SpotLight::new(Vec3::new(0.0, 4.0, 0.0), Vec3::NEG_Y, 30.0, Color::ONE);

        let below = Vec3::ZERO;
        let inside = spot.intensity(below, &spot.ray_to_light(below));
        assert!((inside - Color::ONE).length() < 1e-5);

        let aside = Vec3::new(10.0, 0.0, 0.0);
        let outside = spot.intensity(aside, &spot.ray_to_light(aside));
        assert_eq!(outside, Color::ZERO);
    }
}
