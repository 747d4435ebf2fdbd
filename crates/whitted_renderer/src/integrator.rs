//! Recursive color integration.
//!
//! Traces a ray to its closest hit, shades it locally and spawns mirror
//! and refraction rays until the scene's recursion level is reached. The
//! ray tree is walked with an explicit worklist, so very large recursion
//! levels cost heap, not worker stack.

use crate::shading::local_color;
use crate::{Color, Ray, Scene};
use whitted_math::{reflect, refract, Vec3};

/// Distance secondary rays are advanced along their own direction before
/// tracing, so they do not re-hit the surface they leave.
pub const SECONDARY_RAY_EPSILON: f32 = 1e-3;

/// A pending ray in the tree, with the product of the reflection and
/// transmission coefficients along its path.
#[derive(Debug, Clone, Copy)]
struct PendingRay {
    ray: Ray,
    recursion_level: u32,
    weight: f32,
}

/// Compute the color seen along `ray`.
///
/// `recursion_level` is the number of ray generations traced before this
/// one (0 for primary rays). Secondary rays are only spawned while the
/// next generation stays below `max_recursion_level`.
pub fn ray_color(scene: &Scene, ray: &Ray, recursion_level: u32) -> Color {
    let settings = scene.settings();
    let mut color = Color::ZERO;
    let mut pending = vec![PendingRay {
        ray: *ray,
        recursion_level,
        weight: 1.0,
    }];

    while let Some(PendingRay {
        ray,
        recursion_level,
        weight,
    }) = pending.pop()
    {
        let Some(hit) = scene.closest_hit(&ray) else {
            color += weight * settings.background;
            continue;
        };

        color += weight * local_color(scene, &ray, &hit);

        let recursion_level = recursion_level.saturating_add(1);
        if recursion_level >= settings.max_recursion_level {
            continue;
        }

        let material = hit.surface.material();

        // Pushed first so the reflected branch is summed first
        if settings.refractions {
            if let (Some(transparency), Some((n1, n2))) =
                (material.transparency, hit.refractive_indices())
            {
                // Total internal reflection spawns no refraction ray
                if let Some(direction) = refract(ray.direction(), hit.normal, n1 / n2) {
                    pending.push(PendingRay {
                        ray: secondary_ray(hit.point, direction),
                        recursion_level,
                        weight: weight * transparency.intensity,
                    });
                }
            }
        }

        if settings.reflections && material.reflection_intensity > 0.0 {
            let direction = reflect(ray.direction(), hit.normal);
            pending.push(PendingRay {
                ray: secondary_ray(hit.point, direction),
                recursion_level,
                weight: weight * material.reflection_intensity,
            });
        }
    }

    color
}

/// Ray leaving `point` along `direction`, offset past the originating surface.
pub fn secondary_ray(point: Vec3, direction: Vec3) -> Ray {
    let direction = direction.normalize();
    Ray::new(point + direction * SECONDARY_RAY_EPSILON, direction)
}
