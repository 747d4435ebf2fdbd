//! Local (direct) illumination: ambient plus per-light diffuse and
//! specular terms, with shadow testing.
//!
//! Both cosine terms are clamped at zero. A light on the far side of the
//! shading normal contributes nothing, so back-facing geometry never
//! subtracts color and the specular base is never negative.

use crate::hittable::Hit;
use crate::{Color, Ray, Scene};
use whitted_math::{reflect, Vec3};

/// Local color of `hit`, seen along `ray`.
pub fn local_color(scene: &Scene, ray: &Ray, hit: &Hit<'_>) -> Color {
    let material = hit.surface.material();
    let mut color = material.ka * scene.settings().ambient;

    for light in scene.lights() {
        let ray_to_light = light.ray_to_light(hit.point);
        if scene.is_occluded(light.as_ref(), &ray_to_light) {
            continue;
        }

        let intensity = light.intensity(hit.point, &ray_to_light);
        let to_light = ray_to_light.direction();
        color += diffuse(material.kd, intensity, hit.normal, to_light);
        color += specular(
            material.ks,
            material.shininess,
            intensity,
            hit.normal,
            to_light,
            ray.direction(),
        );
    }

    color
}

/// Kd ⊙ I ⊙ max(0, N·L).
pub fn diffuse(kd: Color, intensity: Color, normal: Vec3, to_light: Vec3) -> Color {
    kd * intensity * normal.dot(to_light).max(0.0)
}

/// Ks ⊙ I ⊙ max(0, V·R)^n, where V points back along the viewing ray and R
/// is the incoming light direction mirrored about the normal.
///
/// Zero when the light is behind the surface.
pub fn specular(
    ks: Color,
    shininess: i32,
    intensity: Color,
    normal: Vec3,
    to_light: Vec3,
    view_direction: Vec3,
) -> Color {
    if normal.dot(to_light) <= 0.0 {
        return Color::ZERO;
    }
    let v = -view_direction;
    let r = reflect(-to_light, normal);
    let cos_alpha = v.dot(r).max(0.0);
    ks * intensity * cos_alpha.powi(shininess)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DirectionalLight, Material, PinholeCamera, Plane, PointLight, Sphere, Surface};
    use whitted_math::Interval;

    fn floor_scene(lights: Vec<PointLight>, blocker: bool) -> Scene {
        let mut builder = Scene::builder()
            .camera(PinholeCamera::new(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y, Vec3::NEG_Z, 1.0))
            .ambient(Color::splat(0.5))
            .add_surface(Surface::new(
                Plane::new(Vec3::ZERO, Vec3::Y),
                Material::default()
                    .with_ambient(Color::splat(0.2))
                    .with_diffuse(Color::splat(0.5))
                    .with_specular(Color::ZERO, 1),
            ));
        if blocker {
            builder = builder.add_surface(Surface::new(
                Sphere::new(Vec3::new(-2.0, 2.0, 0.0), 0.5),
                Material::default(),
            ));
        }
        for light in lights {
            builder = builder.add_light(light);
        }
        builder.build().unwrap()
    }

    fn shade_origin(scene: &Scene) -> Color {
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y);
        let hit = scene.closest_hit(&ray).unwrap();
        local_color(scene, &ray, &hit)
    }

    #[test]
    fn test_no_lights_is_ambient_only() {
        let scene = floor_scene(vec![], false);
        assert_eq!(shade_origin(&scene), Color::splat(0.2) * Color::splat(0.5));
    }

    #[test]
    fn test_occluded_light_contributes_nothing() {
        let left = PointLight::new(Vec3::new(-4.0, 4.0, 0.0), Color::ONE);
        let right = PointLight::new(Vec3::new(4.0, 4.0, 0.0), Color::ONE);

        let ambient = Color::splat(0.1);
        let open = shade_origin(&floor_scene(vec![right], true)) - ambient;
        let blocked = shade_origin(&floor_scene(vec![left], true)) - ambient;
        let both = shade_origin(&floor_scene(vec![left, right], true)) - ambient;

        assert!(open.x > 0.0);
        assert!(blocked.length() < 1e-6);
        assert!((both - open).length() < 1e-6);
    }

    #[test]
    fn test_back_facing_light_is_clamped() {
        // Light below the floor, camera above: N·L < 0
        let scene = floor_scene(vec![PointLight::new(Vec3::new(0.0, -3.0, 0.0), Color::ONE)], false);
        assert_eq!(shade_origin(&scene), Color::splat(0.1));
    }

    #[test]
    fn test_diffuse_follows_lambert() {
        let to_light = Vec3::new(1.0, 1.0, 0.0).normalize();
        let d = diffuse(Color::ONE, Color::splat(2.0), Vec3::Y, to_light);
        assert!((d - Color::splat(2.0 * to_light.y)).length() < 1e-6);
        assert_eq!(diffuse(Color::ONE, Color::ONE, Vec3::Y, Vec3::NEG_Y), Color::ZERO);
    }

    #[test]
    fn test_specular_peaks_at_mirror_direction() {
        let to_light = Vec3::new(1.0, 1.0, 0.0).normalize();
        // Viewing ray arriving along the mirror of the light direction
        let view = Vec3::new(1.0, -1.0, 0.0).normalize();
        let peak = specular(Color::ONE, 10, Color::ONE, Vec3::Y, to_light, view);
        assert!((peak - Color::ONE).length() < 1e-5);

        let off = specular(Color::ONE, 10, Color::ONE, Vec3::Y, to_light, Vec3::NEG_Y);
        assert!(off.x < peak.x);
        assert!(off.x >= 0.0);
    }

    #[test]
    fn test_specular_never_negative() {
        let to_light = Vec3::new(1.0, 1.0, 0.0).normalize();
        // Looking toward the light: V·R < 0
        let view = Vec3::new(-1.0, -1.0, 0.0).normalize();
        let s = specular(Color::ONE, 3, Color::ONE, Vec3::Y, to_light, view);
        assert_eq!(s, Color::ZERO);
    }

    #[test]
    fn test_directional_light_diffuse_on_sphere() {
        let scene = Scene::builder()
            .camera(PinholeCamera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z, Vec3::Y, 1.0))
            .ambient(Color::ZERO)
            .add_surface(Surface::new(
                Sphere::new(Vec3::ZERO, 1.0),
                Material::default().with_specular(Color::ZERO, 1),
            ))
            .add_light(DirectionalLight::new(Vec3::NEG_Z, Color::ONE))
            .build()
            .unwrap();

        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let hit = scene.surfaces()[0].intersect(&ray, Interval::positive()).unwrap();
        let color = local_color(&scene, &ray, &hit);
        assert!((color - Color::ONE).length() < 1e-5);
    }
}
