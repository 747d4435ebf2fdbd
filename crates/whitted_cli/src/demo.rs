//! Built-in demo scene: a mirror-tinted floor with matte, mirror and glass
//! spheres under a point light, a spot light and a dim sun.

use whitted_renderer::{
    Color, DirectionalLight, Material, PinholeCamera, Plane, PointLight, RenderSettings, Scene,
    SceneError, Sphere, SpotLight, Surface, Triangle, Vec3,
};

pub fn build_scene(settings: RenderSettings) -> Result<Scene, SceneError> {
    let floor = Material::default()
        .with_diffuse(Color::new(0.6, 0.6, 0.55))
        .with_specular(Color::splat(0.2), 5)
        .with_reflection(0.25);

    let matte = Material::default()
        .with_diffuse(Color::new(0.8, 0.25, 0.2))
        .with_specular(Color::splat(0.5), 20);

    let backdrop = Material::default()
        .with_diffuse(Color::new(0.2, 0.35, 0.7))
        .with_specular(Color::ZERO, 1);

    Scene::builder()
        .name("demo")
        .camera(PinholeCamera::new(
            Vec3::new(0.0, 1.5, 7.0),
            Vec3::new(0.0, -0.2, -1.0),
            Vec3::Y,
            1.2,
        ))
        .settings(settings)
        .add_surface(Surface::new(Plane::new(Vec3::new(0.0, -1.0, 0.0), Vec3::Y), floor))
        .add_surface(Surface::new(Sphere::new(Vec3::new(-2.2, 0.0, 0.0), 1.0), matte))
        .add_surface(Surface::new(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 1.0), Material::mirror()))
        .add_surface(Surface::new(Sphere::new(Vec3::new(2.0, 0.0, 1.0), 1.0), Material::glass()))
        .add_surface(Surface::new(
            Triangle::new(
                Vec3::new(-6.0, -1.0, -6.0),
                Vec3::new(6.0, -1.0, -6.0),
                Vec3::new(0.0, 5.0, -6.0),
            ),
            backdrop,
        ))
        .add_light(
            PointLight::new(Vec3::new(4.0, 6.0, 5.0), Color::splat(0.9))
                .with_attenuation(1.0, 0.02, 0.005),
        )
        .add_light(SpotLight::new(
            Vec3::new(-3.0, 5.0, 2.0),
            Vec3::new(0.4, -1.0, -0.3),
            25.0,
            Color::new(0.6, 0.55, 0.4),
        ))
        .add_light(DirectionalLight::new(
            Vec3::new(-0.3, -1.0, -0.4),
            Color::splat(0.25),
        ))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_scene_builds() {
        let scene = build_scene(RenderSettings::default()).unwrap();
        assert_eq!(scene.surfaces().len(), 5);
        assert_eq!(scene.lights().len(), 3);
    }

    #[test]
    fn test_demo_scene_rejects_bad_settings() {
        let settings = RenderSettings {
            anti_aliasing_factor: 5,
            ..RenderSettings::default()
        };
        assert_eq!(
            build_scene(settings).unwrap_err(),
            SceneError::InvalidAntiAliasingFactor(5)
        );
    }
}
