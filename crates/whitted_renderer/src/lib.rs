//! Whitted Renderer - recursive CPU ray tracing.
//!
//! Casts primary rays through every pixel, shades the nearest hit with
//! ambient, diffuse and specular terms against every unoccluded light, and
//! recursively follows mirror reflections and refractions up to a bounded
//! depth. Pixels are rendered in parallel on a rayon pool and assembled in
//! raster order, so renders are deterministic.
//!
//! # Example
//!
//! ```ignore
//! use whitted_renderer::*;
//!
//! let scene = Scene::builder()
//!     .camera(PinholeCamera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z, Vec3::Y, 1.0))
//!     .add_surface(Surface::new(Sphere::new(Vec3::ZERO, 1.0), Material::default()))
//!     .add_light(DirectionalLight::new(Vec3::NEG_Z, Color::ONE))
//!     .build()?;
//!
//! let image = render(&scene, &RenderRequest::new(640, 480, 1.0), &LogSink)?;
//! ```

mod camera;
mod error;
mod hittable;
mod integrator;
mod light;
mod material;
mod plane;
mod renderer;
mod sampler;
mod scene;
mod shading;
mod sphere;
mod triangle;

pub use camera::{PinholeCamera, Viewport};
pub use error::{RenderError, RenderResult, SceneError};
pub use hittable::{Hit, Shape, ShapeHit, Surface};
pub use integrator::{ray_color, secondary_ray, SECONDARY_RAY_EPSILON};
pub use light::{DirectionalLight, Light, PointLight, SpotLight, SHADOW_EPSILON};
pub use material::{Material, Transparency, AIR_REFRACTIVE_INDEX};
pub use plane::Plane;
pub use renderer::{
    color_to_rgb, render, render_cancellable, worker_count, LogSink, RenderLog, RenderRequest,
    MIN_WORKERS,
};
pub use sampler::render_pixel;
pub use scene::{RenderSettings, Scene, SceneBuilder, MAX_ANTI_ALIASING_FACTOR};
pub use shading::{diffuse, local_color, specular};
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export Vec3 and common math types from whitted_math
pub use whitted_math::{Color, Interval, Ray, Vec3};
